//! Static fixture data for the offline data mode.
//!
//! The console ships a built-in dataset so every view renders without a
//! backend. Operators can override any collection by dropping a JSON
//! file named after it (`students.json`, `attendance.json`, ...) under
//! a configured fixture root; roots are scanned recursively.

use std::path::PathBuf;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::domain::{
    Admission, AdmissionStatus, Assignment, AssignmentStatus, AttendanceRecord, AttendanceStatus,
    Quiz, ResultRow, Student, StudentStatus, ZoomMeeting,
};

#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub admissions: Vec<Admission>,
    pub quizzes: Vec<Quiz>,
    pub assignments: Vec<Assignment>,
    pub meetings: Vec<ZoomMeeting>,
    pub results: Vec<ResultRow>,
}

impl FixtureSet {
    /// Built-in dataset, then per-collection overrides from any JSON
    /// files found under the given roots. A file that fails to parse is
    /// skipped with a warning; the built-in collection stays.
    pub fn scan_roots(roots: &[PathBuf]) -> Self {
        let mut set = Self::builtin();
        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_map(|entry| entry.ok())
            {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                match stem {
                    "students" => load_into(path, &mut set.students),
                    "attendance" => load_into(path, &mut set.attendance),
                    "admissions" => load_into(path, &mut set.admissions),
                    "quizzes" => load_into(path, &mut set.quizzes),
                    "assignments" => load_into(path, &mut set.assignments),
                    "meetings" => load_into(path, &mut set.meetings),
                    "results" => load_into(path, &mut set.results),
                    _ => {}
                }
            }
        }
        set
    }

    pub fn builtin() -> Self {
        let students = builtin_students();
        let attendance = builtin_attendance(&students);
        let results = builtin_results(&students);
        Self {
            attendance,
            results,
            admissions: builtin_admissions(),
            quizzes: builtin_quizzes(),
            assignments: builtin_assignments(),
            meetings: builtin_meetings(),
            students,
        }
    }
}

fn load_into<T: DeserializeOwned>(path: &std::path::Path, target: &mut Vec<T>) {
    match std::fs::read_to_string(path).map_err(|err| err.to_string()).and_then(|content| {
        serde_json::from_str::<Vec<T>>(&content).map_err(|err| err.to_string())
    }) {
        Ok(records) => {
            tracing::info!(path = %path.display(), count = records.len(), "loaded fixture file");
            *target = records;
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "skipping unreadable fixture file");
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture dates are valid")
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_hms_opt(h, min, 0)
        .expect("fixture times are valid")
}

fn student(
    id: &str,
    name: &str,
    father_name: &str,
    class: &str,
    section: &str,
    roll_no: &str,
    contact: &str,
    address: &str,
    admitted_on: NaiveDate,
) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        father_name: father_name.to_string(),
        class: class.to_string(),
        section: section.to_string(),
        roll_no: roll_no.to_string(),
        contact: contact.to_string(),
        address: address.to_string(),
        status: StudentStatus::Active,
        admitted_on,
    }
}

fn builtin_students() -> Vec<Student> {
    let mut students = vec![
        student("S-1001", "Ahmad Raza", "Muhammad Raza", "Hifz-1", "A", "1", "+92-300-1111001", "Model Town, Lahore", date(2023, 4, 10)),
        student("S-1002", "Bilal Ahmed", "Rashid Ahmed", "Hifz-1", "A", "2", "+92-300-1111002", "Gulberg III, Lahore", date(2023, 4, 12)),
        student("S-1003", "Usman Tariq", "Tariq Mehmood", "Hifz-1", "B", "3", "+92-301-1111003", "Johar Town, Lahore", date(2023, 5, 2)),
        student("S-1004", "Hamza Yousuf", "Yousuf Kamal", "Nazra-2", "A", "4", "+92-302-1111004", "Iqbal Town, Lahore", date(2023, 8, 21)),
        student("S-1005", "Abdullah Khan", "Imran Khan", "Nazra-2", "A", "5", "+92-303-1111005", "DHA Phase 4, Lahore", date(2024, 1, 8)),
        student("S-1006", "Zaid Hassan", "Hassan Askari", "Nazra-2", "B", "6", "+92-304-1111006", "Wapda Town, Lahore", date(2024, 1, 15)),
        student("S-1007", "Saad Farooq", "Farooq Azam", "Tajweed-1", "A", "7", "+92-305-1111007", "Cantt, Lahore", date(2024, 3, 1)),
        student("S-1008", "Ibrahim Ali", "Ali Murtaza", "Tajweed-1", "A", "8", "+92-306-1111008", "Shadman, Lahore", date(2024, 3, 3)),
        student("S-1009", "Umar Siddiq", "Siddiq Akbar", "Tajweed-1", "B", "9", "+92-307-1111009", "Garden Town, Lahore", date(2024, 9, 18)),
        student("S-1010", "Talha Mahmood", "Mahmood Alam", "Hifz-2", "A", "10", "+92-308-1111010", "Faisal Town, Lahore", date(2025, 2, 5)),
    ];
    students[8].status = StudentStatus::Left;
    students
}

fn builtin_attendance(students: &[Student]) -> Vec<AttendanceRecord> {
    let today = Local::now().date_naive();
    let mut records = Vec::new();
    for day_offset in 0..5i64 {
        let day = today - Duration::days(day_offset);
        for (idx, student) in students.iter().enumerate() {
            if student.status == StudentStatus::Left {
                continue;
            }
            let seed = idx as i64 + day_offset;
            let status = match seed % 7 {
                0 => AttendanceStatus::Absent,
                3 => AttendanceStatus::Leave,
                _ => AttendanceStatus::Present,
            };
            let remarks = match status {
                AttendanceStatus::Leave => "family request".to_string(),
                _ => String::new(),
            };
            records.push(AttendanceRecord {
                student_id: student.id.clone(),
                student_name: student.name.clone(),
                date: day,
                status,
                remarks,
            });
        }
    }
    records
}

fn builtin_admissions() -> Vec<Admission> {
    let mut admissions = Vec::new();
    let applicants = [
        ("A-2001", "Yahya Noor", "Noor Muhammad", "Nazra-1", "+92-310-2222001"),
        ("A-2002", "Musa Javed", "Javed Iqbal", "Nazra-1", "+92-311-2222002"),
        ("A-2003", "Hassaan Qadir", "Qadir Bakhsh", "Hifz-1", "+92-312-2222003"),
        ("A-2004", "Anas Shafiq", "Shafiq Rehman", "Tajweed-1", "+92-313-2222004"),
    ];
    for (idx, (id, name, father, class, contact)) in applicants.iter().enumerate() {
        let status = match idx {
            0 => AdmissionStatus::Approved,
            3 => AdmissionStatus::Rejected,
            _ => AdmissionStatus::Pending,
        };
        admissions.push(Admission {
            id: id.to_string(),
            applicant_name: name.to_string(),
            father_name: father.to_string(),
            requested_class: class.to_string(),
            contact: contact.to_string(),
            submitted_on: date(2025, 7, 20 + idx as u32),
            status,
        });
    }
    admissions
}

fn builtin_quizzes() -> Vec<Quiz> {
    vec![
        Quiz {
            id: "Q-3001".to_string(),
            title: "Surah Al-Mulk Recitation".to_string(),
            class: "Hifz-1".to_string(),
            subject: "Hifz".to_string(),
            scheduled_on: date(2025, 8, 14),
            total_marks: 50,
        },
        Quiz {
            id: "Q-3002".to_string(),
            title: "Tajweed Rules: Noon Sakinah".to_string(),
            class: "Tajweed-1".to_string(),
            subject: "Tajweed".to_string(),
            scheduled_on: date(2025, 8, 20),
            total_marks: 30,
        },
        Quiz {
            id: "Q-3003".to_string(),
            title: "Seerah Chapter 3".to_string(),
            class: "Nazra-2".to_string(),
            subject: "Islamic Studies".to_string(),
            scheduled_on: date(2025, 8, 28),
            total_marks: 40,
        },
    ]
}

fn builtin_assignments() -> Vec<Assignment> {
    vec![
        Assignment {
            id: "AS-4001".to_string(),
            title: "Memorize Surah Yaseen 1-12".to_string(),
            class: "Hifz-1".to_string(),
            subject: "Hifz".to_string(),
            due_on: date(2025, 8, 11),
            status: AssignmentStatus::Open,
        },
        Assignment {
            id: "AS-4002".to_string(),
            title: "Tajweed worksheet: Qalqalah".to_string(),
            class: "Tajweed-1".to_string(),
            subject: "Tajweed".to_string(),
            due_on: date(2025, 8, 9),
            status: AssignmentStatus::Open,
        },
        Assignment {
            id: "AS-4003".to_string(),
            title: "Essay: Rights of Parents".to_string(),
            class: "Nazra-2".to_string(),
            subject: "Islamic Studies".to_string(),
            due_on: date(2025, 7, 30),
            status: AssignmentStatus::Closed,
        },
    ]
}

fn builtin_meetings() -> Vec<ZoomMeeting> {
    vec![
        ZoomMeeting {
            id: "Z-5001".to_string(),
            topic: "Weekly Tarbiyat Session".to_string(),
            class: "All".to_string(),
            starts_at: datetime(2025, 8, 10, 17, 0),
            duration_minutes: 60,
            host: "Qari Abdul Basit".to_string(),
            join_link: "https://zoom.us/j/91120005001".to_string(),
        },
        ZoomMeeting {
            id: "Z-5002".to_string(),
            topic: "Hifz Revision Circle".to_string(),
            class: "Hifz-1".to_string(),
            starts_at: datetime(2025, 8, 12, 18, 30),
            duration_minutes: 45,
            host: "Hafiz Shakeel".to_string(),
            join_link: "https://zoom.us/j/91120005002".to_string(),
        },
        ZoomMeeting {
            id: "Z-5003".to_string(),
            topic: "Parents Orientation".to_string(),
            class: "Nazra-2".to_string(),
            starts_at: datetime(2025, 8, 16, 19, 0),
            duration_minutes: 90,
            host: "Admin Office".to_string(),
            join_link: "https://zoom.us/j/91120005003".to_string(),
        },
    ]
}

fn builtin_results(students: &[Student]) -> Vec<ResultRow> {
    let subjects = ["Hifz", "Tajweed", "Islamic Studies"];
    let mut rows = Vec::new();
    for (idx, student) in students.iter().enumerate() {
        for (sub_idx, subject) in subjects.iter().enumerate() {
            let obtained = 55 + ((idx * 7 + sub_idx * 11) % 45) as u32;
            rows.push(ResultRow {
                student_id: student.id.clone(),
                student_name: student.name.clone(),
                class: student.class.clone(),
                term: "Term 1 2025".to_string(),
                subject: subject.to_string(),
                obtained,
                total: 100,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_set_is_populated() {
        let set = FixtureSet::builtin();
        assert!(!set.students.is_empty());
        assert!(!set.attendance.is_empty());
        assert!(!set.admissions.is_empty());
        assert!(!set.quizzes.is_empty());
        assert!(!set.assignments.is_empty());
        assert!(!set.meetings.is_empty());
        assert!(!set.results.is_empty());
    }

    #[test]
    fn test_attendance_skips_left_students() {
        let set = FixtureSet::builtin();
        let left: Vec<&str> = set
            .students
            .iter()
            .filter(|student| student.status == StudentStatus::Left)
            .map(|student| student.id.as_str())
            .collect();
        assert!(!left.is_empty());
        for record in &set.attendance {
            assert!(!left.contains(&record.student_id.as_str()));
        }
    }

    #[test]
    fn test_scan_roots_overrides_collection() {
        let dir = std::env::temp_dir().join(format!("khuddam-fixtures-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let json = r#"[{
            "id": "S-9001", "name": "Test Student", "father_name": "Test Father",
            "class": "Hifz-1", "section": "A", "roll_no": "99",
            "contact": "+92-300-0000000", "address": "Test Town",
            "status": "active", "admitted_on": "2025-01-01"
        }]"#;
        std::fs::write(dir.join("students.json"), json).unwrap();

        let set = FixtureSet::scan_roots(&[dir.clone()]);
        assert_eq!(set.students.len(), 1);
        assert_eq!(set.students[0].id, "S-9001");
        // Untouched collections keep the builtin data.
        assert!(!set.quizzes.is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
