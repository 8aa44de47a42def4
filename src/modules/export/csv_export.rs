//! CSV Export
//!
//! Writes student, attendance, admission, and result lists to CSV files.

use std::path::Path;

use crate::domain::{Admission, AttendanceRecord, ResultRow, Student};

/// Write students to CSV file
pub fn write_students(path: &Path, students: &[Student]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "name",
        "father_name",
        "class",
        "section",
        "roll_no",
        "contact",
        "address",
        "status",
        "admitted_on",
    ])?;

    for student in students {
        wtr.write_record([
            student.id.clone(),
            student.name.clone(),
            student.father_name.clone(),
            student.class.clone(),
            student.section.clone(),
            student.roll_no.clone(),
            student.contact.clone(),
            student.address.clone(),
            student.status.label().to_string(),
            student.admitted_on.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(students.len())
}

/// Write attendance records to CSV file
pub fn write_attendance(
    path: &Path,
    records: &[AttendanceRecord],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["student_id", "student_name", "date", "status", "remarks"])?;

    for record in records {
        wtr.write_record([
            record.student_id.clone(),
            record.student_name.clone(),
            record.date.to_string(),
            record.status.label().to_string(),
            record.remarks.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Write admissions to CSV file
pub fn write_admissions(
    path: &Path,
    admissions: &[Admission],
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "applicant_name",
        "father_name",
        "requested_class",
        "contact",
        "submitted_on",
        "status",
    ])?;

    for admission in admissions {
        wtr.write_record([
            admission.id.clone(),
            admission.applicant_name.clone(),
            admission.father_name.clone(),
            admission.requested_class.clone(),
            admission.contact.clone(),
            admission.submitted_on.to_string(),
            admission.status.label().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(admissions.len())
}

/// Write result rows to CSV file
pub fn write_results(path: &Path, rows: &[ResultRow]) -> Result<usize, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "student_id",
        "student_name",
        "class",
        "term",
        "subject",
        "obtained",
        "total",
    ])?;

    for row in rows {
        wtr.write_record([
            row.student_id.clone(),
            row.student_name.clone(),
            row.class.clone(),
            row.term.clone(),
            row.subject.clone(),
            row.obtained.to_string(),
            row.total.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(rows.len())
}
