//! Record types rendered by the dashboard views.
//!
//! Each detail view renders a fixed, ordered list of label/value pairs;
//! `detail_fields` is that list. The wire shapes match the portal
//! backend's snake_case JSON, which is also the fixture file format.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    Active,
    Left,
}

impl StudentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Left => "left",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub father_name: String,
    pub class: String,
    pub section: String,
    pub roll_no: String,
    pub contact: String,
    pub address: String,
    pub status: StudentStatus,
    pub admitted_on: NaiveDate,
}

impl Student {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Father Name", self.father_name.clone()),
            ("Class", self.class.clone()),
            ("Section", self.section.clone()),
            ("Roll No", self.roll_no.clone()),
            ("Contact", self.contact.clone()),
            ("Address", self.address.clone()),
            ("Status", self.status.label().to_string()),
            ("Admitted On", self.admitted_on.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub student_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: String,
}

impl AttendanceRecord {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Student ID", self.student_id.clone()),
            ("Student", self.student_name.clone()),
            ("Date", self.date.to_string()),
            ("Status", self.status.label().to_string()),
            ("Remarks", self.remarks.clone()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmissionStatus {
    Pending,
    Approved,
    Rejected,
}

impl AdmissionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AdmissionStatus::Pending => "pending",
            AdmissionStatus::Approved => "approved",
            AdmissionStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admission {
    pub id: String,
    pub applicant_name: String,
    pub father_name: String,
    pub requested_class: String,
    pub contact: String,
    pub submitted_on: NaiveDate,
    pub status: AdmissionStatus,
}

impl Admission {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Applicant", self.applicant_name.clone()),
            ("Father Name", self.father_name.clone()),
            ("Requested Class", self.requested_class.clone()),
            ("Contact", self.contact.clone()),
            ("Submitted On", self.submitted_on.to_string()),
            ("Status", self.status.label().to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub class: String,
    pub subject: String,
    pub scheduled_on: NaiveDate,
    pub total_marks: u32,
}

impl Quiz {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Class", self.class.clone()),
            ("Subject", self.subject.clone()),
            ("Scheduled On", self.scheduled_on.to_string()),
            ("Total Marks", self.total_marks.to_string()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Open,
    Closed,
}

impl AssignmentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentStatus::Open => "open",
            AssignmentStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub class: String,
    pub subject: String,
    pub due_on: NaiveDate,
    pub status: AssignmentStatus,
}

impl Assignment {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Title", self.title.clone()),
            ("Class", self.class.clone()),
            ("Subject", self.subject.clone()),
            ("Due On", self.due_on.to_string()),
            ("Status", self.status.label().to_string()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomMeeting {
    pub id: String,
    pub topic: String,
    pub class: String,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: u32,
    pub host: String,
    pub join_link: String,
}

impl ZoomMeeting {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Topic", self.topic.clone()),
            ("Class", self.class.clone()),
            ("Starts At", self.starts_at.format("%Y-%m-%d %H:%M").to_string()),
            ("Duration (min)", self.duration_minutes.to_string()),
            ("Host", self.host.clone()),
            ("Join Link", self.join_link.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub student_id: String,
    pub student_name: String,
    pub class: String,
    pub term: String,
    pub subject: String,
    pub obtained: u32,
    pub total: u32,
}

impl ResultRow {
    pub fn detail_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Student ID", self.student_id.clone()),
            ("Student", self.student_name.clone()),
            ("Class", self.class.clone()),
            ("Term", self.term.clone()),
            ("Subject", self.subject.clone()),
            ("Obtained", self.obtained.to_string()),
            ("Total", self.total.to_string()),
        ]
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.obtained as f64 * 100.0 / self.total as f64
        }
    }
}
