pub mod records;

pub use records::{
    Admission, AdmissionStatus, AssignmentStatus, AttendanceRecord, AttendanceStatus, Assignment,
    Quiz, ResultRow, Student, StudentStatus, ZoomMeeting,
};
