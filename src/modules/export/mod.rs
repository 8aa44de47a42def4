//! Export Module
//!
//! Writes the list behind the current view to a file under the data
//! directory's `exports/`. Students, attendance, admissions, and
//! results export as CSV by default; quizzes, assignments, and meetings
//! always export as JSON. The `:export json` command forces JSON for
//! everything. Exports respect the active filter.

mod csv_export;
mod json_export;

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use crate::app::App;
use crate::config;
use crate::core::{Action, NotifyLevel};
use crate::nav::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Get the export directory path, creating it if needed
fn get_export_dir() -> std::io::Result<PathBuf> {
    let export_dir = config::data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".khuddam-console").join("exports"));
    fs::create_dir_all(&export_dir)?;
    Ok(export_dir)
}

/// Generate a timestamped filename
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Export the list behind the current view.
pub fn export_current_view(app: &App, format: ExportFormat) -> Action {
    let Some(page) = app.current_page() else {
        return Action::Notify(
            "Nothing to export in this view".to_string(),
            NotifyLevel::Warn,
        );
    };

    match page {
        Page::AllStudents | Page::StudentDetail => {
            let rows = app.filtered_students_cloned();
            export_rows("students", rows, format, |path, rows| {
                csv_export::write_students(path, rows)
            })
        }
        Page::MarkAttendance | Page::AttendanceReport => {
            let rows = app.filtered_attendance_cloned();
            export_rows("attendance", rows, format, |path, rows| {
                csv_export::write_attendance(path, rows)
            })
        }
        Page::AdmissionList | Page::AdmissionDetail => {
            let rows = app.filtered_admissions_cloned();
            export_rows("admissions", rows, format, |path, rows| {
                csv_export::write_admissions(path, rows)
            })
        }
        Page::ResultList => {
            let rows = app.filtered_results_cloned();
            export_rows("results", rows, format, |path, rows| {
                csv_export::write_results(path, rows)
            })
        }
        Page::QuizList => export_json("quizzes", &app.quizzes),
        Page::AssignmentList => export_json("assignments", &app.assignments),
        Page::MeetingList | Page::ScheduleMeeting => export_json("meetings", &app.meetings),
        Page::Home => Action::Notify(
            "Nothing to export in this view".to_string(),
            NotifyLevel::Warn,
        ),
    }
}

fn export_rows<T, F>(prefix: &str, rows: Vec<T>, format: ExportFormat, write_csv: F) -> Action
where
    T: Serialize,
    F: Fn(&std::path::Path, &[T]) -> Result<usize, Box<dyn std::error::Error>>,
{
    if rows.is_empty() {
        return Action::Notify(format!("No {prefix} to export"), NotifyLevel::Warn);
    }

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let extension = match format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    let filename = generate_filename(prefix, extension);
    let path = export_dir.join(&filename);

    let written = match format {
        ExportFormat::Csv => write_csv(&path, &rows),
        ExportFormat::Json => json_export::write_records(&path, &rows),
    };

    match written {
        Ok(count) => Action::Notify(
            format!("Exported {count} {prefix} to {}", path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}

fn export_json<T: Serialize>(prefix: &str, rows: &[T]) -> Action {
    if rows.is_empty() {
        return Action::Notify(format!("No {prefix} to export"), NotifyLevel::Warn);
    }

    let export_dir = match get_export_dir() {
        Ok(dir) => dir,
        Err(e) => {
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            )
        }
    };

    let filename = generate_filename(prefix, "json");
    let path = export_dir.join(&filename);

    match json_export::write_records(&path, rows) {
        Ok(count) => Action::Notify(
            format!("Exported {count} {prefix} to {}", path.display()),
            NotifyLevel::Info,
        ),
        Err(e) => Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error),
    }
}
