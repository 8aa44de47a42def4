//! Command parser for the : command system

use crate::core::DataMode;
use crate::nav::Section;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation commands
    Go(String),
    Section(Section),
    Student(String),

    // Session commands
    Logout,

    // Data commands
    ExportCsv,
    ExportJson,
    Mode(DataMode),
    Refresh,

    // Misc
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();

    // A bare path is a deep link.
    if input.starts_with('/') {
        return Command::Go(input.to_string());
    }

    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts.next().map(|s| s.trim().to_string());

    match cmd.to_lowercase().as_str() {
        // Navigation
        "go" | "open" => {
            if let Some(path) = args {
                Command::Go(path)
            } else {
                Command::Unknown(input.to_string())
            }
        }
        "students" | "stu" => Command::Section(Section::Students),
        "attendance" | "att" => Command::Section(Section::Attendance),
        "admissions" | "adm" => Command::Section(Section::Admissions),
        "quizzes" | "quiz" => Command::Section(Section::Quizzes),
        "assignments" | "assign" => Command::Section(Section::Assignments),
        "zoom" => Command::Section(Section::Zoom),
        "results" | "res" => Command::Section(Section::Results),
        "student" => {
            if let Some(id) = args {
                Command::Student(id)
            } else {
                Command::Unknown(input.to_string())
            }
        }

        // Session
        "logout" => Command::Logout,

        // Data
        "export" => match args.as_deref() {
            Some("json") => Command::ExportJson,
            Some("csv") | None => Command::ExportCsv,
            Some(_) => Command::Unknown(input.to_string()),
        },
        "mode" => match args.as_deref() {
            Some("fixture") | Some("offline") => Command::Mode(DataMode::Fixture),
            Some("api") | Some("live") => Command::Mode(DataMode::Api),
            _ => Command::Unknown(input.to_string()),
        },
        "refresh" | "reload" => Command::Refresh,

        // Misc
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,

        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_section_commands() {
        assert_eq!(parse_command("students"), Command::Section(Section::Students));
        assert_eq!(parse_command("att"), Command::Section(Section::Attendance));
        assert_eq!(parse_command("zoom"), Command::Section(Section::Zoom));
    }

    #[test]
    fn test_parse_deep_links() {
        assert_eq!(
            parse_command("/dashboard/students/student-details"),
            Command::Go("/dashboard/students/student-details".to_string())
        );
        assert_eq!(
            parse_command("go /dashboard/zoom/meeting-list"),
            Command::Go("/dashboard/zoom/meeting-list".to_string())
        );
    }

    #[test]
    fn test_parse_student_lookup() {
        assert_eq!(
            parse_command("student S-1003"),
            Command::Student("S-1003".to_string())
        );
        assert_eq!(
            parse_command("student"),
            Command::Unknown("student".to_string())
        );
    }

    #[test]
    fn test_parse_data_commands() {
        assert_eq!(parse_command("export"), Command::ExportCsv);
        assert_eq!(parse_command("export json"), Command::ExportJson);
        assert_eq!(parse_command("mode fixture"), Command::Mode(DataMode::Fixture));
        assert_eq!(parse_command("mode api"), Command::Mode(DataMode::Api));
        assert_eq!(parse_command("refresh"), Command::Refresh);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
        assert_eq!(
            parse_command("mode banana"),
            Command::Unknown("mode banana".to_string())
        );
    }
}
