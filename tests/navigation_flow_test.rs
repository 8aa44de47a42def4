//! End-to-end navigation behavior: deep links, guard, sidebar sync.

use khuddam_console::app::{App, AppOptions};
use khuddam_console::core::DataMode;
use khuddam_console::nav::{self, Page, Route, Section};
use khuddam_console::store::FixtureSet;

fn fixture_app() -> App {
    App::new(AppOptions {
        fixtures: FixtureSet::builtin(),
        session_store: None,
        data_mode: DataMode::Fixture,
        api_endpoint: "http://localhost:8000".to_string(),
    })
}

fn signed_in_app() -> App {
    let mut app = fixture_app();
    app.login.email = "admin@khuddam.org".to_string();
    app.login.password = "secret".to_string();
    app.submit_login();
    assert_eq!(app.current_route(), Route::Dashboard(Page::Home, None));
    app
}

#[test]
fn test_anonymous_deep_link_redirects_to_login() {
    let mut app = fixture_app();
    for path in [
        "/dashboard",
        "/dashboard/students/all-students",
        "/dashboard/zoom/schedule-meeting",
    ] {
        app.navigate_path(path);
        assert_eq!(app.current_route(), Route::Login, "path {path}");
    }
    // Public routes are never gated.
    app.navigate_path("/new-admission/form");
    assert_eq!(app.current_route(), Route::AdmissionForm);
}

#[test]
fn test_deep_link_drives_sidebar_expansion() {
    let mut app = signed_in_app();

    app.navigate_path("/dashboard/students/student-details");
    assert_eq!(app.sidebar.expanded(), Some(Section::Students));

    // Regardless of prior state, the matching section wins.
    app.sidebar.toggle(Section::Results);
    app.navigate_path("/dashboard/attendance/attendance-report");
    assert_eq!(app.sidebar.expanded(), Some(Section::Attendance));

    // An unmatched slug leaves the expansion untouched.
    app.navigate_path("/dashboard/payroll/overview");
    assert_eq!(app.sidebar.expanded(), Some(Section::Attendance));
    assert!(matches!(app.current_route(), Route::NotFound(_)));
}

#[test]
fn test_toggle_semantics() {
    let mut app = signed_in_app();
    app.sidebar.toggle(Section::Quizzes);
    assert_eq!(app.sidebar.expanded(), Some(Section::Quizzes));
    app.sidebar.toggle(Section::Quizzes);
    assert_eq!(app.sidebar.expanded(), None);
    app.sidebar.toggle(Section::Zoom);
    app.sidebar.toggle(Section::Students);
    assert_eq!(app.sidebar.expanded(), Some(Section::Students));
}

#[test]
fn test_link_construction_matches_route_parser() {
    // Links built from labels parse back to the page they name.
    let path = nav::slug::link_path("Students Information", "Student Details");
    assert_eq!(path, "/dashboard/students/student-details");
    assert_eq!(
        nav::parse_path(&path),
        Route::Dashboard(Page::StudentDetail, None)
    );

    let path = nav::slug::link_path("Zoom Classes", "Schedule Meeting");
    assert_eq!(path, "/dashboard/zoom/schedule-meeting");
    assert_eq!(
        nav::parse_path(&path),
        Route::Dashboard(Page::ScheduleMeeting, None)
    );

    assert_eq!(nav::slug::slugify("Foo & Bar"), "foo-and-bar");
}

#[test]
fn test_back_navigation_pops_the_stack() {
    let mut app = signed_in_app();
    app.navigate_path("/dashboard/students/all-students");
    app.navigate_path("/dashboard/students/student-details/S-1001");
    app.go_back();
    assert_eq!(
        app.current_route(),
        Route::Dashboard(Page::AllStudents, None)
    );
    app.go_back();
    assert_eq!(app.current_route(), Route::Dashboard(Page::Home, None));
}

#[test]
fn test_sidebar_activate_navigates_to_item() {
    let mut app = signed_in_app();
    app.navigate_path("/dashboard/students/all-students");
    // Cursor starts on the Students header; activating it collapses the
    // section, activating again expands it.
    app.sidebar_cursor = 0;
    app.sidebar_activate();
    assert_eq!(app.sidebar.expanded(), None);
    app.sidebar_activate();
    assert_eq!(app.sidebar.expanded(), Some(Section::Students));

    // Row 2 is the second item of the expanded Students section.
    app.sidebar_cursor = 2;
    app.sidebar_activate();
    assert_eq!(
        app.current_route(),
        Route::Dashboard(Page::StudentDetail, None)
    );
}
