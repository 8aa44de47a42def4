//! Declarative navigation: route tree, guard, sidebar state, slugs.
//!
//! The route surface mirrors the portal web app:
//!
//! - `/`                                    login
//! - `/new-admission/form`                  public admission form
//! - `/dashboard`                           guarded landing
//! - `/dashboard/<section>/<item>[/<id>]`   guarded views
//! - anything else                          not-found
//!
//! The `/dashboard` subtree is the one protected subtree: it resolves
//! only when a session token is present.

pub mod sidebar;
pub mod slug;

pub use sidebar::SidebarState;
pub use slug::Section;

/// Views reachable inside the guarded dashboard subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    AllStudents,
    StudentDetail,
    MarkAttendance,
    AttendanceReport,
    AdmissionList,
    AdmissionDetail,
    QuizList,
    AssignmentList,
    ScheduleMeeting,
    MeetingList,
    ResultList,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            _ => slug::locate(*self)
                .map(|(_, item)| item.label)
                .unwrap_or("Dashboard"),
        }
    }
}

/// A resolved client route. The optional argument on `Dashboard` is the
/// trailing record id of a deep link (`/dashboard/students/student-details/S-1023`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    AdmissionForm,
    Dashboard(Page, Option<String>),
    NotFound(String),
}

impl Route {
    /// True for the protected subtree.
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::Dashboard(..))
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Route::Dashboard(page, _) => Some(*page),
            _ => None,
        }
    }
}

/// Parse a path string into a route. Unknown paths map to `NotFound`
/// rather than an error; the caller renders the not-found view.
pub fn parse_path(path: &str) -> Route {
    let trimmed = path.trim();
    let segments: Vec<&str> = trimmed
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] => Route::Login,
        ["new-admission", "form"] => Route::AdmissionForm,
        ["dashboard"] => Route::Dashboard(Page::Home, None),
        ["dashboard", section] => match slug::section_by_slug(section) {
            Some(section) => match slug::landing_page(section) {
                Some(page) => Route::Dashboard(page, None),
                None => Route::NotFound(trimmed.to_string()),
            },
            None => Route::NotFound(trimmed.to_string()),
        },
        ["dashboard", section, item] => match slug::page_for(section, item) {
            Some(page) => Route::Dashboard(page, None),
            None => Route::NotFound(trimmed.to_string()),
        },
        ["dashboard", section, item, id] => match slug::page_for(section, item) {
            Some(page) => Route::Dashboard(page, Some((*id).to_string())),
            None => Route::NotFound(trimmed.to_string()),
        },
        _ => Route::NotFound(trimmed.to_string()),
    }
}

/// Canonical path for a route, the inverse of [`parse_path`].
pub fn path_of(route: &Route) -> String {
    match route {
        Route::Login => "/".to_string(),
        Route::AdmissionForm => "/new-admission/form".to_string(),
        Route::Dashboard(Page::Home, _) => "/dashboard".to_string(),
        Route::Dashboard(page, arg) => {
            let base = slug::locate(*page)
                .map(|(section, item)| {
                    format!(
                        "/dashboard/{}/{}",
                        slug::section_slug(section),
                        slug::item_slug(item)
                    )
                })
                .unwrap_or_else(|| "/dashboard".to_string());
            match arg {
                Some(id) => format!("{base}/{id}"),
                None => base,
            }
        }
        Route::NotFound(path) => path.clone(),
    }
}

/// The route guard. Re-evaluated on every navigation: a protected route
/// passes through iff a token is present, otherwise the attempt is
/// discarded and the login route is rendered instead.
pub fn resolve(route: Route, authenticated: bool) -> Route {
    if route.requires_session() && !authenticated {
        Route::Login
    } else {
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_public_routes() {
        assert_eq!(parse_path("/"), Route::Login);
        assert_eq!(parse_path(""), Route::Login);
        assert_eq!(parse_path("/new-admission/form"), Route::AdmissionForm);
    }

    #[test]
    fn test_parse_dashboard_routes() {
        assert_eq!(parse_path("/dashboard"), Route::Dashboard(Page::Home, None));
        assert_eq!(
            parse_path("/dashboard/students/all-students"),
            Route::Dashboard(Page::AllStudents, None)
        );
        assert_eq!(
            parse_path("/dashboard/students/student-details/S-1023"),
            Route::Dashboard(Page::StudentDetail, Some("S-1023".to_string()))
        );
        // Section-only deep link lands on the section's first item.
        assert_eq!(
            parse_path("/dashboard/zoom"),
            Route::Dashboard(Page::ScheduleMeeting, None)
        );
    }

    #[test]
    fn test_parse_unknown_is_not_found() {
        assert!(matches!(parse_path("/nope"), Route::NotFound(_)));
        assert!(matches!(
            parse_path("/dashboard/payroll/salaries"),
            Route::NotFound(_)
        ));
    }

    #[test]
    fn test_path_roundtrip() {
        for path in [
            "/",
            "/new-admission/form",
            "/dashboard",
            "/dashboard/students/all-students",
            "/dashboard/attendance/attendance-report",
            "/dashboard/zoom/schedule-meeting",
            "/dashboard/students/student-details/S-7",
        ] {
            assert_eq!(path_of(&parse_path(path)), path);
        }
    }

    #[test]
    fn test_guard_redirects_anonymous() {
        let protected = Route::Dashboard(Page::AllStudents, None);
        assert_eq!(resolve(protected.clone(), false), Route::Login);
        assert_eq!(resolve(protected.clone(), true), protected);
        // Public routes pass regardless of session.
        assert_eq!(resolve(Route::AdmissionForm, false), Route::AdmissionForm);
        assert_eq!(resolve(Route::Login, true), Route::Login);
    }
}
