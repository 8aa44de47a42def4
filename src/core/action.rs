//! Actions that modules can return to communicate with the app

use crate::nav::Page;

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone)]
pub enum Action {
    /// No action needed
    None,

    /// Navigate to a route
    Navigate(NavigateTarget),

    /// Copy text to clipboard context
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// End the session and return to the login route
    Logout,

    /// Request quit
    Quit,
}

/// Navigation targets
#[derive(Debug, Clone)]
pub enum NavigateTarget {
    /// Pop back to the previous view
    Back,
    /// Go to the dashboard landing view
    Home,
    /// Go to a dashboard page
    Page(Page),
    /// Deep link by path string
    Path(String),
    /// Open a specific student's detail view
    Student(String),
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
