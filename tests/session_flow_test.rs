//! Session lifecycle against the real store: login persistence, logout,
//! and the global 403 handling.

use std::path::PathBuf;

use khuddam_console::api::ApiEvent;
use khuddam_console::app::{App, AppOptions, DetailState};
use khuddam_console::core::DataMode;
use khuddam_console::nav::{Page, Route};
use khuddam_console::store::{FixtureSet, SessionStore};

fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "khuddam-flow-{name}-{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn app_with_store(path: &PathBuf, mode: DataMode) -> App {
    let store = SessionStore::open(path).expect("open session store");
    App::new(AppOptions {
        fixtures: FixtureSet::builtin(),
        session_store: Some(store),
        data_mode: mode,
        api_endpoint: "http://localhost:8000".to_string(),
    })
}

#[test]
fn test_login_success_persists_token_and_lands_on_dashboard() {
    let path = temp_db("login");
    let mut app = app_with_store(&path, DataMode::Api);

    app.login.email = "admin@khuddam.org".to_string();
    app.login.password = "secret".to_string();
    app.submit_login();
    assert!(app.login.submitting);

    // The worker answered the login request with status true.
    app.apply_api_event(ApiEvent::LoginOk {
        token: "tok123".to_string(),
    });

    assert_eq!(app.session.token(), Some("tok123"));
    assert_eq!(app.current_route(), Route::Dashboard(Page::Home, None));
    assert!(!app.login.submitting);

    // Persisted: a fresh store sees the same token.
    let reopened = SessionStore::open(&path).expect("reopen");
    assert_eq!(reopened.load_token().unwrap(), Some("tok123".to_string()));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_restored_session_survives_restart() {
    let path = temp_db("restore");
    {
        let store = SessionStore::open(&path).expect("open");
        store.save_token("tok-restored").unwrap();
    }
    let mut app = app_with_store(&path, DataMode::Fixture);
    assert!(app.session.is_authenticated());
    app.navigate_path("/dashboard/results/result-list");
    assert_eq!(app.current_route(), Route::Dashboard(Page::ResultList, None));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_login_rejection_shows_backend_message() {
    let path = temp_db("reject");
    let mut app = app_with_store(&path, DataMode::Api);
    app.login.email = "admin@khuddam.org".to_string();
    app.login.password = "wrong".to_string();
    app.submit_login();
    app.apply_api_event(ApiEvent::LoginFailed {
        message: "Invalid credentials".to_string(),
    });
    assert!(!app.login.submitting);
    assert_eq!(app.login.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(app.current_route(), Route::Login);
    assert!(!app.session.is_authenticated());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_forbidden_wipes_store_and_hard_resets() {
    let path = temp_db("forbidden");
    let mut app = app_with_store(&path, DataMode::Api);

    app.login.email = "admin@khuddam.org".to_string();
    app.login.password = "secret".to_string();
    app.submit_login();
    app.apply_api_event(ApiEvent::LoginOk {
        token: "tok123".to_string(),
    });

    // A detail fetch is in flight when the 403 lands.
    app.navigate(Route::Dashboard(
        Page::StudentDetail,
        Some("S-1001".to_string()),
    ));
    assert_eq!(app.student_detail, DetailState::Loading);

    app.apply_api_event(ApiEvent::SessionExpired);

    // Session cleared first, then the hard reset to the login route.
    assert!(!app.session.is_authenticated());
    let reopened = SessionStore::open(&path).expect("reopen");
    assert_eq!(reopened.load_token().unwrap(), None);
    assert_eq!(app.current_route(), Route::Login);
    // The view-local error handler never saw the 403.
    assert_eq!(app.student_detail, DetailState::Idle);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_logout_clears_persisted_state() {
    let path = temp_db("logout");
    let mut app = app_with_store(&path, DataMode::Fixture);
    app.login.email = "admin@khuddam.org".to_string();
    app.login.password = "secret".to_string();
    app.submit_login();
    assert!(app.session.is_authenticated());

    app.logout();
    assert!(!app.session.is_authenticated());
    assert_eq!(app.current_route(), Route::Login);
    let reopened = SessionStore::open(&path).expect("reopen");
    assert_eq!(reopened.load_token().unwrap(), None);
    let _ = std::fs::remove_file(&path);
}
