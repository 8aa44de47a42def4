//! Async worker - drives the backend and applies the 403 interception.
//!
//! Requests are handled one at a time in arrival order; the portal
//! views never have more than one outstanding fetch each.

use std::sync::mpsc::{Receiver, Sender};

use crate::api::backend::{ApiError, Backend, LoginOutcome};
use crate::api::bridge::{ApiEvent, ApiRequest};

/// Run the worker loop until shutdown or channel close.
pub async fn run_worker(
    backend: Box<dyn Backend>,
    mut token: Option<String>,
    cmd_rx: Receiver<ApiRequest>,
    evt_tx: Sender<ApiEvent>,
) {
    while let Ok(request) = cmd_rx.recv() {
        match request {
            ApiRequest::Shutdown => break,

            ApiRequest::SetToken(next) => {
                token = next;
            }

            ApiRequest::Login { email, password } => {
                match backend.login(&email, &password).await {
                    Ok(LoginOutcome::Accepted { token: fresh }) => {
                        token = Some(fresh.clone());
                        let _ = evt_tx.send(ApiEvent::LoginOk { token: fresh });
                    }
                    Ok(LoginOutcome::Rejected { message }) => {
                        let _ = evt_tx.send(ApiEvent::LoginFailed { message });
                    }
                    Err(err) => {
                        tracing::warn!(%err, "login request failed");
                        let _ = evt_tx.send(ApiEvent::LoginFailed {
                            message: err.to_string(),
                        });
                    }
                }
            }

            ApiRequest::FetchStudents => {
                let event = match token.as_deref() {
                    None => failure("student list", ApiError::NoSession, &mut token),
                    Some(bearer) => match backend.fetch_students(bearer).await {
                        Ok(students) => ApiEvent::StudentsReady { students },
                        Err(err) => failure("student list", err, &mut token),
                    },
                };
                let _ = evt_tx.send(event);
            }

            ApiRequest::FetchStudent { id } => {
                let event = match token.as_deref() {
                    None => failure("student record", ApiError::NoSession, &mut token),
                    Some(bearer) => match backend.fetch_student(bearer, &id).await {
                        Ok(student) => ApiEvent::StudentReady {
                            id,
                            student: student.map(Box::new),
                        },
                        Err(err) => failure("student record", err, &mut token),
                    },
                };
                let _ = evt_tx.send(event);
            }
        }
    }
}

/// Turn a request error into the event the TUI should see. A 403 drops
/// the worker's token and becomes `SessionExpired`; the per-request
/// failure event is never emitted for it, so the calling view's error
/// handling stays untouched.
fn failure(what: &str, err: ApiError, token: &mut Option<String>) -> ApiEvent {
    match err {
        ApiError::Forbidden => {
            *token = None;
            tracing::warn!(what, "authorization denied, expiring session");
            ApiEvent::SessionExpired
        }
        other => {
            tracing::debug!(what, err = %other, "request failed");
            ApiEvent::RequestFailed {
                what: what.to_string(),
                message: other.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_becomes_session_expiry_and_drops_token() {
        let mut token = Some("tok123".to_string());
        let event = failure("student list", ApiError::Forbidden, &mut token);
        assert!(matches!(event, ApiEvent::SessionExpired));
        assert_eq!(token, None);
    }

    #[test]
    fn test_other_errors_stay_local_to_the_request() {
        let mut token = Some("tok123".to_string());
        let event = failure("student record", ApiError::Status(500), &mut token);
        match event {
            ApiEvent::RequestFailed { what, .. } => assert_eq!(what, "student record"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(token, Some("tok123".to_string()));
    }
}
