//! Backend abstraction over the portal HTTP API.
//!
//! One `reqwest::Client` lives behind `HttpBackend` for the lifetime of
//! the process; every authenticated response funnels through
//! [`classify`] so the 403 handling has exactly one seam.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Student;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated")]
    NoSession,
    #[error("authorization denied")]
    Forbidden,
    #[error("unexpected response status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Wire shape of `POST /auth/admin_login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted { token: String },
    Rejected { message: String },
}

/// Map a decoded login body to an outcome. `status: true` without a
/// token is still a rejection; the token is what the session stores.
pub fn login_outcome(response: LoginResponse) -> LoginOutcome {
    match (response.status, response.data) {
        (true, Some(token)) if !token.is_empty() => LoginOutcome::Accepted { token },
        (true, _) => LoginOutcome::Rejected {
            message: "login response carried no token".to_string(),
        },
        (false, _) => LoginOutcome::Rejected {
            message: if response.message.is_empty() {
                "Login rejected".to_string()
            } else {
                response.message
            },
        },
    }
}

/// What to do with an authenticated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Pass,
    NotFound,
    Forbidden,
    Failed(u16),
}

/// The single classification point for authenticated responses. A 403
/// is never surfaced to the calling view; the worker turns it into a
/// session-expiry event instead.
pub fn classify(status: StatusCode) -> Disposition {
    if status == StatusCode::FORBIDDEN {
        Disposition::Forbidden
    } else if status == StatusCode::NOT_FOUND {
        Disposition::NotFound
    } else if status.is_success() {
        Disposition::Pass
    } else {
        Disposition::Failed(status.as_u16())
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError>;
    async fn fetch_students(&self, token: &str) -> Result<Vec<Student>, ApiError>;
    /// `Ok(None)` is the not-found case: the fetch succeeded but no
    /// record matched.
    async fn fetch_student(&self, token: &str, id: &str) -> Result<Option<Student>, ApiError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    base: String,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn gate(resp: reqwest::Response) -> Result<Option<reqwest::Response>, ApiError> {
        match classify(resp.status()) {
            Disposition::Pass => Ok(Some(resp)),
            Disposition::NotFound => Ok(None),
            Disposition::Forbidden => Err(ApiError::Forbidden),
            Disposition::Failed(code) => Err(ApiError::Status(code)),
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let resp = self
            .client
            .post(self.url("/auth/admin_login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            let body: LoginResponse = resp
                .json()
                .await
                .map_err(|err| ApiError::Decode(err.to_string()))?;
            Ok(login_outcome(body))
        } else {
            // An authentication rejection is local to the login view;
            // surface the body message when the backend provides one.
            match resp.json::<LoginResponse>().await {
                Ok(body) if !body.message.is_empty() => Ok(LoginOutcome::Rejected {
                    message: body.message,
                }),
                _ => Ok(LoginOutcome::Rejected {
                    message: format!("Login failed ({})", status.as_u16()),
                }),
            }
        }
    }

    async fn fetch_students(&self, token: &str) -> Result<Vec<Student>, ApiError> {
        let resp = self
            .client
            .get(self.url("/users"))
            .bearer_auth(token)
            .send()
            .await?;
        let Some(resp) = Self::gate(resp)? else {
            return Ok(Vec::new());
        };
        let body: Envelope<Vec<Student>> = resp
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(body.data.unwrap_or_default())
    }

    async fn fetch_student(&self, token: &str, id: &str) -> Result<Option<Student>, ApiError> {
        let resp = self
            .client
            .get(self.url(&format!("/users/single/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        let Some(resp) = Self::gate(resp)? else {
            return Ok(None);
        };
        let body: Envelope<Student> = resp
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_dispositions() {
        assert_eq!(classify(StatusCode::OK), Disposition::Pass);
        assert_eq!(classify(StatusCode::CREATED), Disposition::Pass);
        assert_eq!(classify(StatusCode::FORBIDDEN), Disposition::Forbidden);
        assert_eq!(classify(StatusCode::NOT_FOUND), Disposition::NotFound);
        assert_eq!(
            classify(StatusCode::INTERNAL_SERVER_ERROR),
            Disposition::Failed(500)
        );
        assert_eq!(classify(StatusCode::UNAUTHORIZED), Disposition::Failed(401));
    }

    #[test]
    fn test_login_outcome_accepts_token() {
        let outcome = login_outcome(LoginResponse {
            status: true,
            message: "welcome".to_string(),
            data: Some("tok123".to_string()),
        });
        assert_eq!(
            outcome,
            LoginOutcome::Accepted {
                token: "tok123".to_string()
            }
        );
    }

    #[test]
    fn test_login_outcome_rejects_without_token() {
        let outcome = login_outcome(LoginResponse {
            status: true,
            message: String::new(),
            data: None,
        });
        assert!(matches!(outcome, LoginOutcome::Rejected { .. }));
    }

    #[test]
    fn test_login_outcome_surfaces_backend_message() {
        let outcome = login_outcome(LoginResponse {
            status: false,
            message: "Invalid credentials".to_string(),
            data: None,
        });
        assert_eq!(
            outcome,
            LoginOutcome::Rejected {
                message: "Invalid credentials".to_string()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let backend = HttpBackend::new("http://localhost:8000/");
        assert_eq!(backend.url("/users"), "http://localhost:8000/users");
    }
}
