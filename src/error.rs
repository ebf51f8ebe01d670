//! Unified application error model.
//! Every backend-call failure is converted into one of these variants at the
//! call site and surfaced as a displayable message; nothing here is allowed
//! to take the process down.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppError {
    UserInput { code: String, message: String },
    Auth { code: String, message: String },
    Forbidden { code: String, message: String },
    NotFound { code: String, message: String },
    Conflict { code: String, message: String },
    Network { code: String, message: String },
    Backend { code: String, message: String },
    Io { code: String, message: String },
    Internal { code: String, message: String },
}

impl AppError {
    pub fn code_str(&self) -> &str {
        match self {
            AppError::UserInput { code, .. }
            | AppError::Auth { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Network { code, .. }
            | AppError::Backend { code, .. }
            | AppError::Io { code, .. }
            | AppError::Internal { code, .. } => code.as_str(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::UserInput { message, .. }
            | AppError::Auth { message, .. }
            | AppError::Forbidden { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Conflict { message, .. }
            | AppError::Network { message, .. }
            | AppError::Backend { message, .. }
            | AppError::Io { message, .. }
            | AppError::Internal { message, .. } => message.as_str(),
        }
    }

    pub fn user<S: Into<String>>(code: S, msg: S) -> Self { AppError::UserInput { code: code.into(), message: msg.into() } }
    pub fn auth<S: Into<String>>(code: S, msg: S) -> Self { AppError::Auth { code: code.into(), message: msg.into() } }
    pub fn forbidden<S: Into<String>>(code: S, msg: S) -> Self { AppError::Forbidden { code: code.into(), message: msg.into() } }
    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { AppError::NotFound { code: code.into(), message: msg.into() } }
    pub fn conflict<S: Into<String>>(code: S, msg: S) -> Self { AppError::Conflict { code: code.into(), message: msg.into() } }
    pub fn network<S: Into<String>>(code: S, msg: S) -> Self { AppError::Network { code: code.into(), message: msg.into() } }
    pub fn backend<S: Into<String>>(code: S, msg: S) -> Self { AppError::Backend { code: code.into(), message: msg.into() } }
    pub fn io<S: Into<String>>(code: S, msg: S) -> Self { AppError::Io { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { AppError::Internal { code: code.into(), message: msg.into() } }

    /// Map a non-2xx gateway response to an error variant. The message is the
    /// backend-supplied one when the body carried it, else a generic line.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => AppError::Auth { code: "unauthorized".into(), message },
            403 => AppError::Forbidden { code: "forbidden".into(), message },
            404 => AppError::NotFound { code: "not_found".into(), message },
            409 => AppError::Conflict { code: "conflict".into(), message },
            400..=499 => AppError::UserInput { code: "bad_request".into(), message },
            _ => AppError::Backend { code: "backend_error".into(), message },
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code_str(), self.message())
    }
}

impl std::error::Error for AppError {}

pub type AppResult<T> = Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network { code: "network_error".into(), message: err.to_string() }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io { code: "io_error".into(), message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(AppError::from_status(401, "no".into()), AppError::Auth { .. }));
        assert!(matches!(AppError::from_status(403, "blocked".into()), AppError::Forbidden { .. }));
        assert!(matches!(AppError::from_status(404, "missing".into()), AppError::NotFound { .. }));
        assert!(matches!(AppError::from_status(409, "dup".into()), AppError::Conflict { .. }));
        assert!(matches!(AppError::from_status(422, "bad".into()), AppError::UserInput { .. }));
        assert!(matches!(AppError::from_status(500, "boom".into()), AppError::Backend { .. }));
        assert!(matches!(AppError::from_status(503, "down".into()), AppError::Backend { .. }));
    }

    #[test]
    fn display_carries_code_and_message() {
        let e = AppError::auth("unauthorized", "login required");
        assert_eq!(e.to_string(), "unauthorized: login required");
        assert_eq!(e.code_str(), "unauthorized");
        assert_eq!(e.message(), "login required");
    }
}
