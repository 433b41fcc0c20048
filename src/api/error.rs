use serde::Serialize;
use thiserror::Error;

/// Errors produced by remote data source calls.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unable to reach server: {0}")]
    NetworkUnreachable(String),

    #[error("authentication failed, please login again")]
    AuthFailed,

    #[error("server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("malformed response: {0}")]
    ParseError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NetworkUnreachable(_) => ErrorKind::NetworkUnreachable,
            ApiError::AuthFailed => ErrorKind::AuthFailed,
            ApiError::ServerError { .. } => ErrorKind::ServerError,
            ApiError::ParseError(_) => ErrorKind::ParseError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NetworkUnreachable,
    AuthFailed,
    ServerError,
    ParseError,
}

/// Cloneable error record kept in fetch state. The view layer renders the
/// message inline; `kind` lets it special-case auth failures (redirect to
/// login) without string matching.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FetchError {
    pub fn is_auth_failure(&self) -> bool {
        self.kind == ErrorKind::AuthFailed
    }
}

impl From<&ApiError> for FetchError {
    fn from(err: &ApiError) -> Self {
        FetchError {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(err: ApiError) -> Self {
        FetchError::from(&err)
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
