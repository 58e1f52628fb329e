use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error codes returned by the edge functions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EdgeErrorKind {
    /// The backend answered with a non-success status.
    BackendError,
    /// The backend could not be reached or answered with garbage.
    BackendUnreachable,
    InvalidPage,
    BadPath,
    SignFailed,
    MethodNotAllowed,
    InternalError,
}

impl EdgeErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeErrorKind::BackendError => "backend_error",
            EdgeErrorKind::BackendUnreachable => "backend_unreachable",
            EdgeErrorKind::InvalidPage => "invalid_page",
            EdgeErrorKind::BadPath => "bad_path",
            EdgeErrorKind::SignFailed => "sign_failed",
            EdgeErrorKind::MethodNotAllowed => "method_not_allowed",
            EdgeErrorKind::InternalError => "internal_error",
        }
    }

    fn default_status(&self) -> u16 {
        match self {
            EdgeErrorKind::BackendError => 502,
            EdgeErrorKind::BackendUnreachable => 502,
            EdgeErrorKind::InvalidPage => 400,
            EdgeErrorKind::BadPath => 400,
            EdgeErrorKind::SignFailed => 502,
            EdgeErrorKind::MethodNotAllowed => 405,
            EdgeErrorKind::InternalError => 500,
        }
    }
}

impl fmt::Display for EdgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON error envelope: `{ "error": "<code>", "details": "<text>" }`.
///
/// The HTTP status is carried next to the envelope rather than inside it, so
/// a relayed backend failure keeps the backend's own status code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EdgeError {
    pub error: EdgeErrorKind,
    #[serde(default)]
    pub details: String,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl EdgeError {
    pub fn new(kind: EdgeErrorKind, details: impl Into<String>) -> Self {
        Self {
            error: kind,
            details: details.into(),
            status: None,
        }
    }

    /// Relay a failed backend response verbatim, keeping its status code.
    pub fn backend(status: u16, body: impl Into<String>) -> Self {
        Self::new(EdgeErrorKind::BackendError, body).with_status(status)
    }

    pub fn unreachable(details: impl Into<String>) -> Self {
        Self::new(EdgeErrorKind::BackendUnreachable, details)
    }

    pub fn invalid_page(raw: &str) -> Self {
        Self::new(
            EdgeErrorKind::InvalidPage,
            format!("page must be a positive integer, got {raw:?}"),
        )
    }

    pub fn bad_path(details: impl Into<String>) -> Self {
        Self::new(EdgeErrorKind::BadPath, details)
    }

    pub fn sign_failed(details: impl Into<String>) -> Self {
        Self::new(EdgeErrorKind::SignFailed, details)
    }

    pub fn method_not_allowed() -> Self {
        Self::new(EdgeErrorKind::MethodNotAllowed, "Method not allowed")
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(EdgeErrorKind::InternalError, details)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Status code this error is served with.
    pub fn status_code_u16(&self) -> u16 {
        self.status.unwrap_or_else(|| self.error.default_status())
    }

    /// Parse an error envelope out of a response body, if it is one.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

impl fmt::Display for EdgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.details)
    }
}

impl std::error::Error for EdgeError {}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for EdgeError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
