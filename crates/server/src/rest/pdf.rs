use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shared_types::EdgeError;

use crate::backend::BackendError;
use crate::state::AppState;

/// Object served when the request names no file.
pub const DEFAULT_PDF_FILENAME: &str = "latest.pdf";

/// Path segments of `/api/p/{id}` and `/api/p/{id}/{*filename}`.
#[derive(Debug, Deserialize)]
pub struct PdfPath {
    pub id: String,
    pub filename: Option<String>,
}

/// Preprint ids are UUIDs: 36 characters of hex digits and dashes.
pub fn is_valid_preprint_id(id: &str) -> bool {
    id.len() == 36 && id.chars().all(|c| c.is_ascii_hexdigit() || c == '-')
}

/// Storage key for a preprint file, defaulting the filename.
pub fn object_path(id: &str, filename: Option<&str>) -> String {
    let filename = filename
        .map(|f| f.trim_start_matches('/'))
        .filter(|f| !f.is_empty())
        .unwrap_or(DEFAULT_PDF_FILENAME);
    format!("{id}/{filename}")
}

/// Redirect to a short-lived signed download URL for a preprint PDF.
#[utoipa::path(
    get,
    path = "/api/p/{id}/{filename}",
    params(
        ("id" = String, Path, description = "Preprint UUID"),
        ("filename" = String, Path, description = "Stored file name (default latest.pdf)")
    ),
    responses(
        (status = 302, description = "Redirect to the signed URL"),
        (status = 400, description = "Malformed preprint id", body = EdgeError),
        (status = 502, description = "Storage refused to sign", body = EdgeError),
        (status = 500, description = "No signed URL returned", body = EdgeError)
    ),
    tag = "pdf"
)]
pub async fn redirect_to_pdf(
    State(state): State<AppState>,
    Path(path): Path<PdfPath>,
) -> Result<Response, EdgeError> {
    if !is_valid_preprint_id(&path.id) {
        return Err(EdgeError::bad_path(format!(
            "expected /api/p/<uuid>/<file?>, got id {:?}",
            path.id
        )));
    }

    let key = object_path(&path.id, path.filename.as_deref());
    let signed = state
        .backend
        .sign_object(&state.config.pdf_bucket, &key, state.config.sign_expiry_secs)
        .await;

    match signed {
        Ok(Some(url)) => {
            tracing::info!(object = %key, "redirecting to signed PDF URL");
            Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
        }
        Ok(None) => {
            tracing::error!(object = %key, "storage returned no signed URL");
            Err(EdgeError::sign_failed("No signed URL returned").with_status(500))
        }
        Err(BackendError::Status { status, body }) => {
            tracing::warn!(object = %key, status, "storage refused to sign object");
            let details = if body.is_empty() {
                "Failed to sign URL".to_string()
            } else {
                body
            };
            Err(EdgeError::sign_failed(details))
        }
        Err(e) => {
            tracing::error!(object = %key, error = %e, "signing request failed");
            Err(EdgeError::internal(e.to_string()))
        }
    }
}

/// `/api/p` with no preprint id.
pub async fn missing_id() -> EdgeError {
    EdgeError::bad_path("expected /api/p/<uuid>/<file?>, got no id")
}
