use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use postbox_types::api::RawSubmission;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

/// Media types are case-insensitive and may carry parameters.
fn body_kind(content_type: Option<&str>) -> BodyKind {
    let mime = content_type
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
        BodyKind::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else {
        BodyKind::Other
    }
}

/// Submission body read as JSON or as a url-encoded form, chosen by
/// `Content-Type`. Any other content type yields an empty submission so the
/// validator reports every field as missing.
#[derive(Debug)]
pub struct SubmissionBody(pub RawSubmission);

impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = body_kind(req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()));
        if kind == BodyKind::Other {
            return Ok(Self(RawSubmission::default()));
        }

        // Goes through DefaultBodyLimit, so oversized bodies are a 413 here
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let parsed: Result<RawSubmission, String> = match kind {
            BodyKind::Json => serde_json::from_slice(&body).map_err(|e| e.to_string()),
            _ => serde_urlencoded::from_bytes(&body).map_err(|e| e.to_string()),
        };

        parsed
            .map(Self)
            .map_err(|e| ApiError::MalformedBody(e).into_response())
    }
}
