use axum::{extract::State, response::Html};
use tracing::debug;

use crate::error::ApiError;
use crate::extract::SubmissionBody;
use crate::state::AppState;
use crate::validate::validate_submission;

/// Returned on success; the script sends the browser back to the site.
pub const REDIRECT_SNIPPET: &str = r#"<script src="/scripts/redirect.js"></script>"#;

/// POST /submit: validate, store, then hand the browser the redirect script.
pub async fn submit(
    State(state): State<AppState>,
    SubmissionBody(raw): SubmissionBody,
) -> Result<Html<&'static str>, ApiError> {
    let msg = validate_submission(&raw, &state.email_policy).map_err(|violations| {
        debug!(fields = ?violations.iter().map(|v| v.path.as_str()).collect::<Vec<_>>(), "submission rejected");
        ApiError::Invalid(violations)
    })?;

    // Blocking insert off the async runtime; the response waits for it
    let db = state.clone();
    let id = tokio::task::spawn_blocking(move || db.db.insert_message(&msg)).await??;

    debug!(id, "message stored");
    Ok(Html(REDIRECT_SNIPPET))
}
