use postbox_types::api::{RawSubmission, Violation};
use postbox_types::models::NewMessage;

use crate::email::EmailPolicy;
use crate::sanitize::clean_text;

pub const INVALID_VALUE: &str = "Invalid value";

/// Turn a raw submission into a storable message, or report every field
/// that is wrong. Never stops at the first failure.
pub fn validate_submission(
    raw: &RawSubmission,
    policy: &EmailPolicy,
) -> Result<NewMessage, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = required_text("name", raw.name.as_deref(), &mut violations);

    let raw_email = raw.email.as_deref().unwrap_or_default();
    let email = policy.normalize(raw_email);
    if email.is_none() {
        violations.push(Violation::field("email", raw_email, INVALID_VALUE));
    }

    let message = required_text("message", raw.message.as_deref(), &mut violations);

    match email {
        Some(email) if violations.is_empty() => Ok(NewMessage { name, email, message }),
        _ => Err(violations),
    }
}

fn required_text(field: &str, raw: Option<&str>, violations: &mut Vec<Violation>) -> String {
    let cleaned = clean_text(raw);
    if cleaned.is_empty() {
        violations.push(Violation::field(field, cleaned.as_str(), INVALID_VALUE));
    }
    cleaned
}
