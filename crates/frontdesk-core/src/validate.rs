//! Submission validation rules.
//!
//! Mirrors the checks the public site performs client-side: the four
//! required fields must be non-empty after trimming, and the email must
//! look like `local@domain` with a dot somewhere in the domain. These run
//! before any write; a failure means nothing was persisted.

use crate::error::{Error, Result};
use crate::types::EnquirySubmission;

/// Message returned when any required field is missing.
pub const MISSING_FIELDS: &str =
    "Missing required fields: name, email, subject, message are required";

/// Message returned when the email fails the shape check.
pub const INVALID_EMAIL: &str = "Invalid email format";

/// Validates a submission, expecting it to already be trimmed.
///
/// Returns the first failing rule: required-field presence, then email
/// shape.
pub fn validate_submission(submission: &EnquirySubmission) -> Result<()> {
    if submission.name.is_empty()
        || submission.email.is_empty()
        || submission.subject.is_empty()
        || submission.message.is_empty()
    {
        return Err(Error::validation(MISSING_FIELDS));
    }

    if !is_valid_email(&submission.email) {
        return Err(Error::validation_field("email", INVALID_EMAIL));
    }

    Ok(())
}

/// Checks that an address has the shape `local@domain.tld`.
///
/// One `@`, non-empty local part, no whitespace anywhere, and a dot in
/// the domain with text on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}
