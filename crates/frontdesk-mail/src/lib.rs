//! # frontdesk-mail
//!
//! SMTP mail dispatch for the Frontdesk enquiry service.
//!
//! Two sends happen per accepted enquiry, both best-effort: a
//! confirmation to the submitter and a notification to the admin
//! mailbox. Failures are the caller's to log and swallow; nothing in
//! this crate ever fails a submission.
//!
//! The dispatcher is an owned instance injected into request state, not
//! a process-wide transport. When SMTP settings are absent it runs
//! disabled and every send becomes a logged no-op, which is also how the
//! test suites use it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod dispatcher;
pub mod error;
pub mod templates;

pub use dispatcher::{MailDispatcher, MailerConfig};
pub use error::{MailError, Result};
