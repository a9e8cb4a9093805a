//! Frontdesk Core — shared domain types, validation, and errors.
//!
//! This crate provides the foundational types used across all Frontdesk
//! crates. It has no internal Frontdesk dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: The `Enquiry` entity and its request/response companions
//! - [`validate`]: Submission validation rules

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod types;
pub mod validate;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use types::{
    ClientInfo, DailyCount, Enquiry, EnquiryStatus, EnquirySubmission, ListFilter, Pagination,
    Statistics, StatusCounts, StatusUpdate,
};
pub use validate::validate_submission;
