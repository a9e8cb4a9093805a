//! # frontdesk-storage
//!
//! sqlx-backed persistence for the Frontdesk enquiry service.
//!
//! One table, `enquiries`, accessed exclusively through [`EnquiryStore`].
//! The store is the sole writer of enquiry state; nothing above it caches
//! rows across requests. All access goes through a pooled connection and
//! every statement binds its parameters.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod store;

pub use error::{Error, Result};
pub use store::EnquiryStore;
