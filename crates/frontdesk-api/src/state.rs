//! Shared request state.

use std::sync::Arc;

use frontdesk_mail::MailDispatcher;
use frontdesk_storage::EnquiryStore;

/// State handed to every request handler.
///
/// Cheap to clone: the store carries a pooled connection and the
/// dispatcher sits behind an `Arc`. This is the only state shared
/// between requests; no enquiry data is cached here.
#[derive(Clone)]
pub struct AppState {
    /// Persistence layer, sole writer of enquiry rows.
    pub store: EnquiryStore,
    /// Mail dispatcher for the two best-effort sends.
    pub mailer: Arc<MailDispatcher>,
    /// Whether 500 responses may carry error detail.
    pub dev_mode: bool,
}

impl AppState {
    /// Bundles the injected components into request state.
    pub fn new(store: EnquiryStore, mailer: Arc<MailDispatcher>, dev_mode: bool) -> Self {
        Self {
            store,
            mailer,
            dev_mode,
        }
    }
}
