//! The `Enquiry` entity and its request/response companion types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

use crate::error::Error;

// ============================================================================
// EnquiryStatus
// ============================================================================

/// Lifecycle stage of an enquiry.
///
/// Persisted as lowercase snake_case text. No other value may reach the
/// storage layer; unknown strings are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum EnquiryStatus {
    /// Freshly submitted, not yet looked at.
    New,
    /// An operator is working on it.
    InProgress,
    /// A reply has been sent to the submitter.
    Responded,
    /// No further action expected.
    Closed,
}

impl EnquiryStatus {
    /// All four lifecycle values, in lifecycle order.
    pub const ALL: [EnquiryStatus; 4] = [
        EnquiryStatus::New,
        EnquiryStatus::InProgress,
        EnquiryStatus::Responded,
        EnquiryStatus::Closed,
    ];

    /// The stored text form of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::InProgress => "in_progress",
            EnquiryStatus::Responded => "responded",
            EnquiryStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(EnquiryStatus::New),
            "in_progress" => Ok(EnquiryStatus::InProgress),
            "responded" => Ok(EnquiryStatus::Responded),
            "closed" => Ok(EnquiryStatus::Closed),
            other => Err(Error::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Enquiry
// ============================================================================

/// A single contact-form submission record.
///
/// `id`, `created_at`, `ip_address`, and `user_agent` are assigned at
/// insert time and immutable afterwards. Only `status`, `admin_notes`,
/// and `updated_at` change post-creation, and only through the status
/// update operation.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Enquiry {
    /// Server-generated surrogate key.
    pub id: i64,
    /// Submitter's name.
    pub name: String,
    /// Submitter's email address.
    pub email: String,
    /// Submitter's phone number, if provided.
    pub phone: Option<String>,
    /// Enquiry subject line.
    pub subject: String,
    /// Enquiry body.
    pub message: String,
    /// Service category the enquiry relates to, if provided.
    pub service_type: Option<String>,
    /// Network address of the submitting request.
    pub ip_address: Option<String>,
    /// User-agent string of the submitting request.
    pub user_agent: String,
    /// Current lifecycle stage.
    pub status: EnquiryStatus,
    /// Operator notes, set only through status updates.
    pub admin_notes: Option<String>,
    /// When the enquiry was inserted.
    pub created_at: DateTime<Utc>,
    /// When the enquiry last changed.
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Request inputs
// ============================================================================

/// Input for the public submission operation.
#[derive(Debug, Clone, Deserialize)]
pub struct EnquirySubmission {
    /// Submitter's name (required).
    #[serde(default)]
    pub name: String,
    /// Submitter's email (required).
    #[serde(default)]
    pub email: String,
    /// Submitter's phone number (optional).
    #[serde(default)]
    pub phone: Option<String>,
    /// Subject line (required).
    #[serde(default)]
    pub subject: String,
    /// Enquiry body (required).
    #[serde(default)]
    pub message: String,
    /// Service category (optional).
    #[serde(default)]
    pub service_type: Option<String>,
}

impl EnquirySubmission {
    /// Returns a copy with all text fields trimmed and empty optionals
    /// collapsed to `None`.
    pub fn trimmed(&self) -> Self {
        let clean = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: clean(&self.phone),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            service_type: clean(&self.service_type),
        }
    }
}

/// Network details captured from the submitting request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    /// Client network address, when resolvable.
    pub ip_address: Option<String>,
    /// Client user-agent string.
    pub user_agent: String,
}

/// Input for the status update operation.
///
/// `admin_notes: None` means "leave the stored value alone", never
/// "clear it".
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    /// The new lifecycle stage.
    pub status: EnquiryStatus,
    /// Replacement operator notes, if any.
    pub admin_notes: Option<String>,
}

/// Filter and paging parameters for the listing operation.
#[derive(Debug, Clone)]
pub struct ListFilter {
    /// Restrict to one status; `None` returns all rows.
    pub status: Option<EnquiryStatus>,
    /// 1-based page number.
    pub page: u32,
    /// Rows per page.
    pub limit: u32,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            status: None,
            page: 1,
            limit: 20,
        }
    }
}

impl ListFilter {
    /// Row offset for the current page.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1) * self.limit
    }
}

// ============================================================================
// Response shapes
// ============================================================================

/// Paging metadata returned alongside a listing page.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    /// 1-based page number served.
    pub page: u32,
    /// Rows per page requested.
    pub limit: u32,
    /// Total rows matching the filter.
    pub total: i64,
    /// Total pages at this limit (ceiling of total/limit).
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl Pagination {
    /// Builds paging metadata from a filter and a total row count.
    pub fn new(filter: &ListFilter, total: i64) -> Self {
        let limit = i64::from(filter.limit.max(1));
        Self {
            page: filter.page,
            limit: filter.limit,
            total,
            total_pages: (total as u64).div_ceil(limit as u64) as i64,
        }
    }
}

/// Per-status row counts inside [`Statistics`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    /// Rows with status `new`.
    pub new: i64,
    /// Rows with status `in_progress`.
    pub in_progress: i64,
    /// Rows with status `responded`.
    pub responded: i64,
    /// Rows with status `closed`.
    pub closed: i64,
}

/// One calendar day's submission count.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    /// The calendar day (UTC).
    pub date: NaiveDate,
    /// Enquiries created on that day.
    pub count: i64,
}

/// Aggregate figures over the trailing 30 days.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Total enquiries in the window.
    pub total: i64,
    /// Breakdown by lifecycle stage.
    #[serde(rename = "byStatus")]
    pub by_status: StatusCounts,
    /// Per-day counts, most recent day first.
    #[serde(rename = "dailyTrends")]
    pub daily_trends: Vec<DailyCount>,
}
