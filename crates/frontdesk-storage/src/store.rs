//! The `enquiries` table and its five query operations.

use std::str::FromStr;

use chrono::{Duration, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use frontdesk_core::{
    ClientInfo, DailyCount, Enquiry, EnquirySubmission, ListFilter, Statistics, StatusCounts,
    StatusUpdate,
};

use crate::error::{Error, Result};

/// Days of history the statistics operation covers.
const STATS_WINDOW_DAYS: i64 = 30;

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS enquiries (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT NOT NULL,
    email         TEXT NOT NULL,
    phone         TEXT,
    subject       TEXT NOT NULL,
    message       TEXT NOT NULL,
    service_type  TEXT,
    ip_address    TEXT,
    user_agent    TEXT NOT NULL DEFAULT 'Unknown',
    status        TEXT NOT NULL DEFAULT 'new',
    admin_notes   TEXT,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_enquiries_created_at ON enquiries (created_at);
CREATE INDEX IF NOT EXISTS idx_enquiries_status ON enquiries (status);
";

/// Pooled access to the `enquiries` table.
///
/// Cheap to clone (the pool is reference-counted). The store is the only
/// component that writes enquiry state.
#[derive(Clone)]
pub struct EnquiryStore {
    pool: SqlitePool,
}

impl EnquiryStore {
    /// Wraps an existing pool. [`migrate`](Self::migrate) must have run
    /// (or must still be run) before the query methods are used.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for the given connection string, creating the
    /// database file when it does not exist yet.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        info!(url, "Connected to database");
        Ok(Self::new(pool))
    }

    /// Opens an in-memory database, for tests and ephemeral runs.
    ///
    /// Pinned to a single connection: each SQLite `:memory:` connection
    /// is its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Creates the `enquiries` table and its indexes when missing.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Inserts a new enquiry with status `new` and returns the stored row.
    ///
    /// The submission is expected to be validated already; this method
    /// only persists. A uniqueness violation surfaces as
    /// [`Error::Duplicate`].
    pub async fn insert(
        &self,
        submission: &EnquirySubmission,
        client: &ClientInfo,
    ) -> Result<Enquiry> {
        let now = Utc::now();
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "INSERT INTO enquiries \
             (name, email, phone, subject, message, service_type, \
              ip_address, user_agent, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'new', ?, ?) \
             RETURNING *",
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(&submission.service_type)
        .bind(&client.ip_address)
        .bind(&client.user_agent)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        info!(id = enquiry.id, "Stored new enquiry");
        Ok(enquiry)
    }

    /// Returns one page of enquiries plus the total matching count,
    /// newest first.
    ///
    /// The page and count queries run back to back on the pool; they are
    /// not wrapped in a transaction.
    pub async fn list(&self, filter: &ListFilter) -> Result<(Vec<Enquiry>, i64)> {
        let limit = i64::from(filter.limit);
        let offset = i64::from(filter.offset());

        let (rows, total) = match filter.status {
            Some(status) => {
                let rows = sqlx::query_as::<_, Enquiry>(
                    "SELECT * FROM enquiries WHERE status = ? \
                     ORDER BY created_at DESC LIMIT ? OFFSET ?",
                )
                .bind(status)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
                let (total,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM enquiries WHERE status = ?")
                        .bind(status)
                        .fetch_one(&self.pool)
                        .await?;
                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, Enquiry>(
                    "SELECT * FROM enquiries ORDER BY created_at DESC LIMIT ? OFFSET ?",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;
                let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM enquiries")
                    .fetch_one(&self.pool)
                    .await?;
                (rows, total)
            }
        };

        Ok((rows, total))
    }

    /// Fetches a single enquiry, or `None` when the id matches nothing.
    pub async fn fetch(&self, id: i64) -> Result<Option<Enquiry>> {
        let row = sqlx::query_as::<_, Enquiry>("SELECT * FROM enquiries WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Applies a status update and returns the full updated row.
    ///
    /// `admin_notes` uses COALESCE semantics: an omitted value preserves
    /// whatever is stored. `updated_at` is refreshed; `created_at` and
    /// all submission fields are untouched.
    pub async fn update_status(&self, id: i64, update: &StatusUpdate) -> Result<Enquiry> {
        let enquiry = sqlx::query_as::<_, Enquiry>(
            "UPDATE enquiries \
             SET status = ?, admin_notes = COALESCE(?, admin_notes), updated_at = ? \
             WHERE id = ? \
             RETURNING *",
        )
        .bind(update.status)
        .bind(&update.admin_notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NotFound { id })?;

        info!(id, status = %enquiry.status, "Updated enquiry status");
        Ok(enquiry)
    }

    /// Aggregates the trailing 30 days: total, per-status counts, and a
    /// per-day series with the most recent day first.
    pub async fn statistics(&self) -> Result<Statistics> {
        let cutoff = Utc::now() - Duration::days(STATS_WINDOW_DAYS);

        let (total, new, in_progress, responded, closed): (i64, i64, i64, i64, i64) =
            sqlx::query_as(
                "SELECT COUNT(*), \
                 COALESCE(SUM(CASE WHEN status = 'new' THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN status = 'in_progress' THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN status = 'responded' THEN 1 ELSE 0 END), 0), \
                 COALESCE(SUM(CASE WHEN status = 'closed' THEN 1 ELSE 0 END), 0) \
                 FROM enquiries WHERE created_at >= ?",
            )
            .bind(cutoff)
            .fetch_one(&self.pool)
            .await?;

        let days: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT date(created_at) AS day, COUNT(*) AS count \
             FROM enquiries WHERE created_at >= ? \
             GROUP BY day ORDER BY day DESC",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(Statistics {
            total,
            by_status: StatusCounts {
                new,
                in_progress,
                responded,
                closed,
            },
            daily_trends: days
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
        })
    }
}
