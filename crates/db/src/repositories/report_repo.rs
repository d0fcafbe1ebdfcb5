//! Repository for the `reports` table.

use exchange_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

/// Column list for `reports` queries.
const COLUMNS: &str = "id, reporter_id, reported_user_id, item_id, category, details, status, \
                       resolution_note, created_at, updated_at";

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new `open` report.
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        input: &CreateReport,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (reporter_id, reported_user_id, item_id, category, details) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(input.reported_user_id)
            .bind(input.item_id)
            .bind(&input.category)
            .bind(&input.details)
            .fetch_one(pool)
            .await
    }

    /// Fetch a single report by id.
    pub async fn find_by_id(pool: &PgPool, report_id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(report_id)
            .fetch_optional(pool)
            .await
    }

    /// List all reports, newest first, optionally filtered by status (admin).
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports \
             WHERE ($1::text IS NULL OR status = $1) \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the reports filed by a user, newest first.
    pub async fn list_for_reporter(
        pool: &PgPool,
        reporter_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports \
             WHERE reporter_id = $1 \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Resolve an open report. Returns `None` when the report is missing or
    /// no longer open.
    pub async fn resolve(
        pool: &PgPool,
        report_id: DbId,
        status: &str,
        resolution_note: Option<&str>,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = $2, resolution_note = $3, updated_at = NOW() \
             WHERE id = $1 AND status = 'open' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(report_id)
            .bind(status)
            .bind(resolution_note)
            .fetch_optional(pool)
            .await
    }
}
