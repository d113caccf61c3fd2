//! PostgreSQL implementation of MemberStore.

use crate::domain::foundation::{DomainError, MemberId, Timestamp, UserId};
use crate::domain::membership::MemberRecord;
use crate::ports::MemberStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the MemberStore port.
///
/// Reads from the `members` table, keyed by `external_id`.
pub struct PostgresMemberStore {
    pool: PgPool,
}

impl PostgresMemberStore {
    /// Creates a new PostgresMemberStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row for member lookups.
#[derive(Debug, sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    membership_expires_at: Option<DateTime<Utc>>,
}

impl From<MemberRow> for MemberRecord {
    fn from(row: MemberRow) -> Self {
        MemberRecord {
            id: MemberId::from_uuid(row.id),
            membership_expires_at: row.membership_expires_at.map(Timestamp::from_datetime),
        }
    }
}

#[async_trait]
impl MemberStore for PostgresMemberStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<MemberRecord>, DomainError> {
        let row: Option<MemberRow> = sqlx::query_as(
            r#"
            SELECT id, membership_expires_at
            FROM members
            WHERE external_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to get member: {}", e)))?;

        Ok(row.map(MemberRecord::from))
    }
}
