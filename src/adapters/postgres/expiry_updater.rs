//! PostgreSQL implementation of ExpiryUpdater.

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::membership::{next_membership_expiry, MemberKey};
use crate::ports::ExpiryUpdater;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};

/// PostgreSQL implementation of the ExpiryUpdater port.
///
/// Writes the policy expiry (January 1 of next year) to the member row.
/// Concurrent calls in the same calendar year write the same value.
pub struct PostgresExpiryUpdater {
    pool: PgPool,
}

impl PostgresExpiryUpdater {
    /// Creates a new PostgresExpiryUpdater with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpiryUpdater for PostgresExpiryUpdater {
    async fn update_expiry(&self, key: &MemberKey) -> Result<Timestamp, DomainError> {
        let expiry = next_membership_expiry(Timestamp::now())?;

        let query = match key {
            MemberKey::External(user_id) => sqlx::query_scalar::<Postgres, DateTime<Utc>>(
                r#"
                UPDATE members
                SET membership_expires_at = $1, updated_at = NOW()
                WHERE external_id = $2
                RETURNING membership_expires_at
                "#,
            )
            .bind(*expiry.as_datetime())
            .bind(user_id.as_str()),
            MemberKey::Internal(member_id) => sqlx::query_scalar::<Postgres, DateTime<Utc>>(
                r#"
                UPDATE members
                SET membership_expires_at = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING membership_expires_at
                "#,
            )
            .bind(*expiry.as_datetime())
            .bind(*member_id.as_uuid()),
        };

        let stored: Option<DateTime<Utc>> = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to update membership expiry: {}", e))
                    .with_detail("member_key", key.kind())
            })?;

        match stored {
            Some(stored) => Ok(Timestamp::from_datetime(stored)),
            None => Err(DomainError::new(
                ErrorCode::MemberNotFound,
                format!("No member with {}", key),
            )),
        }
    }
}
