//! Redis-backed pending payment cache.
//!
//! Reads the hash written by checkout (`payment:membership:{user_id}`,
//! field `orderId`) and deletes it once the payment is verified.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::config::RedisConfig;
use crate::domain::foundation::{DomainError, OrderId, UserId};
use crate::ports::{pending_payment_key, PendingPaymentCache, ORDER_ID_FIELD};

/// Redis implementation of the PendingPaymentCache port.
#[derive(Clone)]
pub struct RedisPendingPaymentCache {
    conn: MultiplexedConnection,
}

impl RedisPendingPaymentCache {
    /// Create a cache over an existing multiplexed connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }

    /// Open a connection using the given configuration.
    pub async fn connect(config: &RedisConfig) -> Result<Self, DomainError> {
        let client = redis::Client::open(config.url.as_str())
            .map_err(|e| DomainError::cache(format!("Invalid Redis URL: {}", e)))?;

        let conn = tokio::time::timeout(config.timeout(), client.get_multiplexed_tokio_connection())
            .await
            .map_err(|_| DomainError::cache("Timed out connecting to Redis"))?
            .map_err(|e| DomainError::cache(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self::new(conn))
    }
}

/// Interpret a raw `orderId` field value; blank values count as absent.
fn parse_order_id(raw: Option<String>) -> Option<OrderId> {
    raw.and_then(|value| OrderId::new(value).ok())
}

#[async_trait]
impl PendingPaymentCache for RedisPendingPaymentCache {
    async fn get_order_id(&self, user_id: &UserId) -> Result<Option<OrderId>, DomainError> {
        let key = pending_payment_key(user_id);
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .hget(&key, ORDER_ID_FIELD)
            .await
            .map_err(|e: redis::RedisError| {
                DomainError::cache(format!("Failed to read pending payment: {}", e))
                    .with_detail("key", key.clone())
            })?;

        Ok(parse_order_id(raw))
    }

    async fn delete(&self, user_id: &UserId) -> Result<(), DomainError> {
        let key = pending_payment_key(user_id);
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(&key)
            .await
            .map_err(|e: redis::RedisError| {
                DomainError::cache(format!("Failed to delete pending payment: {}", e))
                    .with_detail("key", key.clone())
            })?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisPendingPaymentCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisPendingPaymentCache").finish_non_exhaustive()
    }
}
