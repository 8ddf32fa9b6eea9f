//! Redis 결과 캐시.
//!
//! 페이로드를 JSON으로 직렬화해 `SETEX`로 저장하므로 만료는 Redis가 처리합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use stockstudy_core::{RequestSignature, StockPayload};

use super::ResultCache;
use crate::error::{DataError, Result};

/// Redis 연결 래퍼.
#[derive(Clone)]
pub struct RedisCache {
    connection: Arc<RwLock<MultiplexedConnection>>,
}

impl RedisCache {
    /// 새로운 Redis 캐시 연결을 생성합니다.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to Redis...");

        let client = Client::open(url).map_err(|e| DataError::CacheError(e.to_string()))?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| DataError::CacheError(e.to_string()))?;

        info!("Redis connection established");

        Ok(Self {
            connection: Arc::new(RwLock::new(connection)),
        })
    }
}

/// `SETEX`는 0초를 허용하지 않으므로 최소 1초.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl ResultCache for RedisCache {
    fn backend(&self) -> &'static str {
        "redis"
    }

    #[instrument(skip(self), fields(key = %signature))]
    async fn get(&self, signature: &RequestSignature) -> Result<Option<StockPayload>> {
        let mut conn = self.connection.write().await;
        let value: Option<String> = conn
            .get(signature.cache_key())
            .await
            .map_err(|e| DataError::CacheError(e.to_string()))?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json)
                    .map_err(|e| DataError::SerializationError(e.to_string()))?;
                debug!("Redis 캐시 적중");
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self, payload), fields(key = %signature))]
    async fn put(&self, signature: &RequestSignature, payload: &StockPayload, ttl: Duration) -> Result<()> {
        let json = serde_json::to_string(payload)
            .map_err(|e| DataError::SerializationError(e.to_string()))?;

        let mut conn = self.connection.write().await;
        let _: () = conn
            .set_ex(signature.cache_key(), json, ttl_secs(ttl))
            .await
            .map_err(|e| DataError::CacheError(e.to_string()))?;

        Ok(())
    }

    async fn evict(&self, signature: &RequestSignature) -> Result<bool> {
        let mut conn = self.connection.write().await;
        let deleted: i64 = conn
            .del(signature.cache_key())
            .await
            .map_err(|e| DataError::CacheError(e.to_string()))?;

        Ok(deleted > 0)
    }

    /// Redis 상태를 확인합니다.
    async fn health_check(&self) -> Result<bool> {
        let mut conn = self.connection.write().await;
        let result: String = redis::cmd("PING")
            .query_async(&mut *conn)
            .await
            .map_err(|e| DataError::CacheError(e.to_string()))?;

        Ok(result == "PONG")
    }
}
