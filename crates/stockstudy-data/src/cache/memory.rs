//! 메모리 결과 캐시.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use stockstudy_core::{RequestSignature, StockPayload};

use super::ResultCache;
use crate::error::Result;

struct Entry {
    payload: StockPayload,
    stored_at: Instant,
    ttl: Duration,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) >= self.ttl
    }
}

/// 프로세스 내 TTL 캐시.
///
/// 백그라운드 정리 작업 없이 조회 시점에 만료 항목을 제거합니다.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<RequestSignature, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 저장된 항목 수 (아직 제거되지 않은 만료 항목 포함).
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ResultCache for MemoryCache {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, signature: &RequestSignature) -> Result<Option<StockPayload>> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(signature) {
                None => return Ok(None),
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.payload.clone())),
                Some(_) => {}
            }
        }

        // 만료 항목 제거. 그 사이 교체되었을 수 있으므로 다시 확인한다
        let mut entries = self.entries.write().await;
        if entries.get(signature).is_some_and(|e| e.is_expired(now)) {
            entries.remove(signature);
            debug!(key = %signature, "만료된 캐시 항목 제거");
        }
        Ok(None)
    }

    async fn put(&self, signature: &RequestSignature, payload: &StockPayload, ttl: Duration) -> Result<()> {
        let entry = Entry {
            payload: payload.clone(),
            stored_at: Instant::now(),
            ttl,
        };
        self.entries.write().await.insert(signature.clone(), entry);
        Ok(())
    }

    async fn evict(&self, signature: &RequestSignature) -> Result<bool> {
        Ok(self.entries.write().await.remove(signature).is_some())
    }
}
