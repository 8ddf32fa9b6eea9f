//! 결과 캐시.
//!
//! 완성된 응답 페이로드를 요청 서명 단위로 TTL 동안 보관합니다.
//!
//! - `MemoryCache`: 프로세스 내 저장소, 조회 시 만료 항목 제거
//! - `RedisCache`: Redis `SETEX` 기반 저장소
//!
//! 값은 부분 수정되지 않으며 `put`으로 통째로 생성되거나 교체됩니다.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryCache;
pub use self::redis::RedisCache;

use std::time::Duration;

use async_trait::async_trait;
use stockstudy_core::{RequestSignature, StockPayload};

use crate::error::Result;

/// 요청 서명 단위 결과 캐시 trait.
#[async_trait]
pub trait ResultCache: Send + Sync {
    /// 백엔드 이름 (health 응답용).
    fn backend(&self) -> &'static str;

    /// 유효한 항목을 조회합니다. 만료된 항목은 없는 것으로 취급합니다.
    async fn get(&self, signature: &RequestSignature) -> Result<Option<StockPayload>>;

    /// 항목을 저장하거나 교체합니다.
    async fn put(&self, signature: &RequestSignature, payload: &StockPayload, ttl: Duration) -> Result<()>;

    /// 항목을 제거합니다. 제거된 항목이 있었으면 `true`.
    async fn evict(&self, signature: &RequestSignature) -> Result<bool>;

    /// 백엔드 상태를 확인합니다.
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
