//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use stockstudy_core::AppConfig;
use stockstudy_data::{ResultCache, SourceChain};

use crate::services::StockPipeline;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 주가 데이터 파이프라인
    pub pipeline: Arc<StockPipeline>,

    /// 애플리케이션 설정 (요청 기본값 등)
    pub config: AppConfig,

    /// API 버전
    pub version: String,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 설정과 데이터 소스 체인, 결과 캐시로 상태를 생성합니다.
    pub fn new(config: AppConfig, chain: SourceChain, cache: Arc<dyn ResultCache>) -> Self {
        let pipeline = StockPipeline::new(
            chain,
            cache,
            Duration::from_secs(config.cache.ttl_secs),
            config.request.max_window_days,
        );

        Self {
            pipeline: Arc::new(pipeline),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 사용 중인 캐시 백엔드 이름.
    pub fn cache_backend(&self) -> &'static str {
        self.pipeline.cache().backend()
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 상태.
///
/// 외부 제공자 없이 합성 데이터만 사용하고, 메모리 캐시를 씁니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    use stockstudy_data::MemoryCache;

    AppState::new(
        AppConfig::default(),
        SourceChain::default(),
        Arc::new(MemoryCache::new()),
    )
}
