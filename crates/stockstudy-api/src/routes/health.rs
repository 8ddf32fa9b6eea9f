//! 헬스 체크 endpoint.

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::state::AppState;

/// 헬스 체크 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 서비스 상태 ("healthy" | "degraded")
    pub status: String,

    /// 현재 시간 (RFC 3339)
    pub timestamp: String,

    /// 결과 캐시 백엔드 ("memory" | "redis")
    pub cache: String,

    /// 결과 캐시 연결 상태 ("up" | "down")
    pub cache_status: String,
}

/// GET /api/health
///
/// 캐시 실패는 응답을 막지 않으므로 캐시가 내려가도 200과 "degraded"를 반환합니다.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cache = state.pipeline.cache();

    let cache_up = match cache.health_check().await {
        Ok(up) => up,
        Err(e) => {
            warn!(backend = cache.backend(), error = %e, "캐시 상태 확인 실패");
            false
        }
    };

    Json(HealthResponse {
        status: if cache_up { "healthy" } else { "degraded" }.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        cache: cache.backend().to_string(),
        cache_status: if cache_up { "up" } else { "down" }.to_string(),
    })
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use stockstudy_core::{AppConfig, RequestSignature, StockPayload};
    use stockstudy_data::{DataError, ResultCache, SourceChain};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    struct UnreachableCache;

    #[async_trait]
    impl ResultCache for UnreachableCache {
        fn backend(&self) -> &'static str {
            "redis"
        }

        async fn get(&self, _: &RequestSignature) -> stockstudy_data::Result<Option<StockPayload>> {
            Ok(None)
        }

        async fn put(&self, _: &RequestSignature, _: &StockPayload, _: Duration) -> stockstudy_data::Result<()> {
            Ok(())
        }

        async fn evict(&self, _: &RequestSignature) -> stockstudy_data::Result<bool> {
            Ok(false)
        }

        async fn health_check(&self) -> stockstudy_data::Result<bool> {
            Err(DataError::CacheError("connection refused".to_string()))
        }
    }

    async fn fetch_health(state: AppState) -> HealthResponse {
        let app = Router::new()
            .route("/api/health", get(health_check))
            .with_state(Arc::new(state));

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_json() {
        let health = fetch_health(create_test_state()).await;

        assert_eq!(health.status, "healthy");
        assert_eq!(health.cache, "memory");
        assert_eq!(health.cache_status, "up");
        assert!(chrono::DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_cache_is_degraded() {
        let state = AppState::new(
            AppConfig::default(),
            SourceChain::default(),
            Arc::new(UnreachableCache),
        );
        let health = fetch_health(state).await;

        assert_eq!(health.status, "degraded");
        assert_eq!(health.cache, "redis");
        assert_eq!(health.cache_status, "down");
    }
}
