//! 추세 연습 API 서버.
//!
//! 설정을 읽고 데이터 소스 체인과 결과 캐시를 구성한 뒤 axum 서버를 시작합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::{http::StatusCode, Router};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use stockstudy_api::routes::create_api_router;
use stockstudy_api::state::AppState;
use stockstudy_core::{init_logging, AppConfig, CacheBackend, CacheConfig, SourcesConfig};
use stockstudy_data::{
    BarProvider, EastmoneyProvider, MemoryCache, RedisCache, ResultCache, SourceChain,
    YahooProvider,
};

/// 설정에 따라 데이터 소스 체인을 구성합니다.
///
/// 생성에 실패한 제공자는 건너뜁니다. 합성 데이터 대체는 항상 마지막에 붙습니다.
fn build_source_chain(sources: &SourcesConfig) -> SourceChain {
    let timeout = Duration::from_secs(sources.request_timeout_secs);
    let mut providers: Vec<Arc<dyn BarProvider>> = Vec::new();

    if sources.eastmoney_enabled {
        match EastmoneyProvider::with_base_url(sources.eastmoney_base_url.clone(), timeout) {
            Ok(provider) => providers.push(Arc::new(provider)),
            Err(e) => error!(error = %e, "Eastmoney 제공자 생성 실패"),
        }
    }

    if sources.yahoo_enabled {
        match YahooProvider::new() {
            Ok(provider) => providers.push(Arc::new(provider)),
            Err(e) => error!(error = %e, "Yahoo Finance 제공자 생성 실패"),
        }
    }

    SourceChain::new(providers)
}

/// 설정에 따라 결과 캐시를 선택합니다. Redis 연결에 실패하면 메모리 캐시를 씁니다.
async fn build_cache(config: &CacheConfig) -> Arc<dyn ResultCache> {
    match config.backend {
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
        CacheBackend::Redis => match RedisCache::connect(&config.redis_url).await {
            Ok(cache) => Arc::new(cache),
            Err(e) => {
                warn!(error = %e, "Redis 연결 실패, 메모리 캐시로 대체합니다");
                Arc::new(MemoryCache::new())
            }
        },
    }
}

fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("설정 로드 실패")?;

    init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("로깅 초기화 실패: {e}"))?;

    info!("Starting StockStudy API server...");

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "소켓 주소가 유효하지 않습니다: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let chain = build_source_chain(&config.sources);
    let cache = build_cache(&config.cache).await;

    let state = Arc::new(AppState::new(config, chain, cache));
    info!(
        version = %state.version,
        providers = ?state.pipeline.chain().provider_names(),
        cache = state.cache_backend(),
        "Application state initialized"
    );

    let app = create_router(state);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown_token = CancellationToken::new();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_token.clone()))
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 종료 토큰을 취소합니다.
/// 시그널 핸들러 설치에 실패하면 해당 시그널은 무시합니다.
async fn shutdown_signal(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Ctrl+C 핸들러 설치 실패");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "SIGTERM 핸들러 설치 실패");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    shutdown_token.cancel();
}
