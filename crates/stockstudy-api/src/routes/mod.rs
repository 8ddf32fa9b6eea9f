//! REST API 라우트.
//!
//! - `/api/health` - 헬스 체크
//! - `/api/stock/search` - 종목 검색
//! - `/api/stock/{symbol}` - 분할 기준일 기준 과거/미래 일봉

pub mod health;
pub mod stock;

pub use health::{health_check, health_router, HealthResponse};
pub use stock::{get_stock_data, search_stocks, stock_router, SearchResponse, StockQuery};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/api/health", health_router())
        .nest("/api/stock", stock_router())
}
