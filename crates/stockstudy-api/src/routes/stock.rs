//! 주가 데이터 및 종목 검색 endpoint.
//!
//! # 엔드포인트
//!
//! - `GET /api/stock/{symbol}?dividing_date=YYYY-MM-DD&historical_days=N&future_days=M`
//! - `GET /api/stock/search?query=...`

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use stockstudy_core::{PipelineError, StockPayload};

use crate::error::{pipeline_error_response, ApiResult};
use crate::state::AppState;
use crate::symbols::{self, StockInfo, SEARCH_LIMIT};

/// 주가 데이터 조회 쿼리.
///
/// 숫자 항목도 문자열로 받아 직접 파싱합니다.
/// 형식 오류를 axum 기본 거부 응답이 아닌 API 에러 형식으로 돌려주기 위함입니다.
#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub dividing_date: Option<String>,
    pub historical_days: Option<String>,
    pub future_days: Option<String>,
}

/// 종목 검색 쿼리.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// 종목 검색 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub stocks: Vec<StockInfo>,
}

/// 구간 일수 파싱. 없으면 기본값을 사용합니다.
fn parse_days(label: &str, raw: Option<&str>, default: u32) -> Result<u32, PipelineError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse::<u32>().map_err(|_| {
            PipelineError::InvalidWindow(format!("{}={}는 0 이상의 정수여야 합니다", label, value))
        }),
    }
}

/// GET /api/stock/{symbol}
pub async fn get_stock_data(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<StockPayload>> {
    let defaults = &state.config.request;
    let historical_days = parse_days(
        "historical_days",
        query.historical_days.as_deref(),
        defaults.default_historical_days,
    )
    .map_err(pipeline_error_response)?;
    let future_days = parse_days(
        "future_days",
        query.future_days.as_deref(),
        defaults.default_future_days,
    )
    .map_err(pipeline_error_response)?;

    let payload = state
        .pipeline
        .get_stock_data(&symbol, query.dividing_date.as_deref(), historical_days, future_days)
        .await
        .map_err(pipeline_error_response)?;

    Ok(Json(payload))
}

/// GET /api/stock/search
pub async fn search_stocks(Query(query): Query<SearchQuery>) -> Json<SearchResponse> {
    let stocks = symbols::search(&query.query, SEARCH_LIMIT);
    debug!(query = %query.query, count = stocks.len(), "종목 검색");
    Json(SearchResponse { stocks })
}

/// 주가 라우터 생성.
pub fn stock_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(search_stocks))
        .route("/{symbol}", get(get_stock_data))
}
