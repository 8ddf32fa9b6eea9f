//! 추세 연습 서비스 REST API.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - `/api/stock/{symbol}` - 분할 기준일로 나뉜 과거/미래 일봉과 지표
//! - `/api/stock/search` - 종목 이름/코드 검색
//! - `/api/health` - 헬스 체크

pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod symbols;

pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use services::StockPipeline;
pub use state::AppState;
