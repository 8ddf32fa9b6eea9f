//! 도메인 모델.
//!
//! - `market_data` - 일봉과 시계열
//! - `indicator` - 지표가 부착된 프레임
//! - `request` - 요청 서명과 응답 페이로드

pub mod indicator;
pub mod market_data;
pub mod request;

pub use indicator::*;
pub use market_data::*;
pub use request::*;
