//! 서비스 모듈.
//!
//! 핸들러 뒤에서 동작하는 도메인 서비스를 제공합니다.

pub mod stock_pipeline;

pub use stock_pipeline::{StockPipeline, ValidatedRequest};
