//! # StockStudy Core
//!
//! 추세 연습 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일봉(`Bar`)과 정렬/중복 제거가 보장된 시계열(`TimeSeries`)
//! - 지표가 부착된 프레임(`IndicatorFrame`, `Kdj`)
//! - 요청 서명(캐시 키)과 응답 페이로드
//! - 종목 코드 검증 및 거래소 분류
//! - 파이프라인 에러 분류
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
