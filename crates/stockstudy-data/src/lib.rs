//! # StockStudy Data
//!
//! 일봉 데이터 수집과 결과 캐시를 담당합니다.
//!
//! ## 구성
//!
//! - `provider` - 외부 데이터 제공자 (Eastmoney, Yahoo Finance)
//! - `synthetic` - 결정적 합성 시계열 생성기 (최종 대체 수단)
//! - `chain` - 제공자를 순서대로 시도하는 데이터 소스 체인
//! - `cache` - 요청 서명 단위 TTL 결과 캐시 (메모리, Redis)
//!
//! ## 데이터 흐름
//!
//! ```text
//! Eastmoney ──실패/빈 결과──▶ Yahoo Finance ──실패/빈 결과──▶ 합성 생성기
//! ```
//!
//! 체인은 업스트림 실패를 호출자에게 전달하지 않습니다.

pub mod cache;
pub mod chain;
pub mod error;
pub mod provider;
pub mod synthetic;

pub use cache::{MemoryCache, RedisCache, ResultCache};
pub use chain::{FetchOutcome, SourceChain};
pub use error::{DataError, Result};
pub use provider::{BarProvider, EastmoneyProvider, YahooProvider};
pub use synthetic::{PriceProfile, SyntheticGenerator};
