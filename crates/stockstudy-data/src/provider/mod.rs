//! 데이터 Provider 모듈.
//!
//! 외부 소스에서 일봉을 가져오는 Provider들을 정의합니다.
//!
//! - `EastmoneyProvider`: Eastmoney 일봉 API (1순위)
//! - `YahooProvider`: Yahoo Finance (2순위, `.SS`/`.SZ`/`.BJ` 티커)
//!
//! Provider는 원시 행을 그대로 반환할 뿐 구간 필터링이나 정렬은 하지 않습니다.
//! 정규화는 `SourceChain`이 담당합니다.

pub mod eastmoney;
pub mod yahoo;

pub use eastmoney::EastmoneyProvider;
pub use yahoo::YahooProvider;

use async_trait::async_trait;
use chrono::NaiveDate;
use stockstudy_core::Bar;

use crate::error::Result;

/// 일봉 데이터 제공자 trait.
#[async_trait]
pub trait BarProvider: Send + Sync {
    /// 로그와 응답 메타데이터에 쓰이는 제공자 이름.
    fn name(&self) -> &str;

    /// `[start, end]` 구간의 일봉을 조회합니다.
    ///
    /// # 인자
    /// * `symbol` - 6자리 종목 코드 (예: "000001", "600519")
    /// * `start` - 시작일 (포함)
    /// * `end` - 종료일 (포함)
    async fn fetch_bars(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>>;
}
