//! Yahoo Finance 일봉 제공자.
//!
//! A주 종목은 거래소 접미사(`.SS`, `.SZ`, `.BJ`)를 붙인 티커로 조회합니다.
//! 타임스탬프는 상하이 시간대 기준 거래일로 변환합니다.

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Asia::Shanghai;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

use stockstudy_core::{Bar, Exchange};

use super::BarProvider;
use crate::error::{DataError, Result};

/// Yahoo Finance 일봉 제공자.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new()
            .map_err(|e| DataError::ConfigError(format!("Yahoo Finance 연결 실패: {}", e)))?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl BarProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    #[instrument(skip(self), fields(provider = "yahoo"))]
    async fn fetch_bars(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>> {
        let ticker = Exchange::yahoo_symbol(symbol)
            .ok_or_else(|| DataError::NotFound(format!("Yahoo 티커로 변환할 수 없는 종목: {}", symbol)))?;

        // Yahoo의 종료 시각은 배타적이므로 하루를 더한다
        let end_exclusive = end
            .checked_add_days(Days::new(1))
            .ok_or_else(|| DataError::ParseError(format!("종료일 범위 초과: {}", end)))?;
        let start_ts = naive_date_to_offset_datetime(start)?;
        let end_ts = naive_date_to_offset_datetime(end_exclusive)?;

        debug!(ticker = %ticker, start = %start, end = %end, "Yahoo Finance API 날짜 범위 호출");

        let response = self
            .connector
            .get_quote_history(&ticker, start_ts, end_ts)
            .await
            .map_err(|e| DataError::FetchError(format!("Yahoo Finance API 오류 ({}): {}", ticker, e)))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::ParseError(format!("Quote 파싱 오류: {}", e)))?;

        let bars: Vec<Bar> = quotes
            .iter()
            .filter_map(|q| {
                quote_to_bar(
                    q.timestamp as i64,
                    q.open,
                    q.high,
                    q.low,
                    q.close,
                    q.volume,
                )
            })
            .collect();

        debug!(ticker = %ticker, count = bars.len(), "Yahoo Finance 일봉 조회 완료");
        Ok(bars)
    }
}

/// Yahoo 시세 한 건을 일봉으로 변환합니다.
///
/// NaN 가격이 있거나 Eastmoney 행과 같은 일봉 조건(`Bar::is_well_formed`)을 어기면 버립니다.
fn quote_to_bar(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Option<Bar> {
    let date = Utc
        .timestamp_opt(timestamp, 0)
        .single()?
        .with_timezone(&Shanghai)
        .date_naive();

    let price = |v: f64| Decimal::from_f64_retain(v).map(|d| d.round_dp(2));
    let bar = Bar::new(date, price(open)?, price(high)?, price(low)?, price(close)?, volume);

    bar.is_well_formed().then_some(bar)
}

/// NaiveDate를 UTC 자정 OffsetDateTime으로 변환.
fn naive_date_to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let month = time::Month::try_from(date.month() as u8)
        .map_err(|e| DataError::ParseError(format!("잘못된 월 ({}): {}", date, e)))?;
    let day = time::Date::from_calendar_date(date.year(), month, date.day() as u8)
        .map_err(|e| DataError::ParseError(format!("잘못된 날짜 ({}): {}", date, e)))?;
    Ok(day.midnight().assume_utc())
}
