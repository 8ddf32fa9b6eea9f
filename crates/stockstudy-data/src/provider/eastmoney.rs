//! Eastmoney 일봉 API 클라이언트.
//!
//! `push2his.eastmoney.com`의 K선 API에서 전복권(前复权) 일봉을 조회합니다.
//!
//! # 응답 형식
//!
//! ```json
//! {"rc":0,"data":{"code":"000001","name":"平安银行",
//!   "klines":["2024-01-02,9.39,9.21,9.42,9.21,1158366,1075742252.45,2.24,-1.92,-0.18,0.60"]}}
//! ```
//!
//! 각 행은 `날짜,시가,종가,고가,저가,거래량,...` 순서입니다.
//! 종목이 없으면 `data`가 `null`로 옵니다.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use stockstudy_core::{Bar, Exchange};

use super::BarProvider;
use crate::error::{DataError, Result};

/// 기본 API 주소.
pub const DEFAULT_BASE_URL: &str = "https://push2his.eastmoney.com";

const KLINE_PATH: &str = "/api/qt/stock/kline/get";

/// Eastmoney 일봉 제공자.
#[derive(Clone)]
pub struct EastmoneyProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct KlineResponse {
    #[serde(default)]
    data: Option<KlineData>,
}

#[derive(Debug, Deserialize)]
struct KlineData {
    #[serde(default)]
    klines: Vec<String>,
}

impl EastmoneyProvider {
    /// 기본 주소와 타임아웃으로 생성합니다.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// 주소를 지정해 생성합니다 (테스트 서버 등).
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BarProvider for EastmoneyProvider {
    fn name(&self) -> &str {
        "eastmoney"
    }

    #[instrument(skip(self), fields(provider = "eastmoney"))]
    async fn fetch_bars(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<Bar>> {
        let url = format!("{}{}", self.base_url, KLINE_PATH);
        let secid = Exchange::eastmoney_secid(symbol);
        let beg = start.format("%Y%m%d").to_string();
        let end_str = end.format("%Y%m%d").to_string();

        debug!(url = %url, secid = %secid, beg = %beg, end = %end_str, "Eastmoney API 요청");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("secid", secid.as_str()),
                ("fields1", "f1,f2,f3,f4,f5,f6"),
                ("fields2", "f51,f52,f53,f54,f55,f56,f57"),
                ("klt", "101"),
                ("fqt", "1"),
                ("beg", beg.as_str()),
                ("end", end_str.as_str()),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::FetchError(format!(
                "Eastmoney API 오류 [{}]: {} - {}",
                symbol, status, body
            )));
        }

        let body: KlineResponse = response
            .json()
            .await
            .map_err(|e| DataError::ParseError(format!("Eastmoney 응답 파싱 오류: {}", e)))?;

        let Some(data) = body.data else {
            debug!(symbol = symbol, "Eastmoney 응답에 데이터 없음");
            return Ok(Vec::new());
        };

        let total = data.klines.len();
        let bars: Vec<Bar> = data.klines.iter().filter_map(|row| parse_kline_row(row)).collect();

        if bars.len() < total {
            warn!(
                symbol = symbol,
                skipped = total - bars.len(),
                "형식이 잘못된 Eastmoney 행 제외"
            );
        }

        debug!(symbol = symbol, count = bars.len(), "Eastmoney 일봉 조회 완료");
        Ok(bars)
    }
}

/// `날짜,시가,종가,고가,저가,거래량,...` 행을 파싱합니다.
///
/// 필드가 모자라거나 가격이 비정상이면 `None`.
fn parse_kline_row(row: &str) -> Option<Bar> {
    let mut fields = row.split(',');
    let date = NaiveDate::parse_from_str(fields.next()?, "%Y-%m-%d").ok()?;
    let open = Decimal::from_str(fields.next()?).ok()?;
    let close = Decimal::from_str(fields.next()?).ok()?;
    let high = Decimal::from_str(fields.next()?).ok()?;
    let low = Decimal::from_str(fields.next()?).ok()?;
    let volume = parse_volume(fields.next()?)?;

    let bar = Bar::new(date, open, high, low, close, volume);
    bar.is_well_formed().then_some(bar)
}

fn parse_volume(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().or_else(|| {
        // 일부 응답은 "1158366.0" 형태
        Decimal::from_str(raw)
            .ok()
            .filter(|v| !v.is_sign_negative())
            .and_then(|v| u64::try_from(v.trunc()).ok())
    })
}
