//! 요청 서명과 응답 페이로드.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::indicator::IndicatorFrame;
use crate::error::{PipelineError, PipelineResult};

/// 캐시 키가 되는 요청 서명.
///
/// 서명이 같은 두 요청은 같은 논리적 결과를 요청한 것으로 취급됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestSignature {
    pub symbol: String,
    pub dividing_date: NaiveDate,
    pub historical_days: u32,
    pub future_days: u32,
}

impl RequestSignature {
    pub fn new(
        symbol: impl Into<String>,
        dividing_date: NaiveDate,
        historical_days: u32,
        future_days: u32,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            dividing_date,
            historical_days,
            future_days,
        }
    }

    /// 캐시 저장소 키 (`stock:{symbol}:{date}:{h}:{f}`).
    pub fn cache_key(&self) -> String {
        format!(
            "stock:{}:{}:{}:{}",
            self.symbol, self.dividing_date, self.historical_days, self.future_days
        )
    }

    /// 데이터 조회 구간 `[dividing_date - h, dividing_date + f]`.
    ///
    /// 날짜 범위를 벗어나면 `InvalidWindow`를 반환합니다.
    pub fn window(&self) -> PipelineResult<(NaiveDate, NaiveDate)> {
        let start = self
            .dividing_date
            .checked_sub_days(Days::new(u64::from(self.historical_days)))
            .ok_or_else(|| {
                PipelineError::InvalidWindow(format!(
                    "{} - {}일은 표현할 수 없는 날짜입니다",
                    self.dividing_date, self.historical_days
                ))
            })?;
        let end = self
            .dividing_date
            .checked_add_days(Days::new(u64::from(self.future_days)))
            .ok_or_else(|| {
                PipelineError::InvalidWindow(format!(
                    "{} + {}일은 표현할 수 없는 날짜입니다",
                    self.dividing_date, self.future_days
                ))
            })?;
        Ok((start, end))
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cache_key())
    }
}

/// 주가 조회 응답 페이로드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPayload {
    pub symbol: String,
    /// 표시 이름 (목록에 없으면 종목 코드)
    pub name: String,
    pub dividing_date: NaiveDate,
    pub historical_data: Vec<IndicatorFrame>,
    pub future_data: Vec<IndicatorFrame>,
}
