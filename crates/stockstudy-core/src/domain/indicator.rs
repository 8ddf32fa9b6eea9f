//! 지표가 부착된 일봉 프레임.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::market_data::Bar;

/// KDJ 스토캐스틱 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kdj {
    #[serde(with = "rust_decimal::serde::float")]
    pub k: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub d: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub j: Decimal,
}

/// 일봉 + 선택적 지표 필드.
///
/// 지표는 원본 일봉을 수정하지 않고 옆에 부착됩니다. 값을 계산할 만큼
/// 이전 일봉이 없으면 해당 필드는 JSON에서 생략됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorFrame {
    #[serde(flatten)]
    pub bar: Bar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kdj: Option<Kdj>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub mavol5: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub mavol10: Option<Decimal>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub mavol100: Option<Decimal>,
}

impl IndicatorFrame {
    /// 지표가 없는 프레임.
    pub fn bare(bar: Bar) -> Self {
        Self {
            bar,
            kdj: None,
            mavol5: None,
            mavol10: None,
            mavol100: None,
        }
    }
}

impl From<Bar> for IndicatorFrame {
    fn from(bar: Bar) -> Self {
        Self::bare(bar)
    }
}
