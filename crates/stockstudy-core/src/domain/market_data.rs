//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 일봉 데이터 관련 타입을 정의합니다:
//! - `Bar` - 하루 단위 OHLCV 데이터
//! - `TimeSeries` - 날짜 오름차순, 중복 없는 일봉 시퀀스

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 일봉 OHLCV 데이터.
///
/// 가격은 JSON에서 숫자로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// 거래일 (시간 성분 없음)
    pub date: NaiveDate,
    /// 시가
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    /// 고가
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    /// 저가
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    /// 종가
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    /// 거래량
    pub volume: u64,
}

impl Bar {
    /// 새 일봉을 생성합니다.
    pub fn new(
        date: NaiveDate,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 가격 필드가 모두 양수이고 고가/저가가 시가/종가를 감싸는지 확인합니다.
    pub fn is_well_formed(&self) -> bool {
        self.low > Decimal::ZERO
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
    }
}

/// 날짜 오름차순으로 정렬되고 같은 날짜가 두 번 나오지 않는 일봉 시퀀스.
///
/// 생성 시점에 정렬과 중복 제거가 이루어지므로 이 타입을 받는 모든 코드는
/// 순서 불변식을 다시 확인할 필요가 없습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    bars: Vec<Bar>,
}

impl TimeSeries {
    /// 일봉 목록에서 시계열을 생성합니다.
    ///
    /// 같은 날짜가 여러 번 있으면 입력 순서상 처음 나온 일봉을 유지합니다.
    pub fn new(mut bars: Vec<Bar>) -> Self {
        // 안정 정렬이어야 dedup이 첫 항목을 유지한다
        bars.sort_by_key(|bar| bar.date);
        bars.dedup_by_key(|bar| bar.date);
        Self { bars }
    }

    /// `[start, end]` 구간(양끝 포함)에 속하는 일봉만 남긴 시계열을 반환합니다.
    pub fn within(self, start: NaiveDate, end: NaiveDate) -> Self {
        let bars = self
            .bars
            .into_iter()
            .filter(|bar| bar.date >= start && bar.date <= end)
            .collect();
        Self { bars }
    }

    /// `date` 이전(미포함) 일봉 개수. 분할 지점으로 사용됩니다.
    pub fn partition_index(&self, date: NaiveDate) -> usize {
        self.bars.partition_point(|bar| bar.date < date)
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// 첫 거래일.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.bars.first().map(|bar| bar.date)
    }

    /// 마지막 거래일.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }
}

impl From<Vec<Bar>> for TimeSeries {
    fn from(bars: Vec<Bar>) -> Self {
        Self::new(bars)
    }
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bars = Vec::<Bar>::deserialize(deserializer)?;
        Ok(Self::new(bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bar(date: &str, close: Decimal) -> Bar {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Bar::new(date, close, close + dec!(1), close - dec!(1), close, 1000)
    }

    #[test]
    fn test_time_series_sorts_and_dedups() {
        let series = TimeSeries::new(vec![
            bar("2024-01-03", dec!(12)),
            bar("2024-01-01", dec!(10)),
            bar("2024-01-02", dec!(11)),
            bar("2024-01-01", dec!(99)),
        ]);

        assert_eq!(series.len(), 3);
        let dates: Vec<String> = series.bars().iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
        // 중복 날짜는 처음 나온 값 유지
        assert_eq!(series.bars()[0].close, dec!(10));
    }

    #[test]
    fn test_within_is_inclusive() {
        let series = TimeSeries::new(vec![
            bar("2024-01-01", dec!(10)),
            bar("2024-01-02", dec!(11)),
            bar("2024-01-03", dec!(12)),
            bar("2024-01-04", dec!(13)),
        ]);

        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        let trimmed = series.within(start, end);

        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.first_date(), Some(start));
        assert_eq!(trimmed.last_date(), Some(end));
    }

    #[test]
    fn test_partition_index() {
        let series = TimeSeries::new(vec![
            bar("2024-05-30", dec!(10)),
            bar("2024-05-31", dec!(11)),
            bar("2024-06-01", dec!(12)),
            bar("2024-06-02", dec!(13)),
        ]);

        let dividing = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(series.partition_index(dividing), 2);

        let before_all = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(series.partition_index(before_all), 0);
    }

    #[test]
    fn test_bar_serializes_prices_as_numbers() {
        let b = bar("2024-01-01", dec!(10.25));
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["close"].as_f64(), Some(10.25));
        assert_eq!(json["volume"].as_u64(), Some(1000));
    }

    #[test]
    fn test_bar_well_formed() {
        assert!(bar("2024-01-01", dec!(10)).is_well_formed());

        let mut broken = bar("2024-01-01", dec!(10));
        broken.high = dec!(5);
        assert!(!broken.is_well_formed());
    }
}
