//! 분할 기준일에 따른 구간 분할.
//!
//! 기준일보다 이전인 일봉은 과거 구간, 기준일 당일과 이후 일봉은 미래 구간에 속합니다.
//! 지표는 각 구간의 첫 일봉부터 독립적으로 계산되므로 미래 구간의 지표가
//! 과거 구간의 일봉을 참조하지 않습니다.

use chrono::NaiveDate;
use tracing::debug;

use stockstudy_core::{IndicatorFrame, TimeSeries};

use crate::indicators::{IndicatorEngine, IndicatorResult};

/// 시계열을 `(과거, 미래)`로 나눕니다.
///
/// 과거: `date < dividing_date`, 미래: `date >= dividing_date`.
pub fn split(series: &TimeSeries, dividing_date: NaiveDate) -> (TimeSeries, TimeSeries) {
    let (historical, future) = series.bars().split_at(series.partition_index(dividing_date));
    (
        TimeSeries::new(historical.to_vec()),
        TimeSeries::new(future.to_vec()),
    )
}

/// 분할과 구간별 지표 계산을 묶은 구성 요소.
#[derive(Debug, Default)]
pub struct Segmenter {
    engine: IndicatorEngine,
}

impl Segmenter {
    pub fn new(engine: IndicatorEngine) -> Self {
        Self { engine }
    }

    /// 분할 후 각 구간에 지표를 부착합니다.
    pub fn segment(
        &self,
        series: &TimeSeries,
        dividing_date: NaiveDate,
    ) -> IndicatorResult<(Vec<IndicatorFrame>, Vec<IndicatorFrame>)> {
        let (historical, future) = split(series, dividing_date);
        debug!(
            dividing_date = %dividing_date,
            historical = historical.len(),
            future = future.len(),
            "구간 분할"
        );

        let historical = self.engine.annotate(historical.bars())?;
        let future = self.engine.annotate(future.bars())?;
        Ok((historical, future))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use rust_decimal_macros::dec;
    use stockstudy_core::Bar;

    fn series(start: &str, days: u64) -> TimeSeries {
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
        TimeSeries::new(
            (0..days)
                .map(|i| {
                    let close = dec!(10) + rust_decimal::Decimal::from(i % 5);
                    Bar::new(start + Days::new(i), close, close + dec!(1), close - dec!(1), close, 500 + i)
                })
                .collect(),
        )
    }

    #[test]
    fn test_dividing_date_belongs_to_future() {
        let s = series("2024-05-25", 14);
        let dividing = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let (historical, future) = split(&s, dividing);

        assert_eq!(historical.len(), 7);
        assert_eq!(future.len(), 7);
        assert_eq!(historical.last_date(), NaiveDate::from_ymd_opt(2024, 5, 31));
        assert_eq!(future.first_date(), Some(dividing));
    }

    #[test]
    fn test_split_outside_range() {
        let s = series("2024-01-01", 10);
        let (historical, future) = split(&s, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert!(historical.is_empty());
        assert_eq!(future.len(), 10);

        let (historical, future) = split(&s, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(historical.len(), 10);
        assert!(future.is_empty());
    }

    #[test]
    fn test_future_indicators_start_from_own_first_bar() {
        let s = series("2024-01-01", 40);
        let dividing = NaiveDate::from_ymd_opt(2024, 1, 21).unwrap();
        let (historical, future) = Segmenter::default().segment(&s, dividing).unwrap();

        assert_eq!(historical.len(), 20);
        assert_eq!(future.len(), 20);
        // 미래 구간 첫 8개는 KDJ 없음, 첫 4개는 mavol5 없음
        assert!(future[..8].iter().all(|f| f.kdj.is_none()));
        assert!(future[8].kdj.is_some());
        assert!(future[..4].iter().all(|f| f.mavol5.is_none()));

        // 미래 구간 mavol5는 자신의 첫 5개 일봉만으로 계산
        let expected: u64 = future[..5].iter().map(|f| f.bar.volume).sum();
        assert_eq!(future[4].mavol5, Some(rust_decimal::Decimal::from(expected) / dec!(5)));
    }
}
