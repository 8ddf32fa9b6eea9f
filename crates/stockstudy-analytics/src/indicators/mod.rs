//! 기술적 지표 모듈.
//!
//! # 지원 지표
//!
//! ## 모멘텀 지표 (Momentum Indicators)
//! - **KDJ**: 9일 스토캐스틱 + 지수 평활 (K, D, J)
//!
//! ## 거래량 지표 (Volume Indicators)
//! - **MAVOL**: 거래량 단순 이동평균 (5, 10, 100일)
//!
//! 값을 계산할 만큼 이전 일봉이 없으면 `None`으로 남기며, 0이나 NaN으로 채우지 않습니다.
//!
//! # 사용 예시
//!
//! ```ignore
//! use stockstudy_analytics::indicators::IndicatorEngine;
//!
//! let engine = IndicatorEngine::new();
//! let frames = engine.annotate(series.bars())?;
//! ```

pub mod momentum;
pub mod volume;

use thiserror::Error;
use tracing::trace;

use stockstudy_core::{Bar, IndicatorFrame};

pub use momentum::{KdjParams, MomentumCalculator};
pub use volume::{VolumeIndicators, VOLUME_MA_PERIODS};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 데이터 부족 오류
    #[error("데이터가 부족합니다: 필요 {required}개, 제공 {provided}개")]
    InsufficientData { required: usize, provided: usize },

    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// 데이터 부족은 "전부 미정의"로 바꾸고 나머지 오류는 그대로 전달합니다.
fn or_undefined<T: Clone>(result: IndicatorResult<Vec<Option<T>>>, len: usize) -> IndicatorResult<Vec<Option<T>>> {
    match result {
        Err(IndicatorError::InsufficientData { .. }) => Ok(vec![None; len]),
        other => other,
    }
}

/// 통합 지표 엔진.
///
/// 일봉 시퀀스에 KDJ와 거래량 이동평균을 부착합니다.
#[derive(Debug, Default)]
pub struct IndicatorEngine {
    momentum: MomentumCalculator,
    volume: VolumeIndicators,
    kdj_params: KdjParams,
}

impl IndicatorEngine {
    /// 새로운 지표 엔진 생성.
    pub fn new() -> Self {
        Self::default()
    }

    /// 일봉 시퀀스에 지표를 부착합니다.
    ///
    /// 입력 일봉의 가격/거래량 필드는 그대로 복사되며, 지표는 첫 일봉부터
    /// 이 시퀀스만 보고 계산됩니다.
    pub fn annotate(&self, bars: &[Bar]) -> IndicatorResult<Vec<IndicatorFrame>> {
        let len = bars.len();
        let high: Vec<_> = bars.iter().map(|b| b.high).collect();
        let low: Vec<_> = bars.iter().map(|b| b.low).collect();
        let close: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();

        let kdj = or_undefined(self.momentum.kdj(&high, &low, &close, self.kdj_params), len)?;

        let [p5, p10, p100] = VOLUME_MA_PERIODS;
        let mavol5 = or_undefined(self.volume.sma(&volumes, p5), len)?;
        let mavol10 = or_undefined(self.volume.sma(&volumes, p10), len)?;
        let mavol100 = or_undefined(self.volume.sma(&volumes, p100), len)?;

        trace!(bars = len, "지표 계산 완료");

        Ok(bars
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorFrame {
                bar: bar.clone(),
                kdj: kdj[i],
                mavol5: mavol5[i],
                mavol10: mavol10[i],
                mavol100: mavol100[i],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};
    use rust_decimal::Decimal;

    fn bars(n: usize) -> Vec<Bar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let base = Decimal::from(10 + (i % 4) as i64);
                Bar::new(
                    start + Days::new(i as u64),
                    base,
                    base + Decimal::ONE,
                    base - Decimal::ONE,
                    base,
                    1000 + i as u64,
                )
            })
            .collect()
    }

    #[test]
    fn test_annotate_short_series_has_no_kdj() {
        let frames = IndicatorEngine::new().annotate(&bars(8)).unwrap();
        assert_eq!(frames.len(), 8);
        assert!(frames.iter().all(|f| f.kdj.is_none()));
        assert!(frames[4].mavol5.is_some());
        assert!(frames.iter().all(|f| f.mavol10.is_none()));
    }

    #[test]
    fn test_annotate_presence_indices() {
        let frames = IndicatorEngine::new().annotate(&bars(120)).unwrap();

        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.kdj.is_some(), i >= 8, "kdj at {i}");
            assert_eq!(frame.mavol5.is_some(), i >= 4, "mavol5 at {i}");
            assert_eq!(frame.mavol10.is_some(), i >= 9, "mavol10 at {i}");
            assert_eq!(frame.mavol100.is_some(), i >= 99, "mavol100 at {i}");
        }
    }

    #[test]
    fn test_annotate_keeps_bars_untouched() {
        let input = bars(30);
        let frames = IndicatorEngine::new().annotate(&input).unwrap();
        let output: Vec<Bar> = frames.into_iter().map(|f| f.bar).collect();
        assert_eq!(output, input);
    }

    #[test]
    fn test_annotate_empty() {
        assert!(IndicatorEngine::new().annotate(&[]).unwrap().is_empty());
    }
}
