//! 기술적 지표와 구간 분할.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - KDJ 스토캐스틱 오실레이터
//! - 거래량 이동평균 (5/10/100일)
//! - 분할 기준일에 따른 과거/미래 구간 분할과 구간별 독립 지표 계산

pub mod indicators;
pub mod segment;

pub use indicators::{
    IndicatorEngine, IndicatorError, IndicatorResult, KdjParams, MomentumCalculator,
    VolumeIndicators, VOLUME_MA_PERIODS,
};
pub use segment::{split, Segmenter};
