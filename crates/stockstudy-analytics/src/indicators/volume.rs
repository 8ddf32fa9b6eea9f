//! 거래량 지표 (Volume Indicators).
//!
//! 거래량 단순 이동평균(MAVOL)을 제공합니다.

use rust_decimal::Decimal;

use super::{IndicatorError, IndicatorResult};

/// 응답에 포함되는 거래량 이동평균 기간.
pub const VOLUME_MA_PERIODS: [usize; 3] = [5, 10, 100];

/// 거래량 지표 계산기.
#[derive(Debug, Default)]
pub struct VolumeIndicators;

impl VolumeIndicators {
    pub fn new() -> Self {
        Self
    }

    /// 거래량 단순 이동평균.
    ///
    /// 누적 합을 밀어가며 계산하므로 기간과 무관하게 O(n)입니다.
    /// 처음 `period - 1`개는 `None`.
    pub fn sma(&self, volumes: &[u64], period: usize) -> IndicatorResult<Vec<Option<Decimal>>> {
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        if volumes.len() < period {
            return Err(IndicatorError::InsufficientData {
                required: period,
                provided: volumes.len(),
            });
        }

        let period_decimal = Decimal::from(period);
        let mut sum = Decimal::ZERO;

        Ok(volumes
            .iter()
            .enumerate()
            .map(|(i, &volume)| {
                sum += Decimal::from(volume);
                if i >= period {
                    sum -= Decimal::from(volumes[i - period]);
                }
                (i + 1 >= period).then(|| sum / period_decimal)
            })
            .collect())
    }
}
