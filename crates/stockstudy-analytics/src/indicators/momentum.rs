//! 모멘텀 지표 (Momentum Indicators).
//!
//! KDJ 스토캐스틱 오실레이터를 제공합니다.
//!
//! ```text
//! RSV = (종가 - N일 최저가) / (N일 최고가 - N일 최저가) × 100
//! K   = RSV의 지수 가중 평균 (com = 2, α = 1/3)
//! D   = K의 지수 가중 평균 (com = 2)
//! J   = 3K - 2D
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use stockstudy_core::Kdj;

use super::{IndicatorError, IndicatorResult};

/// KDJ 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KdjParams {
    /// RSV 기간 (기본: 9).
    pub period: usize,
    /// 평활 center of mass (기본: 2, α = 1 / (1 + com)).
    pub com: usize,
}

impl Default for KdjParams {
    fn default() -> Self {
        Self { period: 9, com: 2 }
    }
}

impl KdjParams {
    fn alpha(&self) -> Decimal {
        Decimal::ONE / Decimal::from(self.com + 1)
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// KDJ 계산.
    ///
    /// 처음 `period - 1`개와 N일 범위가 0인(고가 = 저가) 위치는 `None`입니다.
    ///
    /// # 인자
    /// * `high`, `low`, `close` - 같은 길이의 가격 시퀀스
    /// * `params` - KDJ 파라미터
    pub fn kdj(
        &self,
        high: &[Decimal],
        low: &[Decimal],
        close: &[Decimal],
        params: KdjParams,
    ) -> IndicatorResult<Vec<Option<Kdj>>> {
        if params.period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let len = high.len().min(low.len()).min(close.len());
        if len < params.period {
            return Err(IndicatorError::InsufficientData {
                required: params.period,
                provided: len,
            });
        }

        let rsv = self.rsv(&high[..len], &low[..len], &close[..len], params.period);
        let alpha = params.alpha();
        let k = self.ewm(&rsv, alpha);
        let d = self.ewm(&k, alpha);

        Ok(k
            .iter()
            .zip(d.iter())
            .map(|(k, d)| match (k, d) {
                (Some(k), Some(d)) => Some(Kdj {
                    k: *k,
                    d: *d,
                    j: dec!(3) * *k - dec!(2) * *d,
                }),
                _ => None,
            })
            .collect())
    }

    /// RSV (Raw Stochastic Value) 계산.
    fn rsv(&self, high: &[Decimal], low: &[Decimal], close: &[Decimal], period: usize) -> Vec<Option<Decimal>> {
        (0..close.len())
            .map(|i| {
                if i + 1 < period {
                    return None;
                }
                let start = i + 1 - period;
                let highest = high[start..=i].iter().max()?;
                let lowest = low[start..=i].iter().min()?;

                let range = *highest - *lowest;
                if range.is_zero() {
                    // 범위가 0이면 정의되지 않음
                    None
                } else {
                    Some((close[i] - *lowest) / range * dec!(100))
                }
            })
            .collect()
    }

    /// 지수 가중 평균 (조정 가중치 방식).
    ///
    /// 가중치 합을 누적하므로 초기값에 치우치지 않습니다.
    /// `None` 입력은 건너뛰지만 이전 값들의 가중치는 계속 감쇠하며,
    /// 해당 위치의 출력도 `None`입니다.
    fn ewm(&self, values: &[Option<Decimal>], alpha: Decimal) -> Vec<Option<Decimal>> {
        let decay = Decimal::ONE - alpha;
        let mut weighted: Option<Decimal> = None;
        let mut old_wt = Decimal::ONE;

        values
            .iter()
            .map(|value| {
                if weighted.is_some() {
                    old_wt *= decay;
                }
                let cur = (*value)?;
                weighted = Some(match weighted {
                    None => {
                        old_wt = Decimal::ONE;
                        cur
                    }
                    Some(w) => {
                        let next = (old_wt * w + cur) / (old_wt + Decimal::ONE);
                        old_wt += Decimal::ONE;
                        next
                    }
                });
                weighted
            })
            .collect()
    }
}
