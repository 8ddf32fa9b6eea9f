//! 결정적 합성 시계열 생성기.
//!
//! 모든 외부 제공자가 실패했을 때 사용하는 최종 대체 수단입니다.
//! 출력은 종목 코드와 날짜 구간만의 순수 함수이며, 시계나 난수를 사용하지 않습니다.
//! 같은 인자로 두 번 호출하면 완전히 같은 시계열을 반환합니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use stockstudy_core::{Bar, TimeSeries};

/// 종목 코드에서 결정되는 합성 가격 프로파일.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceProfile {
    /// 첫날 시가
    pub base_price: Decimal,
    /// 변동성 비율 (0.02 = 2%)
    pub volatility: Decimal,
    /// 기준 거래량
    pub base_volume: u64,
}

const BANKS: [&str; 3] = ["000001", "600036", "601398"];
const TECH: [&str; 3] = ["000063", "002415", "300750"];
const CONSUMER: [&str; 3] = ["600519", "000858", "600887"];

impl PriceProfile {
    /// 종목 코드로 프로파일을 결정합니다.
    ///
    /// 대표 업종 종목은 업종별 가격대를 쓰고, 나머지는 일반 가격대를 씁니다.
    /// 가격대 안의 위치는 코드 끝 두 자리로 정해집니다.
    pub fn for_symbol(symbol: &str) -> Self {
        let seed = Decimal::from(symbol_seed(symbol));

        let (floor, spread, volatility, base_volume) = if BANKS.contains(&symbol) {
            (8, 5, Decimal::new(15, 3), 5_000_000)
        } else if TECH.contains(&symbol) {
            (30, 20, Decimal::new(35, 3), 2_000_000)
        } else if CONSUMER.contains(&symbol) {
            (50, 30, Decimal::new(25, 3), 1_000_000)
        } else {
            (15, 10, Decimal::new(2, 2), 1_500_000)
        };

        Self {
            base_price: Decimal::from(floor) + seed % Decimal::from(spread),
            volatility,
            base_volume,
        }
    }
}

/// 코드 끝 두 자리 숫자. 숫자가 아니면 바이트 합의 100 나머지.
fn symbol_seed(symbol: &str) -> u32 {
    let bytes = symbol.as_bytes();
    if bytes.len() >= 2 {
        let tail = &bytes[bytes.len() - 2..];
        if tail.iter().all(u8::is_ascii_digit) {
            return u32::from(tail[0] - b'0') * 10 + u32::from(tail[1] - b'0');
        }
    }
    bytes.iter().map(|&b| u32::from(b)).sum::<u32>() % 100
}

/// 합성 일봉 생성기.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticGenerator;

impl SyntheticGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `[start, end]`의 모든 달력일에 대해 일봉을 하나씩 생성합니다.
    ///
    /// `start > end`이면 빈 시계열을 반환합니다.
    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> TimeSeries {
        let profile = PriceProfile::for_symbol(symbol);
        let vol = profile.volatility;
        let hundred = Decimal::ONE_HUNDRED;
        let wick = vol / Decimal::from(6);

        let mut bars = Vec::new();
        let mut prev_close: Option<Decimal> = None;

        for (i, date) in start.iter_days().take_while(|d| *d <= end).enumerate() {
            // 가격 계산은 반올림 전 값으로 하고 저장할 때만 반올림한다
            let open = match prev_close {
                None => profile.base_price,
                Some(prev) => {
                    let step = Decimal::from(i % 7) - Decimal::from(3);
                    prev * (Decimal::ONE + vol * step / hundred)
                }
            };

            let drift = Decimal::from(i % 5) - Decimal::TWO;
            let close = open * (Decimal::ONE + vol / Decimal::TWO * drift / hundred);

            let high = open.max(close) * (Decimal::ONE + wick);
            let low = open.min(close) * (Decimal::ONE - wick);

            let move_pct = if open.is_zero() {
                Decimal::ZERO
            } else {
                (close - open).abs() / open * hundred
            };
            let cycle = (Decimal::from(i % 10) - Decimal::from(5)) / Decimal::from(20);
            let factor = Decimal::ONE + move_pct / Decimal::TEN + cycle;
            let volume = (Decimal::from(profile.base_volume) * factor)
                .trunc()
                .to_u64()
                .unwrap_or(0);

            let close = close.round_dp(2);
            bars.push(Bar::new(date, open.round_dp(2), high.round_dp(2), low.round_dp(2), close, volume));
            prev_close = Some(close);
        }

        debug!(symbol = symbol, count = bars.len(), "합성 시계열 생성");
        TimeSeries::new(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_profile_bands() {
        let bank = PriceProfile::for_symbol("000001");
        assert_eq!(bank.base_price, dec!(9));
        assert_eq!(bank.volatility, dec!(0.015));
        assert_eq!(bank.base_volume, 5_000_000);

        let tech = PriceProfile::for_symbol("300750");
        assert_eq!(tech.base_price, dec!(40));
        assert_eq!(tech.volatility, dec!(0.035));

        let consumer = PriceProfile::for_symbol("600519");
        assert_eq!(consumer.base_price, dec!(69));

        let other = PriceProfile::for_symbol("688981");
        assert_eq!(other.base_price, dec!(16));
        assert_eq!(other.volatility, dec!(0.02));
        assert_eq!(other.base_volume, 1_500_000);
    }

    #[test]
    fn test_profile_non_digit_seed() {
        // "AB" = 65 + 66 = 131 -> 31 -> 15 + 31 % 10
        let profile = PriceProfile::for_symbol("AB");
        assert_eq!(profile.base_price, dec!(16));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let generator = SyntheticGenerator::new();
        let a = generator.generate("600036", date("2024-01-01"), date("2024-03-31"));
        let b = generator.generate("600036", date("2024-01-01"), date("2024-03-31"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_one_bar_per_calendar_day() {
        let series = SyntheticGenerator::new().generate("000001", date("2024-02-27"), date("2024-03-02"));
        assert_eq!(series.len(), 5); // 윤년 2월 29일 포함
        assert_eq!(series.first_date(), Some(date("2024-02-27")));
        assert_eq!(series.last_date(), Some(date("2024-03-02")));
    }

    #[test]
    fn test_generate_first_bar() {
        let series = SyntheticGenerator::new().generate("000001", date("2024-01-01"), date("2024-01-01"));
        let bar = &series.bars()[0];

        // i = 0: open = 9, close = 9 * (1 + 0.0075 * -2 / 100) = 8.99865 -> 9.00
        assert_eq!(bar.open, dec!(9));
        assert_eq!(bar.close, dec!(9.00));
        assert_eq!(bar.high, dec!(9.02));
        assert_eq!(bar.low, dec!(8.98));
        assert!(bar.volume > 0);
    }

    #[test]
    fn test_intrabar_prices_use_unrounded_open() {
        let series = SyntheticGenerator::new().generate("300750", date("2024-01-01"), date("2024-01-02"));
        let bar = &series.bars()[1];

        // open = 39.99 * (1 - 0.0007) = 39.962007, close = open * 0.999825 = 39.95501...
        // 반올림한 39.96에서 출발했다면 종가는 39.95가 된다
        assert_eq!(bar.open, dec!(39.96));
        assert_eq!(bar.close, dec!(39.96));
        assert_eq!(bar.high, dec!(40.20));
        assert_eq!(bar.low, dec!(39.72));
    }

    #[test]
    fn test_generate_bars_are_well_formed() {
        let series = SyntheticGenerator::new().generate("300750", date("2023-01-01"), date("2024-12-31"));
        assert_eq!(series.len(), 731);
        for bar in series.bars() {
            assert!(bar.is_well_formed(), "{:?}", bar);
            assert_eq!(bar.close, bar.close.round_dp(2));
        }
    }

    #[test]
    fn test_generate_reversed_range_is_empty() {
        let series = SyntheticGenerator::new().generate("000001", date("2024-02-01"), date("2024-01-01"));
        assert!(series.is_empty());
    }
}
