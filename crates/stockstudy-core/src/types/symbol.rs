//! 종목 코드 및 거래소 분류.
//!
//! 중국 A주 종목 코드는 6자리 숫자이며, 첫 자리로 상장 거래소를 대략 구분합니다:
//! - `6`, `9` - 상하이 증권거래소
//! - `0`, `2`, `3` - 선전 증권거래소
//! - `4`, `8` - 베이징 증권거래소

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PipelineError, PipelineResult};

/// 종목 코드 길이.
pub const SYMBOL_LEN: usize = 6;

/// 상장 거래소.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    /// 상하이 증권거래소
    #[serde(rename = "SS")]
    Shanghai,
    /// 선전 증권거래소
    #[serde(rename = "SZ")]
    Shenzhen,
    /// 베이징 증권거래소
    #[serde(rename = "BJ")]
    Beijing,
    /// 분류 불가
    Unknown,
}

impl Exchange {
    /// 종목 코드의 첫 자리로 거래소를 분류합니다.
    pub fn classify(symbol: &str) -> Self {
        match symbol.as_bytes().first() {
            Some(b'6') | Some(b'9') => Exchange::Shanghai,
            Some(b'0') | Some(b'2') | Some(b'3') => Exchange::Shenzhen,
            Some(b'4') | Some(b'8') => Exchange::Beijing,
            _ => Exchange::Unknown,
        }
    }

    /// Eastmoney `secid` 형식으로 변환합니다 (예: `1.600036`, `0.000001`).
    ///
    /// Eastmoney는 상하이만 시장 코드 1을 사용하고 나머지는 0을 사용합니다.
    pub fn eastmoney_secid(symbol: &str) -> String {
        match Self::classify(symbol) {
            Exchange::Shanghai => format!("1.{}", symbol),
            _ => format!("0.{}", symbol),
        }
    }

    /// Yahoo Finance 티커로 변환합니다 (예: `600036.SS`).
    ///
    /// 분류할 수 없는 코드는 `None`을 반환합니다.
    pub fn yahoo_symbol(symbol: &str) -> Option<String> {
        let suffix = match Self::classify(symbol) {
            Exchange::Shanghai => "SS",
            Exchange::Shenzhen => "SZ",
            Exchange::Beijing => "BJ",
            Exchange::Unknown => return None,
        };
        Some(format!("{}.{}", symbol, suffix))
    }

    /// 표시용 약어.
    pub fn code(&self) -> &'static str {
        match self {
            Exchange::Shanghai => "SS",
            Exchange::Shenzhen => "SZ",
            Exchange::Beijing => "BJ",
            Exchange::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 종목 코드 구조를 검증합니다.
///
/// 정확히 6자리 ASCII 숫자여야 합니다. 앞뒤 공백은 허용하지 않습니다.
pub fn validate_symbol(symbol: &str) -> PipelineResult<()> {
    if symbol.len() == SYMBOL_LEN && symbol.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PipelineError::InvalidSymbolFormat(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Exchange::classify("600036"), Exchange::Shanghai);
        assert_eq!(Exchange::classify("900901"), Exchange::Shanghai);
        assert_eq!(Exchange::classify("000001"), Exchange::Shenzhen);
        assert_eq!(Exchange::classify("300750"), Exchange::Shenzhen);
        assert_eq!(Exchange::classify("830799"), Exchange::Beijing);
        assert_eq!(Exchange::classify("ABCDEF"), Exchange::Unknown);
        assert_eq!(Exchange::classify(""), Exchange::Unknown);
    }

    #[test]
    fn test_eastmoney_secid() {
        assert_eq!(Exchange::eastmoney_secid("600519"), "1.600519");
        assert_eq!(Exchange::eastmoney_secid("000858"), "0.000858");
        assert_eq!(Exchange::eastmoney_secid("830799"), "0.830799");
    }

    #[test]
    fn test_yahoo_symbol() {
        assert_eq!(Exchange::yahoo_symbol("600036").as_deref(), Some("600036.SS"));
        assert_eq!(Exchange::yahoo_symbol("002415").as_deref(), Some("002415.SZ"));
        assert_eq!(Exchange::yahoo_symbol("430047").as_deref(), Some("430047.BJ"));
        assert_eq!(Exchange::yahoo_symbol("300750").as_deref(), Some("300750.SZ"));
        // 1로 시작하는 코드는 분류되지 않는다
        assert!(Exchange::yahoo_symbol("123").is_none());
        assert!(Exchange::yahoo_symbol("X00001").is_none());
    }

    #[test]
    fn test_validate_symbol() {
        assert!(validate_symbol("000001").is_ok());
        assert!(validate_symbol("600519").is_ok());

        for bad in ["00001", "0000011", "00000A", " 00001", "", "６０００３６"] {
            assert!(
                matches!(validate_symbol(bad), Err(PipelineError::InvalidSymbolFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
