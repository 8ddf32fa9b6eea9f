//! 파이프라인 에러 타입.
//!
//! 요청 검증부터 응답 조립까지 발생할 수 있는 에러를 정의합니다.
//! 업스트림 제공자 실패는 데이터 소스 체인 내부에서 흡수되며
//! 호출자에게 전달되지 않습니다.

use chrono::NaiveDate;
use thiserror::Error;

/// 주가 파이프라인 에러.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 종목 코드 형식 오류 (6자리 숫자가 아님)
    #[error("종목 코드 형식 오류: {0} (6자리 숫자여야 합니다)")]
    InvalidSymbolFormat(String),

    /// 분할 기준일 형식 오류
    #[error("날짜 형식 오류: {0} (YYYY-MM-DD 형식이어야 합니다)")]
    InvalidDateFormat(String),

    /// 조회 구간이 허용 범위를 벗어남
    #[error("조회 구간 오류: {0}")]
    InvalidWindow(String),

    /// 합성 데이터 대체 이후에도 데이터가 없음
    #[error("{symbol} 종목의 {start} ~ {end} 구간에 데이터가 없습니다")]
    NoDataInRange {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// 업스트림 제공자 실패 (체인 내부에서만 사용)
    #[error("데이터 제공자 {provider} 실패: {reason}")]
    UpstreamProviderFailure { provider: String, reason: String },

    /// 내부 에러
    #[error("내부 에러: {0}")]
    Internal(String),
}

/// 파이프라인 작업을 위한 Result 타입.
pub type PipelineResult<T> = Result<T, PipelineError>;

impl PipelineError {
    /// 호출자 입력 때문에 발생한 에러인지 확인합니다.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidSymbolFormat(_)
                | PipelineError::InvalidDateFormat(_)
                | PipelineError::InvalidWindow(_)
        )
    }

    /// 데이터 없음 에러인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::NoDataInRange { .. })
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let symbol_err = PipelineError::InvalidSymbolFormat("ABC".to_string());
        assert!(symbol_err.is_client_error());
        assert!(!symbol_err.is_not_found());

        let date_err = PipelineError::InvalidDateFormat("2024-13-01".to_string());
        assert!(date_err.is_client_error());

        let no_data = PipelineError::NoDataInRange {
            symbol: "000001".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        };
        assert!(no_data.is_not_found());
        assert!(!no_data.is_client_error());

        let internal = PipelineError::Internal("boom".to_string());
        assert!(!internal.is_client_error());
        assert!(!internal.is_not_found());
    }

    #[test]
    fn test_error_message_contains_input() {
        let err = PipelineError::InvalidDateFormat("2024-13-01".to_string());
        assert!(err.to_string().contains("2024-13-01"));
    }
}
