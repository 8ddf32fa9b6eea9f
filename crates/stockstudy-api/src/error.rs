//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use stockstudy_core::PipelineError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_DATE",
///   "message": "날짜 형식 오류: 2024-13-01 (YYYY-MM-DD 형식이어야 합니다)",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_SYMBOL", "NO_DATA")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(code: impl Into<String>, message: impl Into<String>, details: Value) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 파이프라인 에러를 HTTP 응답으로 변환합니다.
///
/// | 에러 | 상태 | 코드 |
/// |------|------|------|
/// | `InvalidSymbolFormat` | 400 | `INVALID_SYMBOL` |
/// | `InvalidDateFormat` | 400 | `INVALID_DATE` |
/// | `InvalidWindow` | 400 | `INVALID_WINDOW` |
/// | `NoDataInRange` | 404 | `NO_DATA` |
/// | 그 외 | 500 | `INTERNAL_ERROR` |
pub fn pipeline_error_response(err: PipelineError) -> (StatusCode, Json<ApiErrorResponse>) {
    let message = err.to_string();
    let (status, body) = match &err {
        PipelineError::InvalidSymbolFormat(_) => (
            StatusCode::BAD_REQUEST,
            ApiErrorResponse::new("INVALID_SYMBOL", message),
        ),
        PipelineError::InvalidDateFormat(_) => (
            StatusCode::BAD_REQUEST,
            ApiErrorResponse::new("INVALID_DATE", message),
        ),
        PipelineError::InvalidWindow(_) => (
            StatusCode::BAD_REQUEST,
            ApiErrorResponse::new("INVALID_WINDOW", message),
        ),
        PipelineError::NoDataInRange { .. } => (
            StatusCode::NOT_FOUND,
            ApiErrorResponse::new("NO_DATA", message),
        ),
        PipelineError::UpstreamProviderFailure { .. } | PipelineError::Internal(_) => {
            error!(error = %err, "주가 데이터 처리 실패");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorResponse::with_details(
                    "INTERNAL_ERROR",
                    "서버 내부 오류가 발생했습니다",
                    serde_json::json!({ "cause": message }),
                ),
            )
        }
    };
    (status, Json(body))
}
