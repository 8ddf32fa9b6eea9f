//! 주가 데이터 파이프라인.
//!
//! 요청 하나를 다음 순서로 처리합니다:
//!
//! 1. 종목 코드/분할 기준일/구간 길이 검증 (실패 시 I/O 없이 종료)
//! 2. 결과 캐시 조회
//! 3. 데이터 소스 체인으로 `[기준일 - h, 기준일 + f]` 구간 조회
//! 4. 과거/미래 분할 및 구간별 지표 계산
//! 5. 응답 페이로드 조립
//! 6. 결과 캐시 저장
//!
//! 캐시 백엔드 오류는 응답을 막지 않습니다. 조회 오류는 미스로, 저장 오류는 로그로만 처리합니다.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tracing::{debug, info, warn, Instrument};

use stockstudy_analytics::Segmenter;
use stockstudy_core::{
    stock_span, validate_symbol, PipelineError, PipelineResult, RequestSignature, StockPayload,
};
use stockstudy_data::{ResultCache, SourceChain};

use crate::symbols;

/// 분할 기준일 형식.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 검증을 마친 요청.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub signature: RequestSignature,
    /// 조회 구간 시작일 (포함)
    pub start: NaiveDate,
    /// 조회 구간 종료일 (포함)
    pub end: NaiveDate,
}

/// 주가 데이터 파이프라인.
pub struct StockPipeline {
    chain: SourceChain,
    cache: Arc<dyn ResultCache>,
    segmenter: Segmenter,
    cache_ttl: Duration,
    max_window_days: u32,
}

impl StockPipeline {
    pub fn new(
        chain: SourceChain,
        cache: Arc<dyn ResultCache>,
        cache_ttl: Duration,
        max_window_days: u32,
    ) -> Self {
        Self {
            chain,
            cache,
            segmenter: Segmenter::default(),
            cache_ttl,
            max_window_days,
        }
    }

    /// 결과 캐시.
    pub fn cache(&self) -> &Arc<dyn ResultCache> {
        &self.cache
    }

    /// 데이터 소스 체인.
    pub fn chain(&self) -> &SourceChain {
        &self.chain
    }

    /// 요청 인자를 검증하고 요청 서명과 조회 구간을 만듭니다.
    ///
    /// 캐시나 제공자에 접근하기 전에 모든 클라이언트 에러를 여기서 걸러냅니다.
    pub fn validate(
        &self,
        symbol: &str,
        dividing_date: Option<&str>,
        historical_days: u32,
        future_days: u32,
    ) -> PipelineResult<ValidatedRequest> {
        validate_symbol(symbol)?;

        let raw = dividing_date
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::InvalidDateFormat("분할 기준일이 없습니다".to_string()))?;
        let dividing_date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| PipelineError::InvalidDateFormat(raw.to_string()))?;

        for (label, days) in [("historical_days", historical_days), ("future_days", future_days)] {
            if days > self.max_window_days {
                return Err(PipelineError::InvalidWindow(format!(
                    "{}={}가 최대값 {}을 초과합니다",
                    label, days, self.max_window_days
                )));
            }
        }

        let signature = RequestSignature::new(symbol, dividing_date, historical_days, future_days);
        let (start, end) = signature.window()?;

        Ok(ValidatedRequest { signature, start, end })
    }

    /// 과거/미래 구간으로 나뉜 지표 부착 일봉을 반환합니다.
    pub async fn get_stock_data(
        &self,
        symbol: &str,
        dividing_date: Option<&str>,
        historical_days: u32,
        future_days: u32,
    ) -> PipelineResult<StockPayload> {
        let request = self.validate(symbol, dividing_date, historical_days, future_days)?;
        let span = stock_span!(
            "stock_pipeline",
            request.signature.symbol,
            request.signature.dividing_date
        );

        self.run(request).instrument(span).await
    }

    async fn run(&self, request: ValidatedRequest) -> PipelineResult<StockPayload> {
        let ValidatedRequest { signature, start, end } = request;

        match self.cache.get(&signature).await {
            Ok(Some(payload)) => {
                debug!(key = %signature, "캐시 적중");
                return Ok(payload);
            }
            Ok(None) => {}
            Err(e) => warn!(key = %signature, error = %e, "캐시 조회 실패, 미스로 처리"),
        }

        let outcome = self.chain.fetch(&signature.symbol, start, end).await;

        if outcome.series.is_empty() {
            return Err(PipelineError::NoDataInRange {
                symbol: signature.symbol.clone(),
                start,
                end,
            });
        }

        let (historical_data, future_data) = self
            .segmenter
            .segment(&outcome.series, signature.dividing_date)
            .map_err(|e| PipelineError::Internal(format!("지표 계산 실패: {}", e)))?;

        let name = symbols::name_of(&signature.symbol)
            .map(str::to_string)
            .unwrap_or_else(|| signature.symbol.clone());

        let payload = StockPayload {
            symbol: signature.symbol.clone(),
            name,
            dividing_date: signature.dividing_date,
            historical_data,
            future_data,
        };

        if let Err(e) = self.cache.put(&signature, &payload, self.cache_ttl).await {
            warn!(key = %signature, error = %e, "캐시 저장 실패");
        }

        info!(
            source = %outcome.source,
            historical = payload.historical_data.len(),
            future = payload.future_data.len(),
            "주가 데이터 조립 완료"
        );

        Ok(payload)
    }
}
