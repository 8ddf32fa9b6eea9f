//! 데이터 소스 체인.
//!
//! 등록된 제공자를 순서대로 시도하고, 모두 실패하면 합성 생성기로 대체합니다.
//!
//! 각 제공자의 결과는 요청 구간으로 잘라내고 정렬/중복 제거한 뒤 판정합니다.
//! 에러를 반환했거나 구간 안에 남는 일봉이 없으면 실패로 보고 다음 단계로 넘어갑니다.
//! 합성 생성기는 항상 성공하므로 `fetch`는 에러를 반환하지 않습니다.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use stockstudy_core::{PipelineError, PipelineResult, TimeSeries};

use crate::provider::BarProvider;
use crate::synthetic::SyntheticGenerator;

/// 합성 생성기를 가리키는 출처 이름.
pub const SYNTHETIC_SOURCE: &str = "synthetic";

/// 체인 조회 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// 데이터를 제공한 소스 이름
    pub source: String,
    /// 요청 구간으로 제한된 시계열
    pub series: TimeSeries,
}

impl FetchOutcome {
    /// 합성 데이터로 대체되었는지 여부.
    pub fn is_synthetic(&self) -> bool {
        self.source == SYNTHETIC_SOURCE
    }
}

/// 제공자 → 대체 제공자 → 합성 생성기 순서의 데이터 소스 체인.
#[derive(Clone, Default)]
pub struct SourceChain {
    providers: Vec<Arc<dyn BarProvider>>,
    synthetic: SyntheticGenerator,
}

impl SourceChain {
    /// 주어진 순서대로 시도할 제공자로 체인을 생성합니다.
    pub fn new(providers: Vec<Arc<dyn BarProvider>>) -> Self {
        Self {
            providers,
            synthetic: SyntheticGenerator::new(),
        }
    }

    /// 등록된 제공자 이름 목록 (합성 생성기 제외).
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// `[start, end]` 구간의 시계열을 조회합니다.
    ///
    /// 업스트림 실패는 로그로만 남기고 다음 단계로 넘어갑니다.
    #[instrument(skip(self))]
    pub async fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> FetchOutcome {
        for provider in &self.providers {
            match Self::try_provider(provider.as_ref(), symbol, start, end).await {
                Ok(series) => {
                    info!(provider = provider.name(), symbol = symbol, count = series.len(), "데이터 조회 완료");
                    return FetchOutcome {
                        source: provider.name().to_string(),
                        series,
                    };
                }
                Err(failure) => {
                    warn!(symbol = symbol, error = %failure, "다음 소스로 Fallback");
                }
            }
        }

        let series = self.synthetic.generate(symbol, start, end);
        warn!(symbol = symbol, count = series.len(), "모든 제공자 실패, 합성 데이터 사용");

        FetchOutcome {
            source: SYNTHETIC_SOURCE.to_string(),
            series,
        }
    }

    /// 제공자 하나를 호출하고 결과를 구간으로 잘라냅니다.
    ///
    /// 호출 에러와 구간 내 빈 결과는 모두 `UpstreamProviderFailure`입니다.
    async fn try_provider(
        provider: &dyn BarProvider,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> PipelineResult<TimeSeries> {
        let name = provider.name();
        let failure = |reason: String| PipelineError::UpstreamProviderFailure {
            provider: name.to_string(),
            reason,
        };

        let rows = provider
            .fetch_bars(symbol, start, end)
            .await
            .map_err(|e| failure(e.to_string()))?;

        let raw_count = rows.len();
        let series = TimeSeries::new(rows).within(start, end);

        if series.is_empty() {
            return Err(failure(format!("{} ~ {} 구간 내 데이터 없음 (수신 {}행)", start, end, raw_count)));
        }

        if series.len() < raw_count {
            debug!(provider = name, dropped = raw_count - series.len(), "구간 밖 또는 중복 행 제외");
        }

        Ok(series)
    }
}
