//! tracing 기반 로깅 초기화.
//!
//! `[logging]` 설정 섹션이 필터와 출력 형식을 결정합니다.
//! `RUST_LOG`가 있으면 설정된 레벨 대신 사용합니다.

use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

use crate::config::LoggingConfig;

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 개발용 여러 줄 형식
    #[default]
    Pretty,
    /// 로그 수집기용 JSON
    Json,
    /// 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    let layer = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_target(true);

    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// 레벨 지시문(`"info,stockstudy_data=debug"`)으로 필터를 만듭니다.
fn directive_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

/// 로깅 시스템을 초기화합니다.
///
/// 알 수 없는 형식 문자열은 pretty로 처리하고 경고를 남깁니다.
pub fn init_logging(settings: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => directive_filter(&settings.level)?,
    };
    let parsed = settings.format.parse::<LogFormat>();
    let format = parsed.clone().unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt_layer(format))
        .with(filter)
        .try_init()?;

    if let Err(e) = parsed {
        tracing::warn!(error = %e, "pretty 형식으로 대체합니다");
    }
    tracing::info!(format = ?format, level = %settings.level, "Logging initialized");

    Ok(())
}

/// 주가 요청 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! stock_span {
    ($name:expr, $symbol:expr) => {
        tracing::info_span!($name, symbol = %$symbol)
    };
    ($name:expr, $symbol:expr, $dividing_date:expr) => {
        tracing::info_span!($name, symbol = %$symbol, dividing_date = %$dividing_date)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_directive_filter() {
        assert!(directive_filter("info").is_ok());
        assert!(directive_filter("info,stockstudy_data=debug,tower_http=info").is_ok());
        assert!(directive_filter("stockstudy_data=loudest").is_err());
    }

    #[test]
    fn test_default_settings_are_valid() {
        let settings = LoggingConfig::default();
        assert!(directive_filter(&settings.level).is_ok());
        assert_eq!(settings.format.parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }
}
