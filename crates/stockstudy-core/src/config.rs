//! 설정 관리.
//!
//! 이 모듈은 애플리케이션 설정을 정의하고 관리합니다.
//! 설정 파일이 없어도 모든 항목에 기본값이 있으므로 서버는 기동됩니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 결과 캐시 설정
    #[serde(default)]
    pub cache: CacheConfig,
    /// 데이터 소스 설정
    #[serde(default)]
    pub sources: SourcesConfig,
    /// 요청 기본값 및 한도
    #[serde(default)]
    pub request: RequestConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 캐시 백엔드 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// 프로세스 내 메모리 캐시
    #[default]
    Memory,
    /// Redis 캐시 (연결 실패 시 메모리로 대체)
    Redis,
}

/// 결과 캐시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// 사용할 백엔드
    #[serde(default)]
    pub backend: CacheBackend,
    /// 항목 유효 시간 (초)
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    /// Redis 연결 URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_redis_url() -> String {
    "redis://localhost:6379/0".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            ttl_secs: default_cache_ttl(),
            redis_url: default_redis_url(),
        }
    }
}

/// 데이터 소스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Eastmoney 제공자 사용 여부
    #[serde(default = "default_true")]
    pub eastmoney_enabled: bool,
    /// Eastmoney API 기본 URL
    #[serde(default = "default_eastmoney_url")]
    pub eastmoney_base_url: String,
    /// Yahoo Finance 제공자 사용 여부
    #[serde(default = "default_true")]
    pub yahoo_enabled: bool,
    /// 제공자별 HTTP 타임아웃 (초)
    #[serde(default = "default_source_timeout")]
    pub request_timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_eastmoney_url() -> String {
    "https://push2his.eastmoney.com".to_string()
}

fn default_source_timeout() -> u64 {
    10
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            eastmoney_enabled: true,
            eastmoney_base_url: default_eastmoney_url(),
            yahoo_enabled: true,
            request_timeout_secs: default_source_timeout(),
        }
    }
}

/// 요청 기본값 및 한도.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestConfig {
    /// 과거 구간 기본 일수
    #[serde(default = "default_historical_days")]
    pub default_historical_days: u32,
    /// 미래 구간 기본 일수
    #[serde(default = "default_future_days")]
    pub default_future_days: u32,
    /// 과거/미래 구간 각각의 최대 일수
    #[serde(default = "default_max_window")]
    pub max_window_days: u32,
}

fn default_historical_days() -> u32 {
    180
}

fn default_future_days() -> u32 {
    90
}

fn default_max_window() -> u32 {
    3650
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            default_historical_days: default_historical_days(),
            default_future_days: default_future_days(),
            max_window_days: default_max_window(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일은 선택 사항이며, `STOCKSTUDY__CACHE__BACKEND=redis` 처럼
    /// 환경 변수로 모든 항목을 덮어쓸 수 있습니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("STOCKSTUDY")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert_eq!(config.request.default_historical_days, 180);
        assert_eq!(config.request.default_future_days, 90);
        assert!(config.sources.eastmoney_enabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.request.max_window_days, 3650);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_cache_backend_deserialize() {
        let backend: CacheBackend = serde_json::from_str("\"redis\"").unwrap();
        assert_eq!(backend, CacheBackend::Redis);
    }
}
