use std::net::SocketAddr;

use resize_core::{AzureBlobConfig, ConfigError};

const DEFAULT_PORT: u16 = 8080;

/// 50MB
const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// 起動時に一度だけ読み込むサービス設定
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    /// ストレージ設定がなくても起動はする（リクエストごとに 500 を返す）
    pub storage: Result<AzureBlobConfig, ConfigError>,
}

impl Config {
    /// 環境変数から設定を読み込む
    ///
    /// - BIND_ADDR（デフォルト `0.0.0.0:8080`）
    /// - MAX_BODY_BYTES（デフォルト 50MB）
    /// - AZURE_STORAGE_* は [`AzureBlobConfig::from_env`] を参照
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = parse_or_default(&lookup, "BIND_ADDR", || {
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        });
        let max_body_bytes = parse_or_default(&lookup, "MAX_BODY_BYTES", || DEFAULT_MAX_BODY_BYTES);

        Self {
            bind_addr,
            max_body_bytes,
            storage: AzureBlobConfig::from_lookup(&lookup),
        }
    }
}

/// 値が壊れていても起動は止めず、警告を出してデフォルトを使う
fn parse_or_default<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: impl FnOnce() -> T,
) -> T {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = %name, value = %raw, "invalid value, using default");
            default()
        }),
        None => default(),
    }
}
