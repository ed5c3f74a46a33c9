use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};

use crate::constants::DEFAULT_CONTAINER;
use crate::errors::{ConfigError, StorageError};
use crate::storage::uploader::ObjectStoreUploader;

/// Blob REST API のバージョン
const API_VERSION: &str = "2021-08-06";

const ACCOUNT_NAME_VAR: &str = "AZURE_STORAGE_ACCOUNT_NAME";
const CONTAINER_NAME_VAR: &str = "AZURE_STORAGE_CONTAINER_NAME";
const SAS_TOKEN_VAR: &str = "AZURE_STORAGE_SAS_TOKEN";
const ENDPOINT_VAR: &str = "AZURE_STORAGE_ENDPOINT";

/// Azure Blob Storage の接続設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureBlobConfig {
    pub account_name: String,
    pub container_name: String,
    /// `sv=...&sig=...` 形式の SAS（先頭の `?` は除去済み）
    pub sas_token: Option<String>,
    /// 例: `https://{account}.blob.core.windows.net`（末尾スラッシュなし）
    pub endpoint: String,
}

impl AzureBlobConfig {
    pub fn new(account_name: impl Into<String>) -> Self {
        let account_name = account_name.into();
        Self {
            endpoint: format!("https://{account_name}.blob.core.windows.net"),
            account_name,
            container_name: DEFAULT_CONTAINER.to_string(),
            sas_token: None,
        }
    }

    /// 環境変数から設定を読み込む
    ///
    /// 必須の環境変数:
    /// - AZURE_STORAGE_ACCOUNT_NAME
    ///
    /// 任意:
    /// - AZURE_STORAGE_CONTAINER_NAME（デフォルト `images`）
    /// - AZURE_STORAGE_SAS_TOKEN
    /// - AZURE_STORAGE_ENDPOINT（エミュレータ用）
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let account_name =
            non_empty(ACCOUNT_NAME_VAR).ok_or(ConfigError::MissingVar(ACCOUNT_NAME_VAR))?;
        let mut config = Self::new(account_name);

        if let Some(container) = non_empty(CONTAINER_NAME_VAR) {
            config.container_name = container;
        }
        if let Some(endpoint) = non_empty(ENDPOINT_VAR) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidVar {
                    name: ENDPOINT_VAR,
                    reason: format!("expected an http(s) URL, got {endpoint}"),
                });
            }
            config.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        config.sas_token = non_empty(SAS_TOKEN_VAR).map(|t| t.trim_start_matches('?').to_string());

        Ok(config)
    }

    /// リクエストに付ける認証情報があるか
    ///
    /// SAS がなければ匿名書き込みを許すエンドポイント以外では 403 になる
    pub fn has_credentials(&self) -> bool {
        self.sas_token.is_some()
    }
}

/// Azure Blob Storage クライアント
///
/// SAS が設定されていればリクエストに付与する。返す URL には SAS を含めない。
#[derive(Clone)]
pub struct AzureBlobClient {
    client: Client,
    config: AzureBlobConfig,
}

impl AzureBlobClient {
    pub fn new(config: AzureBlobConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Blob の公開 URL
    pub fn blob_url(&self, container: &str, key: &str) -> String {
        format!("{}/{}/{}", self.config.endpoint, container, key)
    }

    /// SAS を付けたリクエスト URL
    fn signed(&self, url: String, query: Option<&str>) -> String {
        let params: Vec<&str> = query
            .into_iter()
            .chain(self.config.sas_token.as_deref())
            .collect();

        if params.is_empty() {
            url
        } else {
            format!("{url}?{}", params.join("&"))
        }
    }
}

#[async_trait]
impl ObjectStoreUploader for AzureBlobClient {
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError> {
        let url = self.signed(
            format!("{}/{}", self.config.endpoint, container),
            Some("restype=container"),
        );

        let response = self
            .client
            .put(&url)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-blob-public-access", "blob")
            .header(reqwest::header::CONTENT_LENGTH, 0)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::CREATED => {
                tracing::info!(container = %container, "created container");
                Ok(())
            }
            // 同時作成や既存コンテナは成功扱い
            StatusCode::CONFLICT if error_code(&response) == Some("ContainerAlreadyExists") => {
                Ok(())
            }
            status => Err(unexpected_status(status, response).await),
        }
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let blob_url = self.blob_url(container, key);
        let url = self.signed(blob_url.clone(), None);

        let response = self
            .client
            .put(&url)
            .header("x-ms-version", API_VERSION)
            .header("x-ms-blob-type", "BlockBlob")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        match response.status() {
            status if status.is_success() => Ok(blob_url),
            status => {
                tracing::error!(
                    key = %key,
                    status = %status,
                    "unexpected response from blob storage"
                );
                Err(unexpected_status(status, response).await)
            }
        }
    }
}

fn error_code(response: &reqwest::Response) -> Option<&str> {
    response
        .headers()
        .get("x-ms-error-code")
        .and_then(|v| v.to_str().ok())
}

async fn unexpected_status(status: StatusCode, response: reqwest::Response) -> StorageError {
    let code = error_code(&response).map(str::to_string);
    let body = response.text().await.unwrap_or_default();

    StorageError::UnexpectedStatus {
        status: status.as_u16(),
        body: match code {
            Some(code) => format!("{code}: {body}"),
            None => body,
        },
    }
}
