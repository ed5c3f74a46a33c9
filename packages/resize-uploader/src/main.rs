mod config;
mod cors;
mod error;
mod handler;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use resize_core::{AzureBlobClient, ConfigError, ObjectStoreUploader};

#[derive(Clone)]
pub struct AppState {
    /// ストレージが未設定の場合は設定エラーを保持し、リクエスト時に 500 を返す
    pub store: Result<Arc<dyn ObjectStoreUploader>, ConfigError>,
    pub container: String,
}

impl AppState {
    fn from_config(config: &Config) -> Self {
        match &config.storage {
            Ok(storage) => {
                tracing::info!(
                    account = %storage.account_name,
                    container = %storage.container_name,
                    endpoint = %storage.endpoint,
                    sas = storage.sas_token.is_some(),
                    "using Azure Blob Storage"
                );
                if !storage.has_credentials() {
                    tracing::warn!(
                        account = %storage.account_name,
                        "AZURE_STORAGE_SAS_TOKEN is not set, uploads will be rejected \
                         unless the endpoint allows anonymous writes"
                    );
                }
                let container = storage.container_name.clone();
                let client: Arc<dyn ObjectStoreUploader> =
                    Arc::new(AzureBlobClient::new(storage.clone()));
                Self {
                    store: Ok(client),
                    container,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "storage is not configured, uploads will fail");
                Self {
                    store: Err(e.clone()),
                    container: resize_core::DEFAULT_CONTAINER.to_string(),
                }
            }
        }
    }
}

pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    let router = Router::new()
        .route("/health", get(handler::health))
        .route(
            "/ResizeAndUploadImage",
            post(handler::resize_and_upload)
                .options(handler::preflight)
                .fallback(handler::method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes));

    cors::with_cors(router)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("resize_uploader=info,resize_core=info,tower_http=info")
            }),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, app(state, config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // シグナルを待てない場合はそのまま動かし続ける
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
