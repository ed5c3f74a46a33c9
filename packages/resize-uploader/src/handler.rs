use std::collections::HashMap;

use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::error::AppError;
use crate::AppState;
use resize_core::{process_image, resolve_payload, upload_jpeg, ResizeParams};

const SUCCESS_MESSAGE: &str = "Image resized and uploaded successfully";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub message: &'static str,
    pub url: String,
    pub blob_name: String,
    pub size: usize,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// CORS プリフライト（ボディは読まない、ヘッダはレイヤーで付く）
pub async fn preflight() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// POST / OPTIONS 以外のメソッド
pub async fn method_not_allowed() -> AppError {
    AppError::Rejected(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
}

/// 画像を受け取り、リサイズして JPEG でアップロードする
///
/// クエリ `width` / `quality` は解釈できなければデフォルト (1200 / 80) を使う
pub async fn resize_and_upload(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, AppError> {
    // 設定がなければ何も処理せずに 500
    let store = state.store.as_ref().map_err(|e| AppError::from(e.clone()))?;
    let body = body?;

    let params = ResizeParams::from_query(
        query.get("width").map(String::as_str),
        query.get("quality").map(String::as_str),
    );

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let image = resolve_payload(content_type, &body)?;

    tracing::info!(
        origin = image.origin().as_str(),
        input_size = image.len(),
        width = params.width,
        quality = params.quality,
        "resizing image"
    );

    // デコード・リサイズ・エンコードは CPU を占有するのでブロッキングスレッドで実行
    let input = image.into_bytes();
    let processed = tokio::task::spawn_blocking(move || process_image(&input, &params))
        .await
        .map_err(|e| AppError::Processing(format!("image processing task failed: {e}")))??;

    tracing::info!(
        width = processed.width,
        height = processed.height,
        output_size = processed.bytes.len(),
        source_format = ?processed.source_format,
        "image processed"
    );

    let uploaded = upload_jpeg(&**store, &state.container, processed.bytes).await?;

    let response = UploadResponse {
        success: true,
        message: SUCCESS_MESSAGE,
        url: uploaded.url,
        blob_name: uploaded.blob_name,
        size: uploaded.size,
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}
