use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use crate::constants::OUTPUT_CONTENT_TYPE;
use crate::errors::StorageError;
use crate::storage::key::generate_blob_name;
use crate::validation::validate_key;

/// アップロード結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub blob_name: String,
    pub url: String,
    pub size: usize,
}

/// オブジェクトストレージへの書き込み口
///
/// 認証情報の扱いは実装側に閉じる
#[async_trait]
pub trait ObjectStoreUploader: Send + Sync {
    /// コンテナがなければ作成する（既にあれば何もしない）
    ///
    /// 複数リクエストから同時に呼ばれても安全であること
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError>;

    /// オブジェクトを書き込み、取得用 URL を返す（常に上書き）
    async fn upload(
        &self,
        container: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// JPEG を新しいキーでアップロードする
pub async fn upload_jpeg(
    store: &dyn ObjectStoreUploader,
    container: &str,
    data: Bytes,
) -> Result<UploadResult, StorageError> {
    let blob_name = generate_blob_name(Utc::now());
    validate_key(&blob_name)?;

    store.ensure_container(container).await?;

    let size = data.len();
    let url = store
        .upload(container, &blob_name, data, OUTPUT_CONTENT_TYPE)
        .await?;

    tracing::info!(container = %container, blob_name = %blob_name, size = size, "uploaded image");

    Ok(UploadResult {
        blob_name,
        url,
        size,
    })
}
