use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::errors::StorageError;
use crate::storage::uploader::ObjectStoreUploader;

/// 保存されたオブジェクト
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
}

#[derive(Default)]
struct Inner {
    containers: HashSet<String>,
    objects: HashMap<(String, String), StoredObject>,
    upload_attempts: usize,
    failure: Option<String>,
}

/// プロセス内に保持するストア（ローカル開発・テスト用）
pub struct MemoryStore {
    base_url: String,
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            inner: Mutex::new(Inner::default()),
        }
    }

    /// 以降のアップロードを指定メッセージで失敗させる
    pub fn fail_uploads(&self, message: impl Into<String>) {
        self.lock().failure = Some(message.into());
    }

    pub fn get(&self, container: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(container.to_string(), key.to_string()))
            .cloned()
    }

    pub fn has_container(&self, container: &str) -> bool {
        self.lock().containers.contains(container)
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// 失敗したものも含めたアップロード試行回数
    pub fn upload_attempts(&self) -> usize {
        self.lock().upload_attempts
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStoreUploader for MemoryStore {
    async fn ensure_container(&self, container: &str) -> Result<(), StorageError> {
        self.lock().containers.insert(container.to_string());
        Ok(())
    }

    async fn upload(
        &self,
        container: &str,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let mut inner = self.lock();
        inner.upload_attempts += 1;

        if let Some(message) = &inner.failure {
            return Err(StorageError::Request(message.clone()));
        }
        if !inner.containers.contains(container) {
            return Err(StorageError::UnexpectedStatus {
                status: 404,
                body: format!("container {container} does not exist"),
            });
        }

        inner.objects.insert(
            (container.to_string(), key.to_string()),
            StoredObject {
                data,
                content_type: content_type.to_string(),
            },
        );

        Ok(format!("{}/{}/{}", self.base_url, container, key))
    }
}
