pub mod azure;
pub mod key;
pub mod memory;
pub mod uploader;

pub use azure::{AzureBlobClient, AzureBlobConfig};
pub use key::generate_blob_name;
pub use memory::MemoryStore;
pub use uploader::{upload_jpeg, ObjectStoreUploader, UploadResult};
// StorageError は errors モジュールで定義済み
pub use crate::errors::StorageError;
