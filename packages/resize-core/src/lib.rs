pub mod constants;
pub mod errors;
pub mod payload;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{DEFAULT_CONTAINER, DEFAULT_QUALITY, DEFAULT_WIDTH, MAX_PIXELS};
pub use errors::{ConfigError, ParseError, StorageError, TransformError};
pub use payload::{extract_image_part, resolve_payload, ExtractedImage, PayloadOrigin};
pub use storage::{
    generate_blob_name, upload_jpeg, AzureBlobClient, AzureBlobConfig, MemoryStore,
    ObjectStoreUploader, UploadResult,
};
pub use transform::{process_image, ProcessedImage, ResizeParams};
pub use validation::validate_key;
