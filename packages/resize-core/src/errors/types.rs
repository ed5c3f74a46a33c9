use thiserror::Error;

/// リクエストボディから画像を取り出せなかった場合のエラー
///
/// メッセージはそのままクライアントに返される
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No image data provided")]
    EmptyPayload,

    #[error("Invalid multipart boundary")]
    InvalidBoundary,

    #[error("No image data found in multipart request")]
    NoImagePart,

    #[error("Malformed multipart part: header terminator not found")]
    MalformedPart,

    #[error("Incomplete multipart body: closing boundary not found")]
    IncompleteBody,

    #[error("Image part contains no data")]
    NoImageData,
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingVar(&'static str),

    #[error("{name} is invalid: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// 画像変換エラー
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Invalid image dimensions ({width}x{height})")]
    InvalidImageDimensions { width: u32, height: u32 },

    #[error("Image resolution exceeds maximum ({width}x{height})")]
    ResolutionTooLarge { width: u32, height: u32 },

    #[error("Failed to encode JPEG: {0}")]
    EncodeFailed(String),

    #[error("Image processing failed: {0}")]
    ProcessingFailed(String),
}

/// ストレージアクセスエラー
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("storage request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} from storage: {body}")]
    UnexpectedStatus { status: u16, body: String },
}
