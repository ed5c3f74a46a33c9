mod types;

pub use types::{ConfigError, ParseError, StorageError, TransformError};
