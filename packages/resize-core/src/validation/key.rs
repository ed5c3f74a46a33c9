use crate::errors::StorageError;

/// オブジェクトキーの最大長（Blob 名の上限）
const MAX_KEY_LEN: usize = 1024;

/// オブジェクトキーを検証する
///
/// キーはそのまま URL パスに埋め込むので、パストラバーサルや
/// エンコードが必要な文字を含むキーは拒否する
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("key is empty".to_string()));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::InvalidKey(format!(
            "key is too long (max {MAX_KEY_LEN})"
        )));
    }

    let decoded = urlencoding::decode(key)
        .map_err(|_| StorageError::InvalidKey("invalid URL encoding".to_string()))?;

    if decoded.contains("..")
        || decoded.starts_with('/')
        || decoded.contains("//")
        || decoded.contains('\\')
    {
        return Err(StorageError::InvalidKey(format!("path traversal detected: {key}")));
    }

    // 英数字、ハイフン、アンダースコア、ドット、スラッシュのみ
    if !decoded
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/'))
    {
        return Err(StorageError::InvalidKey(format!("invalid characters in key: {key}")));
    }

    Ok(())
}
