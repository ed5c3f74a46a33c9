use bytes::Bytes;

use crate::errors::ParseError;
use crate::payload::multipart::find_image_part;

/// 画像データの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    Multipart,
    Raw,
}

impl PayloadOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Multipart => "multipart",
            Self::Raw => "raw",
        }
    }
}

/// リクエストから取り出した画像データ（空にはならない）
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    bytes: Bytes,
    origin: PayloadOrigin,
}

impl ExtractedImage {
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn origin(&self) -> PayloadOrigin {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Content-Type とボディから処理対象の画像バイト列を決定する
///
/// `multipart/form-data` の場合は boundary を取り出して最初の画像パートを使い、
/// それ以外はボディ全体を画像として扱う。
pub fn resolve_payload(
    content_type: Option<&str>,
    body: &Bytes,
) -> Result<ExtractedImage, ParseError> {
    let content_type = content_type.unwrap_or_default();

    let (bytes, origin) = if content_type.contains("multipart/form-data") {
        let boundary = parse_boundary(content_type).ok_or(ParseError::InvalidBoundary)?;
        let range = find_image_part(body, boundary)?;
        // 元バッファを共有したままスライスする
        (body.slice(range), PayloadOrigin::Multipart)
    } else {
        (body.clone(), PayloadOrigin::Raw)
    };

    if bytes.is_empty() {
        return Err(ParseError::EmptyPayload);
    }

    Ok(ExtractedImage { bytes, origin })
}

/// Content-Type の `boundary=` パラメータを取り出す（前後の引用符は除去）
fn parse_boundary(content_type: &str) -> Option<&str> {
    let start = content_type.find("boundary=")? + "boundary=".len();
    let value = content_type[start..].split(';').next()?.trim();
    let boundary = value.trim_matches('"');

    if boundary.is_empty() {
        None
    } else {
        Some(boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boundary() {
        assert_eq!(
            parse_boundary("multipart/form-data; boundary=abc123"),
            Some("abc123")
        );
        assert_eq!(
            parse_boundary("multipart/form-data; boundary=\"quoted\"; charset=utf-8"),
            Some("quoted")
        );
        assert_eq!(parse_boundary("multipart/form-data"), None);
        assert_eq!(parse_boundary("multipart/form-data; boundary="), None);
    }

    #[test]
    fn test_raw_body() {
        let body = Bytes::from_static(b"\xFF\xD8\xFF\xE0raw");
        let image = resolve_payload(Some("image/jpeg"), &body).unwrap();

        assert_eq!(image.origin(), PayloadOrigin::Raw);
        assert_eq!(image.bytes(), &body);
    }

    #[test]
    fn test_missing_content_type_is_raw() {
        let body = Bytes::from_static(b"data");
        let image = resolve_payload(None, &body).unwrap();

        assert_eq!(image.origin(), PayloadOrigin::Raw);
        assert_eq!(image.len(), 4);
    }

    #[test]
    fn test_empty_raw_body() {
        let result = resolve_payload(Some("application/octet-stream"), &Bytes::new());

        assert_eq!(result.unwrap_err(), ParseError::EmptyPayload);
    }

    #[test]
    fn test_multipart_body() {
        let body = Bytes::from_static(
            b"--abc\r\n\
              Content-Disposition: form-data; name=\"file\"\r\n\
              Content-Type: image/png\r\n\r\n\
              PNGDATA\r\n--abc--\r\n",
        );
        let image = resolve_payload(Some("multipart/form-data; boundary=abc"), &body).unwrap();

        assert_eq!(image.origin(), PayloadOrigin::Multipart);
        assert_eq!(image.into_bytes(), Bytes::from_static(b"PNGDATA"));
    }

    #[test]
    fn test_multipart_without_boundary() {
        let body = Bytes::from_static(b"anything");
        let result = resolve_payload(Some("multipart/form-data"), &body);

        assert_eq!(result.unwrap_err(), ParseError::InvalidBoundary);
    }

    #[test]
    fn test_multipart_without_image_part() {
        let body = Bytes::from_static(
            b"--abc\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--abc--\r\n",
        );
        let result = resolve_payload(Some("multipart/form-data; boundary=abc"), &body);

        assert_eq!(result.unwrap_err(), ParseError::NoImagePart);
    }
}
