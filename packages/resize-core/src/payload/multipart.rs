use std::ops::Range;

use crate::errors::ParseError;

/// 画像パートのヘッダを示すマーカー
const IMAGE_CONTENT_TYPE_MARKER: &[u8] = b"Content-Type: image/";

/// パートヘッダの終端 (CRLF CRLF)
const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// multipart ボディから最初の画像パートのバイト範囲を探す
///
/// 汎用の MIME パーサではなく、最初の画像パートだけを対象にした単純なバイト走査。
/// 1. `Content-Type: image/` を探す
/// 2. そこから最初の CRLF CRLF（ヘッダ終端）を探す
/// 3. 直後から `CRLF--{boundary}` までを画像データとする
///
/// 2 つ目以降の画像パートや、画像以外のパートは無視する。
pub fn find_image_part(body: &[u8], boundary: &str) -> Result<Range<usize>, ParseError> {
    let marker = find(body, IMAGE_CONTENT_TYPE_MARKER, 0).ok_or(ParseError::NoImagePart)?;

    let header_end = find(body, HEADER_TERMINATOR, marker).ok_or(ParseError::MalformedPart)?;
    let data_start = header_end + HEADER_TERMINATOR.len();

    let delimiter = delimiter_bytes(boundary);
    let data_end = find(body, &delimiter, data_start).ok_or(ParseError::IncompleteBody)?;

    if data_end <= data_start {
        return Err(ParseError::NoImageData);
    }

    Ok(data_start..data_end)
}

/// multipart ボディから最初の画像パートのデータを取り出す
pub fn extract_image_part<'a>(body: &'a [u8], boundary: &str) -> Result<&'a [u8], ParseError> {
    let range = find_image_part(body, boundary)?;
    Ok(&body[range])
}

/// パート終端の区切り `CRLF--{boundary}` を組み立てる
fn delimiter_bytes(boundary: &str) -> Vec<u8> {
    let mut delimiter = Vec::with_capacity(boundary.len() + 4);
    delimiter.extend_from_slice(b"\r\n--");
    delimiter.extend_from_slice(boundary.as_bytes());
    delimiter
}

/// `from` 以降で `needle` が最初に現れる位置を返す
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}
