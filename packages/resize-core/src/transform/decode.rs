use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;

use crate::errors::TransformError;

/// 画像バイト列をデコードし、DynamicImage と元のフォーマットを返す
///
/// フォーマットはバイト列の先頭から推測する（Content-Type は信用しない）
pub fn decode_image(input: &[u8]) -> Result<(DynamicImage, Option<ImageFormat>), TransformError> {
    let reader = ImageReader::new(Cursor::new(input))
        .with_guessed_format()
        .map_err(|e| TransformError::DecodeFailed(format!("failed to guess format: {e}")))?;

    let source_format = reader.format();

    let img = reader
        .decode()
        .map_err(|e| TransformError::DecodeFailed(e.to_string()))?;

    Ok((img, source_format))
}
