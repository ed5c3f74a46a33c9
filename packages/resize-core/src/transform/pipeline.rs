use bytes::Bytes;
use image::ImageFormat;

use crate::errors::TransformError;
use crate::transform::{
    apply_orientation, calculate_fit_dimensions, decode_image, encode_jpeg, read_orientation,
    resize::check_pixel_budget, resize_image, ResizeParams,
};

/// 変換済みの JPEG 画像
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Bytes,
    pub width: u32,
    pub height: u32,
    pub source_format: Option<ImageFormat>,
}

/// 画像バイト列をデコード→リサイズ→JPEG エンコードする
///
/// EXIF Orientation は寸法計算の前に適用するので、出力幅は向きを直した後の幅になる。
/// メタデータ (EXIF/XMP) はデコード・エンコードサイクルで削除される。
pub fn process_image(
    input: &[u8],
    params: &ResizeParams,
) -> Result<ProcessedImage, TransformError> {
    let (img, source_format) = decode_image(input)?;
    check_pixel_budget(img.width(), img.height())?;

    let orientation = read_orientation(input).unwrap_or_default();
    let img = apply_orientation(img, orientation);

    let (dst_w, dst_h) = calculate_fit_dimensions(img.width(), img.height(), params.width)?;
    let resized = resize_image(img, dst_w, dst_h)?;

    let bytes = encode_jpeg(&resized, params.quality)?;

    Ok(ProcessedImage {
        bytes: Bytes::from(bytes),
        width: dst_w,
        height: dst_h,
        source_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use std::io::Cursor;

    fn encoded(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_process_jpeg() {
        let input = encode_jpeg(&DynamicImage::new_rgb8(2000, 1000), 90).unwrap();
        let output = process_image(&input, &ResizeParams::new(1000, 80)).unwrap();

        assert_eq!((output.width, output.height), (1000, 500));
        assert_eq!(output.source_format, Some(ImageFormat::Jpeg));

        let (decoded, format) = decode_image(&output.bytes).unwrap();
        assert_eq!(format, Some(ImageFormat::Jpeg));
        assert_eq!((decoded.width(), decoded.height()), (1000, 500));
    }

    #[test]
    fn test_process_png_to_jpeg() {
        let input = encoded(&DynamicImage::new_rgba8(300, 200), ImageFormat::Png);
        let output = process_image(&input, &ResizeParams::default()).unwrap();

        // 1200 * 200 / 300 = 800
        assert_eq!((output.width, output.height), (1200, 800));
        assert_eq!(output.source_format, Some(ImageFormat::Png));
        assert_eq!(&output.bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_aspect_ratio_within_one_pixel() {
        let input = encoded(&DynamicImage::new_rgb8(777, 333), ImageFormat::Png);

        for width in [1, 50, 333, 640, 1200] {
            let output = process_image(&input, &ResizeParams::new(width, 80)).unwrap();
            let expected_h = width as f64 * 333.0 / 777.0;

            assert_eq!(output.width, width);
            assert!((output.height as f64 - expected_h).abs() <= 1.0);
        }
    }

    /// SOI の直後に Orientation だけを持つ APP1 (Exif) セグメントを差し込む
    fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
        let mut tiff = Vec::new();
        // ビッグエンディアン、IFD0 は 8 バイト目
        tiff.extend_from_slice(b"MM\x00\x2A\x00\x00\x00\x08");
        tiff.extend_from_slice(&1u16.to_be_bytes()); // エントリ数
        tiff.extend_from_slice(&0x0112u16.to_be_bytes()); // Orientation
        tiff.extend_from_slice(&3u16.to_be_bytes()); // SHORT
        tiff.extend_from_slice(&1u32.to_be_bytes());
        tiff.extend_from_slice(&orientation.to_be_bytes());
        tiff.extend_from_slice(&[0, 0]);
        tiff.extend_from_slice(&0u32.to_be_bytes()); // 次の IFD なし

        let mut app1 = b"Exif\x00\x00".to_vec();
        app1.extend_from_slice(&tiff);

        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((app1.len() + 2) as u16).to_be_bytes());
        out.extend_from_slice(&app1);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_exif_orientation_is_applied_before_fit() {
        let jpeg = encode_jpeg(&DynamicImage::new_rgb8(200, 100), 90).unwrap();
        let input = with_exif_orientation(&jpeg, 6);
        assert_eq!(read_orientation(&input), Some(crate::transform::Orientation::Rotate90));

        let output = process_image(&input, &ResizeParams::new(50, 80)).unwrap();

        // 正立させると 100x200 なので、幅 50 で高さ 100
        assert_eq!((output.width, output.height), (50, 100));
        let (decoded, _) = decode_image(&output.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (50, 100));
    }

    #[test]
    fn test_exif_normal_orientation_keeps_layout() {
        let jpeg = encode_jpeg(&DynamicImage::new_rgb8(200, 100), 90).unwrap();
        let input = with_exif_orientation(&jpeg, 1);
        assert_eq!(read_orientation(&input), Some(crate::transform::Orientation::Normal));

        let output = process_image(&input, &ResizeParams::new(50, 80)).unwrap();
        assert_eq!((output.width, output.height), (50, 25));
    }

    #[test]
    fn test_process_invalid_bytes() {
        let result = process_image(b"plain text, not pixels", &ResizeParams::default());

        assert!(matches!(result, Err(TransformError::DecodeFailed(_))));
    }
}
