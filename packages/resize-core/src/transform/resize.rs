use crate::constants::MAX_PIXELS;
use crate::errors::TransformError;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbImage};

/// 出力の総ピクセル数を検証する
pub fn check_pixel_budget(width: u32, height: u32) -> Result<(), TransformError> {
    if width as u64 * height as u64 > MAX_PIXELS {
        return Err(TransformError::ResolutionTooLarge { width, height });
    }
    Ok(())
}

/// 画像を指定寸法にリサイズする（Lanczos3）
///
/// 出力は JPEG にするので RGB8 で処理する。寸法が同じ場合はそのまま返す。
pub fn resize_image(
    img: DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<DynamicImage, TransformError> {
    check_pixel_budget(target_w, target_h)?;

    if img.width() == target_w && img.height() == target_h {
        return Ok(img);
    }

    let rgb = img.to_rgb8();
    let (src_w, src_h) = rgb.dimensions();

    let src_image = Image::from_vec_u8(src_w, src_h, rgb.into_raw(), PixelType::U8x3)
        .map_err(|e| {
            TransformError::ProcessingFailed(format!("failed to create source image: {e}"))
        })?;
    let mut dst_image = Image::new(target_w, target_h, PixelType::U8x3);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| TransformError::ProcessingFailed(format!("resize failed: {e}")))?;

    let resized = RgbImage::from_raw(target_w, target_h, dst_image.into_vec()).ok_or_else(|| {
        TransformError::ProcessingFailed("resized buffer does not match target size".to_string())
    })?;

    Ok(DynamicImage::ImageRgb8(resized))
}
