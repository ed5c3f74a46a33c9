use crate::errors::TransformError;

/// 幅を基準にした倍率を計算する
///
/// 拡大も許可する（幅は常に指定値に合わせる）
fn calculate_scale_factor(src_w: u32, target_w: u32) -> f64 {
    target_w as f64 / src_w as f64
}

/// 倍率を適用して新しい高さを計算する
fn apply_scale(src_h: u32, scale: f64) -> u32 {
    let new_h = (src_h as f64 * scale).round() as u32;

    // 最小1pxを保証
    new_h.max(1)
}

/// Fit モードの寸法を計算する
///
/// 幅を `target_w` に合わせ、高さは `round(target_w * src_h / src_w)`。
/// アスペクト比を維持し、切り抜きはしない。
pub fn calculate_fit_dimensions(
    src_w: u32,
    src_h: u32,
    target_w: u32,
) -> Result<(u32, u32), TransformError> {
    if src_w == 0 || src_h == 0 {
        return Err(TransformError::InvalidImageDimensions {
            width: src_w,
            height: src_h,
        });
    }

    let target_w = target_w.max(1);
    let scale = calculate_scale_factor(src_w, target_w);

    Ok((target_w, apply_scale(src_h, scale)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_scale_factor() {
        assert_eq!(calculate_scale_factor(1000, 400), 0.4);
        assert_eq!(calculate_scale_factor(100, 200), 2.0);
    }

    #[test]
    fn test_apply_scale() {
        assert_eq!(apply_scale(500, 0.4), 200);

        // 最小1pxを保証
        assert_eq!(apply_scale(10, 0.01), 1);
    }

    #[test]
    fn test_downscale() {
        assert_eq!(calculate_fit_dimensions(2000, 1000, 1000).unwrap(), (1000, 500));
        assert_eq!(calculate_fit_dimensions(1920, 1080, 800).unwrap(), (800, 450));
    }

    #[test]
    fn test_rounding() {
        // 1080 * 1200 / 1919 = 675.35...
        assert_eq!(calculate_fit_dimensions(1919, 1080, 1200).unwrap(), (1200, 675));
        // 3 * 2 / 4 = 1.5 → 2
        assert_eq!(calculate_fit_dimensions(4, 3, 2).unwrap(), (2, 2));
    }

    #[test]
    fn test_upscale_is_allowed() {
        assert_eq!(calculate_fit_dimensions(100, 50, 200).unwrap(), (200, 100));
    }

    #[test]
    fn test_same_width() {
        assert_eq!(calculate_fit_dimensions(1200, 900, 1200).unwrap(), (1200, 900));
    }

    #[test]
    fn test_tall_image_keeps_at_least_one_pixel() {
        assert_eq!(calculate_fit_dimensions(10_000, 1, 10).unwrap(), (10, 1));
    }

    #[test]
    fn test_zero_source_width() {
        match calculate_fit_dimensions(0, 100, 1200).unwrap_err() {
            TransformError::InvalidImageDimensions { width, height } => {
                assert_eq!(width, 0);
                assert_eq!(height, 100);
            }
            other => panic!("expected InvalidImageDimensions, got {other:?}"),
        }
    }
}
