use crate::constants::{DEFAULT_QUALITY, DEFAULT_WIDTH};
use crate::validation::params::{parse_quality, parse_width};

/// リサイズ・エンコードのパラメータ
///
/// `width` は常に 1 以上、`quality` は常に 1-100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeParams {
    pub width: u32,
    pub quality: u8,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            quality: DEFAULT_QUALITY,
        }
    }
}

impl ResizeParams {
    pub fn new(width: u32, quality: u8) -> Self {
        Self {
            width: width.max(1),
            quality: quality.clamp(1, 100),
        }
    }

    /// クエリ文字列の値から作成する
    ///
    /// 解釈できない値や欠落した値はエラーにせずデフォルトに戻す
    pub fn from_query(width: Option<&str>, quality: Option<&str>) -> Self {
        Self {
            width: width.and_then(parse_width).unwrap_or(DEFAULT_WIDTH),
            quality: quality.and_then(parse_quality).unwrap_or(DEFAULT_QUALITY),
        }
    }
}
