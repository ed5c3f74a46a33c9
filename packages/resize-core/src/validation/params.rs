/// 幅パラメータを解釈する
///
/// 数値でない値と 0 以下は None（呼び出し側でデフォルトを使う）
pub fn parse_width(raw: &str) -> Option<u32> {
    let width: i64 = raw.trim().parse().ok()?;
    if width <= 0 {
        return None;
    }
    Some(width.min(u32::MAX as i64) as u32)
}

/// 品質パラメータを解釈する
///
/// 数値でない値は None、範囲外の数値は 1-100 に丸める
pub fn parse_quality(raw: &str) -> Option<u8> {
    let quality: i64 = raw.trim().parse().ok()?;
    Some(quality.clamp(1, 100) as u8)
}
