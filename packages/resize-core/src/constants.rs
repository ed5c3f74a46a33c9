/// デフォルト出力幅（ピクセル）
pub const DEFAULT_WIDTH: u32 = 1200;

/// デフォルト品質（1-100）
pub const DEFAULT_QUALITY: u8 = 80;

/// コンテナ名が未設定の場合に使うコンテナ
pub const DEFAULT_CONTAINER: &str = "images";

/// 画像の最大ピクセル数（1GP = 実質無制限、極端な入力のみ防止）
pub const MAX_PIXELS: u64 = 1_000_000_000;

/// アップロードするオブジェクトの Content-Type（出力は常に JPEG）
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";
