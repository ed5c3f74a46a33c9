use chrono::{DateTime, Utc};
use uuid::Uuid;

/// アップロード先のキーを生成する
///
/// `{yyyy-MM-dd}/{uuid}.jpg` の形式。日付は UTC で日ごとにディレクトリを分け、
/// UUID v4 で衝突を避ける（リトライは不要）。
pub fn generate_blob_name(now: DateTime<Utc>) -> String {
    format!("{}/{}.jpg", now.format("%Y-%m-%d"), Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_key;
    use chrono::TimeZone;

    #[test]
    fn test_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 23, 59, 59).unwrap();
        let name = generate_blob_name(now);

        let (dir, file) = name.split_once('/').unwrap();
        assert_eq!(dir, "2024-03-09");

        let token = file.strip_suffix(".jpg").unwrap();
        assert!(Uuid::parse_str(token).is_ok());
        assert!(validate_key(&name).is_ok());
    }

    #[test]
    fn test_unique() {
        let now = Utc::now();
        assert_ne!(generate_blob_name(now), generate_blob_name(now));
    }
}
