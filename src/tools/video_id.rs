use std::path::Path;
use uuid::Uuid;

/// 由檔名與亂數產生短影片代號，例如 `holiday_3fa9c1d2`
///
/// 代號只用於輸出檔名，不保證全域唯一。
#[must_use]
pub fn generate_video_id(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("video");
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{stem}_{}", &suffix[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_video_id_uses_file_stem() {
        let id = generate_video_id(Path::new("/videos/holiday.mp4"));
        assert!(id.starts_with("holiday_"));
        assert_eq!(id.len(), "holiday_".len() + 8);
    }

    #[test]
    fn test_generate_video_id_is_unique_per_call() {
        let path = Path::new("/videos/holiday.mp4");
        assert_ne!(generate_video_id(path), generate_video_id(path));
    }

    #[test]
    fn test_generate_video_id_without_stem() {
        let id = generate_video_id(Path::new("/"));
        assert!(id.starts_with("video_"));
    }
}
