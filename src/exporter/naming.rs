//! 輸出檔名產生

use crate::config::ExportFormat;
use crate::error::{ClipError, Result};

const INDEX_PLACEHOLDER: &str = "{index}";

/// 預設的單一片段檔名：clip_{video_id}_{start:.2}-{end:.2}.{ext}
#[must_use]
pub fn default_clip_filename(
    video_id: &str,
    start: f64,
    end: f64,
    format: ExportFormat,
) -> String {
    sanitize_filename(&format!(
        "clip_{video_id}_{start:.2}-{end:.2}.{}",
        format.extension()
    ))
}

/// 壓縮檔內的預設條目名：clip_{index:03}_{start:.2}-{end:.2}.{ext}
#[must_use]
pub fn default_archive_entry(index: usize, start: f64, end: f64, format: ExportFormat) -> String {
    format!(
        "clip_{index:03}_{start:.2}-{end:.2}.{}",
        format.extension()
    )
}

/// 以 1-based 位置代入命名模板
#[must_use]
pub fn apply_template(template: &str, index: usize) -> String {
    template.replace(INDEX_PLACEHOLDER, &index.to_string())
}

/// 模板必須恰好包含一個 {index} 佔位符
pub fn validate_template(template: &str) -> Result<()> {
    match template.matches(INDEX_PLACEHOLDER).count() {
        1 => Ok(()),
        n => Err(ClipError::InvalidParameter(format!(
            "命名模板必須恰好包含一個 {{index}} 佔位符（目前 {n} 個）: {template}"
        ))),
    }
}

/// 冒號在部分檔案系統的路徑裡不合法，一律以 - 取代
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.replace(':', "-")
}
