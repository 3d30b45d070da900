//! 單一片段匯出

use super::naming::{default_clip_filename, sanitize_filename};
use crate::config::{ExportFormat, Resolution};
use crate::engine::{CodecEngine, TranscodeJob};
use crate::error::{ClipError, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 單一片段的匯出工作描述
///
/// 每次呼叫由呼叫端完整提供，核心不跨呼叫快取任何設定。
#[derive(Debug, Clone)]
pub struct ClipTask {
    pub source: PathBuf,
    pub start: f64,
    pub end: f64,
    /// 只用於輸出檔名，核心不驗證其唯一性
    pub video_id: String,
    pub format: ExportFormat,
    pub resolution: Resolution,
    /// 指定輸出檔名；None 則由 video_id 與時間範圍推導
    pub filename: Option<String>,
    pub output_dir: PathBuf,
}

impl ClipTask {
    #[must_use]
    pub fn new(source: &Path, start: f64, end: f64, video_id: &str, output_dir: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            start,
            end,
            video_id: video_id.to_string(),
            format: ExportFormat::default(),
            resolution: Resolution::default(),
            filename: None,
            output_dir: output_dir.to_path_buf(),
        }
    }
}

/// 匯出一個片段，回傳輸出檔案的絕對路徑
///
/// `end` 可以超過實際影片長度（引擎會自行截斷）；
/// 既有的同名輸出檔會直接被覆寫。
pub fn export_clip(engine: &dyn CodecEngine, task: &ClipTask) -> Result<PathBuf> {
    if !(task.start >= 0.0 && task.end > task.start) {
        return Err(ClipError::InvalidParameter(format!(
            "時間範圍不合法: start={}, end={}",
            task.start, task.end
        )));
    }

    fs::create_dir_all(&task.output_dir)?;
    let output_dir = task.output_dir.canonicalize()?;

    let filename = task.filename.as_deref().map_or_else(
        || default_clip_filename(&task.video_id, task.start, task.end, task.format),
        sanitize_filename,
    );
    let output = output_dir.join(filename);

    let job = TranscodeJob {
        source: task.source.clone(),
        start: task.start,
        end: task.end,
        output: output.clone(),
        format: task.format,
        scale: task.resolution.scale_dimensions(),
    };
    engine.transcode(&job)?;

    if !output.exists() {
        return Err(ClipError::Export {
            output,
            reason: "引擎結束後輸出檔案不存在".to_string(),
        });
    }

    info!("片段已匯出: {}", output.display());
    Ok(output)
}
