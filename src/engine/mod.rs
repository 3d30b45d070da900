//! 編解碼引擎抽象
//!
//! 核心不自行解碼或編碼影片，所有媒體操作都委派給外部引擎。
//! 引擎以 trait 注入，測試時可用假引擎替換，不需要真的轉檔。

mod ffmpeg;
mod process;

pub use ffmpeg::FfmpegEngine;
pub use process::{ProcessOutput, run_with_deadline};

use crate::config::ExportFormat;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// 媒體探測結果（容器層資訊）
#[derive(Debug, Clone)]
pub struct ProbeInfo {
    pub duration_seconds: f64,
    pub width: u32,
    pub height: u32,
}

/// 單一片段的轉檔工作
#[derive(Debug, Clone)]
pub struct TranscodeJob {
    pub source: PathBuf,
    pub start: f64,
    pub end: f64,
    pub output: PathBuf,
    pub format: ExportFormat,
    /// 目標尺寸，None 表示不縮放
    pub scale: Option<(u32, u32)>,
}

pub trait CodecEngine: Send + Sync {
    /// 探測媒體檔案的總長度與畫面尺寸
    fn probe(&self, path: &Path) -> Result<ProbeInfo>;

    /// 執行場景變換偵測，回傳引擎的原始診斷輸出
    ///
    /// 時間標記混在逐行的診斷文字裡，由呼叫端自行解析。
    fn detect_scene_changes(&self, path: &Path, threshold: f64) -> Result<String>;

    /// 轉出一個片段；成功回傳時輸出檔案已寫入 `job.output`
    ///
    /// `job.end` 超過實際影片長度時由引擎自行截斷。
    fn transcode(&self, job: &TranscodeJob) -> Result<()>;
}
