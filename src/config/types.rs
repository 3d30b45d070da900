use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// 匯出容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Mp4,
    Webm,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp4 => "mp4",
            Self::Webm => "webm",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 匯出解析度
///
/// 縮放是固定對照表的直接拉伸，不保留長寬比；非 16:9 的來源會變形，
/// 變形處理完全交給引擎的縮放濾鏡。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Resolution {
    #[default]
    Original,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl Resolution {
    /// 固定的解析度對照表，None 表示不縮放
    #[must_use]
    pub const fn scale_dimensions(self) -> Option<(u32, u32)> {
        match self {
            Self::Original => None,
            Self::P720 => Some((1280, 720)),
            Self::P1080 => Some((1920, 1080)),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Original => "Original",
            Self::P720 => "720p",
            Self::P1080 => "1080p",
        };
        f.write_str(label)
    }
}

/// 切割策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    #[default]
    EqualLength,
    SceneDetection,
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EqualLength => "等長切割",
            Self::SceneDetection => "場景偵測",
        };
        f.write_str(label)
    }
}

/// 使用者設定，持久化於工作目錄的 settings.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub split_mode: SplitMode,
    /// 等長切割的片段長度（秒）
    pub chunk_len: f64,
    /// 場景變換分數閾值 (0-1)，越低越敏感
    pub scene_threshold: f64,
    /// 場景模式下短於此長度（秒）的候選片段直接捨棄
    pub min_segment_len: f64,
    pub export_format: ExportFormat,
    pub resolution: Resolution,
    /// 壓縮檔內片段的命名模板，必須含一個 {index} 佔位符；
    /// None 使用內建格式
    pub naming_template: Option<String>,
    /// 輸出資料夾；None 使用系統暫存目錄下的 clip_splitter
    pub output_dir: Option<PathBuf>,
    /// 批次匯出同時轉檔的工作數，1 表示完全循序
    pub parallel_jobs: usize,
    /// 單次引擎呼叫的時限（秒）
    pub engine_timeout_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            split_mode: SplitMode::EqualLength,
            chunk_len: 5.0,
            scene_threshold: 0.3,
            min_segment_len: 3.0,
            export_format: ExportFormat::Mp4,
            resolution: Resolution::Original,
            naming_template: None,
            output_dir: None,
            parallel_jobs: 1,
            engine_timeout_secs: 600,
        }
    }
}

impl UserSettings {
    /// 實際使用的輸出資料夾
    #[must_use]
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("clip_splitter"))
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: UserSettings,
}
