use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClipError>;

/// 核心管線的錯誤分類
///
/// 傳播原則：探測與匯出失敗向呼叫端回報；場景偵測失敗由
/// Segmenter 降級處理（見 `SceneAnalysis`），不會以錯誤形式傳播。
#[derive(Debug, Error)]
pub enum ClipError {
    /// 媒體探測失敗（檔案不存在、引擎不可用或輸出無法解析）
    #[error("無法探測媒體資訊 {}: {}", path.display(), reason)]
    Probe { path: PathBuf, reason: String },

    /// 呼叫端參數錯誤
    #[error("參數錯誤: {0}")]
    InvalidParameter(String),

    /// 場景偵測的引擎呼叫失敗
    #[error("場景偵測失敗 {}: {}", path.display(), reason)]
    SceneDetection { path: PathBuf, reason: String },

    /// 片段轉檔失敗（引擎非零退出或輸出檔案不存在）
    #[error("片段匯出失敗 {}: {}", output.display(), reason)]
    Export { output: PathBuf, reason: String },

    /// 批次匯出中止，index 為失敗片段在輸入清單中的 1-based 位置
    #[error("批次匯出中止於第 {index} 個片段: {source}")]
    BatchAbort {
        index: usize,
        #[source]
        source: Box<ClipError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("壓縮檔寫入失敗: {0}")]
    Archive(#[from] zip::result::ZipError),
}
