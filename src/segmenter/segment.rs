use serde::{Deserialize, Serialize};

/// 影片時間軸上的一個半開區間 [start, end)，匯出時對應一個片段
///
/// 由 Segmenter 產生後不再變動，核心不跨呼叫保存任何片段狀態。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based 編號
    pub id: u32,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
}

impl Segment {
    #[must_use]
    pub fn new(id: u32, start: f64, end: f64) -> Self {
        Self {
            id,
            start,
            end,
            duration: round_ms(end - start),
        }
    }
}

/// 捨入到毫秒，避免浮點累積誤差滲入輸出
#[must_use]
pub fn round_ms(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
