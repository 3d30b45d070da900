//! 影片時間軸切割
//!
//! 兩種可互換的策略：等長切割與場景偵測切割。兩者都回傳遞增、
//! 不重疊的片段清單；等長模式保證完整覆蓋，場景模式允許縫隙。

mod equal_length;
mod scene_detector;
mod segment;

pub use equal_length::analyze_equal;
pub use scene_detector::{SceneAnalysis, analyze_scene};
pub use segment::{Segment, round_ms};

use crate::engine::CodecEngine;
use crate::error::Result;
use std::path::Path;

/// 取得影片總長度（秒）
pub fn get_duration(engine: &dyn CodecEngine, path: &Path) -> Result<f64> {
    Ok(engine.probe(path)?.duration_seconds)
}
