//! 等長切割策略
//!
//! 從 0 秒起依固定長度切割完整時間軸。最後一段可能較短，
//! 不補齊也不往前合併，這是刻意的邊界策略。

use super::segment::{Segment, round_ms};
use crate::engine::CodecEngine;
use crate::error::{ClipError, Result};
use log::debug;
use std::path::Path;

/// 等長切割
///
/// 片段完整覆蓋 [0, duration]，無縫隙也無重疊；
/// `chunk_len <= 0` 是參數錯誤，長度為 0 的影片回傳空清單。
pub fn analyze_equal(
    engine: &dyn CodecEngine,
    path: &Path,
    chunk_len: f64,
) -> Result<Vec<Segment>> {
    if !chunk_len.is_finite() || chunk_len <= 0.0 {
        return Err(ClipError::InvalidParameter(format!(
            "切割長度必須大於 0: {chunk_len}"
        )));
    }

    let duration = engine.probe(path)?.duration_seconds;
    debug!("等長切割: duration={duration:.3}s, chunk_len={chunk_len}s");

    Ok(partition_equal(duration, chunk_len))
}

fn partition_equal(duration: f64, chunk_len: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0.0_f64;
    let mut id = 1_u32;

    while cursor < duration {
        let end = round_ms((cursor + chunk_len).min(duration));
        // 捨入後游標無法前進時終止，避免極小的 chunk_len 造成無窮迴圈
        if end <= cursor {
            break;
        }
        segments.push(Segment::new(id, round_ms(cursor), end));
        cursor = end;
        id += 1;
    }

    segments
}
