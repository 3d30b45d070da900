//! 場景偵測切割策略
//!
//! 邊界偵測委派給引擎的場景變換濾鏡，時間標記從診斷輸出逐行解析，
//! 格式不符的行直接略過。偵測到的時間點排序去重後，在前後補上
//! 0.0 與影片總長兩個邊界，相鄰邊界成對形成候選片段。

use super::segment::{Segment, round_ms};
use crate::engine::CodecEngine;
use crate::error::Result;
use log::{debug, warn};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PTS_TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"pts_time:\s*([0-9]+(?:\.[0-9]+)?)").expect("pts_time 正規表示式應該有效")
});

/// 場景偵測結果
///
/// 引擎呼叫失敗會降級為 `Degraded` 而不是錯誤，讓呼叫端能區分
/// 「偵測成功但沒有場景」與「偵測本身失敗」兩種空結果。
#[derive(Debug, Clone)]
pub enum SceneAnalysis {
    Complete(Vec<Segment>),
    Degraded(String),
}

impl SceneAnalysis {
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        match self {
            Self::Complete(segments) => segments,
            Self::Degraded(_) => &[],
        }
    }

    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }
}

/// 場景偵測切割
///
/// 短於 `min_len` 的候選片段直接捨棄、不往前合併，因此結果允許
/// 時間軸上出現縫隙；id 保留候選片段的原始相鄰位置編號，捨棄
/// 不會重新編號。
pub fn analyze_scene(
    engine: &dyn CodecEngine,
    path: &Path,
    threshold: f64,
    min_len: f64,
) -> SceneAnalysis {
    match analyze_scene_inner(engine, path, threshold, min_len) {
        Ok(segments) => SceneAnalysis::Complete(segments),
        Err(e) => {
            warn!("場景偵測降級為空結果: {e}");
            SceneAnalysis::Degraded(e.to_string())
        }
    }
}

fn analyze_scene_inner(
    engine: &dyn CodecEngine,
    path: &Path,
    threshold: f64,
    min_len: f64,
) -> Result<Vec<Segment>> {
    let duration = engine.probe(path)?.duration_seconds;
    let diagnostics = engine.detect_scene_changes(path, threshold)?;

    let markers = parse_scene_markers(&diagnostics, duration);
    debug!("偵測到 {} 個場景變換點", markers.len());

    Ok(build_segments(&markers, duration, min_len))
}

/// 從引擎診斷輸出解析 pts_time 時間標記
///
/// 捨入到毫秒後排序去重，並過濾掉 (0, duration) 以外的值
fn parse_scene_markers(diagnostics: &str, duration: f64) -> Vec<f64> {
    let mut markers: Vec<f64> = diagnostics
        .lines()
        .filter_map(|line| PTS_TIME_REGEX.captures(line))
        .filter_map(|captures| captures.get(1))
        .filter_map(|matched| matched.as_str().parse::<f64>().ok())
        .map(round_ms)
        .filter(|&timestamp| timestamp > 0.0 && timestamp < duration)
        .collect();

    markers.sort_by(f64::total_cmp);
    markers.dedup();
    markers
}

/// 把邊界集合轉成片段清單
///
/// 邊界 = [0.0] + markers + [duration]
fn build_segments(markers: &[f64], duration: f64, min_len: f64) -> Vec<Segment> {
    if duration <= 0.0 {
        return Vec::new();
    }

    let mut boundaries = Vec::with_capacity(markers.len() + 2);
    boundaries.push(0.0);
    boundaries.extend_from_slice(markers);
    boundaries.push(round_ms(duration));

    let mut segments = Vec::new();
    for (index, pair) in boundaries.windows(2).enumerate() {
        let (start, end) = (pair[0], pair[1]);
        if end - start >= min_len {
            segments.push(Segment::new((index + 1) as u32, start, end));
        }
    }

    segments
}
