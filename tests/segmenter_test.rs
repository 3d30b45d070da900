//! Segmenter 整合測試（使用假引擎，不依賴真實 ffmpeg）

mod common;

use clip_splitter::error::ClipError;
use clip_splitter::segmenter::{SceneAnalysis, analyze_equal, analyze_scene, get_duration};
use common::FakeEngine;
use std::path::Path;

const VIDEO: &str = "/videos/input.mp4";

#[test]
fn test_equal_split_exact_multiple() {
    let engine = FakeEngine::with_duration(30.0);

    let segments = analyze_equal(&engine, Path::new(VIDEO), 5.0).unwrap();

    assert_eq!(segments.len(), 6);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.id, (i + 1) as u32);
        assert!((segment.duration - 5.0).abs() < 1e-9);
    }
}

#[test]
fn test_equal_split_short_tail() {
    let engine = FakeEngine::with_duration(23.0);

    let segments = analyze_equal(&engine, Path::new(VIDEO), 5.0).unwrap();

    assert_eq!(segments.len(), 6);
    assert!((segments[4].duration - 5.0).abs() < 1e-9);
    assert!((segments[5].duration - 3.0).abs() < 1e-9);
}

#[test]
fn test_equal_split_covers_timeline_without_gaps() {
    let engine = FakeEngine::with_duration(47.5);

    let segments = analyze_equal(&engine, Path::new(VIDEO), 10.0).unwrap();

    assert!((segments[0].start).abs() < 1e-9);
    for pair in segments.windows(2) {
        // 等長模式不允許縫隙
        assert!((pair[0].end - pair[1].start).abs() < 1e-9);
    }
    assert!((segments.last().unwrap().end - 47.5).abs() < 1e-9);
}

#[test]
fn test_equal_split_rejects_non_positive_chunk() {
    let engine = FakeEngine::with_duration(30.0);

    let zero = analyze_equal(&engine, Path::new(VIDEO), 0.0);
    assert!(matches!(zero, Err(ClipError::InvalidParameter(_))));

    let negative = analyze_equal(&engine, Path::new(VIDEO), -5.0);
    assert!(matches!(negative, Err(ClipError::InvalidParameter(_))));
}

#[test]
fn test_equal_split_zero_duration_is_empty() {
    let engine = FakeEngine::with_duration(0.0);

    let segments = analyze_equal(&engine, Path::new(VIDEO), 5.0).unwrap();
    assert!(segments.is_empty());
}

#[test]
fn test_equal_split_probe_failure_is_raised() {
    let mut engine = FakeEngine::with_duration(30.0);
    engine.probe_fails = true;

    let result = analyze_equal(&engine, Path::new(VIDEO), 5.0);
    assert!(matches!(result, Err(ClipError::Probe { .. })));
}

#[test]
fn test_scene_split_reference_scenario() {
    // 標記 [4.2, 9.8]、總長 12.0、min_len 3 →
    // 候選 (0,4.2) 保留、(4.2,9.8) 保留、(9.8,12.0)=2.2s 捨棄
    let mut engine = FakeEngine::with_duration(12.0);
    engine.scene_log = "\
[Parsed_showinfo_1 @ 0x55aa] n:   0 pts: 105000 pts_time:4.2 pos: 100\n\
[Parsed_showinfo_1 @ 0x55aa] n:   1 pts: 245000 pts_time:9.8 pos: 200\n"
        .to_string();

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);

    let SceneAnalysis::Complete(segments) = analysis else {
        panic!("場景偵測不應該降級");
    };
    assert_eq!(segments.len(), 2);
    assert!((segments[0].start).abs() < 1e-9);
    assert!((segments[0].end - 4.2).abs() < 1e-9);
    assert!((segments[1].start - 4.2).abs() < 1e-9);
    assert!((segments[1].end - 9.8).abs() < 1e-9);
}

#[test]
fn test_scene_split_allows_gaps_and_keeps_original_ids() {
    // 候選 (0,1) 與 (9,10) 被捨棄，留下的片段保留原始位置編號 2、3
    let mut engine = FakeEngine::with_duration(10.0);
    engine.scene_log = "pts_time:1.0\npts_time:4.0\npts_time:9.0\n".to_string();

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);
    let segments = analysis.segments();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].id, 2);
    assert_eq!(segments[1].id, 3);
    // 場景模式允許時間軸縫隙：第一個片段不是從 0 開始
    assert!((segments[0].start - 1.0).abs() < 1e-9);
}

#[test]
fn test_scene_split_tolerates_malformed_diagnostics() {
    let mut engine = FakeEngine::with_duration(20.0);
    engine.scene_log = "\
frame=  300 fps= 25 q=-0.0 size=N/A\n\
pts_time:garbage\n\
[Parsed_showinfo_1 @ 0x55aa] pts_time:6.0 pos: 42\n\
一行完全無關的輸出\n"
        .to_string();

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);
    let segments = analysis.segments();

    assert_eq!(segments.len(), 2);
    assert!((segments[0].end - 6.0).abs() < 1e-9);
    assert!((segments[1].end - 20.0).abs() < 1e-9);
}

#[test]
fn test_scene_split_detection_failure_degrades() {
    let mut engine = FakeEngine::with_duration(12.0);
    engine.detect_fails = true;

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);

    assert!(analysis.is_degraded());
    assert!(analysis.segments().is_empty());
}

#[test]
fn test_scene_split_probe_failure_degrades() {
    // 探測失敗在場景模式下也降級，不以錯誤傳播
    let mut engine = FakeEngine::with_duration(12.0);
    engine.probe_fails = true;

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);

    assert!(analysis.is_degraded());
}

#[test]
fn test_scene_split_no_markers_yields_single_segment() {
    let engine = FakeEngine::with_duration(15.0);

    let analysis = analyze_scene(&engine, Path::new(VIDEO), 0.3, 3.0);
    let segments = analysis.segments();

    assert!(!analysis.is_degraded());
    assert_eq!(segments.len(), 1);
    assert!((segments[0].duration - 15.0).abs() < 1e-9);
}

#[test]
fn test_get_duration() {
    let engine = FakeEngine::with_duration(42.5);

    let duration = get_duration(&engine, Path::new(VIDEO)).unwrap();
    assert!((duration - 42.5).abs() < 1e-9);
}
