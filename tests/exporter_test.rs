//! Exporter 整合測試（使用假引擎，不依賴真實 ffmpeg）

mod common;

use clip_splitter::config::{ExportFormat, Resolution};
use clip_splitter::error::ClipError;
use clip_splitter::exporter::{BatchOptions, ClipTask, export_all_zip, export_clip};
use clip_splitter::segmenter::Segment;
use common::FakeEngine;
use std::fs::{self, File};
use std::path::Path;
use zip::ZipArchive;

fn segments_of(count: usize, len: f64) -> Vec<Segment> {
    (0..count)
        .map(|i| Segment::new((i + 1) as u32, i as f64 * len, (i + 1) as f64 * len))
        .collect()
}

fn archive_entry_names(zip_path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(zip_path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_export_clip_default_naming() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let task = ClipTask::new(
        Path::new("/videos/input.mp4"),
        0.0,
        5.0,
        "vid_ab12cd34",
        output_dir.path(),
    );
    let output = export_clip(&engine, &task).unwrap();

    assert!(output.is_absolute());
    assert!(output.exists());
    assert!(output.ends_with("clip_vid_ab12cd34_0.00-5.00.mp4"));
    assert_eq!(engine.transcode_call_count(), 1);
}

#[test]
fn test_export_clip_sanitizes_colons_in_video_id() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let task = ClipTask::new(
        Path::new("/videos/input.mp4"),
        1.5,
        3.25,
        "12:30:00",
        output_dir.path(),
    );
    let output = export_clip(&engine, &task).unwrap();

    assert!(output.ends_with("clip_12-30-00_1.50-3.25.mp4"));
}

#[test]
fn test_export_clip_explicit_filename_wins() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let mut task = ClipTask::new(
        Path::new("/videos/input.mp4"),
        0.0,
        5.0,
        "vid",
        output_dir.path(),
    );
    task.format = ExportFormat::Webm;
    task.resolution = Resolution::P720;
    task.filename = Some("opening.webm".to_string());

    let output = export_clip(&engine, &task).unwrap();
    assert!(output.ends_with("opening.webm"));
}

#[test]
fn test_export_clip_rejects_invalid_range() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let negative_start = ClipTask::new(
        Path::new("/videos/input.mp4"),
        -1.0,
        5.0,
        "vid",
        output_dir.path(),
    );
    assert!(matches!(
        export_clip(&engine, &negative_start),
        Err(ClipError::InvalidParameter(_))
    ));

    let empty_range = ClipTask::new(
        Path::new("/videos/input.mp4"),
        5.0,
        5.0,
        "vid",
        output_dir.path(),
    );
    assert!(matches!(
        export_clip(&engine, &empty_range),
        Err(ClipError::InvalidParameter(_))
    ));

    assert_eq!(engine.transcode_call_count(), 0);
}

#[test]
fn test_export_clip_missing_output_is_export_error() {
    let mut engine = FakeEngine::with_duration(30.0);
    engine.transcode_skips_output = true;
    let output_dir = tempfile::tempdir().unwrap();

    let task = ClipTask::new(
        Path::new("/videos/input.mp4"),
        0.0,
        5.0,
        "vid",
        output_dir.path(),
    );
    let result = export_clip(&engine, &task);

    assert!(matches!(result, Err(ClipError::Export { .. })));
}

#[test]
fn test_export_all_zip_uses_template_with_list_position() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let mut options = BatchOptions::new(output_dir.path());
    options.naming_template = Some("clip_{index}.mp4".to_string());

    let zip_path = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(3, 5.0),
        "vid",
        &options,
    )
    .unwrap();

    assert!(zip_path.ends_with("vid_clips.zip"));
    assert_eq!(
        archive_entry_names(&zip_path),
        vec!["clip_1.mp4", "clip_2.mp4", "clip_3.mp4"]
    );
}

#[test]
fn test_export_all_zip_default_entry_convention() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let zip_path = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(2, 5.0),
        "vid",
        &BatchOptions::new(output_dir.path()),
    )
    .unwrap();

    assert_eq!(
        archive_entry_names(&zip_path),
        vec!["clip_001_0.00-5.00.mp4", "clip_002_5.00-10.00.mp4"]
    );
}

#[test]
fn test_export_all_zip_leaves_no_intermediates_on_success() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let zip_path = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(4, 5.0),
        "vid",
        &BatchOptions::new(output_dir.path()),
    )
    .unwrap();

    // 輸出資料夾裡只剩壓縮檔本身
    let leftover: Vec<_> = fs::read_dir(output_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(leftover, vec![zip_path]);
}

#[test]
fn test_export_all_zip_fail_fast_aborts_and_cleans_up() {
    let mut engine = FakeEngine::with_duration(30.0);
    engine.fail_on_transcode_call = 2;
    let output_dir = tempfile::tempdir().unwrap();

    let result = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(5, 5.0),
        "vid",
        &BatchOptions::new(output_dir.path()),
    );

    let Err(ClipError::BatchAbort { index, source }) = result else {
        panic!("批次匯出應該以 BatchAbort 中止");
    };
    assert_eq!(index, 2);
    assert!(matches!(*source, ClipError::Export { .. }));
    // 失敗的批次只跑到出錯的片段，不會把剩下的片段轉完
    assert_eq!(engine.transcode_call_count(), 2);

    // 中止後不留下壓縮檔也不留下任何中間檔
    let leftover: Vec<_> = fs::read_dir(output_dir.path()).unwrap().collect();
    assert!(leftover.is_empty());
}

#[test]
fn test_export_all_zip_parallel_preserves_entry_order() {
    let engine = FakeEngine::with_duration(100.0);
    let output_dir = tempfile::tempdir().unwrap();

    let mut options = BatchOptions::new(output_dir.path());
    options.naming_template = Some("part_{index}.mp4".to_string());
    options.parallel_jobs = 3;

    let zip_path = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(7, 5.0),
        "vid",
        &options,
    )
    .unwrap();

    let expected: Vec<String> = (1..=7).map(|i| format!("part_{i}.mp4")).collect();
    assert_eq!(archive_entry_names(&zip_path), expected);
    assert_eq!(engine.transcode_call_count(), 7);
}

#[test]
fn test_export_all_zip_rejects_template_without_placeholder() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let mut options = BatchOptions::new(output_dir.path());
    options.naming_template = Some("clips.mp4".to_string());

    let result = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &segments_of(2, 5.0),
        "vid",
        &options,
    );

    assert!(matches!(result, Err(ClipError::InvalidParameter(_))));
    assert_eq!(engine.transcode_call_count(), 0);
}

#[test]
fn test_export_all_zip_empty_segment_list() {
    let engine = FakeEngine::with_duration(30.0);
    let output_dir = tempfile::tempdir().unwrap();

    let zip_path = export_all_zip(
        &engine,
        Path::new("/videos/input.mp4"),
        &[],
        "vid",
        &BatchOptions::new(output_dir.path()),
    )
    .unwrap();

    assert!(zip_path.exists());
    assert!(archive_entry_names(&zip_path).is_empty());
}
