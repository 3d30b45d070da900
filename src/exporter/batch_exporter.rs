//! 批次匯出
//!
//! 依輸入清單順序把每個片段轉檔後寫入壓縮檔。中間檔放在私有的
//! 暫存資料夾，寫入壓縮檔後立即刪除；循序模式下暫存空間峰值
//! 以單一片段為上限，平行模式則以工作數為上限。
//!
//! 失敗策略是 fail-fast：第一個失敗的片段讓整批中止並回報
//! `BatchAbort`，未完成的壓縮檔與所有中間檔在回傳前清除。

use super::clip_exporter::{ClipTask, export_clip};
use super::naming::{apply_template, default_archive_entry, validate_template};
use crate::config::{ExportFormat, Resolution};
use crate::engine::CodecEngine;
use crate::error::{ClipError, Result};
use crate::segmenter::Segment;
use log::{info, warn};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// 批次匯出選項
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub format: ExportFormat,
    pub resolution: Resolution,
    /// None 使用內建條目命名格式
    pub naming_template: Option<String>,
    pub output_dir: PathBuf,
    /// 同時轉檔的工作數，1 表示完全循序
    pub parallel_jobs: usize,
}

impl BatchOptions {
    #[must_use]
    pub fn new(output_dir: &Path) -> Self {
        Self {
            format: ExportFormat::default(),
            resolution: Resolution::default(),
            naming_template: None,
            output_dir: output_dir.to_path_buf(),
            parallel_jobs: 1,
        }
    }
}

/// 匯出全部片段並打包為 {video_id}_clips.zip，回傳壓縮檔路徑
///
/// 條目名由命名模板以片段在輸入清單中的 1-based 位置代入
/// （不是片段自身的 id）。
pub fn export_all_zip(
    engine: &dyn CodecEngine,
    source: &Path,
    segments: &[Segment],
    video_id: &str,
    options: &BatchOptions,
) -> Result<PathBuf> {
    if let Some(template) = options.naming_template.as_deref() {
        validate_template(template)?;
    }

    fs::create_dir_all(&options.output_dir)?;
    let output_dir = options.output_dir.canonicalize()?;
    let zip_path = output_dir.join(format!("{video_id}_clips.zip"));
    let work_dir = output_dir.join(format!(".tmp_{video_id}"));
    fs::create_dir_all(&work_dir)?;

    let result = write_archive(engine, source, segments, video_id, options, &zip_path, &work_dir);

    // 無論成敗都不留下中間檔
    if work_dir.exists() && fs::remove_dir_all(&work_dir).is_err() {
        warn!("無法清理暫存資料夾: {}", work_dir.display());
    }

    if result.is_err() {
        // 中止的批次視為作廢，不保留寫到一半的壓縮檔
        if zip_path.exists() && fs::remove_file(&zip_path).is_err() {
            warn!("無法刪除未完成的壓縮檔: {}", zip_path.display());
        }
    }

    result.map(|()| zip_path)
}

fn write_archive(
    engine: &dyn CodecEngine,
    source: &Path,
    segments: &[Segment],
    video_id: &str,
    options: &BatchOptions,
    zip_path: &Path,
    work_dir: &Path,
) -> Result<()> {
    let mut writer = ZipWriter::new(File::create(zip_path)?);
    let jobs = options.parallel_jobs.max(1);

    info!(
        "批次匯出 {} 個片段 (parallel_jobs={jobs})",
        segments.len()
    );

    for (chunk_index, chunk) in segments.chunks(jobs).enumerate() {
        let base = chunk_index * jobs;
        let exported = export_chunk(engine, source, chunk, base, video_id, options, work_dir);

        // 先處理整批結果再回報錯誤：成功的中間檔依序寫入壓縮檔後
        // 刪除，失敗之後的結果只刪不寫，保持條目順序與輸入一致
        let mut first_error: Option<ClipError> = None;
        for (offset, item) in exported.into_iter().enumerate() {
            let index = base + offset + 1;
            match item {
                Ok((entry_name, clip_path)) => {
                    if first_error.is_none() {
                        append_entry(&mut writer, &entry_name, &clip_path)?;
                    }
                    if clip_path.exists() && fs::remove_file(&clip_path).is_err() {
                        warn!("無法刪除中間檔: {}", clip_path.display());
                    }
                }
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(ClipError::BatchAbort {
                            index,
                            source: Box::new(e),
                        });
                    }
                }
            }
        }
        if let Some(e) = first_error {
            return Err(e);
        }
    }

    writer.finish()?;
    Ok(())
}

type ExportedClip = (String, PathBuf);

/// 匯出一批片段，結果順序與輸入一致
///
/// 平行模式下所有工作都會跑完才回傳，不會留下進行到一半的轉檔。
fn export_chunk(
    engine: &dyn CodecEngine,
    source: &Path,
    chunk: &[Segment],
    base: usize,
    video_id: &str,
    options: &BatchOptions,
    work_dir: &Path,
) -> Vec<Result<ExportedClip>> {
    let export_one = |offset: usize, segment: &Segment| -> Result<ExportedClip> {
        let index = base + offset + 1;
        let entry_name = match options.naming_template.as_deref() {
            Some(template) => apply_template(template, index),
            None => default_archive_entry(index, segment.start, segment.end, options.format),
        };

        // 中間檔名帶位置編號，平行模式下不會互相覆寫
        let task = ClipTask {
            source: source.to_path_buf(),
            start: segment.start,
            end: segment.end,
            video_id: video_id.to_string(),
            format: options.format,
            resolution: options.resolution,
            filename: Some(format!("part_{index:03}.{}", options.format.extension())),
            output_dir: work_dir.to_path_buf(),
        };
        let clip_path = export_clip(engine, &task)?;
        Ok((entry_name, clip_path))
    };

    if options.parallel_jobs <= 1 {
        chunk
            .iter()
            .enumerate()
            .map(|(offset, segment)| export_one(offset, segment))
            .collect()
    } else {
        chunk
            .par_iter()
            .enumerate()
            .map(|(offset, segment)| export_one(offset, segment))
            .collect()
    }
}

fn append_entry(writer: &mut ZipWriter<File>, entry_name: &str, clip_path: &Path) -> Result<()> {
    // 片段本身已是壓縮後的媒體，條目不再壓縮
    let entry_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    writer.start_file(entry_name, entry_options)?;

    let mut clip = File::open(clip_path)?;
    io::copy(&mut clip, writer)?;
    Ok(())
}
