//! ffmpeg / ffprobe 引擎實作
//!
//! 探測走 ffprobe 的 JSON 輸出；場景偵測用 select 濾鏡的場景分數
//! 搭配 showinfo，時間標記寫在 stderr；轉檔為單次阻塞呼叫。

use super::process::run_with_deadline;
use super::{CodecEngine, ProbeInfo, TranscodeJob};
use crate::config::ExportFormat;
use crate::error::{ClipError, Result};
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// 預設的單次引擎呼叫時限
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

pub struct FfmpegEngine {
    ffmpeg_bin: String,
    ffprobe_bin: String,
    timeout: Duration,
}

impl Default for FfmpegEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_probe_command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.ffprobe_bin);
        command
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path);
        command
    }

    fn build_scene_command(&self, path: &Path, threshold: f64) -> Command {
        // select 只留下場景分數超過閾值的幀，showinfo 把每一幀的
        // pts_time 寫到 stderr
        let filter = format!("select='gt(scene\\,{threshold})',showinfo");

        let mut command = Command::new(&self.ffmpeg_bin);
        command
            .args(["-hide_banner", "-nostdin", "-i"])
            .arg(path)
            .args([
                "-an", "-sn", "-dn", "-threads", "1", "-vf", &filter, "-f", "null", "-",
            ]);
        command
    }

    fn build_transcode_command(&self, job: &TranscodeJob) -> Command {
        let mut command = Command::new(&self.ffmpeg_bin);
        command.args(["-hide_banner", "-nostdin", "-loglevel", "error"]);

        // -ss 放在 -i 前面做快速跳轉，輸出端再以 -t 限制長度
        if job.start > 0.0 {
            let seek = format!("{:.3}", job.start);
            command.args(["-ss", &seek]);
        }
        command.arg("-i").arg(&job.source);

        let clip_duration = format!("{:.3}", job.end - job.start);
        command.args(["-t", &clip_duration]);

        // 直接拉伸到目標尺寸，不保留長寬比
        if let Some((width, height)) = job.scale {
            let filter = format!("scale={width}:{height}");
            command.args(["-vf", &filter]);
        }

        match job.format {
            ExportFormat::Mp4 => {
                command.args([
                    "-c:v",
                    "libx264",
                    "-preset",
                    "veryfast",
                    "-crf",
                    "23",
                    "-pix_fmt",
                    "yuv420p",
                    "-c:a",
                    "aac",
                    "-movflags",
                    "+faststart",
                    "-f",
                    "mp4",
                ]);
            }
            ExportFormat::Webm => {
                command.args([
                    "-c:v",
                    "libvpx-vp9",
                    "-crf",
                    "32",
                    "-b:v",
                    "0",
                    "-c:a",
                    "libopus",
                    "-f",
                    "webm",
                ]);
            }
        }

        command.arg("-y").arg(&job.output);
        command
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    format: Option<FormatInfo>,
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct FormatInfo {
    duration: Option<String>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

impl CodecEngine for FfmpegEngine {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        let probe_err = |reason: String| ClipError::Probe {
            path: path.to_path_buf(),
            reason,
        };

        let output = run_with_deadline(self.build_probe_command(path), self.timeout)
            .map_err(|e| probe_err(format!("無法執行 ffprobe: {e}")))?;

        if !output.success {
            return Err(probe_err(format!(
                "ffprobe 執行失敗: {}",
                output.stderr.trim()
            )));
        }

        let parsed: FfprobeOutput = serde_json::from_str(&output.stdout)
            .map_err(|e| probe_err(format!("無法解析 ffprobe 輸出: {e}")))?;

        let video_stream = parsed.streams.as_ref().and_then(|streams| {
            streams
                .iter()
                .find(|stream| stream.codec_type.as_deref() == Some("video"))
        });

        // 時長優先取容器層欄位，其次取視訊串流
        let duration_seconds = parsed
            .format
            .as_ref()
            .and_then(|format| format.duration.as_ref())
            .or_else(|| video_stream.and_then(|stream| stream.duration.as_ref()))
            .and_then(|duration| duration.parse::<f64>().ok())
            .ok_or_else(|| probe_err("無法取得影片長度".to_string()))?;

        let video_stream = video_stream.ok_or_else(|| probe_err("找不到視訊串流".to_string()))?;
        let width = video_stream
            .width
            .ok_or_else(|| probe_err("無法取得影片寬度".to_string()))?;
        let height = video_stream
            .height
            .ok_or_else(|| probe_err("無法取得影片高度".to_string()))?;

        Ok(ProbeInfo {
            duration_seconds,
            width,
            height,
        })
    }

    fn detect_scene_changes(&self, path: &Path, threshold: f64) -> Result<String> {
        debug!("場景偵測: {} (threshold={threshold})", path.display());

        let output = run_with_deadline(self.build_scene_command(path, threshold), self.timeout)
            .map_err(|e| ClipError::SceneDetection {
                path: path.to_path_buf(),
                reason: format!("無法執行 ffmpeg: {e}"),
            })?;

        if !output.success {
            return Err(ClipError::SceneDetection {
                path: path.to_path_buf(),
                reason: format!("ffmpeg 非零退出: {}", last_line(&output.stderr)),
            });
        }

        // showinfo 的輸出在 stderr
        Ok(output.stderr)
    }

    fn transcode(&self, job: &TranscodeJob) -> Result<()> {
        debug!(
            "轉檔 {:.3}s-{:.3}s -> {}",
            job.start,
            job.end,
            job.output.display()
        );

        let output = run_with_deadline(self.build_transcode_command(job), self.timeout).map_err(
            |e| ClipError::Export {
                output: job.output.clone(),
                reason: format!("無法執行 ffmpeg: {e}"),
            },
        )?;

        if !output.success {
            return Err(ClipError::Export {
                output: job.output.clone(),
                reason: format!("ffmpeg 轉檔失敗: {}", last_line(&output.stderr)),
            });
        }

        Ok(())
    }
}

fn last_line(text: &str) -> &str {
    text.lines().rev().find(|line| !line.trim().is_empty()).unwrap_or("無輸出")
}
