//! 測試用假引擎
//!
//! 不需要真實的 ffmpeg：探測與場景偵測回傳預先設定的內容，
//! 轉檔只寫出一個小檔案讓輸出檢查通過。

#![allow(dead_code)]

use clip_splitter::engine::{CodecEngine, ProbeInfo, TranscodeJob};
use clip_splitter::error::{ClipError, Result};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct FakeEngine {
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    /// 場景偵測回傳的診斷輸出
    pub scene_log: String,
    pub probe_fails: bool,
    pub detect_fails: bool,
    /// 第 N 次（1-based）轉檔呼叫失敗；0 表示永不失敗
    pub fail_on_transcode_call: usize,
    /// 模擬引擎宣稱成功但沒寫出輸出檔
    pub transcode_skips_output: bool,
    transcode_calls: AtomicUsize,
}

impl FakeEngine {
    pub fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            width: 1920,
            height: 1080,
            scene_log: String::new(),
            probe_fails: false,
            detect_fails: false,
            fail_on_transcode_call: 0,
            transcode_skips_output: false,
            transcode_calls: AtomicUsize::new(0),
        }
    }

    pub fn transcode_call_count(&self) -> usize {
        self.transcode_calls.load(Ordering::SeqCst)
    }
}

impl CodecEngine for FakeEngine {
    fn probe(&self, path: &Path) -> Result<ProbeInfo> {
        if self.probe_fails {
            return Err(ClipError::Probe {
                path: path.to_path_buf(),
                reason: "模擬探測失敗".to_string(),
            });
        }
        Ok(ProbeInfo {
            duration_seconds: self.duration,
            width: self.width,
            height: self.height,
        })
    }

    fn detect_scene_changes(&self, path: &Path, _threshold: f64) -> Result<String> {
        if self.detect_fails {
            return Err(ClipError::SceneDetection {
                path: path.to_path_buf(),
                reason: "模擬偵測失敗".to_string(),
            });
        }
        Ok(self.scene_log.clone())
    }

    fn transcode(&self, job: &TranscodeJob) -> Result<()> {
        let call = self.transcode_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_transcode_call != 0 && call == self.fail_on_transcode_call {
            return Err(ClipError::Export {
                output: job.output.clone(),
                reason: "模擬轉檔失敗".to_string(),
            });
        }
        if !self.transcode_skips_output {
            fs::write(&job.output, b"fake clip data")?;
        }
        Ok(())
    }
}
