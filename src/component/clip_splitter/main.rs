use crate::config::{Config, SplitMode, UserSettings};
use crate::engine::{CodecEngine, FfmpegEngine, ProbeInfo};
use crate::exporter::{BatchOptions, ClipTask, export_all_zip, export_clip};
use crate::segmenter::{Segment, SceneAnalysis, analyze_equal, analyze_scene};
use crate::tools::{
    ensure_directory_exists, generate_video_id, scan_video_files, validate_file_exists,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use indicatif::ProgressBar;
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// 一次剪輯工作階段的狀態
///
/// 狀態由外殼持有並在每次呼叫時明確傳入核心，
/// 核心本身不保存任何跨呼叫狀態。
struct Session {
    video_path: PathBuf,
    video_id: String,
    info: ProbeInfo,
    segments: Vec<Segment>,
    /// 場景偵測降級時的原因；None 表示上次分析沒有降級
    degraded: Option<String>,
}

/// 影片切割與匯出流程
///
/// 選影片 → 分析片段 → 匯出單一片段或全部打包
pub struct ClipSplitter {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl ClipSplitter {
    #[must_use]
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&self) -> Result<()> {
        println!("{}", style("=== 影片切割與匯出 ===").cyan().bold());

        let term = Term::stdout();
        let Some(video_path) = self.prompt_video_path(&term)? else {
            return Ok(());
        };

        let engine = FfmpegEngine::new()
            .with_timeout(Duration::from_secs(self.config.settings.engine_timeout_secs));

        println!("{}", style("讀取影片資訊中...").dim());
        let info = engine.probe(&video_path)?;
        let video_id = generate_video_id(&video_path);
        println!(
            "  時長 {:.1}s，解析度 {}x{}，影片代號 {}",
            info.duration_seconds,
            info.width,
            info.height,
            style(&video_id).bold()
        );
        info!("開始剪輯工作階段: {} ({video_id})", video_path.display());

        // 工作階段內的設定調整不回寫 settings.json
        let mut settings = self.config.settings.clone();
        ensure_directory_exists(&settings.resolved_output_dir())?;
        let mut session = Session {
            video_path,
            video_id,
            info,
            segments: Vec::new(),
            degraded: None,
        };

        self.analyze(&engine, &mut session, &settings);

        loop {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷訊號，結束工作階段");
                break;
            }

            let options = vec![
                "重新分析",
                "列出片段",
                "匯出單一片段",
                "全部匯出為壓縮檔",
                "儲存片段清單 JSON",
                "返回主選單",
            ];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("請選擇動作")
                .items(&options)
                .default(0)
                .interact_on_opt(&term)?;

            match selection {
                Some(0) => {
                    if self.prompt_analyze_params(&mut settings)? {
                        self.analyze(&engine, &mut session, &settings);
                    }
                }
                Some(1) => self.print_segments(&session),
                Some(2) => self.export_single(&engine, &session, &settings)?,
                Some(3) => self.export_zip(&engine, &session, &settings),
                Some(4) => self.save_segment_list(&session, &settings)?,
                Some(5) | None => break,
                Some(_) => unreachable!(),
            }
        }

        Ok(())
    }

    /// 輸入影片路徑；給資料夾的話掃描後讓使用者挑一個
    fn prompt_video_path(&self, term: &Term) -> Result<Option<PathBuf>> {
        let input: String = Input::new()
            .with_prompt("請輸入影片檔案或資料夾路徑")
            .interact_text()?;
        let path = PathBuf::from(input.trim());

        if path.is_dir() {
            println!("{}", style("掃描影片檔案中...").dim());
            let video_files = scan_video_files(&path)?;
            if video_files.is_empty() {
                println!("{}", style("找不到任何影片檔案").yellow());
                return Ok(None);
            }

            let labels: Vec<String> = video_files
                .iter()
                .map(|file| {
                    let size_mb = file.size as f64 / 1024.0 / 1024.0;
                    format!(
                        "{} ({size_mb:.2} MB)",
                        file.path.file_name().unwrap_or_default().to_string_lossy()
                    )
                })
                .collect();

            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("請選擇影片")
                .items(&labels)
                .default(0)
                .interact_on_opt(term)?;

            return Ok(selection.map(|index| video_files[index].path.clone()));
        }

        validate_file_exists(&path)?;
        Ok(Some(path))
    }

    /// 重新分析前的參數確認；回傳 false 表示使用者取消
    fn prompt_analyze_params(&self, settings: &mut UserSettings) -> Result<bool> {
        let modes = vec!["等長切割", "場景偵測"];
        let default_index = match settings.split_mode {
            SplitMode::EqualLength => 0,
            SplitMode::SceneDetection => 1,
        };
        let Some(selection) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("切割模式")
            .items(&modes)
            .default(default_index)
            .interact_opt()?
        else {
            return Ok(false);
        };

        if selection == 0 {
            settings.split_mode = SplitMode::EqualLength;
            settings.chunk_len = Input::new()
                .with_prompt("片段長度（秒）")
                .default(settings.chunk_len)
                .interact_text()?;
        } else {
            settings.split_mode = SplitMode::SceneDetection;
            settings.scene_threshold = Input::new()
                .with_prompt("場景變換閾值 (0-1)")
                .default(settings.scene_threshold)
                .interact_text()?;
            settings.min_segment_len = Input::new()
                .with_prompt("最短片段長度（秒）")
                .default(settings.min_segment_len)
                .interact_text()?;
        }

        Ok(true)
    }

    fn analyze(&self, engine: &FfmpegEngine, session: &mut Session, settings: &UserSettings) {
        match settings.split_mode {
            SplitMode::EqualLength => {
                match analyze_equal(engine, &session.video_path, settings.chunk_len) {
                    Ok(segments) => {
                        session.segments = segments;
                        session.degraded = None;
                    }
                    Err(e) => {
                        error!("等長切割失敗: {e}");
                        println!("{} {}", style("分析失敗:").red().bold(), e);
                        return;
                    }
                }
            }
            SplitMode::SceneDetection => {
                println!("{}", style("場景偵測中，可能需要一點時間...").dim());
                match analyze_scene(
                    engine,
                    &session.video_path,
                    settings.scene_threshold,
                    settings.min_segment_len,
                ) {
                    SceneAnalysis::Complete(segments) => {
                        session.segments = segments;
                        session.degraded = None;
                    }
                    SceneAnalysis::Degraded(reason) => {
                        session.segments = Vec::new();
                        session.degraded = Some(reason);
                    }
                }
            }
        }

        self.print_segments(session);
    }

    fn print_segments(&self, session: &Session) {
        if let Some(reason) = &session.degraded {
            // 降級和「真的沒有場景」要讓使用者分得出來
            println!("{} {}", style("場景偵測失敗，結果為空:").yellow(), reason);
            return;
        }
        if session.segments.is_empty() {
            println!("{}", style("沒有找到任何片段").yellow());
            return;
        }

        println!(
            "{}",
            style(format!(
                "共 {} 個片段（影片總長 {:.1}s）:",
                session.segments.len(),
                session.info.duration_seconds
            ))
            .green()
        );
        for segment in &session.segments {
            println!(
                "  {:>3}. {:>8.2}s → {:>8.2}s （{:.2}s）",
                segment.id, segment.start, segment.end, segment.duration
            );
        }
    }

    fn export_single(
        &self,
        engine: &FfmpegEngine,
        session: &Session,
        settings: &UserSettings,
    ) -> Result<()> {
        if session.segments.is_empty() {
            println!("{}", style("目前沒有片段可匯出").yellow());
            return Ok(());
        }

        let position: usize = Input::new()
            .with_prompt(format!("片段序號 (1-{})", session.segments.len()))
            .interact_text()?;
        if position == 0 || position > session.segments.len() {
            println!("{}", style("序號超出範圍").red());
            return Ok(());
        }
        let segment = &session.segments[position - 1];

        let mut task = ClipTask::new(
            &session.video_path,
            segment.start,
            segment.end,
            &session.video_id,
            &settings.resolved_output_dir(),
        );
        task.format = settings.export_format;
        task.resolution = settings.resolution;

        println!("{}", style("匯出中...").dim());
        match export_clip(engine, &task) {
            Ok(output) => {
                println!("{} {}", style("✓").green(), output.display());
            }
            Err(e) => {
                error!("片段匯出失敗: {e}");
                println!("{} {}", style("✗ 匯出失敗:").red().bold(), e);
            }
        }

        Ok(())
    }

    /// 把目前的片段清單存成 JSON，方便之後載入或交給其他工具
    fn save_segment_list(&self, session: &Session, settings: &UserSettings) -> Result<()> {
        if session.segments.is_empty() {
            println!("{}", style("目前沒有片段可儲存").yellow());
            return Ok(());
        }

        let output = settings
            .resolved_output_dir()
            .join(format!("{}_segments.json", session.video_id));
        let content = serde_json::to_string_pretty(&session.segments)?;
        std::fs::write(&output, content)?;

        println!("{} {}", style("✓ 片段清單已儲存:").green(), output.display());
        Ok(())
    }

    fn export_zip(&self, engine: &FfmpegEngine, session: &Session, settings: &UserSettings) {
        if session.segments.is_empty() {
            println!("{}", style("目前沒有片段可匯出").yellow());
            return;
        }

        let options = BatchOptions {
            format: settings.export_format,
            resolution: settings.resolution,
            naming_template: settings.naming_template.clone(),
            output_dir: settings.resolved_output_dir(),
            parallel_jobs: settings.parallel_jobs.max(1),
        };

        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("匯出 {} 個片段中...", session.segments.len()));
        spinner.enable_steady_tick(Duration::from_millis(120));

        let result = export_all_zip(
            engine,
            &session.video_path,
            &session.segments,
            &session.video_id,
            &options,
        );
        spinner.finish_and_clear();

        match result {
            Ok(zip_path) => {
                println!("{} {}", style("✓ 壓縮檔已建立:").green(), zip_path.display());
            }
            Err(e) => {
                error!("批次匯出失敗: {e}");
                println!("{} {}", style("✗ 批次匯出失敗:").red().bold(), e);
            }
        }
    }
}
