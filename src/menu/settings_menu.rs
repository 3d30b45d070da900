use crate::config::save::save_settings;
use crate::config::{Config, ExportFormat, Resolution, SplitMode};
use crate::exporter::validate_template;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::info;
use std::path::PathBuf;

/// 設定編輯選單，儲存後寫回 settings.json
pub fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;
        println!("{}", style("=== 設定 ===").cyan().bold());

        let settings = &config.settings;
        let template_label = settings
            .naming_template
            .clone()
            .unwrap_or_else(|| "（內建格式）".to_string());
        let output_dir_label = settings
            .output_dir
            .as_ref()
            .map_or_else(|| "（系統暫存目錄）".to_string(), |dir| dir.display().to_string());

        let items = vec![
            format!("切割模式: {}", settings.split_mode),
            format!("片段長度: {}s", settings.chunk_len),
            format!("場景變換閾值: {}", settings.scene_threshold),
            format!("最短片段長度: {}s", settings.min_segment_len),
            format!("匯出格式: {}", settings.export_format),
            format!("解析度: {}", settings.resolution),
            format!("命名模板: {template_label}"),
            format!("輸出資料夾: {output_dir_label}"),
            format!("平行工作數: {}", settings.parallel_jobs),
            format!("引擎時限: {}s", settings.engine_timeout_secs),
            "儲存並返回".to_string(),
        ];

        let Some(selection) = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇要修改的項目（Esc 放棄修改）")
            .items(&items)
            .default(items.len() - 1)
            .interact_on_opt(term)?
        else {
            return Ok(());
        };

        let settings = &mut config.settings;
        match selection {
            0 => {
                let modes = vec!["等長切割", "場景偵測"];
                if let Some(mode) = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("切割模式")
                    .items(&modes)
                    .default(0)
                    .interact_on_opt(term)?
                {
                    settings.split_mode = if mode == 0 {
                        SplitMode::EqualLength
                    } else {
                        SplitMode::SceneDetection
                    };
                }
            }
            1 => {
                settings.chunk_len = Input::new()
                    .with_prompt("片段長度（秒）")
                    .default(settings.chunk_len)
                    .interact_text()?;
            }
            2 => {
                settings.scene_threshold = Input::new()
                    .with_prompt("場景變換閾值 (0-1)")
                    .default(settings.scene_threshold)
                    .interact_text()?;
            }
            3 => {
                settings.min_segment_len = Input::new()
                    .with_prompt("最短片段長度（秒）")
                    .default(settings.min_segment_len)
                    .interact_text()?;
            }
            4 => {
                let formats = vec!["mp4", "webm"];
                if let Some(format) = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("匯出格式")
                    .items(&formats)
                    .default(0)
                    .interact_on_opt(term)?
                {
                    settings.export_format = if format == 0 {
                        ExportFormat::Mp4
                    } else {
                        ExportFormat::Webm
                    };
                }
            }
            5 => {
                let resolutions = vec!["Original", "720p", "1080p"];
                if let Some(resolution) = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("解析度（720p/1080p 為直接拉伸，不保留長寬比）")
                    .items(&resolutions)
                    .default(0)
                    .interact_on_opt(term)?
                {
                    settings.resolution = match resolution {
                        0 => Resolution::Original,
                        1 => Resolution::P720,
                        _ => Resolution::P1080,
                    };
                }
            }
            6 => {
                let input: String = Input::new()
                    .with_prompt("命名模板（須含 {index}，留空使用內建格式）")
                    .allow_empty(true)
                    .interact_text()?;
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    settings.naming_template = None;
                } else if let Err(e) = validate_template(trimmed) {
                    println!("{} {}", style("模板無效:").red(), e);
                    crate::pause(term)?;
                } else {
                    settings.naming_template = Some(trimmed.to_string());
                }
            }
            7 => {
                let input: String = Input::new()
                    .with_prompt("輸出資料夾（留空使用系統暫存目錄）")
                    .allow_empty(true)
                    .interact_text()?;
                let trimmed = input.trim();
                settings.output_dir = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
            8 => {
                settings.parallel_jobs = Input::new()
                    .with_prompt("平行工作數（1 為循序）")
                    .default(settings.parallel_jobs)
                    .interact_text()?;
            }
            9 => {
                settings.engine_timeout_secs = Input::new()
                    .with_prompt("引擎時限（秒）")
                    .default(settings.engine_timeout_secs)
                    .interact_text()?;
            }
            _ => {
                save_settings(settings)?;
                info!("設定已儲存");
                println!("{}", style("設定已儲存").green());
                return Ok(());
            }
        }
    }
}
