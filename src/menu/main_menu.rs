use crate::config::Config;
use crate::menu::handlers::{run_clip_splitter, run_settings};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 顯示主選單；回傳 false 表示離開程式
pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== ClipSplitter 影片切割匯出 ===").cyan().bold());
    println!("{}", style("（Esc 返回，Ctrl-C 離開）").dim());

    if shutdown_signal.load(Ordering::SeqCst) {
        return Ok(false);
    }

    let options = vec!["影片切割與匯出", "設定", "離開"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_clip_splitter(term, shutdown_signal, config)?;
            Ok(true)
        }
        Some(1) => {
            run_settings(term, config)?;
            Ok(true)
        }
        Some(2) | None => Ok(false),
        Some(_) => unreachable!(),
    }
}
