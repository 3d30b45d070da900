use crate::component::ClipSplitter;
use crate::config::Config;
use crate::menu::settings_menu::show_settings_menu;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_clip_splitter(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &Config,
) -> Result<()> {
    let splitter = ClipSplitter::new(config.clone(), Arc::clone(shutdown_signal));

    if let Err(e) = splitter.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}

pub fn run_settings(term: &Term, config: &mut Config) -> Result<()> {
    show_settings_menu(term, config)
}
