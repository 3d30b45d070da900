pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod exporter;
pub mod init;
pub mod menu;
pub mod segmenter;
pub mod signal;
pub mod tools;

pub use error::ClipError;

use anyhow::Result;
use console::{Term, style};

pub fn pause(term: &Term) -> Result<()> {
    println!("\n{}", style("按 Enter 繼續...").dim());
    term.read_line()?;
    Ok(())
}
