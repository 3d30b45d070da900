//! 片段匯出
//!
//! 單一片段匯出與批次打包匯出。實際的解碼、編碼與縮放全部
//! 委派給注入的編解碼引擎，這裡只負責檔名、順序與清理。

mod batch_exporter;
mod clip_exporter;
mod naming;

pub use batch_exporter::{BatchOptions, export_all_zip};
pub use clip_exporter::{ClipTask, export_clip};
pub use naming::{
    apply_template, default_archive_entry, default_clip_filename, sanitize_filename,
    validate_template,
};
