//! 程式初始化

use env_logger::{Builder, Env};

/// 初始化日誌系統，預設等級 info，可用 RUST_LOG 覆寫
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}
