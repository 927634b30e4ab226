//! 配置加载错误类型

use std::path::PathBuf;

use thiserror::Error;

/// 配置错误
///
/// 只在启动阶段出现，任何一种都会让进程以非零状态退出。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file does not exist at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Could not open config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid command at index {index}: {reason}")]
    Invalid { index: usize, reason: String },
}
