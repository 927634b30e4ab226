//! 命令启动模块
//!
//! 按命令定义启动进程并立即返回，进程退出由独立的后台任务观察并记录日志：
//! - 参数按原样传递，不经过 shell
//! - 启动失败同步返回
//! - 退出结果只写日志，不回传给调用方

mod error;
mod executor;
mod types;

pub use error::LaunchError;
pub use executor::{CommandLauncher, ProcessLauncher};
pub use types::*;
