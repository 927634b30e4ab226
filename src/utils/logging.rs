// 日志系统模块

use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// 支持通过 RUST_LOG 环境变量控制日志级别，默认为 info。
/// 日志统一写到标准错误，标准输出保持干净。
pub fn init_logging() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| {
            let error_msg = format!("Failed to initialize logging: {}", e);
            eprintln!("{}", error_msg);
            error_msg
        })?;

    debug!("Logging initialized");
    Ok(())
}
