//! 进程启动错误类型

use thiserror::Error;

/// 进程启动错误
#[derive(Debug, Error)]
pub enum LaunchError {
    /// 操作系统拒绝创建进程（可执行文件不存在、权限不足等）
    #[error("{source}")]
    Spawn {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchError {
    /// 启动失败的命令名
    pub fn command_name(&self) -> &str {
        match self {
            LaunchError::Spawn { name, .. } => name,
        }
    }
}
