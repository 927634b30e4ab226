//! 命令启动器

use std::process::Stdio;

use tokio::process::Command;
use tracing::{error, info, warn};

use super::error::LaunchError;
use super::types::*;
use crate::config::CommandDefinition;

/// 进程启动接口
///
/// 路由层只依赖这个 trait，测试中可以替换为不真正启动进程的实现。
pub trait ProcessLauncher: Send + Sync {
    /// 启动命令，进程创建成功后立即返回，不等待其结束
    fn launch(&self, command: &CommandDefinition) -> Result<LaunchAcknowledgement, LaunchError>;
}

/// 基于 tokio 的命令启动器
///
/// 每次启动都创建独立进程和独立的退出观察任务，不做去重也不限制并发数。
/// 必须在 tokio 运行时上下文中调用。
#[derive(Debug, Clone, Default)]
pub struct CommandLauncher;

impl CommandLauncher {
    pub fn new() -> Self {
        Self
    }

    /// 构建命令
    fn build_command(command: &CommandDefinition) -> Command {
        let mut cmd = Command::new(&command.path);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);
        cmd
    }

    /// 等待进程退出并记录结果
    pub async fn watch(mut handle: LaunchHandle) -> ExitOutcome {
        let outcome = match handle.child.wait().await {
            Ok(status) => ExitOutcome::from_status(status),
            Err(e) => ExitOutcome::WaitFailed {
                error: e.to_string(),
            },
        };

        let duration_ms = handle.elapsed_ms();
        match &outcome {
            ExitOutcome::Success => info!(
                "Command {} (pid {:?}) completed in {}ms",
                handle.name, handle.pid, duration_ms
            ),
            ExitOutcome::WaitFailed { error } => error!(
                "Failed to wait for command {} with error {}",
                handle.name, error
            ),
            _ => warn!(
                "Command {} (pid {:?}) failed after {}ms: {}",
                handle.name, handle.pid, duration_ms, outcome
            ),
        }

        outcome
    }
}

impl ProcessLauncher for CommandLauncher {
    fn launch(&self, command: &CommandDefinition) -> Result<LaunchAcknowledgement, LaunchError> {
        let child = Self::build_command(command)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                name: command.name.clone(),
                source,
            })?;

        let handle = LaunchHandle::new(command.name.clone(), child);
        let acknowledgement = LaunchAcknowledgement {
            name: handle.name.clone(),
            pid: handle.pid,
        };
        info!(
            "Command {} started with pid {:?}",
            acknowledgement.name, acknowledgement.pid
        );

        // 观察任务独立运行，不保留句柄
        tokio::spawn(Self::watch(handle));

        Ok(acknowledgement)
    }
}
