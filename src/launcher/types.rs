//! 进程启动相关类型定义

use std::fmt;
use std::process::ExitStatus;
use std::time::Instant;

use tokio::process::Child;

/// 启动成功回执
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchAcknowledgement {
    /// 命令名
    pub name: String,
    /// 进程 ID
    pub pid: Option<u32>,
}

/// 一次运行中的进程
///
/// 只归属于它自己的退出观察任务，进程退出后随任务一起丢弃。
#[derive(Debug)]
pub struct LaunchHandle {
    pub name: String,
    pub pid: Option<u32>,
    pub started_at: Instant,
    pub(crate) child: Child,
}

impl LaunchHandle {
    pub(crate) fn new(name: String, child: Child) -> Self {
        Self {
            name,
            pid: child.id(),
            started_at: Instant::now(),
            child,
        }
    }

    /// 获取已运行时长（毫秒）
    pub fn elapsed_ms(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }
}

/// 进程退出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// 正常退出，退出码为 0
    Success,
    /// 非零退出码
    Failed { exit_code: i32 },
    /// 被信号终止
    Signaled { signal: Option<i32> },
    /// 等待进程时出错
    WaitFailed { error: String },
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            return ExitOutcome::Success;
        }
        match status.code() {
            Some(exit_code) => ExitOutcome::Failed { exit_code },
            None => ExitOutcome::Signaled {
                signal: Self::signal_of(&status),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitOutcome::Success)
    }

    #[cfg(unix)]
    fn signal_of(status: &ExitStatus) -> Option<i32> {
        use std::os::unix::process::ExitStatusExt;
        status.signal()
    }

    #[cfg(not(unix))]
    fn signal_of(_status: &ExitStatus) -> Option<i32> {
        None
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Success => write!(f, "exited successfully"),
            ExitOutcome::Failed { exit_code } => write!(f, "exit status {}", exit_code),
            ExitOutcome::Signaled { signal: Some(signal) } => {
                write!(f, "terminated by signal {}", signal)
            }
            ExitOutcome::Signaled { signal: None } => write!(f, "terminated by signal"),
            ExitOutcome::WaitFailed { error } => write!(f, "wait failed: {}", error),
        }
    }
}
