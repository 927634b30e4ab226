/*!
 * 集成测试辅助工具
 *
 * 在临时端口上启动真实服务器，并提供等待文件内容的轮询辅助函数。
 */

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use remote_lib::config::CommandDefinition;
use remote_lib::launcher::CommandLauncher;
use remote_lib::registry::CommandRegistry;
use remote_lib::server::{AppState, RemoteServer, ShutdownHandle};
use remote_lib::utils::AppResult;
use tokio::task::JoinHandle;

/// 运行中的测试服务器
pub struct TestServer {
    pub base_url: String,
    shutdown: ShutdownHandle,
    task: JoinHandle<AppResult<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 关闭服务器并等待接收循环退出
    pub async fn stop(self) {
        self.shutdown.shutdown();
        let result = tokio::time::timeout(Duration::from_secs(5), self.task)
            .await
            .expect("服务器没有在超时时间内停止");
        result.expect("接收循环任务失败").expect("服务器返回错误");
    }
}

/// 使用真实启动器在 127.0.0.1 的随机端口上启动服务器
pub fn start_server(commands: Vec<CommandDefinition>) -> TestServer {
    let state = AppState::new(
        CommandRegistry::new(commands),
        Arc::new(CommandLauncher::new()),
    );
    let server = RemoteServer::bind("127.0.0.1:0", state).expect("绑定测试端口失败");
    let addr = server.local_addr().expect("获取监听地址失败");
    let shutdown = server.shutdown_handle();
    let task = tokio::spawn(server.run());

    TestServer {
        base_url: format!("http://{}", addr),
        shutdown,
        task,
    }
}

/// 轮询文件直到行数达到期望值或超时，返回最终行数
pub async fn wait_for_line_count(path: &Path, expected: usize, timeout: Duration) -> usize {
    let deadline = Instant::now() + timeout;
    loop {
        let count = std::fs::read_to_string(path)
            .map(|content| content.lines().count())
            .unwrap_or(0);
        if count >= expected || Instant::now() >= deadline {
            return count;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
