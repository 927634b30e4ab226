/*!
 * HTTP 服务模块
 *
 * 基于 tiny_http 的同步服务器：接收循环运行在阻塞线程上，
 * 每个请求交给独立的阻塞任务处理，处理过程中始终处于 tokio 运行时上下文内，
 * 因此启动器可以直接创建子进程并派生退出观察任务。
 */

pub mod router;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tiny_http::{Header, Request, Response, Server};
use tracing::{info, warn};

use crate::launcher::ProcessLauncher;
use crate::registry::CommandRegistry;
use crate::utils::error::{app_error, app_error_with_context, AppResult};

pub use router::{route, HttpReply, RequestError, RouteRequest};

/// 请求处理共享状态
///
/// 注册表构建后只读，所有请求共享同一份。
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<CommandRegistry>,
    pub launcher: Arc<dyn ProcessLauncher>,
}

impl AppState {
    pub fn new(registry: CommandRegistry, launcher: Arc<dyn ProcessLauncher>) -> Self {
        Self {
            registry: Arc::new(registry),
            launcher,
        }
    }
}

/// 服务器关闭句柄
#[derive(Clone)]
pub struct ShutdownHandle {
    http: Arc<Server>,
}

impl ShutdownHandle {
    /// 唤醒接收循环并让其退出，已经在处理的请求不受影响
    pub fn shutdown(&self) {
        self.http.unblock();
    }
}

/// 命令启动服务器
pub struct RemoteServer {
    http: Arc<Server>,
    state: AppState,
}

impl RemoteServer {
    /// 绑定监听地址，端口为 0 时由系统分配
    pub fn bind(address: &str, state: AppState) -> AppResult<Self> {
        let http = Server::http(address).map_err(app_error_with_context("Failed to bind server"))?;

        Ok(Self {
            http: Arc::new(http),
            state,
        })
    }

    /// 实际监听的地址
    pub fn local_addr(&self) -> AppResult<SocketAddr> {
        self.http
            .server_addr()
            .to_ip()
            .ok_or_else(|| app_error("Server is not listening on an IP address"))
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            http: self.http.clone(),
        }
    }

    /// 运行接收循环，直到关闭句柄被触发
    pub async fn run(self) -> AppResult<()> {
        let http = self.http;
        let state = self.state;

        tokio::task::spawn_blocking(move || {
            for request in http.incoming_requests() {
                let state = state.clone();
                tokio::task::spawn_blocking(move || Self::serve(&state, request));
            }
        })
        .await
        .context("HTTP accept loop terminated abnormally")?;

        info!("Remote server stopped");
        Ok(())
    }

    fn serve(state: &AppState, request: Request) {
        let accept_encoding = request
            .headers()
            .iter()
            .find(|header| header.field.equiv("Accept-Encoding"))
            .map(|header| header.value.as_str().to_string());

        let reply = route(
            state,
            RouteRequest {
                method: request.method(),
                url: request.url(),
                accept_encoding: accept_encoding.as_deref(),
            },
        );

        let mut response = Response::from_data(reply.body).with_status_code(reply.status);
        for (name, value) in &reply.headers {
            match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                Ok(header) => response.add_header(header),
                Err(()) => warn!("Dropping invalid response header {}", name),
            }
        }

        if let Err(e) = request.respond(response) {
            warn!("Failed to send response: {}", e);
        }
    }
}
