/*!
 * 请求路由
 *
 * 把 HTTP 请求映射到注册表和启动器上，强制 GET-only 与 CORS 策略。
 * 路由本身不做任何 I/O，输入是方法、URL 和 Accept-Encoding，输出是完整的响应描述。
 */

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;
use tiny_http::Method;
use tracing::{debug, error};
use url::form_urlencoded;

use super::AppState;
use crate::launcher::LaunchError;

pub const RUN_PATH: &str = "/run";
pub const LIST_PATH: &str = "/list";
pub const HEARTBEAT_PATH: &str = "/heartbeat";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

/// 单次请求级错误，全部转换为 HTTP 状态码和纯文本响应体
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Query parameter [name] is required and cannot be empty.")]
    MissingName,

    #[error("Specified command was not found.")]
    CommandNotFound,

    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error("Failed to encode response: {0}")]
    Encoding(String),
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::MissingName | RequestError::CommandNotFound => 400,
            RequestError::Launch(_) | RequestError::Encoding(_) => 500,
        }
    }
}

/// 路由输入
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub method: &'a Method,
    /// 请求路径，包含查询串
    pub url: &'a str,
    pub accept_encoding: Option<&'a str>,
}

/// 路由输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl HttpReply {
    fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status, body.into()).with_header("Content-Type", TEXT_PLAIN)
    }

    fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// 按名称查找响应头（不区分大小写）
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

impl From<RequestError> for HttpReply {
    fn from(err: RequestError) -> Self {
        HttpReply::text(err.status_code(), err.to_string())
    }
}

/// 分发请求
///
/// 所有响应（包括 405 和 404）都带 `Access-Control-Allow-Origin: *`。
/// 只处理简单请求，不响应 OPTIONS 预检。
pub fn route(state: &AppState, request: RouteRequest<'_>) -> HttpReply {
    let (path, query) = match request.url.split_once('?') {
        Some((path, query)) => (path, query),
        None => (request.url, ""),
    };
    debug!("{} {}", request.method, request.url);

    let reply = match path {
        RUN_PATH | LIST_PATH | HEARTBEAT_PATH if *request.method != Method::Get => {
            HttpReply::new(405, Vec::new()).with_header("Allow", "GET")
        }
        RUN_PATH => run_handler(state, query).unwrap_or_else(HttpReply::from),
        LIST_PATH => {
            list_handler(state, accepts_gzip(request.accept_encoding)).unwrap_or_else(HttpReply::from)
        }
        HEARTBEAT_PATH => heartbeat_handler(),
        _ => HttpReply::text(404, "404 page not found"),
    };

    reply.with_header("Access-Control-Allow-Origin", "*")
}

fn run_handler(state: &AppState, query: &str) -> Result<HttpReply, RequestError> {
    let name = form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();
    if name.is_empty() {
        return Err(RequestError::MissingName);
    }

    let command = state
        .registry
        .resolve(&name)
        .ok_or(RequestError::CommandNotFound)?;

    let ack = state.launcher.launch(command).map_err(|e| {
        error!("Failed to start command {}: {}", e.command_name(), e);
        e
    })?;

    Ok(HttpReply::text(
        200,
        format!("Command {} started successfully.", ack.name),
    ))
}

fn list_handler(state: &AppState, gzip: bool) -> Result<HttpReply, RequestError> {
    let mut json = serde_json::to_vec(&state.registry.list_names())
        .map_err(|e| RequestError::Encoding(e.to_string()))?;
    json.push(b'\n');

    if !gzip {
        return Ok(HttpReply::new(200, json).with_header("Content-Type", APPLICATION_JSON));
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&json)
        .map_err(|e| RequestError::Encoding(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| RequestError::Encoding(e.to_string()))?;

    Ok(HttpReply::new(200, compressed)
        .with_header("Content-Type", APPLICATION_JSON)
        .with_header("Content-Encoding", "gzip"))
}

fn heartbeat_handler() -> HttpReply {
    HttpReply::text(
        200,
        format!(
            "Server Time: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        ),
    )
}

/// 判断客户端是否接受 gzip（`q=0` 视为拒绝）
fn accepts_gzip(accept_encoding: Option<&str>) -> bool {
    let Some(header) = accept_encoding else {
        return false;
    };

    header.split(',').any(|item| {
        let mut parts = item.split(';').map(str::trim);
        let coding = parts.next().unwrap_or_default();
        if !(coding.eq_ignore_ascii_case("gzip") || coding == "*") {
            return false;
        }
        !parts.any(|param| {
            param
                .strip_prefix("q=")
                .and_then(|q| q.trim().parse::<f32>().ok())
                .is_some_and(|q| q == 0.0)
        })
    })
}
