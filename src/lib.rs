//! remote 服务端实现
//!
//! 从配置文件加载一组具名命令，通过 HTTP 接口按名称启动对应进程。
//! 主要模块：
//! - 配置加载
//! - 命令注册表
//! - 进程启动与退出观察
//! - HTTP 路由与服务器

pub mod config; // 命令配置加载模块
pub mod launcher; // 进程启动模块
pub mod registry; // 命令注册表模块
pub mod server; // HTTP 服务模块
pub mod utils; // 工具和错误处理模块
