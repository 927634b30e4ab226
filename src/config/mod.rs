/*!
 * 配置系统模块
 *
 * 负责启动时一次性加载命令配置文件。配置加载失败属于致命错误，
 * 服务不会在配置不完整的情况下启动。
 */

pub mod error;
pub mod parser;
pub mod types;

pub use error::ConfigError;
pub use parser::{ConfigParser, DEFAULT_CONFIG_FILE};
pub use types::{CommandDefinition, RemoteConfig};
