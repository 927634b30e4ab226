/*!
 * JSON 配置解析器
 *
 * 读取命令配置文件并做最基本的校验。
 */

use std::path::PathBuf;

use tracing::debug;

use super::{ConfigError, RemoteConfig};

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "remote.config.json";

/// 配置解析器
#[derive(Debug, Clone)]
pub struct ConfigParser {
    /// 配置文件路径
    config_path: PathBuf,
}

impl ConfigParser {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// 从文件加载配置
    ///
    /// 文件不存在、无法读取、内容格式错误都返回错误，不做任何回退。
    /// 可执行文件路径不在加载时检查，无效路径在启动进程时才会失败。
    /// 空文件视为没有任何命令。
    pub fn load(&self) -> Result<RemoteConfig, ConfigError> {
        let content = std::fs::read_to_string(&self.config_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: self.config_path.clone(),
                }
            } else {
                ConfigError::Read {
                    path: self.config_path.clone(),
                    source,
                }
            }
        })?;

        let config = Self::parse_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: self.config_path.clone(),
                source,
            },
            other => other,
        })?;

        debug!(
            "Loaded {} command(s) from {}",
            config.commands.len(),
            self.config_path.display()
        );
        Ok(config)
    }

    /// 解析配置内容
    pub fn parse_str(content: &str) -> Result<RemoteConfig, ConfigError> {
        if content.trim().is_empty() {
            return Ok(RemoteConfig::default());
        }

        let config: RemoteConfig =
            serde_json::from_str(content).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &RemoteConfig) -> Result<(), ConfigError> {
        for (index, command) in config.commands.iter().enumerate() {
            if command.name.is_empty() {
                return Err(ConfigError::Invalid {
                    index,
                    reason: "command name cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
