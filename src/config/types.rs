//! 配置数据类型

use serde::{Deserialize, Deserializer};

/// 单条命令定义
///
/// 加载后不可变，由命令注册表独占持有。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommandDefinition {
    /// 命令名（大小写敏感）
    #[serde(alias = "name")]
    pub name: String,
    /// 可执行文件路径，按 PATH 解析
    #[serde(alias = "path")]
    pub path: String,
    /// 参数列表，原样传递，不经过 shell
    #[serde(alias = "args", default, deserialize_with = "null_as_default")]
    pub args: Vec<String>,
}

impl CommandDefinition {
    pub fn new<I, S>(name: impl Into<String>, path: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// 配置文件根结构
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoteConfig {
    #[serde(alias = "commands", default, deserialize_with = "null_as_default")]
    pub commands: Vec<CommandDefinition>,
}

/// `null` 与缺省字段同样处理为默认值
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
