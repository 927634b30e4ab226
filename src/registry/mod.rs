/*!
 * 命令注册表
 *
 * 启动时由配置构建，之后只读。多个请求并发查询时不需要任何锁。
 */

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use crate::config::{CommandDefinition, RemoteConfig};

/// 命令注册表
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// 按配置文件顺序保存的命令定义
    commands: Vec<CommandDefinition>,
    /// 名称到 `commands` 下标的索引，重名时保留第一次出现的位置
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new(commands: Vec<CommandDefinition>) -> Self {
        let mut index = HashMap::with_capacity(commands.len());
        for (position, command) in commands.iter().enumerate() {
            match index.entry(command.name.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(position);
                }
                Entry::Occupied(_) => {
                    warn!(
                        "Duplicate command name {} at index {}, keeping the first definition",
                        command.name, position
                    );
                }
            }
        }

        Self { commands, index }
    }

    /// 按名称精确查找命令，大小写敏感
    pub fn resolve(&self, name: &str) -> Option<&CommandDefinition> {
        self.index.get(name).map(|&position| &self.commands[position])
    }

    /// 返回所有已配置的命令名，按字典序升序排列
    ///
    /// 与配置条目一一对应，重名条目会重复出现。
    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .commands
            .iter()
            .map(|command| command.name.clone())
            .collect();
        names.sort();
        names
    }

    /// 已配置的命令数量（包含重名条目）
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl From<RemoteConfig> for CommandRegistry {
    fn from(config: RemoteConfig) -> Self {
        Self::new(config.commands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> CommandRegistry {
        CommandRegistry::new(vec![
            CommandDefinition::new("zeta", "echo", ["z"]),
            CommandDefinition::new("alpha", "echo", ["a"]),
            CommandDefinition::new("Mid", "true", Vec::<String>::new()),
        ])
    }

    #[test]
    fn test_resolve_configured_names() {
        let registry = sample_registry();

        for name in ["zeta", "alpha", "Mid"] {
            let command = registry.resolve(name).expect("命令应该存在");
            assert_eq!(command.name, name);
        }
        assert_eq!(registry.resolve("alpha").unwrap().args, vec!["a"]);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = sample_registry();

        assert!(registry.resolve("missing").is_none());
        assert!(registry.resolve("").is_none());
        // 大小写敏感
        assert!(registry.resolve("ALPHA").is_none());
        assert!(registry.resolve("mid").is_none());
    }

    #[test]
    fn test_list_names_sorted() {
        let registry = sample_registry();
        let names = registry.list_names();

        assert_eq!(names, vec!["Mid", "alpha", "zeta"]);
        assert_eq!(names.len(), registry.len());
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let registry = CommandRegistry::new(vec![
            CommandDefinition::new("dup", "first", Vec::<String>::new()),
            CommandDefinition::new("other", "x", Vec::<String>::new()),
            CommandDefinition::new("dup", "second", Vec::<String>::new()),
        ]);

        assert_eq!(registry.resolve("dup").unwrap().path, "first");
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_names(), vec!["dup", "dup", "other"]);
        assert_eq!(registry.list_names().len(), registry.len());
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::from(RemoteConfig::default());

        assert!(registry.is_empty());
        assert!(registry.list_names().is_empty());
        assert!(registry.resolve("anything").is_none());
    }

    #[test]
    fn test_concurrent_lookups() {
        let registry = std::sync::Arc::new(sample_registry());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        assert!(registry.resolve("zeta").is_some());
                        assert_eq!(registry.list_names().len(), 3);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
