/*!
 * 错误处理模块
 *
 * 应用层统一使用 anyhow，领域错误（配置、启动、请求）各自用 thiserror 定义，
 * 在二进制入口处通过 context 汇总为 AppError。
 */

use anyhow::anyhow;

/// 统一的应用程序结果类型
pub type AppResult<T> = anyhow::Result<T>;

/// 统一的应用程序错误类型
pub type AppError = anyhow::Error;

/// 创建简单的应用程序错误
pub fn app_error(msg: impl Into<String>) -> AppError {
    anyhow!(msg.into())
}

/// 创建带上下文的错误转换函数
///
/// 用于 `map_err`，把不实现 `std::error::Error` 的错误（例如 tiny_http 的绑定错误）
/// 包装成带前缀信息的 AppError。
pub fn app_error_with_context<T>(msg: &str) -> impl FnOnce(T) -> AppError + '_
where
    T: std::fmt::Display,
{
    move |err| anyhow!("{}: {}", msg, err)
}
