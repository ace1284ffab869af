use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {reason}")]
    LaunchFailed { reason: String },
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {reason}")]
    ConnectionFailed { port: u16, reason: String },
    /// 导航失败
    #[error("导航到 {url} 失败: {reason}")]
    NavigationFailed { url: String, reason: String },
    /// 等待元素超时
    #[error("等待元素 `{selector}` 超时 ({timeout_secs} 秒)")]
    WaitTimeout { selector: String, timeout_secs: u64 },
    /// 等待页面离开某个 URL 超时
    #[error("等待页面离开 {from} 超时 ({timeout_secs} 秒)")]
    NavigationTimeout { from: String, timeout_secs: u64 },
    /// 元素不存在
    #[error("未找到元素 `{selector}`")]
    ElementNotFound { selector: String },
    /// 元素引用已失效（页面已重新加载）
    #[error("元素引用已失效: {reason}")]
    StaleElement { reason: String },
    /// 元素不可交互
    #[error("元素不可交互: {reason}")]
    NotInteractable { reason: String },
    /// 直接点击与脚本点击都失败
    #[error("点击失败 (直接点击: {direct}; 脚本点击: {fallback})")]
    ClickRejected { direct: String, fallback: String },
    /// 执行脚本失败
    #[error("执行脚本失败: {reason}")]
    ScriptFailed { reason: String },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {reason}")]
    ShutdownFailed { reason: String },
    /// CDP 协议错误
    #[error("CDP 错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON 序列化失败: {0}")]
    SerializeFailed(#[from] serde_json::Error),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 配置值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
