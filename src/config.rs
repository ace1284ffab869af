use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppResult, ConfigError};

/// 程序配置
///
/// 默认值即抓取目标的固定参数；每个字段都可以通过环境变量覆盖。
#[derive(Clone, Debug)]
pub struct Config {
    /// 主题列表首页（必须以 `/` 结尾）
    pub base_url: String,
    /// 最后一页的页码（包含）
    pub max_page: u32,
    /// 输出 JSON 文件
    pub output_file: String,
    /// 显式等待的超时时间（秒）
    pub wait_timeout_secs: u64,
    /// 页面加载后额外等待动态内容的时间（毫秒）
    pub settle_delay_ms: u64,
    /// 是否以无头模式启动浏览器
    pub headless: bool,
    /// 浏览器可执行文件路径，为空时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    /// 若设置，则连接到已在该调试端口运行的浏览器而不是启动新浏览器
    pub browser_debug_port: Option<u16>,
    /// 是否显示详细日志（完整正文与评论）
    pub verbose_logging: bool,
    /// 致命错误中止时是否仍写出已收集的数据
    pub save_partial_on_abort: bool,
    // --- CSS 选择器 ---
    pub listing_container_selector: String,
    pub topic_row_selector: String,
    pub topic_link_selector: String,
    pub reply_content_selector: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://survivorsforum.womensaid.org.uk/topics/".to_string(),
            max_page: 19,
            output_file: "forum_data5.json".to_string(),
            wait_timeout_secs: 15,
            settle_delay_ms: 1000,
            headless: true,
            chrome_executable: None,
            browser_debug_port: None,
            verbose_logging: false,
            save_partial_on_abort: false,
            listing_container_selector: "#bbpress-forums".to_string(),
            topic_row_selector: "ul[id^='bbp-topic-'].topic.type-topic".to_string(),
            topic_link_selector: "li.bbp-topic-title a".to_string(),
            reply_content_selector: "div.bbp-reply-content".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的字段使用默认值
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        let config = Self {
            base_url: env_string("FORUM_BASE_URL").unwrap_or(default.base_url),
            max_page: env_parsed("MAX_PAGE", "u32")?.unwrap_or(default.max_page),
            output_file: env_string("OUTPUT_FILE").unwrap_or(default.output_file),
            wait_timeout_secs: env_parsed("WAIT_TIMEOUT_SECS", "u64")?
                .unwrap_or(default.wait_timeout_secs),
            settle_delay_ms: env_parsed("SETTLE_DELAY_MS", "u64")?
                .unwrap_or(default.settle_delay_ms),
            headless: env_parsed("HEADLESS", "bool")?.unwrap_or(default.headless),
            chrome_executable: env_string("CHROME_EXECUTABLE").or(default.chrome_executable),
            browser_debug_port: env_parsed("BROWSER_DEBUG_PORT", "u16")?
                .or(default.browser_debug_port),
            verbose_logging: env_parsed("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            save_partial_on_abort: env_parsed("SAVE_PARTIAL_ON_ABORT", "bool")?
                .unwrap_or(default.save_partial_on_abort),
            ..default
        };
        config.validate()?;
        Ok(config)
    }

    /// 检查配置是否可用
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "base_url",
                reason: "不能为空".to_string(),
            });
        }
        if self.max_page == 0 {
            return Err(ConfigError::Invalid {
                field: "max_page",
                reason: "至少为 1".to_string(),
            });
        }
        if self.wait_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "wait_timeout_secs",
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn env_string(var_name: &str) -> Option<String> {
    std::env::var(var_name).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: FromStr>(var_name: &str, expected_type: &str) -> Result<Option<T>, ConfigError> {
    match env_string(var_name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
        None => Ok(None),
    }
}
