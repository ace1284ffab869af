//! 会话驱动 - 基础设施层
//!
//! 浏览器自动化能力的抽象，上层只通过这里操作页面

use std::time::Duration;

use tokio::time::{sleep, timeout};
use tracing::debug;

use crate::error::BrowserError;

/// 浏览器会话驱动
///
/// 职责：
/// - 持有唯一的浏览器会话（一个页面）
/// - 只暴露导航、查找、点击、等待等原语
/// - 不认识主题 / 列表页
///
/// 所有操作都作用于当前页面；会话在 `shutdown` 中释放且只释放一次。
#[allow(async_fn_in_trait)]
pub trait SessionDriver {
    /// 页面元素句柄，页面重新加载后可能失效
    type Element;

    /// 导航到指定 URL
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// 等待直到至少一个匹配 `selector` 的元素出现
    async fn wait_for_presence(&self, selector: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// 查找当前页面上所有匹配的元素（按文档顺序）
    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError>;

    /// 在 `parent` 内查找第一个匹配的元素
    async fn find_within(
        &self,
        parent: &Self::Element,
        selector: &str,
    ) -> Result<Self::Element, BrowserError>;

    /// 元素的可见文本
    async fn text_of(&self, element: &Self::Element) -> Result<String, BrowserError>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// 模拟真实鼠标点击
    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// 通过脚本调用 `element.click()`
    async fn programmatic_click(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// 浏览器历史后退一步，最多等待 `timeout` 直到页面离开当前 URL
    async fn navigate_back(&self, timeout: Duration) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    /// 释放浏览器会话
    async fn shutdown(self) -> Result<(), BrowserError>;
}

/// 轮询当前 URL，直到它不再是 `from`，返回新的 URL
///
/// 查询失败（页面切换中）时继续轮询；超过 `wait` 返回 `NavigationTimeout`。
pub async fn wait_for_url_change<D: SessionDriver>(
    driver: &D,
    from: &str,
    wait: Duration,
    poll_interval: Duration,
) -> Result<String, BrowserError> {
    let poll = async {
        loop {
            match driver.current_url().await {
                Ok(url) if url != from => return url,
                Ok(_) => {}
                Err(e) => debug!("读取当前 URL 失败，继续等待: {}", e),
            }
            sleep(poll_interval).await;
        }
    };

    timeout(wait, poll)
        .await
        .map_err(|_| BrowserError::NavigationTimeout {
            from: from.to_string(),
            timeout_secs: wait.as_secs(),
        })
}
