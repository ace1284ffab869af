//! Chromium 会话驱动 - 基础设施层
//!
//! 基于 chromiumoxide 实现 `SessionDriver`

use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::{Browser, Page};
use serde_json::Value as JsonValue;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::error::BrowserError;
use crate::infrastructure::{wait_for_url_change, SessionDriver};

/// 轮询元素 / URL 的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 浏览器会话来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// 由本程序启动，关闭时结束浏览器进程
    Launched,
    /// 连接到已有浏览器，关闭时只关闭本程序打开的页面
    Connected,
}

/// Chromium 会话驱动
///
/// 唯一持有 Browser / Page 以及 CDP 事件处理任务。
pub struct ChromiumDriver {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    mode: SessionMode,
}

impl ChromiumDriver {
    pub fn new(browser: Browser, page: Page, handler_task: JoinHandle<()>, mode: SessionMode) -> Self {
        Self {
            browser,
            page,
            handler_task,
            mode,
        }
    }

    /// 执行 JS 代码并返回 JSON 结果
    pub async fn eval(&self, js_code: impl Into<String>) -> Result<JsonValue, BrowserError> {
        let result = self.page.evaluate(js_code.into()).await?;
        // 无返回值的脚本（如 history.back()）没有可反序列化的值
        Ok(result.into_value().unwrap_or(JsonValue::Null))
    }
}

impl SessionDriver for ChromiumDriver {
    type Element = Element;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        debug!("导航到: {}", url);
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_presence(&self, selector: &str, wait: Duration) -> Result<(), BrowserError> {
        let poll = async {
            loop {
                match self.page.find_elements(selector).await {
                    Ok(found) if !found.is_empty() => return,
                    Ok(_) => {}
                    // 页面切换过程中查询可能失败，继续轮询
                    Err(e) => debug!("查询 `{}` 失败，继续等待: {}", selector, e),
                }
                sleep(POLL_INTERVAL).await;
            }
        };

        timeout(wait, poll)
            .await
            .map_err(|_| BrowserError::WaitTimeout {
                selector: selector.to_string(),
                timeout_secs: wait.as_secs(),
            })
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Element>, BrowserError> {
        Ok(self.page.find_elements(selector).await?)
    }

    async fn find_within(&self, parent: &Element, selector: &str) -> Result<Element, BrowserError> {
        parent.find_element(selector).await.map_err(|e| {
            element_error(e, |_| BrowserError::ElementNotFound {
                selector: selector.to_string(),
            })
        })
    }

    async fn text_of(&self, element: &Element) -> Result<String, BrowserError> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| element_error(e, BrowserError::Cdp))?;
        Ok(text.unwrap_or_default())
    }

    async fn scroll_into_view(&self, element: &Element) -> Result<(), BrowserError> {
        element
            .scroll_into_view()
            .await
            .map_err(|e| element_error(e, BrowserError::Cdp))?;
        Ok(())
    }

    async fn click(&self, element: &Element) -> Result<(), BrowserError> {
        element.click().await.map_err(|e| {
            element_error(e, |e| BrowserError::NotInteractable {
                reason: e.to_string(),
            })
        })?;
        Ok(())
    }

    async fn programmatic_click(&self, element: &Element) -> Result<(), BrowserError> {
        element
            .call_js_fn("function() { this.click(); }", false)
            .await
            .map_err(|e| {
                element_error(e, |e| BrowserError::ScriptFailed {
                    reason: e.to_string(),
                })
            })?;
        Ok(())
    }

    async fn navigate_back(&self, wait: Duration) -> Result<(), BrowserError> {
        let before = self.current_url().await?;
        self.eval("window.history.back()").await?;
        // history.back() 异步生效，以 URL 变化为准
        let landed = wait_for_url_change(self, &before, wait, POLL_INTERVAL).await?;
        debug!("已后退: {} -> {}", before, landed);
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn shutdown(mut self) -> Result<(), BrowserError> {
        let result = match self.mode {
            SessionMode::Launched => {
                info!("🛑 正在关闭浏览器...");
                match self.browser.close().await {
                    Ok(_) => self
                        .browser
                        .wait()
                        .await
                        .map(|_| ())
                        .map_err(|e| BrowserError::ShutdownFailed {
                            reason: e.to_string(),
                        }),
                    Err(e) => Err(BrowserError::ShutdownFailed {
                        reason: e.to_string(),
                    }),
                }
            }
            SessionMode::Connected => {
                info!("🛑 正在关闭抓取页面（保留浏览器）...");
                self.page
                    .close()
                    .await
                    .map_err(|e| BrowserError::ShutdownFailed {
                        reason: e.to_string(),
                    })
            }
        };

        self.handler_task.abort();
        if let Err(e) = &result {
            warn!("浏览器未能正常关闭: {}", e);
        }
        result
    }
}

/// CDP 元素操作错误分类：节点已被销毁的归为 `StaleElement`，其余交给 `other`
fn element_error(e: CdpError, other: impl FnOnce(CdpError) -> BrowserError) -> BrowserError {
    let message = e.to_string();
    if is_stale_node(&message) {
        BrowserError::StaleElement { reason: message }
    } else {
        other(e)
    }
}

/// Chrome 在节点所属文档已被替换时返回的错误信息
fn is_stale_node(message: &str) -> bool {
    const STALE_MARKERS: [&str; 4] = [
        "No node with given id",
        "Could not find node with given id",
        "Node with given id does not belong to the document",
        "Cannot find context with specified id",
    ];
    STALE_MARKERS.iter().any(|marker| message.contains(marker))
}
