//! 列表页导航服务 - 业务能力层
//!
//! 负责"打开列表页 / 统计主题 / 回到列表页"能力

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::SessionDriver;

/// 列表页第 `page_number` 页的 URL
///
/// 第 1 页就是基础 URL，其余为 `{base}page/{n}/`。
pub fn listing_url(base_url: &str, page_number: u32) -> String {
    let base = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    if page_number <= 1 {
        base
    } else {
        format!("{}page/{}/", base, page_number)
    }
}

/// 列表页加载时的主题快照
///
/// 固定本次加载时的主题数量与顺序。元素句柄本身不保留，
/// 每个主题在列表页恢复后按序号重新查找。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSnapshot {
    pub page_number: u32,
    pub url: String,
    pub topic_count: usize,
}

/// 列表页导航服务
pub struct ListingNavigator {
    container_selector: String,
    topic_row_selector: String,
    wait_timeout: Duration,
    settle_delay: Duration,
}

impl ListingNavigator {
    pub fn new(config: &Config) -> Self {
        Self {
            container_selector: config.listing_container_selector.clone(),
            topic_row_selector: config.topic_row_selector.clone(),
            wait_timeout: config.wait_timeout(),
            settle_delay: config.settle_delay(),
        }
    }

    /// 打开列表页并等待主题容器出现
    ///
    /// 超时直接返回错误，由调用方决定是否中止整次运行。
    pub async fn load_listing<D: SessionDriver>(
        &self,
        driver: &D,
        url: &str,
    ) -> Result<(), BrowserError> {
        driver.navigate(url).await?;
        self.wait_for_container(driver).await
    }

    /// 统计当前列表页上的主题
    pub async fn discover_topics<D: SessionDriver>(
        &self,
        driver: &D,
        page_number: u32,
        url: &str,
    ) -> Result<ListingSnapshot, BrowserError> {
        let rows = driver.find_elements(&self.topic_row_selector).await?;
        Ok(ListingSnapshot {
            page_number,
            url: url.to_string(),
            topic_count: rows.len(),
        })
    }

    /// 回到列表页
    ///
    /// 若浏览器已离开列表页，先尝试后退；后退失败或没有回到列表页时，
    /// 直接重新加载列表页。只有重新加载也失败时才返回错误。
    pub async fn recover<D: SessionDriver>(
        &self,
        driver: &D,
        listing_url: &str,
    ) -> Result<(), BrowserError> {
        match self.try_back(driver, listing_url).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("⚠️ 返回列表页失败 ({})，重新加载: {}", e, listing_url);
                self.load_listing(driver, listing_url).await
            }
        }
    }

    async fn try_back<D: SessionDriver>(
        &self,
        driver: &D,
        listing_url: &str,
    ) -> Result<(), BrowserError> {
        if !same_page(&driver.current_url().await?, listing_url) {
            debug!("后退到列表页");
            driver.navigate_back(self.wait_timeout).await?;
        }

        self.wait_for_container(driver).await?;

        let landed = driver.current_url().await?;
        if same_page(&landed, listing_url) {
            Ok(())
        } else {
            Err(BrowserError::NavigationFailed {
                url: listing_url.to_string(),
                reason: format!("后退后停留在 {}", landed),
            })
        }
    }

    async fn wait_for_container<D: SessionDriver>(&self, driver: &D) -> Result<(), BrowserError> {
        driver
            .wait_for_presence(&self.container_selector, self.wait_timeout)
            .await?;
        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay).await;
        }
        debug!("✓ 列表页已就绪");
        Ok(())
    }
}

fn same_page(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}
