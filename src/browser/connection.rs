use chromiumoxide::Browser;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::spawn_event_handler;
use crate::error::BrowserError;
use crate::infrastructure::{ChromiumDriver, SessionMode};

/// 连接到已在调试端口运行的浏览器，并新开一个页面用于抓取
pub async fn connect_to_browser(port: u16) -> Result<ChromiumDriver, BrowserError> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        BrowserError::ConnectionFailed {
            port,
            reason: e.to_string(),
        }
    })?;
    debug!("浏览器连接成功");

    let handler_task = spawn_event_handler(handler);

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建新页面失败: {}", e);
        BrowserError::ConnectionFailed {
            port,
            reason: e.to_string(),
        }
    })?;
    info!("✓ 已在现有浏览器中打开新页面");

    Ok(ChromiumDriver::new(browser, page, handler_task, SessionMode::Connected))
}
