use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig};
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::browser::spawn_event_handler;
use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::{ChromiumDriver, SessionMode};

/// 启动（默认无头的）浏览器并打开一个空白页面
pub async fn launch_browser(config: &Config) -> Result<ChromiumDriver, BrowserError> {
    info!("🚀 启动浏览器 (无头模式: {})...", config.headless);

    let mut builder = BrowserConfig::builder();
    builder = if config.headless {
        builder.new_headless_mode()
    } else {
        builder.with_head()
    };
    if let Some(executable) = &config.chrome_executable {
        debug!("浏览器路径: {}", executable);
        builder = builder.chrome_executable(Path::new(executable));
    }

    let browser_config = builder
        .args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--no-sandbox",            // 容器内运行时没有沙盒权限
            "--disable-dev-shm-usage", // 防止共享内存不足
        ])
        .build()
        .map_err(|reason| {
            error!("配置浏览器失败: {}", reason);
            BrowserError::LaunchFailed { reason }
        })?;

    let (browser, handler) = Browser::launch(browser_config).await.map_err(|e| {
        error!("启动浏览器失败: {}", e);
        BrowserError::LaunchFailed {
            reason: e.to_string(),
        }
    })?;
    debug!("浏览器启动成功");

    let handler_task = spawn_event_handler(handler);

    // 等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    let page = browser.new_page("about:blank").await.map_err(|e| {
        error!("创建页面失败: {}", e);
        BrowserError::LaunchFailed {
            reason: e.to_string(),
        }
    })?;

    info!("✅ 浏览器已就绪");
    Ok(ChromiumDriver::new(browser, page, handler_task, SessionMode::Launched))
}
