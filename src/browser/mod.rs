pub mod connection;
pub mod headless;

use chromiumoxide::Handler;
use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::ChromiumDriver;

pub use connection::connect_to_browser;
pub use headless::launch_browser;

/// 按配置打开浏览器会话：设置了调试端口则连接，否则启动新浏览器
pub async fn open_session(config: &Config) -> Result<ChromiumDriver, BrowserError> {
    match config.browser_debug_port {
        Some(port) => connect_to_browser(port).await,
        None => launch_browser(config).await,
    }
}

/// 在后台处理浏览器事件
fn spawn_event_handler(mut handler: Handler) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    })
}
