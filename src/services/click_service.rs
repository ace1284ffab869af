//! 点击服务 - 业务能力层
//!
//! 只负责"点开一个链接"能力：先直接点击，失败后改用脚本点击

use tracing::{debug, warn};

use crate::error::BrowserError;
use crate::infrastructure::SessionDriver;

/// 实际生效的点击方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickMethod {
    /// 模拟鼠标点击
    Direct,
    /// 脚本 `element.click()`
    Programmatic,
}

/// 按顺序尝试两种点击方式
///
/// 两种方式都失败时返回 `BrowserError::ClickRejected`，包含两次失败的原因。
pub async fn click_with_fallback<D: SessionDriver>(
    driver: &D,
    element: &D::Element,
    label: &str,
) -> Result<ClickMethod, BrowserError> {
    let direct = match driver.click(element).await {
        Ok(()) => {
            debug!("直接点击成功: {}", label);
            return Ok(ClickMethod::Direct);
        }
        Err(e) => e,
    };

    warn!("直接点击 '{}' 失败 ({})，改用脚本点击", label, direct);

    match driver.programmatic_click(element).await {
        Ok(()) => Ok(ClickMethod::Programmatic),
        Err(fallback) => Err(BrowserError::ClickRejected {
            direct: direct.to_string(),
            fallback: fallback.to_string(),
        }),
    }
}
