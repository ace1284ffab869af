//! 单个列表页处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **加载列表页**：导航并等待主题容器（超时即中止整次运行）
//! 2. **主题快照**：记录本页主题数量
//! 3. **遍历主题**：委托 `TopicFlow` 处理，收集记录
//! 4. **恢复列表页**：每个主题之后无条件回到列表页

use tracing::{error, info};

use crate::error::AppResult;
use crate::infrastructure::SessionDriver;
use crate::orchestrator::run_context::RunContext;
use crate::services::{listing_url, ListingNavigator};
use crate::utils::logging::{log_page_complete, log_page_start};
use crate::workflow::{TopicCtx, TopicFlow, TopicOutcome};

/// 处理一个列表页
///
/// 单个主题的失败不会向上传播；列表页加载或恢复失败则返回错误。
pub async fn process_page<D: SessionDriver>(
    ctx: &mut RunContext<D>,
    page_number: u32,
) -> AppResult<()> {
    ctx.page_cursor = page_number;
    let url = listing_url(&ctx.config.base_url, page_number);
    log_page_start(page_number, ctx.config.max_page, &url);

    let navigator = ListingNavigator::new(&ctx.config);
    let topic_flow = TopicFlow::new(&ctx.config);

    navigator.load_listing(&ctx.driver, &url).await?;
    ctx.stats.pages_visited += 1;

    let snapshot = navigator
        .discover_topics(&ctx.driver, page_number, &url)
        .await?;
    info!(
        "在第 {} 页找到 {} 个主题",
        snapshot.page_number, snapshot.topic_count
    );

    let mut saved_on_page = 0;

    // ========== 遍历快照中的主题 ==========
    for topic_index in 0..snapshot.topic_count {
        let topic_ctx = TopicCtx::new(
            page_number,
            topic_index,
            snapshot.topic_count,
            snapshot.url.clone(),
        );
        ctx.stats.topics_seen += 1;

        match topic_flow.run(&ctx.driver, &topic_ctx).await {
            TopicOutcome::Success(record) => {
                ctx.results.push(record);
                ctx.stats.saved += 1;
                saved_on_page += 1;
            }
            TopicOutcome::EmptySkip { .. } => {
                ctx.stats.empty_skipped += 1;
            }
            TopicOutcome::Failure { title, reason } => {
                error!(
                    "{} ❌ 处理主题 '{}' 失败: {}",
                    topic_ctx,
                    title.as_deref().unwrap_or("unknown"),
                    reason
                );
                ctx.stats.failed += 1;
            }
        }

        // 无论成功与否都回到列表页
        navigator.recover(&ctx.driver, &snapshot.url).await?;
    }

    log_page_complete(page_number, saved_on_page, snapshot.topic_count);
    Ok(())
}
