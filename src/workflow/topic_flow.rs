//! 主题处理流程 - 流程层
//!
//! 核心职责：定义"一个主题"的完整处理流程
//!
//! 流程顺序：
//! 1. 在列表页重新定位主题行 → 读取标题与链接
//! 2. 滚动到可见 → 点击（失败则脚本点击）
//! 3. 等待回复出现 → 读取、清洗回复
//! 4. 生成记录（或跳过）
//!
//! 回到列表页不属于本流程，由编排层在每个主题之后无条件执行。

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::BrowserError;
use crate::infrastructure::SessionDriver;
use crate::models::{normalize_replies, TopicRecord};
use crate::services::{click_with_fallback, ClickMethod};
use crate::utils::logging::truncate_text;
use crate::workflow::topic_ctx::TopicCtx;

/// 主题处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    /// 成功生成记录
    Success(TopicRecord),
    /// 主题没有任何非空回复，正常跳过
    EmptySkip { title: String },
    /// 打开或读取主题失败
    Failure {
        title: Option<String>,
        reason: String,
    },
}

/// 进入主题页之前或之后的失败
struct FlowError {
    title: Option<String>,
    source: BrowserError,
}

/// 主题处理流程
///
/// - 编排单个主题的处理步骤
/// - 不持有任何资源（driver 由调用方传入）
/// - 从不返回错误：所有失败都折叠成 `TopicOutcome::Failure`
pub struct TopicFlow {
    topic_row_selector: String,
    topic_link_selector: String,
    reply_content_selector: String,
    wait_timeout: Duration,
    settle_delay: Duration,
    verbose_logging: bool,
}

impl TopicFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            topic_row_selector: config.topic_row_selector.clone(),
            topic_link_selector: config.topic_link_selector.clone(),
            reply_content_selector: config.reply_content_selector.clone(),
            wait_timeout: config.wait_timeout(),
            settle_delay: config.settle_delay(),
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run<D: SessionDriver>(&self, driver: &D, ctx: &TopicCtx) -> TopicOutcome {
        match self.extract(driver, ctx).await {
            Ok(outcome) => outcome,
            Err(FlowError { title, source }) => TopicOutcome::Failure {
                title,
                reason: source.to_string(),
            },
        }
    }

    async fn extract<D: SessionDriver>(
        &self,
        driver: &D,
        ctx: &TopicCtx,
    ) -> Result<TopicOutcome, FlowError> {
        let untitled = |source| FlowError {
            title: None,
            source,
        };

        // ========== 1. 重新定位主题行，读取标题与链接 ==========
        let rows = driver
            .find_elements(&self.topic_row_selector)
            .await
            .map_err(untitled)?;
        let row = rows.into_iter().nth(ctx.topic_index).ok_or_else(|| {
            untitled(BrowserError::ElementNotFound {
                selector: format!("{} (第 {} 个)", self.topic_row_selector, ctx.topic_index + 1),
            })
        })?;
        let link = driver
            .find_within(&row, &self.topic_link_selector)
            .await
            .map_err(untitled)?;
        let title = driver.text_of(&link).await.map_err(untitled)?.trim().to_string();

        info!("{} {}", ctx, "─".repeat(30));
        info!("{} 📄 正在处理主题: {}", ctx, title);

        let titled = |source| FlowError {
            title: Some(title.clone()),
            source,
        };

        // ========== 2. 打开主题 ==========
        if let Err(e) = driver.scroll_into_view(&link).await {
            debug!("{} 滚动失败，继续点击: {}", ctx, e);
        }
        let method = click_with_fallback(driver, &link, &title)
            .await
            .map_err(titled)?;
        if method == ClickMethod::Programmatic {
            info!("{} 已通过脚本点击打开主题", ctx);
        }

        // ========== 3. 等待并读取回复 ==========
        driver
            .wait_for_presence(&self.reply_content_selector, self.wait_timeout)
            .await
            .map_err(titled)?;
        if !self.settle_delay.is_zero() {
            sleep(self.settle_delay).await;
        }

        let reply_elements = driver
            .find_elements(&self.reply_content_selector)
            .await
            .map_err(titled)?;
        let mut raw = Vec::with_capacity(reply_elements.len());
        for element in &reply_elements {
            raw.push(driver.text_of(element).await.map_err(titled)?);
        }
        let replies = normalize_replies(raw);

        // ========== 4. 生成记录 ==========
        match TopicRecord::from_replies(title.clone(), replies) {
            Some(record) => {
                self.log_record(ctx, &record);
                Ok(TopicOutcome::Success(record))
            }
            None => {
                warn!("{} ⚠️ 主题 '{}' 没有回复内容，跳过", ctx, title);
                Ok(TopicOutcome::EmptySkip { title })
            }
        }
    }

    // ========== 日志辅助方法 ==========

    fn log_record(&self, ctx: &TopicCtx, record: &TopicRecord) {
        if self.verbose_logging {
            info!("{} 正文:\n{}", ctx, record.content);
            for comment in &record.comments {
                info!("{} 评论:\n{}", ctx, comment);
            }
        } else {
            info!("{} 正文: {}", ctx, truncate_text(&record.content, 80));
        }
        info!(
            "{} ✓ 主题已保存，评论 {} 条",
            ctx,
            record.comments.len()
        );
    }
}
