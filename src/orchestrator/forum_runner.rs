//! 论坛抓取运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次抓取运行的资源管理。
//!
//! 1. **应用初始化**：打开浏览器会话（失败直接返回，不写输出）
//! 2. **翻页**：按顺序处理第 1..=max_page 页
//! 3. **资源释放**：无论成功或失败，会话都只关闭一次
//! 4. **写出结果**：全部页面完成后一次性写出 JSON
//! 5. **全局统计**：输出运行统计

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ChromiumDriver, SessionDriver};
use crate::orchestrator::page_processor;
use crate::orchestrator::run_context::{CrawlStats, RunContext};
use crate::services::ResultWriter;
use crate::utils::logging::{log_startup, print_final_stats};

/// 一次完整运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub stats: CrawlStats,
    pub output_path: PathBuf,
}

/// 应用主结构
pub struct App {
    config: Config,
    driver: ChromiumDriver,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let driver = browser::open_session(&config)
            .await
            .context("无法打开浏览器会话")?;

        Ok(Self { config, driver })
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> Result<CrawlSummary> {
        let summary = run_crawl(self.driver, self.config).await?;
        Ok(summary)
    }
}

/// 使用给定的会话驱动完成一次抓取
///
/// 会话在返回前关闭。翻页过程中出现致命错误时默认不写输出；
/// 若开启 `save_partial_on_abort`，先写出已收集的数据再返回错误。
pub async fn run_crawl<D: SessionDriver>(driver: D, config: Config) -> AppResult<CrawlSummary> {
    let mut ctx = RunContext::new(driver, config);

    let crawl_result = crawl_pages(&mut ctx).await;

    let RunContext {
        driver,
        config,
        results,
        stats,
        page_cursor,
    } = ctx;

    if let Err(e) = driver.shutdown().await {
        warn!("⚠️ 关闭浏览器会话时出错: {}", e);
    }

    let writer = ResultWriter::new(&config.output_file);

    if let Err(e) = crawl_result {
        error!("❌ 抓取在第 {} 页中止: {}", page_cursor, e);
        if config.save_partial_on_abort {
            warn!("⚠️ 保存中止前已收集的 {} 条数据", results.len());
            writer.write(&results).await?;
        }
        return Err(e);
    }

    writer.write(&results).await?;

    print_final_stats(
        stats.pages_visited,
        stats.topics_seen,
        stats.saved,
        stats.empty_skipped,
        stats.failed,
    );

    Ok(CrawlSummary {
        stats,
        output_path: writer.output_path().to_path_buf(),
    })
}

async fn crawl_pages<D: SessionDriver>(ctx: &mut RunContext<D>) -> AppResult<()> {
    for page_number in 1..=ctx.config.max_page {
        page_processor::process_page(ctx, page_number).await?;
    }
    Ok(())
}
