//! 运行上下文
//!
//! 一次运行中唯一的可变状态：会话驱动、结果集、页码游标和统计

use crate::config::Config;
use crate::infrastructure::SessionDriver;
use crate::models::ResultSet;

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub pages_visited: u32,
    pub topics_seen: usize,
    pub saved: usize,
    pub empty_skipped: usize,
    pub failed: usize,
}

/// 运行上下文
///
/// 独占会话驱动与结果集，按引用传给各个阶段。
pub struct RunContext<D: SessionDriver> {
    pub driver: D,
    pub config: Config,
    pub results: ResultSet,
    /// 当前列表页页码，尚未开始时为 0
    pub page_cursor: u32,
    pub stats: CrawlStats,
}

impl<D: SessionDriver> RunContext<D> {
    pub fn new(driver: D, config: Config) -> Self {
        Self {
            driver,
            config,
            results: ResultSet::new(),
            page_cursor: 0,
            stats: CrawlStats::default(),
        }
    }
}
