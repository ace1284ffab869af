//! # Forum Scrape
//!
//! 驱动无头浏览器逐页抓取 bbPress 论坛主题（正文 + 回复）并写出 JSON 文件
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（浏览器会话），只暴露能力
//! - `SessionDriver` - 导航 / 查找 / 点击 / 等待原语
//! - `ChromiumDriver` - 基于 chromiumoxide 的实现
//!
//! ### ② 业务能力层（Services）
//! - `ListingNavigator` - 打开列表页、统计主题、回到列表页
//! - `click_with_fallback` - 直接点击，失败后脚本点击
//! - `ResultWriter` - 写出 JSON
//!
//! ### ③ 流程层（Workflow）
//! - `TopicCtx` - 上下文封装（页码 + 主题序号）
//! - `TopicFlow` - 单个主题的处理流程，结果为 `TopicOutcome`
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/forum_runner` - 会话生命周期、翻页、写出结果
//! - `orchestrator/page_processor` - 单个列表页，遍历主题

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, BrowserError};
pub use infrastructure::{ChromiumDriver, SessionDriver};
pub use models::{ResultSet, TopicRecord};
pub use orchestrator::{run_crawl, App, CrawlStats, CrawlSummary};
pub use workflow::{TopicCtx, TopicFlow, TopicOutcome};
