//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `forum_runner` - 抓取运行器
//! - 打开并关闭浏览器会话
//! - 按顺序翻页
//! - 写出结果、输出统计
//!
//! ### `page_processor` - 单个列表页处理器
//! - 加载列表页、统计主题
//! - 逐个主题调用 `TopicFlow`
//! - 每个主题后回到列表页
//!
//! ## 层次关系
//!
//! ```text
//! forum_runner (处理 1..=max_page)
//!     ↓
//! page_processor (处理一页上的主题)
//!     ↓
//! workflow::TopicFlow (处理单个主题)
//!     ↓
//! services (能力层：列表页导航 / 点击 / 写文件)
//!     ↓
//! infrastructure (基础设施：SessionDriver)
//! ```

pub mod forum_runner;
pub mod page_processor;
pub mod run_context;

pub use forum_runner::{run_crawl, App, CrawlSummary};
pub use page_processor::process_page;
pub use run_context::{CrawlStats, RunContext};
