//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志输出
///
/// 默认级别为 info，可通过 `RUST_LOG` 覆盖。重复调用不会出错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 论坛抓取 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 列表页: {}", config.base_url);
    info!("📊 页数: 1-{}", config.max_page);
    info!("📁 输出文件: {}", config.output_file);
    info!("{}", "=".repeat(60));
}

/// 记录列表页开始信息
pub fn log_page_start(page_number: u32, max_page: u32, url: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 正在抓取第 {}/{} 页", page_number, max_page);
    info!("URL: {}", url);
    info!("{}", "=".repeat(60));
}

/// 记录列表页完成信息
pub fn log_page_complete(page_number: u32, saved: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 页完成: 保存 {}/{}", page_number, saved, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(
    pages_visited: u32,
    topics_seen: usize,
    saved: usize,
    empty_skipped: usize,
    failed: usize,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📄 页数: {}", pages_visited);
    info!("✅ 保存: {}/{}", saved, topics_seen);
    info!("⏭️ 无回复跳过: {}", empty_skipped);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
