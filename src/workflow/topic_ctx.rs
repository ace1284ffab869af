//! 主题处理上下文
//!
//! 封装"我正在处理第几页的第几个主题"这一信息

use std::fmt::Display;

/// 主题处理上下文
#[derive(Debug, Clone)]
pub struct TopicCtx {
    /// 列表页页码（从1开始）
    pub page_number: u32,

    /// 主题在列表页中的位置（从0开始）
    pub topic_index: usize,

    /// 本页主题总数（仅用于日志显示）
    pub topic_count: usize,

    /// 所在列表页的 URL
    pub listing_url: String,
}

impl TopicCtx {
    pub fn new(page_number: u32, topic_index: usize, topic_count: usize, listing_url: String) -> Self {
        Self {
            page_number,
            topic_index,
            topic_count,
            listing_url,
        }
    }
}

impl Display for TopicCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[页 {} 主题 {}/{}]",
            self.page_number,
            self.topic_index + 1,
            self.topic_count
        )
    }
}
