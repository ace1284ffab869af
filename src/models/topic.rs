use serde::{Deserialize, Serialize};

/// 一个主题的抓取结果
///
/// `content` 是主题页上第一条非空回复，`comments` 是其后所有非空回复（保持页面顺序）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub title: String,
    pub content: String,
    pub comments: Vec<String>,
}

impl TopicRecord {
    /// 由已清洗的回复列表构建记录
    ///
    /// 回复为空时返回 `None`，此类主题不产生记录。
    pub fn from_replies(title: impl Into<String>, replies: Vec<String>) -> Option<Self> {
        let mut replies = replies.into_iter();
        let content = replies.next()?;
        Some(Self {
            title: title.into(),
            content,
            comments: replies.collect(),
        })
    }
}

/// 清洗回复文本：去除首尾空白并丢弃空回复
pub fn normalize_replies<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .map(|text| text.as_ref().trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// 整次运行的结果集，只追加
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    records: Vec<TopicRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: TopicRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[TopicRecord] {
        &self.records
    }
}
