pub mod topic;

pub use topic::{normalize_replies, ResultSet, TopicRecord};
