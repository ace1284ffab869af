//! 结果写入服务 - 业务能力层
//!
//! 只负责"把结果集写成 JSON 文件"能力，不关心流程

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::FileError;
use crate::models::ResultSet;

/// 结果写入服务
///
/// 输出为 UTF-8 JSON 数组，两空格缩进，非 ASCII 字符原样保留。
pub struct ResultWriter {
    output_path: PathBuf,
}

impl ResultWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 将整个结果集写入文件（覆盖旧文件），返回写入的记录数
    pub async fn write(&self, results: &ResultSet) -> Result<usize, FileError> {
        let json = to_json(results)?;
        debug!("写入 {} 字节到 {}", json.len(), self.output_path.display());

        tokio::fs::write(&self.output_path, json)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: self.output_path.display().to_string(),
                source,
            })?;

        info!(
            "💾 已保存 {} 条主题数据到 {}",
            results.len(),
            self.output_path.display()
        );
        Ok(results.len())
    }
}

/// 序列化结果集
pub fn to_json(results: &ResultSet) -> Result<String, FileError> {
    Ok(serde_json::to_string_pretty(results)?)
}
