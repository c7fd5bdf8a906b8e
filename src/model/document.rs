//! 文档模型：持久化单元（根节点 + 元数据），整体一次性往返磁盘

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::node::Node;

/// 文档格式版本，预留给后续迁移
pub const DOCUMENT_VERSION: u32 = 1;

/// 持久化文档
///
/// `node` 在首次成功解析之前缺失；时间戳以RFC 3339写盘
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Node>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub comments: String,
}

impl Document {
    /// 新建空文档：version=1，两个时间戳取当前时刻
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            node: None,
            version: DOCUMENT_VERSION,
            created_at: now,
            modified_at: now,
            comments: String::new(),
        }
    }

    /// 刷新修改时间
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
