//! 节点模型：展示树的基本单元与持久化类型编码

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 节点值类型
///
/// 持久化为固定整数编码（string=0 … null=5），编码表已冻结，
/// 改动会破坏旧文档文件的兼容性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum JsonValueType {
    String,
    Number,
    Bool,
    Object,
    Array,
    Null,
}

impl From<JsonValueType> for u8 {
    fn from(kind: JsonValueType) -> u8 {
        match kind {
            JsonValueType::String => 0,
            JsonValueType::Number => 1,
            JsonValueType::Bool => 2,
            JsonValueType::Object => 3,
            JsonValueType::Array => 4,
            JsonValueType::Null => 5,
        }
    }
}

impl TryFrom<u8> for JsonValueType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => JsonValueType::String,
            1 => JsonValueType::Number,
            2 => JsonValueType::Bool,
            3 => JsonValueType::Object,
            4 => JsonValueType::Array,
            5 => JsonValueType::Null,
            other => return Err(format!("无效的类型编码: {}", other)),
        })
    }
}

/// 展示树节点
///
/// 不变式：叶子节点当且仅当 `children` 缺失；容器节点的 `value` 恒为空串。
/// `id` 只作UI列表标识，语义相等性（`PartialEq`）不比较它
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: JsonValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
    #[serde(default)]
    pub comments: String,
}

impl Node {
    /// 新建节点并分配进程内唯一标识
    pub fn new(
        key: impl Into<String>,
        value: impl Into<String>,
        kind: JsonValueType,
        children: Option<Vec<Node>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            value: value.into(),
            kind,
            children,
            comments: String::new(),
        }
    }

    /// 叶子节点：children 缺失
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.value == other.value
            && self.kind == other.kind
            && self.children == other.children
            && self.comments == other.comments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes_frozen() {
        assert_eq!(serde_json::to_string(&JsonValueType::String).unwrap(), "0");
        assert_eq!(serde_json::to_string(&JsonValueType::Number).unwrap(), "1");
        assert_eq!(serde_json::to_string(&JsonValueType::Bool).unwrap(), "2");
        assert_eq!(serde_json::to_string(&JsonValueType::Object).unwrap(), "3");
        assert_eq!(serde_json::to_string(&JsonValueType::Array).unwrap(), "4");
        assert_eq!(serde_json::to_string(&JsonValueType::Null).unwrap(), "5");
    }

    #[test]
    fn test_type_code_decode() {
        let kind: JsonValueType = serde_json::from_str("3").expect("编码3应该解码为Object");
        assert_eq!(kind, JsonValueType::Object);

        let result: Result<JsonValueType, _> = serde_json::from_str("6");
        assert!(result.is_err(), "超出范围的编码应该被拒绝");
    }

    #[test]
    fn test_leaf_and_container() {
        let leaf = Node::new("age", "30", JsonValueType::Number, None);
        assert!(leaf.is_leaf());

        let empty_container = Node::new("obj", "", JsonValueType::Object, Some(vec![]));
        assert!(!empty_container.is_leaf(), "空容器与叶子必须可区分");
        assert_eq!(empty_container.value, "");
    }

    #[test]
    fn test_equality_ignores_id() {
        let a = Node::new("name", "测试", JsonValueType::String, None);
        let b = Node::new("name", "测试", JsonValueType::String, None);
        assert_ne!(a.id, b.id);
        assert_eq!(a, b, "语义相等性不应该比较id");
    }

    #[test]
    fn test_node_serde_round_trip() {
        let mut child = Node::new("city", "北京", JsonValueType::String, None);
        child.comments = "首都".to_string();
        let root = Node::new("root", "", JsonValueType::Object, Some(vec![child]));

        let json = serde_json::to_string(&root).unwrap();
        let decoded: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(root, decoded);
        // 持久化会带回原有id
        assert_eq!(root.id, decoded.id);
    }

    #[test]
    fn test_leaf_serialization_omits_children() {
        let leaf = Node::new("age", "30", JsonValueType::Number, None);
        let json = serde_json::to_string(&leaf).unwrap();
        assert!(!json.contains("children"), "叶子节点不应该序列化children字段");
        assert!(json.contains("\"type\":1"));
    }
}
