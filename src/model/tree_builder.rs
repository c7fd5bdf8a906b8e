//! 树构建器：把解码后的JSON对象转换为有序展示树
//!
//! 排序是这里唯一非平凡的算法：同级键先按形状分组（标量→数组→对象），
//! 组内按键名字节序排列，与输入声明顺序和locale无关

use std::collections::BTreeMap;

use crate::model::data_core::AppError;
use crate::model::json_value::{decode_object, JsonValue};
use crate::model::node::{JsonValueType, Node};

/// 核心入口：UTF-8文本 → 根节点（key固定为"root"）
///
/// 失败时不产生任何部分结果，调用方保留原有状态
pub fn build_tree(text: &str) -> Result<Node, AppError> {
    let map = decode_object(text)?;
    Ok(Node::new(
        "root",
        "",
        JsonValueType::Object,
        Some(build_nodes(&map, "")),
    ))
}

/// 递归构建：对象的键值对 → 有序节点序列
///
/// `key_prefix` 为空或以 "." 结尾，只参与数组元素标签，不改变对象字段的裸键名
fn build_nodes(map: &BTreeMap<String, JsonValue>, key_prefix: &str) -> Vec<Node> {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort_by(|a, b| {
        map[*a]
            .shape_class()
            .cmp(&map[*b].shape_class())
            .then_with(|| a.cmp(b))
    });

    let mut nodes = Vec::with_capacity(keys.len());
    for key in keys {
        let value = &map[key];
        let key_with_prefix = format!("{}{}", key_prefix, key);
        let node = match value {
            JsonValue::Object(fields) => Node::new(
                key.clone(),
                "",
                JsonValueType::Object,
                Some(build_nodes(fields, &format!("{}.", key_with_prefix))),
            ),
            JsonValue::Array(items) => Node::new(
                key.clone(),
                "",
                JsonValueType::Array,
                Some(build_array_items(items, &key_with_prefix)),
            ),
            JsonValue::String(s) => Node::new(key.clone(), s.clone(), JsonValueType::String, None),
            JsonValue::Integer(_) | JsonValue::Float(_) => Node::new(
                key.clone(),
                value.display_string(),
                JsonValueType::Number,
                None,
            ),
            JsonValue::Bool(b) => Node::new(key.clone(), b.to_string(), JsonValueType::Bool, None),
            JsonValue::Null => Node::new(key.clone(), "null", JsonValueType::Null, None),
        };
        nodes.push(node);
    }
    nodes
}

/// 数组元素展开
///
/// 对象元素按 `前缀[索引]` 分组并铺平一层字段，其余元素成为同样标签的叶子
fn build_array_items(items: &[JsonValue], key_with_prefix: &str) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_label = format!("{}[{}]", key_with_prefix, index);
        let node = match item {
            JsonValue::Object(fields) => Node::new(
                item_label.clone(),
                "",
                JsonValueType::Array,
                Some(build_nodes(fields, &format!("{}.", item_label))),
            ),
            other => Node::new(item_label, other.display_string(), JsonValueType::Array, None),
        };
        nodes.push(node);
    }
    nodes
}
