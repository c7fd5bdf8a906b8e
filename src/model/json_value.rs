//! JSON值模型：封闭的标签变体类型与解码适配器
//!
//! 底层语法解析交给 serde_json，这里只做两件事：
//! 数字按整数/浮点分流，根节点必须是对象

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::model::data_core::AppError;

/// 解码后的JSON动态值（封闭变体，构树时穷尽匹配）
///
/// 能放进 `i64` 的数字解码为 `Integer`，其余数字一律为 `Float`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(BTreeMap<String, JsonValue>),
}

impl JsonValue {
    /// 排序用的形状分组：标量0，数组1，对象2
    pub fn shape_class(&self) -> u8 {
        match self {
            JsonValue::Null
            | JsonValue::Bool(_)
            | JsonValue::Integer(_)
            | JsonValue::Float(_)
            | JsonValue::String(_) => 0,
            JsonValue::Array(_) => 1,
            JsonValue::Object(_) => 2,
        }
    }

    /// 标量的规范字符串表示；容器返回空串
    pub fn display_string(&self) -> String {
        match self {
            JsonValue::Null => "null".to_string(),
            JsonValue::Bool(b) => b.to_string(),
            JsonValue::Integer(i) => i.to_string(),
            JsonValue::Float(f) => format_float(*f),
            JsonValue::String(s) => s.clone(),
            JsonValue::Array(_) | JsonValue::Object(_) => String::new(),
        }
    }

    /// 类型名（日志与渲染用）
    pub fn kind_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Integer(_) => "integer",
            JsonValue::Float(_) => "float",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

/// 浮点的规范格式：整值浮点保留 ".0"，其余走最短往返表示
fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// 解码适配器：接受根为对象的UTF-8 JSON文本
///
/// 语法错误与非对象根统一折叠为 `InvalidInput`，细节只进日志
pub fn decode_object(text: &str) -> Result<BTreeMap<String, JsonValue>, AppError> {
    let value: JsonValue = serde_json::from_str(text).map_err(|e| {
        tracing::warn!("JSON解析失败: {}", e);
        AppError::InvalidInput
    })?;
    match value {
        JsonValue::Object(map) => Ok(map),
        other => {
            tracing::warn!("根节点不是对象，实际类型: {}", other.kind_name());
            Err(AppError::InvalidInput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object_root() {
        let map = decode_object(r#"{"name": "测试", "age": 30}"#).expect("对象根应该解码成功");
        assert_eq!(map.len(), 2);
        assert_eq!(map["name"], JsonValue::String("测试".to_string()));
        assert_eq!(map["age"], JsonValue::Integer(30));
    }

    #[test]
    fn test_decode_rejects_array_root() {
        let result = decode_object("[1, 2, 3]");
        assert!(matches!(result, Err(AppError::InvalidInput)), "数组根应该被拒绝");
    }

    #[test]
    fn test_decode_rejects_scalar_root() {
        assert!(matches!(decode_object("42"), Err(AppError::InvalidInput)));
        assert!(matches!(decode_object("\"文本\""), Err(AppError::InvalidInput)));
        assert!(matches!(decode_object("null"), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_decode_rejects_invalid_syntax() {
        assert!(matches!(decode_object("not json"), Err(AppError::InvalidInput)));
        assert!(matches!(decode_object(r#"{"open": "#), Err(AppError::InvalidInput)));
        assert!(matches!(decode_object(""), Err(AppError::InvalidInput)));
    }

    #[test]
    fn test_integer_float_split() {
        let map = decode_object(r#"{"i": 42, "neg": -7, "f": 1.5, "e": 1e3}"#).unwrap();
        assert_eq!(map["i"], JsonValue::Integer(42));
        assert_eq!(map["neg"], JsonValue::Integer(-7));
        assert_eq!(map["f"], JsonValue::Float(1.5));
        assert_eq!(map["e"], JsonValue::Float(1000.0));
    }

    #[test]
    fn test_nested_values() {
        let map = decode_object(r#"{"user": {"tags": ["a", null, true]}}"#).unwrap();
        let JsonValue::Object(user) = &map["user"] else {
            panic!("user应该是对象");
        };
        let JsonValue::Array(tags) = &user["tags"] else {
            panic!("tags应该是数组");
        };
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[1], JsonValue::Null);
    }

    #[test]
    fn test_display_string_vectors() {
        assert_eq!(JsonValue::Integer(1).display_string(), "1");
        assert_eq!(JsonValue::Float(1.0).display_string(), "1.0");
        assert_eq!(JsonValue::Float(1.5).display_string(), "1.5");
        assert_eq!(JsonValue::Float(-0.25).display_string(), "-0.25");
        assert_eq!(JsonValue::Float(1000.0).display_string(), "1000.0");
        assert_eq!(JsonValue::Bool(true).display_string(), "true");
        assert_eq!(JsonValue::Null.display_string(), "null");
        assert_eq!(JsonValue::String("原样".into()).display_string(), "原样");
        assert_eq!(JsonValue::Array(vec![]).display_string(), "");
    }

    #[test]
    fn test_shape_class_grouping() {
        assert_eq!(JsonValue::Null.shape_class(), 0);
        assert_eq!(JsonValue::Integer(1).shape_class(), 0);
        assert_eq!(JsonValue::Array(vec![]).shape_class(), 1);
        assert_eq!(JsonValue::Object(BTreeMap::new()).shape_class(), 2);
    }
}
