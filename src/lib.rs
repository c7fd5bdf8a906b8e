//! JSON批注查看工具库
//!
//! 提供JSON文本解析、有序展示树构建、节点批注与文档持久化
//! 核心转换与UI无关，任何前端可以直接复用

pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::data_core::{AppError, AppState};
pub use model::document::{Document, DOCUMENT_VERSION};
pub use model::json_value::JsonValue;
pub use model::node::{JsonValueType, Node};
pub use model::tree_builder::build_tree;
pub use model::view_state::ExpansionState;
