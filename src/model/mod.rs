pub mod data_core;
pub mod document;
pub mod json_value;
pub mod node;
pub mod tree_builder;
pub mod view_state;
