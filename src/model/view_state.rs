//! 视图状态：展开/折叠的瞬态记录，与持久化数据模型分离
//!
//! "全部展开/全部折叠"不走全局广播：容器持有本结构并显式下传给子视图

use std::collections::HashSet;

use uuid::Uuid;

use crate::model::node::Node;

/// 展开状态，按节点id记录；从不序列化
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashSet<Uuid>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 展开整棵树：记录每个容器节点
    pub fn expand_all(&mut self, root: &Node) {
        self.expanded.clear();
        self.mark_containers(root);
    }

    fn mark_containers(&mut self, node: &Node) {
        if let Some(children) = &node.children {
            self.expanded.insert(node.id);
            for child in children {
                self.mark_containers(child);
            }
        }
    }

    /// 全部折叠
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// 切换单个节点的展开状态
    pub fn toggle(&mut self, id: Uuid) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: Uuid) -> bool {
        self.expanded.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tree_builder::build_tree;

    #[test]
    fn test_default_collapsed() {
        let root = build_tree(r#"{"obj": {"a": 1}}"#).unwrap();
        let state = ExpansionState::new();
        assert!(!state.is_expanded(root.id), "默认全部折叠");
    }

    #[test]
    fn test_expand_all_marks_containers_only() {
        let root = build_tree(r#"{"a": 1, "arr": [2], "obj": {"b": 3}}"#).unwrap();
        let mut state = ExpansionState::new();
        state.expand_all(&root);

        assert!(state.is_expanded(root.id));
        for child in root.children.as_ref().unwrap() {
            if child.is_leaf() {
                assert!(!state.is_expanded(child.id), "叶子不参与展开记录");
            } else {
                assert!(state.is_expanded(child.id));
            }
        }
    }

    #[test]
    fn test_collapse_all_and_toggle() {
        let root = build_tree(r#"{"obj": {"a": 1}}"#).unwrap();
        let mut state = ExpansionState::new();
        state.expand_all(&root);
        state.collapse_all();
        assert!(!state.is_expanded(root.id));

        state.toggle(root.id);
        assert!(state.is_expanded(root.id));
        state.toggle(root.id);
        assert!(!state.is_expanded(root.id));
    }
}
