//! AppState：应用核心状态，文档读写与节点批注

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::document::Document;
use crate::model::node::Node;
use crate::model::tree_builder::build_tree;
use crate::utils::fs::{read_document_file, write_document_file};

/// 应用核心状态：当前文档与其磁盘来源
#[derive(Debug, Default)]
pub struct AppState {
    pub document: Document,
    pub source_path: Option<PathBuf>,
}

/// 领域错误
///
/// 解析域只有一种失败：编码错误、语法错误、非对象根统一为 `InvalidInput`，
/// 诊断细节只进日志，不暴露给调用方
#[derive(Error, Debug)]
pub enum AppError {
    #[error("输入不是有效的JSON对象文本")]
    InvalidInput,
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("文档文件已损坏")]
    Corrupt,
    #[error("状态错误: {0}")]
    State(String),
}

impl AppState {
    /// 解析文本并重建展示树
    ///
    /// 失败时现有文档原样保留；成功时结构路径未变的节点批注会被带到新树上
    pub fn visualize(&mut self, text: &str) -> Result<(), AppError> {
        let mut root = build_tree(text)?;
        if let Some(previous) = &self.document.node {
            carry_over_comments(previous, &mut root);
        }
        self.document.node = Some(root);
        self.document.touch();
        tracing::info!("展示树重建完成");
        Ok(())
    }

    /// 读取文档文件并记住来源路径；损坏的文件整体读取失败
    pub fn load_document(&mut self, p: &Path) -> Result<(), AppError> {
        self.document = read_document_file(p)?;
        self.source_path = Some(p.to_path_buf());
        Ok(())
    }

    /// 将当前文档保存到指定路径
    pub fn save_document(&mut self, p: &Path) -> Result<(), AppError> {
        self.document.touch();
        write_document_file(p, &self.document)?;
        tracing::info!("文档已保存到: {}", p.display());
        Ok(())
    }

    /// 保存到最初打开的文档路径
    pub fn save_to_source_file(&mut self) -> Result<(), AppError> {
        let p = self
            .source_path
            .clone()
            .ok_or_else(|| AppError::State("文档来源路径未设置".into()))?;
        self.save_document(&p)
    }

    /// 按键路径写节点批注（树结构之外唯一允许就地修改的字段）
    ///
    /// 路径形如 `user.name` 或 `items[0].a`
    pub fn set_node_comment(&mut self, path: &str, text: &str) -> Result<(), AppError> {
        let root = self
            .document
            .node
            .as_mut()
            .ok_or_else(|| AppError::State("尚未构建展示树".into()))?;
        let node = node_at_path_mut(root, path)
            .ok_or_else(|| AppError::State(format!("路径未命中节点: {}", path)))?;
        node.comments = text.to_string();
        self.document.touch();
        Ok(())
    }

    /// 按键路径读节点批注
    pub fn node_comment(&self, path: &str) -> Result<&str, AppError> {
        let root = self
            .document
            .node
            .as_ref()
            .ok_or_else(|| AppError::State("尚未构建展示树".into()))?;
        let node = node_at_path(root, path)
            .ok_or_else(|| AppError::State(format!("路径未命中节点: {}", path)))?;
        Ok(&node.comments)
    }

    /// 写文档级批注
    pub fn set_document_comments(&mut self, text: &str) {
        self.document.comments = text.to_string();
        self.document.touch();
    }
}

/// 把 `user.items[0].a` 切成导航段：`user` / `items` / `[0]` / `a`
///
/// '.' 只在中括号外分段，索引段单独成段
fn split_path_segments(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut in_brackets = false;
    for ch in path.chars() {
        match ch {
            '.' if !in_brackets => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                in_brackets = true;
                current.push('[');
            }
            ']' => {
                current.push(']');
                in_brackets = false;
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn parse_index_segment(segment: &str) -> Option<usize> {
    segment.strip_prefix('[')?.strip_suffix(']')?.parse().ok()
}

/// 逐段下钻：键名段匹配子节点键，索引段按子节点序号
fn node_at_path<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let mut node = root;
    for segment in split_path_segments(path) {
        let children = node.children.as_ref()?;
        node = match parse_index_segment(&segment) {
            Some(index) => children.get(index)?,
            None => children.iter().find(|c| c.key == segment)?,
        };
    }
    Some(node)
}

fn node_at_path_mut<'a>(root: &'a mut Node, path: &str) -> Option<&'a mut Node> {
    let mut node = root;
    for segment in split_path_segments(path) {
        let children = node.children.as_mut()?;
        node = match parse_index_segment(&segment) {
            Some(index) => children.get_mut(index)?,
            None => children.iter_mut().find(|c| c.key == segment)?,
        };
    }
    Some(node)
}

/// 结构路径未变的节点在重建后保留原有批注
///
/// 以键链（"/"分隔）为标识，与id无关：重建总是分配新id
fn carry_over_comments(previous: &Node, rebuilt: &mut Node) {
    let mut saved = HashMap::new();
    collect_comments(previous, "", &mut saved);
    if !saved.is_empty() {
        apply_comments(rebuilt, "", &saved);
    }
}

fn structural_path(prefix: &str, node: &Node) -> String {
    if prefix.is_empty() {
        node.key.clone()
    } else {
        format!("{}/{}", prefix, node.key)
    }
}

fn collect_comments(node: &Node, prefix: &str, saved: &mut HashMap<String, String>) {
    let path = structural_path(prefix, node);
    if !node.comments.is_empty() {
        saved.insert(path.clone(), node.comments.clone());
    }
    if let Some(children) = &node.children {
        for child in children {
            collect_comments(child, &path, saved);
        }
    }
}

fn apply_comments(node: &mut Node, prefix: &str, saved: &HashMap<String, String>) {
    let path = structural_path(prefix, node);
    if let Some(text) = saved.get(&path) {
        node.comments = text.clone();
    }
    if let Some(children) = &mut node.children {
        for child in children {
            apply_comments(child, &path, saved);
        }
    }
}
