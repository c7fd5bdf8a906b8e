//! 程序入口：初始化日志、解析命令行并在终端渲染展示树

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use json_pizhu::utils::fs::read_json_text;
use json_pizhu::{AppState, Document, JsonValueType, Node};

#[derive(Debug, Parser)]
#[command(author, version, about = "JSON批注查看器（终端前端）")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 解析JSON文本文件并渲染展示树
    Visualize {
        /// JSON文本文件路径
        input: PathBuf,
        /// 同时把结果保存为文档文件
        #[arg(long)]
        save: Option<PathBuf>,
        /// 紧凑模式：缩进减半
        #[arg(long)]
        compact: bool,
    },
    /// 打开已保存的文档文件
    Open {
        /// 文档文件路径
        input: PathBuf,
        /// 紧凑模式：缩进减半
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let args = Args::parse();
    match args.command {
        Command::Visualize {
            input,
            save,
            compact,
        } => {
            let text = read_json_text(&input)
                .with_context(|| format!("读取失败: {}", input.display()))?;
            let mut state = AppState::default();
            state
                .visualize(&text)
                .context("JSON无效，无法构建展示树")?;
            if let Some(root) = &state.document.node {
                print_tree(root, 0, indent_unit(compact));
            }
            if let Some(doc_path) = save {
                state.save_document(&doc_path)?;
            }
        }
        Command::Open { input, compact } => {
            let mut state = AppState::default();
            state
                .load_document(&input)
                .with_context(|| format!("文档打开失败: {}", input.display()))?;
            print_document(&state.document, indent_unit(compact));
        }
    }
    Ok(())
}

fn indent_unit(compact: bool) -> usize {
    if compact {
        2
    } else {
        4
    }
}

/// 终端渲染：缩进 + 类型标记，批注追加在行尾
fn print_tree(node: &Node, depth: usize, unit: usize) {
    let indent = " ".repeat(depth * unit);
    let marker = kind_marker(node.kind);
    let comment = if node.comments.is_empty() {
        String::new()
    } else {
        format!("  // {}", node.comments)
    };
    match &node.children {
        Some(children) => {
            println!("{}{} {}{}", indent, marker, node.key, comment);
            for child in children {
                print_tree(child, depth + 1, unit);
            }
        }
        None => println!("{}{} {}: {}{}", indent, marker, node.key, node.value, comment),
    }
}

fn print_document(document: &Document, unit: usize) {
    println!("版本: {}", document.version);
    println!("创建于: {}", document.created_at.to_rfc3339());
    println!("修改于: {}", document.modified_at.to_rfc3339());
    if !document.comments.is_empty() {
        println!("文档批注: {}", document.comments);
    }
    match &document.node {
        Some(root) => print_tree(root, 0, unit),
        None => println!("（文档尚无展示树）"),
    }
}

fn kind_marker(kind: JsonValueType) -> &'static str {
    match kind {
        JsonValueType::String => "[str]",
        JsonValueType::Number => "[num]",
        JsonValueType::Bool => "[bool]",
        JsonValueType::Object => "[obj]",
        JsonValueType::Array => "[arr]",
        JsonValueType::Null => "[null]",
    }
}
