//! IO helper: safe file read/write for documents and JSON text

use std::{fs, fs::File, io::BufReader, path::Path};

use crate::model::data_core::AppError;
use crate::model::document::Document;

/// 读取UTF-8 JSON文本；非法UTF-8并入 `InvalidInput`
pub fn read_json_text(p: &Path) -> Result<String, AppError> {
    let bytes = fs::read(p)?;
    String::from_utf8(bytes).map_err(|e| {
        tracing::warn!("文件不是有效的UTF-8: {}", e);
        AppError::InvalidInput
    })
}

/// 从文件读取文档；反序列化失败视为文件整体损坏
pub fn read_document_file(p: &Path) -> Result<Document, AppError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    serde_json::from_reader(rdr).map_err(|e| {
        tracing::warn!("文档解析失败: {}", e);
        AppError::Corrupt
    })
}

/// 将文档保存到文件（格式化输出）
pub fn write_document_file(p: &Path, document: &Document) -> Result<(), AppError> {
    let f = File::create(p)?;
    serde_json::to_writer_pretty(f, document).map_err(|e| AppError::Io(e.into()))?;
    Ok(())
}
