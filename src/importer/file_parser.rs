// ==========================================
// 学校管理后台 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析（事务开启前）
// 支持: 带表头的分隔文本（.csv / .tsv / .txt）
// ==========================================

use crate::domain::{RowValues, UploadedFile};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use csv::{ReaderBuilder, StringRecordsIntoIter};
use std::collections::HashSet;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

/// 默认分隔符
pub const DEFAULT_DELIMITER: u8 = b',';

const SUPPORTED_EXTENSIONS: [&str; 4] = ["csv", "tsv", "txt", ""];

// ==========================================
// UploadedDataset - 解析后的表格
// ==========================================
// 表头在构造时读取并校验；数据行惰性读取，只能按文件顺序消费一次
pub struct UploadedDataset {
    header: Vec<String>,
    records: StringRecordsIntoIter<Box<dyn Read + Send>>,
    rows_read: usize,
}

impl std::fmt::Debug for UploadedDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedDataset")
            .field("header", &self.header)
            .finish_non_exhaustive()
    }
}

impl UploadedDataset {
    /// 从任意读取器构造（读取并校验表头）
    pub fn from_reader(reader: Box<dyn Read + Send>, delimiter: u8) -> ImportResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // 允许行长度与表头不一致
            .from_reader(reader);

        let header: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        if header.is_empty() || header.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyHeader);
        }

        let mut seen = HashSet::new();
        for name in &header {
            if !seen.insert(name.as_str()) {
                return Err(ImportError::DuplicateHeader(name.clone()));
            }
        }

        debug!(columns = ?header, "CSV 表头读取完成");

        Ok(Self {
            header,
            records: csv_reader.into_records(),
            rows_read: 0,
        })
    }

    /// 表头（文件声明顺序）
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

impl Iterator for UploadedDataset {
    /// (行号, 行数据)，行号为数据行序号（1 起算，不含表头）
    type Item = ImportResult<(usize, RowValues)>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.rows_read += 1;
        let row_number = self.rows_read;
        Some(
            record
                .map(|record| {
                    // 按位置映射: 多余单元格丢弃，缺失单元格不出现在行中
                    let values = self
                        .header
                        .iter()
                        .zip(record.iter())
                        .map(|(h, v)| (h.clone(), v.to_string()))
                        .collect::<RowValues>();
                    (row_number, values)
                })
                .map_err(|e| ImportError::RowParse {
                    row: row_number,
                    message: e.to_string(),
                }),
        )
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    delimiter: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    fn check_extension(ext: &str) -> ImportResult<()> {
        if SUPPORTED_EXTENSIONS.contains(&ext) {
            Ok(())
        } else {
            Err(ImportError::UnsupportedFormat(ext.to_string()))
        }
    }
}

impl FileParser for CsvParser {
    fn parse(&self, file: &UploadedFile) -> ImportResult<UploadedDataset> {
        Self::check_extension(&file.extension())?;
        UploadedDataset::from_reader(Box::new(Cursor::new(file.bytes.clone())), self.delimiter)
    }
}

/// 读取磁盘文件为上传文件（CLI 使用）
///
/// # 返回
/// - Err(FileNotFound): 路径不存在
/// - Err(FileReadError): 读取失败
pub fn read_upload(file_path: &Path) -> ImportResult<UploadedFile> {
    if !file_path.exists() {
        return Err(ImportError::FileNotFound(file_path.display().to_string()));
    }

    let bytes = std::fs::read(file_path)?;
    let file_name = file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    debug!(file_name = %file_name, size = bytes.len(), "读取上传文件");

    Ok(UploadedFile::new(file_name, bytes))
}
