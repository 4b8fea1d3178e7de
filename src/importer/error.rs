// ==========================================
// 学校管理后台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（事务开启前）=====
    #[error("未提供导入文件（字段 import 为必填）")]
    FileMissing,

    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv/.txt）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("CSV 表头为空")]
    EmptyHeader,

    #[error("CSV 表头列名重复: {0}")]
    DuplicateHeader(String),

    // ===== 行级错误（触发整体回滚）=====
    #[error("数据行解析失败 (行 {row}): {message}")]
    RowParse { row: usize, message: String },

    #[error("{}", validation_report(.row, .messages))]
    RowValidation { row: usize, messages: Vec<String> },

    #[error("新增记录失败 (行 {row}, 目标 {target}): 未写入任何记录")]
    InsertFailed { row: usize, target: String },

    #[error("更新记录失败 (行 {row}, 目标 {target}, 键 {key}): 未找到匹配记录")]
    UpdateFailed {
        row: usize,
        target: String,
        key: String,
    },

    // ===== 校验规则定义错误 =====
    #[error("校验规则无效 (字段 {field}, 规则 {rule}): {message}")]
    InvalidRule {
        field: String,
        rule: String,
        message: String,
    },

    // ===== 数据库错误 =====
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 失败发生的数据行号（1 起算），文件级错误返回 None
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::RowParse { row, .. }
            | ImportError::RowValidation { row, .. }
            | ImportError::InsertFailed { row, .. }
            | ImportError::UpdateFailed { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// 是否在事务开启前失败（无需回滚）
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            ImportError::FileMissing
                | ImportError::FileNotFound(_)
                | ImportError::UnsupportedFormat(_)
                | ImportError::FileReadError(_)
                | ImportError::CsvParseError(_)
                | ImportError::EmptyHeader
                | ImportError::DuplicateHeader(_)
        )
    }
}

/// 行校验失败报告: 首行为行号，之后每条消息一行
pub fn format_validation_report(row: usize, messages: &[String]) -> String {
    let mut report = format!("validation failed on row {}", row);
    for message in messages {
        report.push_str("\n- ");
        report.push_str(message);
    }
    report
}

fn validation_report(row: &usize, messages: &[String]) -> String {
    format_validation_report(*row, messages)
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::Repository(RepositoryError::from(err))
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
