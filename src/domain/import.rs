// ==========================================
// 学校管理后台 - 导入领域模型
// ==========================================
// 职责: 上传文件、行数据、行分类、导入结果
// 红线: 只描述数据，不含解析/落库逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 一行数据（列名 → 单元格值）
///
/// 使用 BTreeMap 保证列顺序稳定（日志与 SQL 生成都依赖确定顺序）
pub type RowValues = BTreeMap<String, String>;

// ==========================================
// UploadedFile - Web 层交付的上传文件
// ==========================================
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 原始文件名（用于扩展名判断与日志）
    pub file_name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// 扩展名（小写），无扩展名时返回空串
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }
}

// ==========================================
// RowClassification - 行分类结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowClassification {
    /// 新增（键列缺失或为假值）
    Insert,
    /// 更新（携带键值）
    Update { key_value: String },
}

impl RowClassification {
    pub fn action(&self) -> crate::domain::types::ImportAction {
        match self {
            RowClassification::Insert => crate::domain::types::ImportAction::Insert,
            RowClassification::Update { .. } => crate::domain::types::ImportAction::Update,
        }
    }
}

// ==========================================
// RowOutcome - 单行处理结果
// ==========================================
// 失败分支由 ImportError（携带行号）表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowOutcome {
    Inserted,
    Updated,
}

// ==========================================
// ImportSummary - 一次导入调用的汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    /// 导入调用 ID（UUID v4，仅用于日志追溯）
    pub import_id: String,
    /// 目标表名
    pub target: String,
    /// 处理的数据行数
    pub total_rows: usize,
    /// 新增行数
    pub inserted: usize,
    /// 更新行数
    pub updated: usize,
    /// 耗时（毫秒）
    pub elapsed_ms: u128,
    /// 提交时间
    pub imported_at: DateTime<Utc>,
}

impl ImportSummary {
    /// 记录单行结果
    pub fn record(&mut self, outcome: RowOutcome) {
        self.total_rows += 1;
        match outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::Updated => self.updated += 1,
        }
    }
}
