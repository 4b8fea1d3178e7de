// ==========================================
// 学校管理后台 - 领域模型层
// ==========================================
// 职责: 定义导入管道使用的领域类型
// 红线: 不含数据访问逻辑
// ==========================================

pub mod import;
pub mod types;

// 重导出核心类型
pub use import::{ImportSummary, RowClassification, RowOutcome, RowValues, UploadedFile};
pub use types::ImportAction;
