// ==========================================
// 学校管理后台 - 导入层
// ==========================================
// 职责: 将上传的 CSV 批量写入目标表（单事务，全部成功或全部回滚）
// 流程: 解析 → 列匹配 → 行分类 → 行校验 → 落库
// ==========================================

// 模块声明
pub mod csv_importer_impl;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod persistence;
pub mod row_classifier;
pub mod schema_matcher;
pub mod validation;

// 重导出核心类型
pub use csv_importer_impl::CsvImporterImpl;
pub use error::{format_validation_report, ImportError, ImportResult};
pub use file_parser::{read_upload, CsvParser, UploadedDataset, DEFAULT_DELIMITER};
pub use persistence::PersistenceApplier;
pub use row_classifier::{classify, is_truthy_key};
pub use schema_matcher::{compute_safe_columns, merge_fixed_fields, sanitize_row};
pub use validation::{
    validate_row, RuleSet, ValidationContract, ValidationRegistry, ValidationSlot,
};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RecordImporter, RuleSetResolver};
