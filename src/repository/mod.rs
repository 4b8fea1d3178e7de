// ==========================================
// 学校管理后台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有值使用参数化绑定,防止 SQL 注入
// ==========================================

pub mod error;
pub mod import_target;
pub mod table_target_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use import_target::{ImportTarget, DEFAULT_KEY_COLUMN, SYSTEM_MANAGED_COLUMNS};
pub use table_target_impl::SqliteTableTarget;
