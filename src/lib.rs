// ==========================================
// 学校管理后台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 校舎 / 学年 / 学生主数据维护与 CSV 批量导入
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 批量导入
pub mod importer;

// 管理画面资源 - 路由与校验契约
pub mod admin;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建库）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{ImportAction, ImportSummary, RowValues, UploadedFile};
pub use importer::{CsvImporterImpl, ImportError, RecordImporter};
pub use repository::{ImportTarget, SqliteTableTarget};
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "学校管理后台";
