// ==========================================
// 学校管理后台 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::ImportApi;
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection};

/// 环境变量: 显式指定数据库路径
pub const DB_PATH_ENV: &str = "SCHOOL_BACKOFFICE_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 共享连接
    pub conn: Arc<Mutex<Connection>>,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 打开连接后执行幂等建库，再装配配置管理器与各 API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let config_reader: Arc<dyn ImportConfigReader> = config.clone();
        let import_api = Arc::new(ImportApi::new(conn.clone(), config_reader));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            conn,
            config,
            import_api,
        })
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 SCHOOL_BACKOFFICE_DB_PATH（若设置）
/// - 开发环境: 用户数据目录/school-backoffice-dev/school_backoffice.db
/// - 生产环境: 用户数据目录/school-backoffice/school_backoffice.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./school_backoffice.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("school-backoffice-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("school-backoffice");
        }

        // 确保目录存在（失败时由打开连接报错）
        std::fs::create_dir_all(&path).ok();
        path = path.join("school_backoffice.db");
    }

    path.to_string_lossy().to_string()
}
