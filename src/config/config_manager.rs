// ==========================================
// 学校管理后台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)，当前只使用 scope_id='global'
// ==========================================

use crate::config::import_config_trait::{ConfigResult, ImportConfigReader};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：对传入连接再次应用统一 PRAGMA（幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// 写入 global 配置（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        debug!(key = key, value = value, "配置已写入");
        Ok(())
    }

    /// 读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有 global 配置的快照（JSON 格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let config_map = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<BTreeMap<_, _>, _>>()?;

        Ok(serde_json::to_string(&json!(config_map))?)
    }
}

#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_import_key(&self) -> ConfigResult<String> {
        let value = self.get_config_or_default(config_keys::IMPORT_KEY, defaults::IMPORT_KEY)?;
        let value = value.trim();
        if value.is_empty() {
            Ok(defaults::IMPORT_KEY.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    async fn get_success_message(&self) -> ConfigResult<String> {
        self.get_config_or_default(
            config_keys::IMPORTED_SUCCESS_MESSAGE,
            defaults::IMPORTED_SUCCESS_MESSAGE,
        )
    }

    async fn get_csv_delimiter(&self) -> ConfigResult<u8> {
        let value = self.get_config_or_default(config_keys::CSV_DELIMITER, defaults::CSV_DELIMITER)?;
        let delimiter = match value.as_str() {
            "\\t" | "tab" => b'\t',
            v if v.len() == 1 => v.as_bytes()[0],
            other => {
                warn!(value = other, "分隔符配置无效，使用默认值");
                b','
            }
        };
        Ok(delimiter)
    }

    async fn get_locale(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::LOCALE, defaults::LOCALE)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导入
    pub const IMPORT_KEY: &str = "import_key";
    pub const IMPORTED_SUCCESS_MESSAGE: &str = "imported_success_message";
    pub const CSV_DELIMITER: &str = "import_csv_delimiter";

    // 界面
    pub const LOCALE: &str = "locale";
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const IMPORT_KEY: &str = "id";
    /// i18n 键
    pub const IMPORTED_SUCCESS_MESSAGE: &str = "import.data_imported";
    pub const CSV_DELIMITER: &str = ",";
    pub const LOCALE: &str = "en";
}
