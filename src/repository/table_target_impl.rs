// ==========================================
// 学校管理后台 - SQLite 表导入目标实现
// ==========================================
// 职责: 以任意 SQLite 表作为导入目标（列通过 PRAGMA table_info 内省）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: 值全部参数化绑定；列名来自表结构并加引号
// ==========================================

use crate::domain::RowValues;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_target::{ImportTarget, DEFAULT_KEY_COLUMN, SYSTEM_MANAGED_COLUMNS};
use chrono::Utc;
use rusqlite::{params_from_iter, Connection};
use std::sync::OnceLock;
use tracing::debug;

/// 标识符加双引号（内部双引号转义）
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 空串按 NULL 落库
fn to_sql_value(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ==========================================
// SqliteTableTarget
// ==========================================
pub struct SqliteTableTarget {
    table: String,
    key_column: String,
    // 表结构（首次访问时加载）
    columns: OnceLock<Vec<String>>,
}

impl SqliteTableTarget {
    /// 创建表导入目标（键列默认为 id）
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            columns: OnceLock::new(),
        }
    }

    /// 指定键列
    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// 读取表的全部列名（按定义顺序）
    pub fn load_table_columns(conn: &Connection, table: &str) -> RepositoryResult<Vec<String>> {
        let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(RepositoryError::UnknownTable(table.to_string()));
        }
        Ok(columns)
    }

    fn columns(&self, conn: &Connection) -> RepositoryResult<&[String]> {
        if let Some(columns) = self.columns.get() {
            return Ok(columns.as_slice());
        }
        let loaded = Self::load_table_columns(conn, &self.table)?;
        Ok(self.columns.get_or_init(|| loaded).as_slice())
    }

    fn has_column(&self, conn: &Connection, column: &str) -> RepositoryResult<bool> {
        Ok(self.columns(conn)?.iter().any(|c| c == column))
    }
}

impl ImportTarget for SqliteTableTarget {
    fn name(&self) -> &str {
        &self.table
    }

    fn key_column(&self) -> &str {
        &self.key_column
    }

    fn persistable_columns(&self, conn: &Connection) -> RepositoryResult<Vec<String>> {
        Ok(self
            .columns(conn)?
            .iter()
            .filter(|c| !SYSTEM_MANAGED_COLUMNS.contains(&c.as_str()))
            .cloned()
            .collect())
    }

    fn insert(&self, conn: &Connection, attributes: &RowValues) -> RepositoryResult<usize> {
        // 无可写列: 不执行写入，由调用方按“未写入”处理
        if attributes.is_empty() {
            return Ok(0);
        }

        let mut columns: Vec<String> = attributes.keys().map(|c| quote_ident(c)).collect();
        let mut values: Vec<Option<String>> =
            attributes.values().map(|v| to_sql_value(v)).collect();

        let now = Utc::now().to_rfc3339();
        for stamp in ["created_at", "updated_at"] {
            if self.has_column(conn, stamp)? {
                columns.push(quote_ident(stamp));
                values.push(Some(now.clone()));
            }
        }

        let placeholders = (1..=values.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(&self.table),
            columns.join(", "),
            placeholders,
        );
        debug!(sql = %sql, "执行插入");

        Ok(conn.execute(&sql, params_from_iter(values.iter()))?)
    }

    fn update(
        &self,
        conn: &Connection,
        key_column: &str,
        key_value: &str,
        attributes: &RowValues,
    ) -> RepositoryResult<usize> {
        let mut assignments: Vec<String> = Vec::with_capacity(attributes.len() + 1);
        let mut values: Vec<Option<String>> = Vec::with_capacity(attributes.len() + 2);

        for (column, value) in attributes {
            values.push(to_sql_value(value));
            assignments.push(format!("{} = ?{}", quote_ident(column), values.len()));
        }
        if self.has_column(conn, "updated_at")? {
            values.push(Some(Utc::now().to_rfc3339()));
            assignments.push(format!("{} = ?{}", quote_ident("updated_at"), values.len()));
        }
        if assignments.is_empty() {
            return Ok(0);
        }

        values.push(Some(key_value.to_string()));
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?{}",
            quote_ident(&self.table),
            assignments.join(", "),
            quote_ident(key_column),
            values.len(),
        );
        debug!(sql = %sql, "执行更新");

        Ok(conn.execute(&sql, params_from_iter(values.iter()))?)
    }
}
