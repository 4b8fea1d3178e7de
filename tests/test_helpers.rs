// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、测试数据生成等功能
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use school_backoffice::db::{init_schema, open_sqlite_connection};
use school_backoffice::domain::UploadedFile;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接（应用统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 打开共享连接（导入器使用）
pub fn open_shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    Ok(Arc::new(Mutex::new(open_test_connection(db_path)?)))
}

/// 插入校舎，返回 id
pub fn insert_school(conn: &Connection, name: &str) -> Result<i64, Box<dyn Error>> {
    conn.execute("INSERT INTO schools (name) VALUES (?1)", params![name])?;
    Ok(conn.last_insert_rowid())
}

/// 插入学年，返回 id
pub fn insert_class(conn: &Connection, school_id: i64, name: &str) -> Result<i64, Box<dyn Error>> {
    conn.execute(
        "INSERT INTO sclasses (school_id, name) VALUES (?1, ?2)",
        params![school_id, name],
    )?;
    Ok(conn.last_insert_rowid())
}

/// 写入全局配置
pub fn insert_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// 统计表记录数
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64, Box<dyn Error>> {
    let sql = format!("SELECT COUNT(*) FROM {}", table);
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

/// 按 id 读取 name 列
pub fn name_of(conn: &Connection, table: &str, id: i64) -> Result<String, Box<dyn Error>> {
    let sql = format!("SELECT name FROM {} WHERE id = ?1", table);
    Ok(conn.query_row(&sql, params![id], |row| row.get(0))?)
}

/// 构造上传文件
pub fn csv_upload(content: &str) -> UploadedFile {
    UploadedFile::new("upload.csv", content.as_bytes().to_vec())
}
