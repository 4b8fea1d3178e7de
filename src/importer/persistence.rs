// ==========================================
// 学校管理后台 - 行持久化
// ==========================================
// 新增: 去掉键列后插入（由存储生成主键）
// 更新: 按 键列 = 键值 更新（键列本身也可能在属性中，按原值回写）
// 受影响行数为 0 → 行级错误（触发整体回滚）
// ==========================================

use crate::domain::{RowOutcome, RowValues};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::ImportTarget;
use rusqlite::Connection;
use std::sync::Arc;
use tracing::{debug, info};

pub struct PersistenceApplier {
    target: Arc<dyn ImportTarget>,
}

impl PersistenceApplier {
    pub fn new(target: Arc<dyn ImportTarget>) -> Self {
        Self { target }
    }

    /// 新增一行
    ///
    /// # 参数
    /// - conn: 进行中的事务
    /// - row: 数据行号（错误报告用）
    /// - attributes: 校验通过的行
    pub fn insert(
        &self,
        conn: &Connection,
        row: usize,
        mut attributes: RowValues,
    ) -> ImportResult<RowOutcome> {
        attributes.remove(self.target.key_column());

        debug!(
            target_name = self.target.name(),
            row = row,
            attributes = ?attributes,
            "新增记录"
        );

        let affected = self.target.insert(conn, &attributes)?;
        if affected == 0 {
            return Err(ImportError::InsertFailed {
                row,
                target: self.target.name().to_string(),
            });
        }

        info!(
            target_name = self.target.name(),
            row = row,
            new_data = ?attributes,
            "已新增记录"
        );
        Ok(RowOutcome::Inserted)
    }

    /// 按键更新一行
    pub fn update(
        &self,
        conn: &Connection,
        row: usize,
        key_value: &str,
        attributes: RowValues,
    ) -> ImportResult<RowOutcome> {
        let key_column = self.target.key_column();

        debug!(
            target_name = self.target.name(),
            row = row,
            key = key_value,
            attributes = ?attributes,
            "更新记录"
        );

        let affected = self.target.update(conn, key_column, key_value, &attributes)?;
        if affected == 0 {
            return Err(ImportError::UpdateFailed {
                row,
                target: self.target.name().to_string(),
                key: key_value.to_string(),
            });
        }

        info!(
            target_name = self.target.name(),
            row = row,
            key = key_value,
            new_data = ?attributes,
            "已更新记录"
        );
        Ok(RowOutcome::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SqliteTableTarget;

    fn setup() -> (Connection, PersistenceApplier) {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE schools (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                created_at TEXT,
                updated_at TEXT
            );",
        )
        .unwrap();
        let applier = PersistenceApplier::new(Arc::new(SqliteTableTarget::new("schools")));
        (conn, applier)
    }

    fn row(pairs: &[(&str, &str)]) -> RowValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_insert_drops_key_column() {
        let (conn, applier) = setup();

        // id = "0" 为假值行，键列不得写入
        let outcome = applier
            .insert(&conn, 1, row(&[("id", "0"), ("name", "North")]))
            .unwrap();
        assert_eq!(outcome, RowOutcome::Inserted);

        let id: i64 = conn
            .query_row("SELECT id FROM schools WHERE name = 'North'", [], |r| r.get(0))
            .unwrap();
        assert!(id > 0);
    }

    #[test]
    fn test_update_existing_row() {
        let (conn, applier) = setup();
        conn.execute("INSERT INTO schools (id, name) VALUES (7, 'Old')", [])
            .unwrap();

        let outcome = applier
            .update(&conn, 1, "7", row(&[("id", "7"), ("name", "New")]))
            .unwrap();
        assert_eq!(outcome, RowOutcome::Updated);

        let name: String = conn
            .query_row("SELECT name FROM schools WHERE id = 7", [], |r| r.get(0))
            .unwrap();
        assert_eq!(name, "New");
    }

    // 捕获日志输出
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLog {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn with_info_log<T>(f: impl FnOnce() -> T) -> (T, String) {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, captured.text())
    }

    #[test]
    fn test_written_rows_logged_at_info() {
        let (conn, applier) = setup();
        conn.execute("INSERT INTO schools (id, name) VALUES (7, 'Old')", [])
            .unwrap();

        let (outcome, log) = with_info_log(|| {
            applier.update(&conn, 1, "7", row(&[("id", "7"), ("name", "Renamed")]))
        });
        assert_eq!(outcome.unwrap(), RowOutcome::Updated);
        assert!(log.contains("INFO"));
        assert!(log.contains("Renamed"));
        assert!(log.contains("key=\"7\"") || log.contains("key=7"));

        let (outcome, log) =
            with_info_log(|| applier.insert(&conn, 2, row(&[("name", "Fresh")])));
        assert_eq!(outcome.unwrap(), RowOutcome::Inserted);
        assert!(log.contains("Fresh"));
    }

    #[test]
    fn test_failed_update_is_not_logged_as_written() {
        let (conn, applier) = setup();

        let (outcome, log) = with_info_log(|| {
            applier.update(&conn, 1, "404", row(&[("name", "Ghost")]))
        });
        assert!(outcome.is_err());
        assert!(!log.contains("Ghost"));
    }

    #[test]
    fn test_update_missing_key_fails() {
        let (conn, applier) = setup();
        let result = applier.update(&conn, 3, "999", row(&[("id", "999"), ("name", "X")]));

        match result {
            Err(ImportError::UpdateFailed { row, target, key }) => {
                assert_eq!(row, 3);
                assert_eq!(target, "schools");
                assert_eq!(key, "999");
            }
            other => panic!("Expected UpdateFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_without_attributes_fails() {
        let (conn, applier) = setup();
        let result = applier.insert(&conn, 2, row(&[("id", "")]));
        assert!(matches!(result, Err(ImportError::InsertFailed { row: 2, .. })));
    }

    #[test]
    fn test_constraint_violation_surfaces_as_repository_error() {
        let (conn, applier) = setup();
        // name NOT NULL，空串按 NULL 落库
        let result = applier.insert(&conn, 1, row(&[("name", "")]));
        assert!(matches!(result, Err(ImportError::Repository(_))));
    }
}
