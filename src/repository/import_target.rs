// ==========================================
// 学校管理后台 - 导入目标 Trait
// ==========================================
// 职责: 定义导入管道写入目标的数据访问接口（不包含实现）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::RowValues;
use crate::repository::error::RepositoryResult;
use rusqlite::Connection;

/// 系统维护的列（时间戳 / 软删除），不允许通过导入写入
pub const SYSTEM_MANAGED_COLUMNS: [&str; 3] = ["created_at", "updated_at", "deleted_at"];

/// 默认导入键列
pub const DEFAULT_KEY_COLUMN: &str = "id";

// ==========================================
// ImportTarget Trait
// ==========================================
// 用途: 导入管道的写入目标
// 实现者: SqliteTableTarget（使用 rusqlite）
//
// 写操作接收 &Connection：调用方传入事务（Transaction 解引用为 Connection），
// 目标本身不开启/提交事务。
pub trait ImportTarget: Send + Sync {
    /// 目标名称（表名），用于日志
    fn name(&self) -> &str;

    /// 区分新增/更新的键列
    fn key_column(&self) -> &str {
        DEFAULT_KEY_COLUMN
    }

    /// 可持久化列（不含系统维护列）
    fn persistable_columns(&self, conn: &Connection) -> RepositoryResult<Vec<String>>;

    /// 新增一行
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示未写入）
    fn insert(&self, conn: &Connection, attributes: &RowValues) -> RepositoryResult<usize>;

    /// 按键更新
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示未找到匹配记录）
    fn update(
        &self,
        conn: &Connection,
        key_column: &str,
        key_value: &str,
        attributes: &RowValues,
    ) -> RepositoryResult<usize>;
}
