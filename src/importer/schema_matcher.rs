// ==========================================
// 学校管理后台 - 列匹配
// ==========================================
// 安全列 = 文件表头 ∩ 目标可持久化列
// 每次导入计算一次，所有行共用
// ==========================================

use crate::domain::RowValues;
use std::collections::BTreeSet;

/// 计算安全列集合（纯函数，与输入顺序无关）
pub fn compute_safe_columns<H, P>(header: &[H], persistable_columns: &[P]) -> BTreeSet<String>
where
    H: AsRef<str>,
    P: AsRef<str>,
{
    let persistable: BTreeSet<&str> = persistable_columns.iter().map(|c| c.as_ref()).collect();
    header
        .iter()
        .map(|h| h.as_ref())
        .filter(|h| persistable.contains(h))
        .map(str::to_string)
        .collect()
}

/// 只保留安全列（不在目标表中的字段被静默丢弃）
pub fn sanitize_row(row: RowValues, safe_columns: &BTreeSet<String>) -> RowValues {
    row.into_iter()
        .filter(|(column, _)| safe_columns.contains(column))
        .collect()
}

/// 合并固定字段（固定字段覆盖文件中的同名值）
pub fn merge_fixed_fields(mut row: RowValues, fixed_fields: &RowValues) -> RowValues {
    for (column, value) in fixed_fields {
        row.insert(column.clone(), value.clone());
    }
    row
}
