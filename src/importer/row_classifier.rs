// ==========================================
// 学校管理后台 - 行分类（新增 / 更新）
// ==========================================
// 规则: 清洗后的行中键列存在且为真值 → 更新；否则 → 新增
// 键列在文件中存在但不属于可持久化列时，清洗后已被丢弃，按新增处理
// ==========================================

use crate::domain::{RowClassification, RowValues};

/// 键值是否为真值（空串与 "0" 视为假值）
pub fn is_truthy_key(value: &str) -> bool {
    !value.is_empty() && value != "0"
}

/// 对清洗后的行进行分类
pub fn classify(sanitized_row: &RowValues, key_column: &str) -> RowClassification {
    match sanitized_row.get(key_column) {
        Some(value) if is_truthy_key(value) => RowClassification::Update {
            key_value: value.clone(),
        },
        _ => RowClassification::Insert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::schema_matcher::{compute_safe_columns, sanitize_row};

    fn row(pairs: &[(&str, &str)]) -> RowValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_key_present_is_update() {
        let result = classify(&row(&[("id", "7"), ("name", "Bob")]), "id");
        assert_eq!(
            result,
            RowClassification::Update {
                key_value: "7".to_string()
            }
        );
    }

    #[test]
    fn test_key_empty_or_absent_is_insert() {
        assert_eq!(
            classify(&row(&[("id", ""), ("name", "Alice")]), "id"),
            RowClassification::Insert
        );
        assert_eq!(classify(&row(&[("name", "Alice")]), "id"), RowClassification::Insert);
        assert_eq!(classify(&row(&[("id", "0")]), "id"), RowClassification::Insert);
    }

    #[test]
    fn test_key_outside_persistable_columns_forces_insert() {
        let raw = row(&[("id", "7"), ("name", "Bob")]);
        let safe = compute_safe_columns(&["id", "name"], &["name"]);

        let sanitized = sanitize_row(raw, &safe);
        assert_eq!(classify(&sanitized, "id"), RowClassification::Insert);
    }

    #[test]
    fn test_custom_key_column() {
        let result = classify(&row(&[("code", "S-01")]), "code");
        assert!(matches!(result, RowClassification::Update { key_value } if key_value == "S-01"));
    }
}
