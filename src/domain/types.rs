// ==========================================
// 学校管理后台 - 领域类型定义
// ==========================================
// 职责: 导入管道共享的基础枚举
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 导入动作 (Import Action)
// ==========================================
// 决定一行数据是新增还是更新，同时决定使用哪套校验规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Insert, // 新增
    Update, // 更新
}

impl ImportAction {
    /// 动作名（与配置键前缀一致: "insert" / "update"）
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportAction::Insert => "insert",
            ImportAction::Update => "update",
        }
    }
}

impl fmt::Display for ImportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_action_display() {
        assert_eq!(ImportAction::Insert.to_string(), "insert");
        assert_eq!(ImportAction::Update.to_string(), "update");
    }

    #[test]
    fn test_import_action_serde() {
        let json = serde_json::to_string(&ImportAction::Update).unwrap();
        assert_eq!(json, "\"update\"");
    }
}
