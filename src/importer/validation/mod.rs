// ==========================================
// 学校管理后台 - 行校验
// ==========================================
// rules:     规则语言（"required|max:255"）与规则集
// validator: 对单行应用规则集
// resolver:  按动作查找规则集（显式注册，优先级查找）
// ==========================================

pub mod resolver;
pub mod rules;
pub mod validator;

pub use resolver::{ValidationRegistry, ValidationSlot};
pub use rules::{FieldRules, Rule, RuleSet, ValidationContract};
pub use validator::validate_row;
