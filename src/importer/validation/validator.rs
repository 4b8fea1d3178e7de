// ==========================================
// 学校管理后台 - 行校验器
// ==========================================
// 输入: 清洗后的行 + 规则集（可为空）
// 输出: 通过 → 原样返回行；失败 → 全部字段消息（不只第一条）
// ==========================================

use crate::domain::RowValues;
use crate::i18n::{interpolate, t};
use crate::importer::validation::rules::{FieldRules, Rule, RuleSet};

/// 校验一行
///
/// 未解析到规则集时跳过校验，行原样通过
pub fn validate_row(row: RowValues, rule_set: Option<&RuleSet>) -> Result<RowValues, Vec<String>> {
    let Some(rule_set) = rule_set else {
        return Ok(row);
    };

    let mut messages = Vec::new();
    for field_rules in rule_set.fields() {
        let value = row.get(&field_rules.field).map(String::as_str);
        for rule in &field_rules.rules {
            if !passes(rule, field_rules, value) {
                messages.push(message_for(rule_set, field_rules, rule));
            }
        }
    }

    if messages.is_empty() {
        Ok(row)
    } else {
        Err(messages)
    }
}

/// 单条规则判定
///
/// 缺失或空白值只受 required 约束，其余规则跳过
fn passes(rule: &Rule, field_rules: &FieldRules, value: Option<&str>) -> bool {
    let value = match value.map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return !matches!(rule, Rule::Required),
    };

    match rule {
        Rule::Required | Rule::Nullable | Rule::String => true,
        Rule::Integer => value.parse::<i64>().is_ok(),
        Rule::Numeric => value.parse::<f64>().is_ok(),
        Rule::Email => is_email(value),
        Rule::Min(min) => measure(field_rules, value).is_some_and(|m| m >= *min),
        Rule::Max(max) => measure(field_rules, value).is_some_and(|m| m <= *max),
        Rule::In(values) => values.iter().any(|v| v == value),
        Rule::Digits(n) => value.len() == *n && value.chars().all(|c| c.is_ascii_digit()),
    }
}

/// 数值字段比较数值，其余比较字符数
fn measure(field_rules: &FieldRules, value: &str) -> Option<f64> {
    if field_rules.is_numeric() {
        value.parse::<f64>().ok()
    } else {
        Some(value.chars().count() as f64)
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

fn message_for(rule_set: &RuleSet, field_rules: &FieldRules, rule: &Rule) -> String {
    let attribute = field_rules.field.replace('_', " ");
    let parameter = rule.parameter();

    let template = match rule_set.custom_message(&field_rules.field, rule.name()) {
        Some(custom) => custom.to_string(),
        None => t(&format!("validation.{}", rule.name())),
    };

    interpolate(&template, &[("attribute", attribute.as_str()), ("value", parameter.as_str())])
}
