// ==========================================
// 学校管理后台 - 校验规则定义
// ==========================================
// 规则表达式: 以 '|' 分隔，参数以 ':' 引出，例如 "required|integer|max:100"
// 支持: required / nullable / string / integer / numeric / email /
//       min:N / max:N / in:a,b,c / digits:N
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

// ==========================================
// ValidationContract - 资源声明的校验契约
// ==========================================
// 实现者: 各资源的请求规则（SchoolRequest / SClassRequest / StudentRequest）
pub trait ValidationContract: Send + Sync {
    /// 规则集名称（日志用）
    fn name(&self) -> &str;

    /// 字段 → 规则表达式（按声明顺序）
    fn rules(&self) -> Vec<(&'static str, &'static str)>;

    /// 自定义消息: "字段.规则" 或 "规则" → 消息
    fn messages(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}

// ==========================================
// Rule - 单条规则
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    Nullable,
    String,
    Integer,
    Numeric,
    Email,
    Min(f64),
    Max(f64),
    In(Vec<String>),
    Digits(usize),
}

impl Rule {
    /// 规则名（消息键的一部分）
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::Nullable => "nullable",
            Rule::String => "string",
            Rule::Integer => "integer",
            Rule::Numeric => "numeric",
            Rule::Email => "email",
            Rule::Min(_) => "min",
            Rule::Max(_) => "max",
            Rule::In(_) => "in",
            Rule::Digits(_) => "digits",
        }
    }

    /// 参数文本（用于消息中的 %{value}）
    pub fn parameter(&self) -> String {
        match self {
            Rule::Min(n) | Rule::Max(n) => format_number(*n),
            Rule::In(values) => values.join(", "),
            Rule::Digits(n) => n.to_string(),
            _ => String::new(),
        }
    }

    /// 解析单条规则
    pub fn parse(field: &str, expr: &str) -> ImportResult<Rule> {
        let expr = expr.trim();
        let (name, param) = match expr.split_once(':') {
            Some((n, p)) => (n.trim(), Some(p.trim())),
            None => (expr, None),
        };

        let invalid = |message: &str| ImportError::InvalidRule {
            field: field.to_string(),
            rule: expr.to_string(),
            message: message.to_string(),
        };

        let number = |p: Option<&str>| -> ImportResult<f64> {
            p.ok_or_else(|| invalid("缺少数值参数"))?
                .parse::<f64>()
                .map_err(|_| invalid("参数不是数值"))
        };

        match name {
            "required" => Ok(Rule::Required),
            "nullable" => Ok(Rule::Nullable),
            "string" => Ok(Rule::String),
            "integer" => Ok(Rule::Integer),
            "numeric" => Ok(Rule::Numeric),
            "email" => Ok(Rule::Email),
            "min" => Ok(Rule::Min(number(param)?)),
            "max" => Ok(Rule::Max(number(param)?)),
            "in" => {
                let values: Vec<String> = param
                    .ok_or_else(|| invalid("缺少候选值"))?
                    .split(',')
                    .map(|v| v.trim().to_string())
                    .collect();
                Ok(Rule::In(values))
            }
            "digits" => {
                let n = param
                    .ok_or_else(|| invalid("缺少位数参数"))?
                    .parse::<usize>()
                    .map_err(|_| invalid("位数参数不是整数"))?;
                Ok(Rule::Digits(n))
            }
            _ => Err(invalid("未知规则")),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// FieldRules - 单字段规则
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<Rule>,
}

impl FieldRules {
    /// 字段是否按数值比较大小（声明了 integer 或 numeric）
    pub fn is_numeric(&self) -> bool {
        self.rules
            .iter()
            .any(|r| matches!(r, Rule::Integer | Rule::Numeric))
    }
}

// ==========================================
// RuleSet - 规则集
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    fields: Vec<FieldRules>,
    messages: HashMap<String, String>,
}

impl RuleSet {
    /// 由规则表达式与自定义消息构建
    pub fn parse(
        name: impl Into<String>,
        rules: &[(&str, &str)],
        messages: &[(&str, &str)],
    ) -> ImportResult<Self> {
        let mut fields = Vec::with_capacity(rules.len());
        for (field, expr) in rules {
            let parsed = expr
                .split('|')
                .filter(|part| !part.trim().is_empty())
                .map(|part| Rule::parse(field, part))
                .collect::<ImportResult<Vec<_>>>()?;
            fields.push(FieldRules {
                field: field.to_string(),
                rules: parsed,
            });
        }

        Ok(Self {
            name: name.into(),
            fields,
            messages: messages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        })
    }

    /// 由资源的校验契约构建
    pub fn from_contract(contract: &dyn ValidationContract) -> ImportResult<Self> {
        Self::parse(contract.name(), &contract.rules(), &contract.messages())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// 自定义消息查找: 先 "字段.规则"，再 "规则"
    pub fn custom_message(&self, field: &str, rule: &str) -> Option<&str> {
        self.messages
            .get(&format!("{}.{}", field, rule))
            .or_else(|| self.messages.get(rule))
            .map(String::as_str)
    }
}
