// ==========================================
// 学校管理后台 - 校验规则集解析
// ==========================================
// 查找顺序（先命中者生效）:
//   1. import.validation            （通用导入规则）
//   2. {insert|update}.import.validation （按动作的导入规则）
//   3. create.validation / update.validation （资源表单规则）
//   4. 无 → 不校验
// ==========================================

use crate::domain::ImportAction;
use crate::importer::error::ImportResult;
use crate::importer::importer_trait::RuleSetResolver;
use crate::importer::validation::rules::{RuleSet, ValidationContract};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 规则集槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationSlot {
    Import,
    InsertImport,
    UpdateImport,
    Create,
    Update,
}

impl ValidationSlot {
    pub fn config_key(&self) -> &'static str {
        match self {
            ValidationSlot::Import => "import.validation",
            ValidationSlot::InsertImport => "insert.import.validation",
            ValidationSlot::UpdateImport => "update.import.validation",
            ValidationSlot::Create => "create.validation",
            ValidationSlot::Update => "update.validation",
        }
    }

    /// 动作对应的查找顺序
    pub fn lookup_order(action: ImportAction) -> [ValidationSlot; 3] {
        match action {
            ImportAction::Insert => [
                ValidationSlot::Import,
                ValidationSlot::InsertImport,
                ValidationSlot::Create,
            ],
            ImportAction::Update => [
                ValidationSlot::Import,
                ValidationSlot::UpdateImport,
                ValidationSlot::Update,
            ],
        }
    }
}

// ==========================================
// ValidationRegistry - 单个资源的规则集登记
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ValidationRegistry {
    slots: HashMap<ValidationSlot, Arc<RuleSet>>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记规则集（同一槽位重复登记时覆盖）
    pub fn register(&mut self, slot: ValidationSlot, rule_set: RuleSet) -> &mut Self {
        self.slots.insert(slot, Arc::new(rule_set));
        self
    }

    /// 由校验契约解析并登记
    pub fn register_contract(
        &mut self,
        slot: ValidationSlot,
        contract: &dyn ValidationContract,
    ) -> ImportResult<&mut Self> {
        let rule_set = RuleSet::from_contract(contract)?;
        Ok(self.register(slot, rule_set))
    }

    pub fn get(&self, slot: ValidationSlot) -> Option<Arc<RuleSet>> {
        self.slots.get(&slot).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl RuleSetResolver for ValidationRegistry {
    fn resolve(&self, action: ImportAction) -> Option<Arc<RuleSet>> {
        let found = ValidationSlot::lookup_order(action)
            .into_iter()
            .find_map(|slot| self.get(slot).map(|set| (slot, set)));

        match found {
            Some((slot, set)) => {
                debug!(
                    action = %action,
                    slot = slot.config_key(),
                    rule_set = set.name(),
                    "解析到校验规则集"
                );
                Some(set)
            }
            None => {
                debug!(action = %action, "未登记校验规则集，跳过校验");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(name: &str) -> RuleSet {
        RuleSet::parse(name, &[("name", "required")], &[]).unwrap()
    }

    fn resolved_name(registry: &ValidationRegistry, action: ImportAction) -> Option<String> {
        registry.resolve(action).map(|s| s.name().to_string())
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = ValidationRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.resolve(ImportAction::Insert).is_none());
        assert!(registry.resolve(ImportAction::Update).is_none());
    }

    #[test]
    fn test_general_import_rules_win_for_both_actions() {
        let mut registry = ValidationRegistry::new();
        registry
            .register(ValidationSlot::Import, set("general"))
            .register(ValidationSlot::InsertImport, set("insert-import"))
            .register(ValidationSlot::UpdateImport, set("update-import"))
            .register(ValidationSlot::Create, set("create"))
            .register(ValidationSlot::Update, set("update"));

        assert_eq!(resolved_name(&registry, ImportAction::Insert).as_deref(), Some("general"));
        assert_eq!(resolved_name(&registry, ImportAction::Update).as_deref(), Some("general"));
    }

    #[test]
    fn test_action_import_rules_before_form_rules() {
        let mut registry = ValidationRegistry::new();
        registry
            .register(ValidationSlot::InsertImport, set("insert-import"))
            .register(ValidationSlot::Create, set("create"))
            .register(ValidationSlot::Update, set("update"));

        assert_eq!(
            resolved_name(&registry, ImportAction::Insert).as_deref(),
            Some("insert-import")
        );
        // update 无按动作的导入规则，回落到表单规则
        assert_eq!(resolved_name(&registry, ImportAction::Update).as_deref(), Some("update"));
    }

    #[test]
    fn test_form_rules_do_not_cross_actions() {
        let mut registry = ValidationRegistry::new();
        registry.register(ValidationSlot::Create, set("create"));

        assert_eq!(resolved_name(&registry, ImportAction::Insert).as_deref(), Some("create"));
        assert!(registry.resolve(ImportAction::Update).is_none());
    }

    #[test]
    fn test_closure_resolver() {
        let only_insert = |action: ImportAction| match action {
            ImportAction::Insert => Some(Arc::new(set("closure"))),
            ImportAction::Update => None,
        };
        let resolver: &dyn RuleSetResolver = &only_insert;

        assert!(resolver.resolve(ImportAction::Insert).is_some());
        assert!(resolver.resolve(ImportAction::Update).is_none());
    }
}
