// ==========================================
// 学校管理后台 - 校舍
// ==========================================
// 路由: master_schools
// ==========================================

use crate::admin::resource::CrudResource;
use crate::importer::validation::ValidationContract;

/// 校舍表单规则
pub struct SchoolRequest;

impl ValidationContract for SchoolRequest {
    fn name(&self) -> &str {
        "SchoolRequest"
    }

    fn rules(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("name", "required|string|max:255"),
            ("display_order", "nullable|integer|min:0"),
        ]
    }
}

pub struct SchoolResource;

impl CrudResource for SchoolResource {
    fn table(&self) -> &'static str {
        "schools"
    }

    fn entity_name(&self) -> &'static str {
        "校舎"
    }

    fn create_request(&self) -> Box<dyn ValidationContract> {
        Box::new(SchoolRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::validation::RuleSet;

    #[test]
    fn test_school_request_parses() {
        let set = RuleSet::from_contract(&SchoolRequest).unwrap();
        assert_eq!(set.fields().len(), 2);
        assert!(SchoolResource.fixed_fields().is_empty());
        assert!(SchoolResource.parents().is_empty());
    }
}
