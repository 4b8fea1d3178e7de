// ==========================================
// 学校管理后台 - 学年
// ==========================================
// 路由: master_schools/{school_id}/classes
// 隐藏字段: school_id（取自路由）
// ==========================================

use crate::admin::resource::{fixed, CrudResource, ParentRef};
use crate::domain::RowValues;
use crate::importer::validation::ValidationContract;

/// 学年表单规则
pub struct SClassRequest;

impl ValidationContract for SClassRequest {
    fn name(&self) -> &str {
        "SClassRequest"
    }

    fn rules(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("school_id", "required|integer"),
            ("name", "required|string|max:255"),
            ("display_order", "nullable|integer|min:0"),
        ]
    }
}

pub struct SClassResource {
    pub school_id: i64,
}

impl CrudResource for SClassResource {
    fn table(&self) -> &'static str {
        "sclasses"
    }

    fn entity_name(&self) -> &'static str {
        "学年"
    }

    fn parents(&self) -> Vec<ParentRef> {
        vec![ParentRef {
            table: "schools",
            id: self.school_id,
        }]
    }

    fn fixed_fields(&self) -> RowValues {
        fixed(&[("school_id", self.school_id)])
    }

    fn create_request(&self) -> Box<dyn ValidationContract> {
        Box::new(SClassRequest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_school_id() {
        let resource = SClassResource { school_id: 3 };
        assert_eq!(resource.fixed_fields().get("school_id"), Some(&"3".to_string()));
        assert_eq!(resource.parents()[0].table, "schools");
    }
}
