// ==========================================
// 学校管理后台 - 学生
// ==========================================
// 路由: master_schools/{school_id}/classes/{class_id}/students
// 隐藏字段: class_id（取自路由，导入时覆盖文件中的值）
// ==========================================

use crate::admin::resource::{fixed, CrudResource, ParentRef};
use crate::domain::RowValues;
use crate::importer::validation::ValidationContract;

/// 学生表单规则
pub struct StudentRequest;

impl ValidationContract for StudentRequest {
    fn name(&self) -> &str {
        "StudentRequest"
    }

    fn rules(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("class_id", "required|integer"),
            ("name", "required|string|max:255"),
            ("email", "nullable|email|max:255"),
            ("student_code", "nullable|string|max:50"),
            ("display_order", "nullable|integer|min:0"),
        ]
    }
}

pub struct StudentResource {
    pub school_id: i64,
    pub class_id: i64,
}

impl CrudResource for StudentResource {
    fn table(&self) -> &'static str {
        "students"
    }

    fn entity_name(&self) -> &'static str {
        "学生"
    }

    fn parents(&self) -> Vec<ParentRef> {
        vec![
            ParentRef {
                table: "schools",
                id: self.school_id,
            },
            ParentRef {
                table: "sclasses",
                id: self.class_id,
            },
        ]
    }

    fn fixed_fields(&self) -> RowValues {
        fixed(&[("class_id", self.class_id)])
    }

    fn create_request(&self) -> Box<dyn ValidationContract> {
        Box::new(StudentRequest)
    }
}
