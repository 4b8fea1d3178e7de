// ==========================================
// 学校管理后台 - CRUD 资源抽象
// ==========================================
// 每个资源声明: 目标表、固定字段（来自路由参数）、表单校验契约
// 导入流程据此构建 ImportTarget 与 ValidationRegistry
// ==========================================

use crate::domain::RowValues;
use crate::importer::error::ImportResult;
use crate::importer::validation::{ValidationContract, ValidationRegistry, ValidationSlot};

// ==========================================
// ParentRef - 上级资源引用（导入前校验存在性）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub table: &'static str,
    pub id: i64,
}

// ==========================================
// CrudResource Trait
// ==========================================
// 实现者: SchoolResource / SClassResource / StudentResource
pub trait CrudResource: Send + Sync {
    /// 目标表
    fn table(&self) -> &'static str;

    /// 画面上的实体名（日志用）
    fn entity_name(&self) -> &'static str;

    /// 上级资源（按路由从外到内）
    fn parents(&self) -> Vec<ParentRef> {
        Vec::new()
    }

    /// 合并进每一行的固定字段（隐藏字段，覆盖文件中的同名值）
    fn fixed_fields(&self) -> RowValues {
        RowValues::new()
    }

    /// 新增表单的校验契约
    fn create_request(&self) -> Box<dyn ValidationContract>;

    /// 更新表单的校验契约（默认与新增相同）
    fn update_request(&self) -> Box<dyn ValidationContract> {
        self.create_request()
    }

    /// 导入专用校验契约（优先于表单契约）
    fn import_request(&self) -> Option<Box<dyn ValidationContract>> {
        None
    }

    /// 新增行专用的导入校验契约
    fn insert_import_request(&self) -> Option<Box<dyn ValidationContract>> {
        None
    }

    /// 更新行专用的导入校验契约
    fn update_import_request(&self) -> Option<Box<dyn ValidationContract>> {
        None
    }

    /// 登记本资源的规则集
    fn register_validation(&self, registry: &mut ValidationRegistry) -> ImportResult<()> {
        let import_slots = [
            (ValidationSlot::Import, self.import_request()),
            (ValidationSlot::InsertImport, self.insert_import_request()),
            (ValidationSlot::UpdateImport, self.update_import_request()),
        ];
        for (slot, contract) in import_slots {
            if let Some(contract) = contract {
                registry.register_contract(slot, contract.as_ref())?;
            }
        }
        registry.register_contract(ValidationSlot::Create, self.create_request().as_ref())?;
        registry.register_contract(ValidationSlot::Update, self.update_request().as_ref())?;
        Ok(())
    }
}

/// 由 (列名, 值) 构造固定字段
pub(crate) fn fixed(pairs: &[(&str, i64)]) -> RowValues {
    pairs
        .iter()
        .map(|(column, id)| (column.to_string(), id.to_string()))
        .collect()
}
