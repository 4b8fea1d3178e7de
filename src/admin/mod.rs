// ==========================================
// 学校管理后台 - 管理画面资源
// ==========================================
// 职责: 路由 → 资源（目标表 / 固定字段 / 校验契约）
// 资源: 校舎(schools) → 学年(sclasses) → 学生(students)
// ==========================================

pub mod resource;
pub mod routes;
pub mod school;
pub mod sclass;
pub mod student;

pub use resource::{CrudResource, ParentRef};
pub use routes::AdminRoute;
pub use school::{SchoolRequest, SchoolResource};
pub use sclass::{SClassRequest, SClassResource};
pub use student::{StudentRequest, StudentResource};
