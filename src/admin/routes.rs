// ==========================================
// 学校管理后台 - 路由解析
// ==========================================
// master_schools[/import]
// master_schools/{school_id}/classes[/import]
// master_schools/{school_id}/classes/{class_id}/students[/import]
// ==========================================

use crate::admin::resource::CrudResource;
use crate::admin::school::SchoolResource;
use crate::admin::sclass::SClassResource;
use crate::admin::student::StudentResource;

/// 路由前缀（可省略）
pub const ROUTE_PREFIX: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRoute {
    Schools {
        import: bool,
    },
    Classes {
        school_id: i64,
        import: bool,
    },
    Students {
        school_id: i64,
        class_id: i64,
        import: bool,
    },
}

fn parse_id(segment: &str) -> Option<i64> {
    segment.parse::<i64>().ok().filter(|id| *id > 0)
}

impl AdminRoute {
    /// 解析路由路径，无法识别时返回 None
    pub fn parse(path: &str) -> Option<AdminRoute> {
        let mut segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if segments.first() == Some(&ROUTE_PREFIX) {
            segments.remove(0);
        }

        let import = segments.last() == Some(&"import");
        if import {
            segments.pop();
        }

        match segments.as_slice() {
            ["master_schools"] => Some(AdminRoute::Schools { import }),
            ["master_schools", school_id, "classes"] => Some(AdminRoute::Classes {
                school_id: parse_id(school_id)?,
                import,
            }),
            ["master_schools", school_id, "classes", class_id, "students"] => {
                Some(AdminRoute::Students {
                    school_id: parse_id(school_id)?,
                    class_id: parse_id(class_id)?,
                    import,
                })
            }
            _ => None,
        }
    }

    pub fn is_import(&self) -> bool {
        match self {
            AdminRoute::Schools { import }
            | AdminRoute::Classes { import, .. }
            | AdminRoute::Students { import, .. } => *import,
        }
    }

    /// 路由对应的资源
    pub fn resource(&self) -> Box<dyn CrudResource> {
        match *self {
            AdminRoute::Schools { .. } => Box::new(SchoolResource),
            AdminRoute::Classes { school_id, .. } => Box::new(SClassResource { school_id }),
            AdminRoute::Students {
                school_id,
                class_id,
                ..
            } => Box::new(StudentResource {
                school_id,
                class_id,
            }),
        }
    }

    /// 规范化路径（不含前缀）
    pub fn path(&self) -> String {
        let base = match self {
            AdminRoute::Schools { .. } => "master_schools".to_string(),
            AdminRoute::Classes { school_id, .. } => {
                format!("master_schools/{}/classes", school_id)
            }
            AdminRoute::Students {
                school_id,
                class_id,
                ..
            } => format!("master_schools/{}/classes/{}/students", school_id, class_id),
        };
        if self.is_import() {
            format!("{}/import", base)
        } else {
            base
        }
    }
}
