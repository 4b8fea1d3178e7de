// ==========================================
// 学校管理后台 - 导入API
// ==========================================
// 职责: POST <resource>/import 的入口
// 流程: 路由解析 → 上传文件检查 → 上级资源存在性 → 构建导入器 → 导入 → 成功消息
// ==========================================

use crate::admin::{AdminRoute, CrudResource};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::{ImportSummary, UploadedFile};
use crate::i18n::t_in_locale;
use crate::importer::{
    CsvImporterImpl, CsvParser, ImportError, RecordImporter, ValidationRegistry,
};
use crate::repository::SqliteTableTarget;
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 成功消息（已按配置语言翻译）
    pub message: String,
    /// 导入汇总
    pub summary: ImportSummary,
}

/// 导入API
pub struct ImportApi {
    conn: Arc<Mutex<Connection>>,
    config: Arc<dyn ImportConfigReader>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(conn: Arc<Mutex<Connection>>, config: Arc<dyn ImportConfigReader>) -> Self {
        Self { conn, config }
    }

    /// 导入上传文件
    ///
    /// # 参数
    /// - route: 导入路由（如 "master_schools/3/classes/import"）
    /// - file: 上传字段 import 的内容（未上传时为 None）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 全部行已提交
    /// - Err(ApiError::Import): 导入失败（已整体回滚），错误原样透传
    #[instrument(skip(self, file), fields(route = %route))]
    pub async fn import(
        &self,
        route: &str,
        file: Option<UploadedFile>,
    ) -> ApiResult<ImportApiResponse> {
        let admin_route = AdminRoute::parse(route)
            .filter(AdminRoute::is_import)
            .ok_or_else(|| ApiError::RouteNotFound(route.to_string()))?;

        let file = file.ok_or(ImportError::FileMissing)?;
        if file.bytes.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "上传文件为空: {}",
                file.file_name
            )));
        }

        let resource = admin_route.resource();
        self.ensure_parents_exist(resource.as_ref())?;

        // 读取配置
        let import_key = self.config.get_import_key().await.map_err(config_error)?;
        let delimiter = self.config.get_csv_delimiter().await.map_err(config_error)?;
        let success_key = self.config.get_success_message().await.map_err(config_error)?;
        let locale = self.config.get_locale().await.map_err(config_error)?;

        // 组装导入器
        let target = SqliteTableTarget::new(resource.table()).with_key_column(import_key);
        let mut registry = ValidationRegistry::new();
        resource.register_validation(&mut registry)?;

        let importer = CsvImporterImpl::new(
            self.conn.clone(),
            Arc::new(target),
            Box::new(CsvParser::new(delimiter)),
        )
        .with_resolver(Arc::new(registry));

        let summary = importer.import(&file, &resource.fixed_fields()).await?;

        info!(
            route = %admin_route.path(),
            entity = resource.entity_name(),
            inserted = summary.inserted,
            updated = summary.updated,
            "导入成功"
        );

        Ok(ImportApiResponse {
            message: t_in_locale(&success_key, &locale),
            summary,
        })
    }

    /// 检查路由中的上级资源是否存在
    fn ensure_parents_exist(&self, resource: &dyn CrudResource) -> ApiResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| ApiError::DatabaseError(format!("锁获取失败: {}", e)))?;

        for parent in resource.parents() {
            let sql = format!("SELECT 1 FROM \"{}\" WHERE id = ?1", parent.table);
            let found = conn
                .query_row(&sql, [parent.id], |_row| Ok(true))
                .optional()?
                .unwrap_or(false);
            if !found {
                return Err(ApiError::NotFound(format!(
                    "{}(id={})不存在",
                    parent.table, parent.id
                )));
            }
        }
        Ok(())
    }
}

fn config_error(err: Box<dyn std::error::Error + Send + Sync>) -> ApiError {
    ApiError::ConfigError(err.to_string())
}
