// ==========================================
// 学校管理后台 - CSV 导入器实现
// ==========================================
// 状态: Idle → FileRead → ColumnsResolved → RowLoop → Committed | RolledBack
// 流程: 解析 → 计算安全列 → 解析规则集 → 开启事务
//       → 逐行（合并固定字段 → 清洗 → 分类 → 校验 → 落库）→ 提交
// 红线: 任一行失败 → 整体回滚，错误原样返回；不做部分提交、不重试
// ==========================================

use crate::domain::{ImportAction, ImportSummary, RowClassification, RowValues, UploadedFile};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UploadedDataset;
use crate::importer::importer_trait::{FileParser, RecordImporter, RuleSetResolver};
use crate::importer::persistence::PersistenceApplier;
use crate::importer::row_classifier::classify;
use crate::importer::schema_matcher::{compute_safe_columns, merge_fixed_fields, sanitize_row};
use crate::importer::validation::{validate_row, RuleSet};
use crate::repository::ImportTarget;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::Connection;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CsvImporterImpl - 导入编排
// ==========================================
pub struct CsvImporterImpl {
    // 共享连接（整个事务期间持有锁）
    conn: Arc<Mutex<Connection>>,

    // 写入目标
    target: Arc<dyn ImportTarget>,

    // 规则集解析（None 表示不校验）
    resolver: Option<Arc<dyn RuleSetResolver>>,

    // 文件解析器
    file_parser: Box<dyn FileParser>,
}

impl CsvImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - conn: 共享数据库连接
    /// - target: 写入目标
    /// - file_parser: 文件解析器
    pub fn new(
        conn: Arc<Mutex<Connection>>,
        target: Arc<dyn ImportTarget>,
        file_parser: Box<dyn FileParser>,
    ) -> Self {
        Self {
            conn,
            target,
            resolver: None,
            file_parser,
        }
    }

    /// 指定规则集解析器
    pub fn with_resolver(mut self, resolver: Arc<dyn RuleSetResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    fn resolve_rule_set(&self, action: ImportAction) -> Option<Arc<RuleSet>> {
        self.resolver.as_ref().and_then(|r| r.resolve(action))
    }

    /// 逐行处理（在调用方的事务内），首个失败即返回
    fn apply_rows(
        &self,
        tx: &Connection,
        dataset: UploadedDataset,
        fixed_fields: &RowValues,
        safe_columns: &BTreeSet<String>,
        (insert_rules, update_rules): (Option<&RuleSet>, Option<&RuleSet>),
        summary: &mut ImportSummary,
    ) -> ImportResult<()> {
        let applier = PersistenceApplier::new(self.target.clone());
        let key_column = self.target.key_column();

        for item in dataset {
            let (row, values) = item?;

            let merged = merge_fixed_fields(values, fixed_fields);
            let sanitized = sanitize_row(merged, safe_columns);
            let classification = classify(&sanitized, key_column);

            let rule_set = match classification.action() {
                ImportAction::Insert => insert_rules,
                ImportAction::Update => update_rules,
            };
            let attributes = validate_row(sanitized, rule_set)
                .map_err(|messages| ImportError::RowValidation { row, messages })?;

            let outcome = match classification {
                RowClassification::Insert => applier.insert(tx, row, attributes)?,
                RowClassification::Update { key_value } => {
                    applier.update(tx, row, &key_value, attributes)?
                }
            };
            summary.record(outcome);
        }
        Ok(())
    }

    /// 同步执行一次导入（锁在此函数内获取与释放）
    fn run_import(
        &self,
        import_id: &str,
        file: &UploadedFile,
        fixed_fields: &RowValues,
    ) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();

        // === 阶段 0: 解析文件（事务开启前）===
        let dataset = self.file_parser.parse(file).map_err(|e| {
            error!(import_id = %import_id, error = %e, "文件解析失败");
            e
        })?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| ImportError::LockError(e.to_string()))?;

        // === 阶段 1: 计算安全列 ===
        // 固定字段视为表头的一部分，保证路由参数能落库
        let mut effective_header: Vec<String> = dataset.header().to_vec();
        for column in fixed_fields.keys() {
            if !effective_header.contains(column) {
                effective_header.push(column.clone());
            }
        }
        let persistable = self.target.persistable_columns(&conn)?;
        let safe_columns = compute_safe_columns(effective_header.as_slice(), persistable.as_slice());

        let dropped: Vec<&String> = effective_header
            .iter()
            .filter(|h| !safe_columns.contains(*h))
            .collect();
        if !dropped.is_empty() {
            warn!(import_id = %import_id, columns = ?dropped, "以下列不属于目标表，已忽略");
        }
        debug!(import_id = %import_id, safe_columns = ?safe_columns, "安全列计算完成");

        // === 阶段 2: 规则集（每次导入只解析一次）===
        let insert_rules = self.resolve_rule_set(ImportAction::Insert);
        let update_rules = self.resolve_rule_set(ImportAction::Update);

        // === 阶段 3: 逐行处理（单一事务）===
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| ImportError::DatabaseTransactionError(e.to_string()))?;

        let mut summary = ImportSummary {
            import_id: import_id.to_string(),
            target: self.target.name().to_string(),
            total_rows: 0,
            inserted: 0,
            updated: 0,
            elapsed_ms: 0,
            imported_at: Utc::now(),
        };

        let rule_sets = (insert_rules.as_deref(), update_rules.as_deref());
        let loop_result = self.apply_rows(
            &tx,
            dataset,
            fixed_fields,
            &safe_columns,
            rule_sets,
            &mut summary,
        );

        match loop_result {
            Ok(()) => {
                tx.commit()
                    .map_err(|e| ImportError::DatabaseTransactionError(e.to_string()))?;
                summary.elapsed_ms = start_time.elapsed().as_millis();
                summary.imported_at = Utc::now();
                info!(
                    import_id = %import_id,
                    target_name = %summary.target,
                    total_rows = summary.total_rows,
                    inserted = summary.inserted,
                    updated = summary.updated,
                    elapsed_ms = summary.elapsed_ms as u64,
                    "导入完成，事务已提交"
                );
                Ok(summary)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback() {
                    error!(import_id = %import_id, error = %rollback_err, "事务回滚失败");
                }
                error!(
                    import_id = %import_id,
                    row = ?e.row(),
                    error = %e,
                    "导入失败，事务已回滚"
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl RecordImporter for CsvImporterImpl {
    #[instrument(skip(self, file, fixed_fields), fields(import_id = tracing::field::Empty, file_name = %file.file_name))]
    async fn import(
        &self,
        file: &UploadedFile,
        fixed_fields: &RowValues,
    ) -> ImportResult<ImportSummary> {
        let import_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("import_id", import_id.as_str());
        info!(
            import_id = %import_id,
            target_name = self.target.name(),
            "开始导入"
        );

        self.run_import(&import_id, file, fixed_fields)
    }
}
