// ==========================================
// 学校管理后台 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段的接口（不包含实现）
// ==========================================

use crate::domain::{ImportAction, ImportSummary, RowValues, UploadedFile};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::UploadedDataset;
use crate::importer::validation::RuleSet;
use async_trait::async_trait;
use std::sync::Arc;

// ==========================================
// RecordImporter Trait
// ==========================================
// 用途: 导入主接口（一次调用 = 一个上传文件 = 一个事务）
// 实现者: CsvImporterImpl
#[async_trait]
pub trait RecordImporter: Send + Sync {
    /// 导入上传文件
    ///
    /// # 参数
    /// - file: 上传文件
    /// - fixed_fields: 合并进每一行的固定字段（如路由中的 class_id），覆盖文件中的同名值
    ///
    /// # 返回
    /// - Ok(ImportSummary): 全部行成功并已提交
    /// - Err: 文件错误（未开启事务）或首个失败行的错误（已整体回滚）
    async fn import(
        &self,
        file: &UploadedFile,
        fixed_fields: &RowValues,
    ) -> ImportResult<ImportSummary>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析上传文件为表头 + 惰性行序列
    ///
    /// # 返回
    /// - Ok(UploadedDataset): 表头已校验（非空、列名唯一）
    /// - Err: 格式不支持、读取失败、表头非法
    fn parse(&self, file: &UploadedFile) -> ImportResult<UploadedDataset>;
}

// ==========================================
// RuleSetResolver Trait
// ==========================================
// 用途: 按导入动作查找校验规则集（每次导入调用解析一次）
// 实现者: ValidationRegistry，以及任意 Fn(ImportAction) -> Option<Arc<RuleSet>>
pub trait RuleSetResolver: Send + Sync {
    /// 查找动作对应的规则集
    ///
    /// # 返回
    /// - Some(RuleSet): 使用该规则集校验
    /// - None: 不做校验
    fn resolve(&self, action: ImportAction) -> Option<Arc<RuleSet>>;
}

impl<F> RuleSetResolver for F
where
    F: Fn(ImportAction) -> Option<Arc<RuleSet>> + Send + Sync,
{
    fn resolve(&self, action: ImportAction) -> Option<Arc<RuleSet>> {
        self(action)
    }
}
