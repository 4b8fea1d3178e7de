// ==========================================
// 学校管理后台 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入流程所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// 配置层 Result
pub type ConfigResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入流程所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取导入键列（区分新增/更新）
    ///
    /// # 默认值
    /// - "id"
    async fn get_import_key(&self) -> ConfigResult<String>;

    /// 获取导入成功消息（i18n 键）
    ///
    /// # 默认值
    /// - "import.data_imported"
    async fn get_success_message(&self) -> ConfigResult<String>;

    /// 获取 CSV 分隔符
    ///
    /// # 默认值
    /// - b','（配置值 "\t" 或 "tab" 表示制表符）
    async fn get_csv_delimiter(&self) -> ConfigResult<u8>;

    /// 获取界面语言
    ///
    /// # 默认值
    /// - "en"
    async fn get_locale(&self) -> ConfigResult<String>;
}
