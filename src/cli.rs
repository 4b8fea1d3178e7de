// ==========================================
// 学校管理后台 - 命令行参数定义
// ==========================================

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "school-backoffice",
    version,
    about = "学校管理后台 - 校舎/学年/学生 CSV 批量导入",
    long_about = "将 CSV 文件批量导入到校舎、学年、学生表。\n\n\
                  每个文件在单一事务中导入：任一行失败则整体回滚。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// 数据库文件路径（默认: 用户数据目录，或环境变量 SCHOOL_BACKOFFICE_DB_PATH）
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// 日志输出格式
    #[arg(long = "log-format", value_enum, default_value = "text", global = true)]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// 初始化数据库结构（幂等）
    InitDb,

    /// 导入 CSV 文件
    Import(ImportArgs),

    /// 读取或写入全局配置
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// 导入路由，例如 master_schools/import 或 master_schools/1/classes/2/students/import
    #[arg(long = "route", value_name = "ROUTE")]
    pub route: String,

    /// CSV 文件路径
    #[arg(long = "file", value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// 读取配置值
    Get {
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// 写入配置值
    Set {
        #[arg(value_name = "KEY")]
        key: String,
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// 输出全部全局配置（JSON）
    Show,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}
