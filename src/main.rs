// ==========================================
// 学校管理后台 - 命令行主入口
// ==========================================

use anyhow::bail;
use clap::Parser;
use school_backoffice::app::{get_default_db_path, AppState};
use school_backoffice::config::ImportConfigReader;
use school_backoffice::importer::{read_upload, ImportError};
use school_backoffice::i18n;
use school_backoffice::logging::{self, LogFormat};

mod cli;

use crate::cli::{Cli, Command, ConfigCommand, ImportArgs, LogFormatArg};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_with_format(match cli.log_format {
        LogFormatArg::Text => LogFormat::Text,
        LogFormatArg::Json => LogFormat::Json,
    });

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = match cli.db_path {
        Some(path) => path.to_string_lossy().to_string(),
        None => get_default_db_path(),
    };

    tracing::info!("{} v{}", school_backoffice::APP_NAME, school_backoffice::VERSION);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;
    let locale = state.config.get_locale().await.map_err(|e| anyhow::anyhow!(e))?;
    i18n::set_locale(&locale);

    match cli.command {
        Command::InitDb => {
            println!("{}", i18n::t("common.success"));
        }
        Command::Import(args) => run_import(&state, &args).await?,
        Command::Config(command) => run_config(&state, command)?,
    }
    Ok(())
}

async fn run_import(state: &AppState, args: &ImportArgs) -> anyhow::Result<()> {
    let upload = read_upload(&args.file).map_err(|e| match e {
        ImportError::FileNotFound(path) => {
            anyhow::anyhow!(i18n::t_with_args("import.file_not_found", &[("path", path.as_str())]))
        }
        other => anyhow::Error::new(other),
    })?;

    let response = state
        .import_api
        .import(&args.route, Some(upload))
        .await?;

    println!("{}", response.message);
    let summary = &response.summary;
    let (count, inserted, updated) = (
        summary.total_rows.to_string(),
        summary.inserted.to_string(),
        summary.updated.to_string(),
    );
    println!(
        "{}",
        i18n::t_with_args(
            "import.data_imported_count",
            &[
                ("count", count.as_str()),
                ("inserted", inserted.as_str()),
                ("updated", updated.as_str()),
            ],
        )
    );
    Ok(())
}

fn run_config(state: &AppState, command: ConfigCommand) -> anyhow::Result<()> {
    match command {
        ConfigCommand::Get { key } => {
            let value = state
                .config
                .get_global_config_value(&key)
                .map_err(|e| anyhow::anyhow!(e))?;
            match value {
                Some(v) => println!("{}", v),
                None => bail!("配置不存在: {}", key),
            }
        }
        ConfigCommand::Set { key, value } => {
            state
                .config
                .set_global_config_value(&key, &value)
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", i18n::t("common.success"));
        }
        ConfigCommand::Show => {
            let snapshot = state
                .config
                .get_config_snapshot()
                .map_err(|e| anyhow::anyhow!(e))?;
            println!("{}", snapshot);
        }
    }
    Ok(())
}
