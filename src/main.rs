use clap::Parser;
use sentiment_api::core::ConfigProvider;
use sentiment_api::utils::error::{ErrorSeverity, SentimentError};
use sentiment_api::utils::logger::{self, LogFormat};
use sentiment_api::utils::validation::Validate;
use sentiment_api::{load_engine, server, CliConfig, TomlConfig};
use std::sync::Arc;

fn exit_with(e: &SentimentError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

async fn run<C: ConfigProvider + Validate>(config: C) {
    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // 啟動時載入模型，任何檔案缺失都直接結束
    let engine = match load_engine(&config).await {
        Ok(engine) => engine,
        Err(e) => exit_with(&e),
    };

    if let Err(e) = server::startup(&config, Arc::new(engine)).await {
        exit_with(&e);
    }
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.config.clone() {
        Some(path) => {
            let mut config = match TomlConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };
            config.apply_cli_overrides(&cli);

            init_logging(config.log_format(), config.verbose());
            tracing::info!("📁 Loaded configuration from: {}", path);
            run(config).await;
        }
        None => {
            init_logging(cli.log_format(), cli.verbose);
            run(cli).await;
        }
    }
}

fn init_logging(format: LogFormat, verbose: bool) {
    logger::init_logger(format, verbose);
    tracing::info!("Starting sentiment analysis API server");
}
