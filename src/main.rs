use clap::Parser;
use greeting_services::core::probe;
use greeting_services::utils::{logger, validation::Validate};
use greeting_services::{CliConfig, ConsoleSink, HttpProbe};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting greeting probe");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let prober = match HttpProbe::new(config.timeout()) {
        Ok(prober) => Arc::new(prober),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let outcomes = probe::run_all(prober, config.targets(), Arc::new(ConsoleSink::new())).await;

    let failures = outcomes.iter().filter(|o| !o.is_success()).count();
    if failures > 0 {
        tracing::warn!("{} of {} endpoints did not answer successfully", failures, outcomes.len());
        std::process::exit(2);
    }

    Ok(())
}
