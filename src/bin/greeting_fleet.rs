use clap::Parser;
use greeting_services::utils::{logger, validation::Validate};
use greeting_services::{Fleet, FleetConfig};

#[derive(Parser)]
#[command(name = "greeting-fleet")]
#[command(about = "Run the greeting listeners")]
struct Args {
    /// Path to TOML configuration file (built-in services when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Address to bind on; overrides the config file and the HOST variable
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the services that would start without binding anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match FleetConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => FleetConfig::default(),
    };

    // 命令列 > 環境變數 > 設定檔
    let config = config.resolve_host(args.host.clone(), std::env::var("HOST").ok());

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be bound");
        return Ok(());
    }

    let fleet = match Fleet::bind(&config).await {
        Ok(fleet) => fleet,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = fleet.serve(shutdown_signal()).await {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ All services stopped");
    Ok(())
}

fn display_config_summary(config: &FleetConfig) {
    tracing::info!("📋 {} service(s) on {}", config.services.len(), config.host);
    for service in &config.services {
        tracing::info!(
            "   • {} ({:?}) port {}",
            service.name,
            service.kind,
            service.port
        );
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 無法監聽 Ctrl+C 時持續運行
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
