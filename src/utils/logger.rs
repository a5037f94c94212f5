use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Targets whose events the CLI shows by default: the library plus each binary.
const CLI_TARGETS: &[&str] = &["greeting_services", "greeting_fleet", "greeting_probe"];

/// `RUST_LOG`-style directives used when the variable is unset.
pub fn default_cli_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives: Vec<String> = CLI_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect();
    if verbose {
        // 依賴套件保持 info
        directives.push("info".to_string());
    }
    directives.join(",")
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_cli_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_lambda_logger() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("greeting_services=info,lambda=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(false)
                .with_line_number(false)
                .without_time()
                .json(), // CloudWatch 以 JSON 格式解析
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_cover_binaries() {
        let directives = default_cli_directives(false);
        assert_eq!(
            directives,
            "greeting_services=info,greeting_fleet=info,greeting_probe=info"
        );
        assert!(EnvFilter::try_new(&directives).is_ok());
    }

    #[test]
    fn test_verbose_directives_raise_binaries_to_debug() {
        let directives = default_cli_directives(true);
        for target in ["greeting_services", "greeting_fleet", "greeting_probe"] {
            assert!(
                directives.contains(&format!("{}=debug", target)),
                "{} missing from {}",
                target,
                directives
            );
        }
        assert!(directives.ends_with(",info"));
        assert!(EnvFilter::try_new(&directives).is_ok());
    }
}
