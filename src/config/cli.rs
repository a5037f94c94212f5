use crate::core::probe::{DEFAULT_ENDPOINT1, DEFAULT_ENDPOINT2};
use crate::domain::model::{ProbeTarget, ResponseFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "greeting-probe")]
#[command(about = "Measure how long greeting endpoints take to answer")]
pub struct CliConfig {
    /// First endpoint; its results go to the result1/response1 slots
    #[arg(long, default_value = DEFAULT_ENDPOINT1)]
    pub endpoint1: String,

    /// Second endpoint; its results go to the result2/response2 slots
    #[arg(long, default_value = DEFAULT_ENDPOINT2)]
    pub endpoint2: String,

    /// How to read the message out of a successful response
    #[arg(long, value_enum, default_value_t = ResponseFormat::Text)]
    pub format: ResponseFormat,

    /// Give up on a request after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn targets(&self) -> Vec<ProbeTarget> {
        vec![
            ProbeTarget::new(&self.endpoint1, "result1", "response1").with_format(self.format),
            ProbeTarget::new(&self.endpoint2, "result2", "response2").with_format(self.format),
        ]
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint1", &self.endpoint1)?;
        validate_url("endpoint2", &self.endpoint2)?;
        if let Some(timeout) = self.timeout_secs {
            validate_range("timeout_secs", timeout, 1, 300)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["greeting-probe"]);
        assert_eq!(config.endpoint1, "https://api.example.com/alpha");
        assert_eq!(config.endpoint2, "https://api.example.com/charlie");
        assert_eq!(config.format, ResponseFormat::Text);
        assert!(config.timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_targets_follow_flags() {
        let config = CliConfig::parse_from([
            "greeting-probe",
            "--endpoint1",
            "http://localhost:3001/",
            "--format",
            "json",
            "--timeout-secs",
            "5",
        ]);
        let targets = config.targets();
        assert_eq!(targets[0].endpoint, "http://localhost:3001/");
        assert_eq!(targets[0].format, ResponseFormat::Json);
        assert_eq!(targets[1].result_element, "result2");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_help_describes_endpoints() {
        use clap::CommandFactory;

        let help = CliConfig::command().render_help().to_string();
        assert!(help.contains("First endpoint"));
        assert!(help.contains("Second endpoint"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = CliConfig::parse_from(["greeting-probe", "--endpoint2", "ftp://x"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["greeting-probe", "--timeout-secs", "0"]);
        assert!(config.validate().is_err());
    }
}
