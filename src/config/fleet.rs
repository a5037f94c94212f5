use crate::domain::model::{ServiceKind, ServiceSpec};
use crate::utils::error::{GreetError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// The set of listeners to run and the address they bind on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

impl Default for FleetConfig {
    /// beta, charlie and fabrizzio. fabrizzio moves to 3002 so it no longer
    /// collides with beta.
    fn default() -> Self {
        Self {
            host: default_host(),
            services: vec![
                ServiceSpec::greeting("beta", 3001, "¡Hola desde Beta!"),
                ServiceSpec::greeting("charlie", 3003, "¡Hola desde Charlie!"),
                ServiceSpec::greeting("fabrizzio", 3002, "¡Hola Fabrizzio!"),
            ],
        }
    }
}

impl FleetConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GreetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| GreetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GREETING})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::{Captures, Regex};
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Bind host precedence: `--host`, then `HOST`, then the file (or default).
    pub fn resolve_host(self, cli: Option<String>, env: Option<String>) -> Self {
        match cli.or(env).filter(|host| !host.trim().is_empty()) {
            Some(host) => self.with_host(host),
            None => self,
        }
    }

    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.iter().find(|s| s.name == name)
    }
}

impl Validate for FleetConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;

        if self.services.is_empty() {
            return Err(GreetError::ConfigError {
                message: "at least one service must be configured".to_string(),
            });
        }

        let mut names: HashMap<&str, usize> = HashMap::new();
        let mut ports: HashMap<u16, &str> = HashMap::new();

        for (index, service) in self.services.iter().enumerate() {
            validate_non_empty_string(&format!("services[{}].name", index), &service.name)?;

            if let Some(previous) = names.insert(&service.name, index) {
                return Err(GreetError::InvalidConfigValueError {
                    field: format!("services[{}].name", index),
                    value: service.name.clone(),
                    reason: format!("name already used by services[{}]", previous),
                });
            }

            let greeting_field = format!("services[{}].greeting", index);
            match service.kind {
                ServiceKind::Greeting => {
                    validate_required_field(&greeting_field, &service.greeting)?;
                }
                ServiceKind::Lambda => {
                    if let Some(greeting) = &service.greeting {
                        return Err(GreetError::InvalidConfigValueError {
                            field: greeting_field,
                            value: greeting.clone(),
                            reason: "lambda services answer with a fixed payload; remove the greeting"
                                .to_string(),
                        });
                    }
                }
            }

            // port 0 為臨時埠，不檢查衝突
            if service.port != 0 {
                if let Some(first) = ports.insert(service.port, &service.name) {
                    return Err(GreetError::PortConflict {
                        port: service.port,
                        first: first.to_string(),
                        second: service.name.clone(),
                    });
                }
            }
        }

        tracing::debug!("✅ Fleet configuration validation passed");
        Ok(())
    }
}
