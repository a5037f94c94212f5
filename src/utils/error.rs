use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreetError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Port {port} is assigned to both '{first}' and '{second}'")]
    PortConflict {
        port: u16,
        first: String,
        second: String,
    },

    #[error("Failed to bind service '{service}' on {addr}: {source}")]
    BindError {
        service: String,
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Service '{service}' stopped unexpectedly: {message}")]
    ServiceError { service: String, message: String },

    #[error("Unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}

impl GreetError {
    /// 給使用者看的簡短錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            GreetError::HttpError(_) => "Could not reach the endpoint".to_string(),
            GreetError::IoError(e) => format!("File or network operation failed: {}", e),
            GreetError::SerializationError(_) => "Received malformed JSON".to_string(),
            GreetError::ConfigError { message } => format!("Invalid configuration: {}", message),
            GreetError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            GreetError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            GreetError::PortConflict { port, .. } => {
                format!("Two services are configured on port {}", port)
            }
            GreetError::BindError { service, addr, .. } => {
                format!("Service '{}' could not listen on {}", service, addr)
            }
            GreetError::ServiceError { service, .. } => {
                format!("Service '{}' stopped unexpectedly", service)
            }
            GreetError::UnexpectedResponse { reason } => reason.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GreetError::HttpError(_) => "Check the endpoint URL and your network connection",
            GreetError::IoError(_) => "Check file paths and permissions",
            GreetError::SerializationError(_) | GreetError::UnexpectedResponse { .. } => {
                "Check that the endpoint returns the expected format (try --format text)"
            }
            GreetError::ConfigError { .. }
            | GreetError::InvalidConfigValueError { .. }
            | GreetError::MissingConfigError { .. } => "Fix the configuration file or flags",
            GreetError::PortConflict { .. } => "Give every service its own port",
            GreetError::BindError { .. } => {
                "Make sure the port is free and the host address exists on this machine"
            }
            GreetError::ServiceError { .. } => "Restart the fleet; run with --verbose for details",
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            GreetError::ConfigError { .. }
                | GreetError::InvalidConfigValueError { .. }
                | GreetError::MissingConfigError { .. }
                | GreetError::PortConflict { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GreetError>;
