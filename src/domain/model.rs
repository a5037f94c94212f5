use serde::{Deserialize, Serialize};

/// What a listener answers on `GET /`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    /// Plain text greeting.
    #[default]
    Greeting,
    /// The fixed serverless JSON payload with CORS headers.
    Lambda,
}

/// One listener of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub port: u16,
    #[serde(default)]
    pub greeting: Option<String>,
    #[serde(default)]
    pub kind: ServiceKind,
}

impl ServiceSpec {
    pub fn greeting(name: impl Into<String>, port: u16, greeting: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            port,
            greeting: Some(greeting.into()),
            kind: ServiceKind::Greeting,
        }
    }

    pub fn lambda(name: impl Into<String>, port: u16) -> Self {
        Self {
            name: name.into(),
            port,
            greeting: None,
            kind: ServiceKind::Lambda,
        }
    }
}

/// How the probe turns a response body into the displayed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Show the body verbatim.
    #[default]
    Text,
    /// Show the `message` field of a JSON object body.
    Json,
}

/// One endpoint together with the two display slots it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub endpoint: String,
    pub result_element: String,
    pub response_element: String,
    pub format: ResponseFormat,
}

impl ProbeTarget {
    pub fn new(
        endpoint: impl Into<String>,
        result_element: impl Into<String>,
        response_element: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            result_element: result_element.into(),
            response_element: response_element.into(),
            format: ResponseFormat::Text,
        }
    }

    pub fn with_format(mut self, format: ResponseFormat) -> Self {
        self.format = format;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success { duration_ms: u64, message: String },
    Failed { status: u16, message: String },
    Error { error: String },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }
}

/// The two strings written into a target's slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub result: String,
    pub response: String,
}
