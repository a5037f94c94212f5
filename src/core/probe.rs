use crate::core::{DisplaySink, Probe, ProbeOutcome, ProbeTarget, Rendered, ResponseFormat};
use crate::utils::error::{GreetError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

pub const DEFAULT_ENDPOINT1: &str = "https://api.example.com/alpha";
pub const DEFAULT_ENDPOINT2: &str = "https://api.example.com/charlie";

/// Two endpoints, written to the `result1`/`response1` and `result2`/`response2` slots.
pub fn default_targets() -> Vec<ProbeTarget> {
    vec![
        ProbeTarget::new(DEFAULT_ENDPOINT1, "result1", "response1"),
        ProbeTarget::new(DEFAULT_ENDPOINT2, "result2", "response2"),
    ]
}

impl ResponseFormat {
    /// Turn a successful response body into the displayed message.
    pub fn extract(&self, body: &str) -> Result<String> {
        match self {
            ResponseFormat::Text => Ok(body.to_string()),
            ResponseFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(body)?;
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .ok_or_else(|| GreetError::UnexpectedResponse {
                        reason: "response has no string \"message\" field".to_string(),
                    })
            }
        }
    }
}

/// Whole milliseconds, rounded half up.
pub fn round_millis(elapsed: Duration) -> u64 {
    (elapsed.as_secs_f64() * 1000.0).round() as u64
}

pub fn render(outcome: &ProbeOutcome) -> Rendered {
    match outcome {
        ProbeOutcome::Success {
            duration_ms,
            message,
        } => Rendered {
            result: format!("Response time: {} ms", duration_ms),
            response: format!("Message: \"{}\"", message),
        },
        ProbeOutcome::Failed { status, message } => Rendered {
            result: format!("Failed with status: {}", status),
            response: format!("Message: \"{}\"", message),
        },
        ProbeOutcome::Error { error } => Rendered {
            result: format!("Error: {}", error),
            response: "Message: Unable to fetch response.".to_string(),
        },
    }
}

/// `reqwest`-backed probe.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
}

impl HttpProbe {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn measure(&self, target: &ProbeTarget) -> ProbeOutcome {
        let start = Instant::now();

        let response = match self.client.get(&target.endpoint).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("request to {} failed: {}", target.endpoint, e);
                return ProbeOutcome::Error {
                    error: e.to_string(),
                };
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ProbeOutcome::Error {
                    error: e.to_string(),
                }
            }
        };

        if !status.is_success() {
            return ProbeOutcome::Failed {
                status: status.as_u16(),
                message: body,
            };
        }

        // 計時包含讀取 body
        let duration_ms = round_millis(start.elapsed());

        match target.format.extract(&body) {
            Ok(message) => ProbeOutcome::Success {
                duration_ms,
                message,
            },
            Err(e) => ProbeOutcome::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Measure one target and write both slots.
pub async fn run<P, S>(probe: &P, target: &ProbeTarget, sink: &S) -> ProbeOutcome
where
    P: Probe + ?Sized,
    S: DisplaySink + ?Sized,
{
    let outcome = probe.measure(target).await;
    match &outcome {
        ProbeOutcome::Success { duration_ms, .. } => {
            tracing::info!("✅ {} answered in {} ms", target.endpoint, duration_ms)
        }
        ProbeOutcome::Failed { status, .. } => {
            tracing::warn!("⚠️ {} answered with status {}", target.endpoint, status)
        }
        ProbeOutcome::Error { error } => {
            tracing::error!("❌ {} unreachable: {}", target.endpoint, error)
        }
    }

    let rendered = render(&outcome);
    sink.set_text(&target.result_element, &rendered.result);
    sink.set_text(&target.response_element, &rendered.response);
    outcome
}

/// Run every target concurrently. Outcomes come back in target order; the order in
/// which slots get written is unspecified.
pub async fn run_all<P, S>(probe: Arc<P>, targets: Vec<ProbeTarget>, sink: Arc<S>) -> Vec<ProbeOutcome>
where
    P: Probe + 'static,
    S: DisplaySink + 'static,
{
    let mut outcomes: Vec<Option<ProbeOutcome>> = vec![None; targets.len()];
    let mut tasks = JoinSet::new();

    for (index, target) in targets.into_iter().enumerate() {
        let probe = Arc::clone(&probe);
        let sink = Arc::clone(&sink);
        tasks.spawn(async move { (index, run(probe.as_ref(), &target, sink.as_ref()).await) });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => outcomes[index] = Some(outcome),
            Err(e) => tracing::error!("probe task aborted: {}", e),
        }
    }

    outcomes
        .into_iter()
        .map(|outcome| {
            outcome.unwrap_or_else(|| ProbeOutcome::Error {
                error: "probe task aborted".to_string(),
            })
        })
        .collect()
}
