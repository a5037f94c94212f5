use crate::domain::model::{ProbeOutcome, ProbeTarget};
use async_trait::async_trait;

/// Named text slots the probe writes its results into.
pub trait DisplaySink: Send + Sync {
    fn set_text(&self, element_id: &str, text: &str);
}

#[async_trait]
pub trait Probe: Send + Sync {
    /// Issue one request against the target and time it. Never fails; failures are
    /// part of the outcome.
    async fn measure(&self, target: &ProbeTarget) -> ProbeOutcome;
}
