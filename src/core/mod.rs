pub mod fleet;
pub mod lambda;
pub mod probe;
pub mod service;

pub use crate::domain::model::{
    ProbeOutcome, ProbeTarget, Rendered, ResponseFormat, ServiceKind, ServiceSpec,
};
pub use crate::domain::ports::{DisplaySink, Probe};
pub use crate::utils::error::Result;
