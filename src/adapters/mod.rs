// Adapters layer: concrete display sinks for probe results.

pub mod sink;
