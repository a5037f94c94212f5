// Domain layer: service and probe models plus the display port.

pub mod model;
pub mod ports;
