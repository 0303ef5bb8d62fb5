// Domain layer: inbound submission models and the outbound delivery port.

pub mod model;
pub mod ports;
