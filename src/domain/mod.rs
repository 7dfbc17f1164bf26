// Domain layer: board model, transport text and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod text;
