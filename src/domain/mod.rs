// Domain layer: the tenant group model, the payload builder and the API port.

pub mod model;
pub mod payload;
pub mod ports;
