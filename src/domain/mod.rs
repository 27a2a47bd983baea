// Domain layer: grid/word model and the ports the application talks through.

pub mod model;
pub mod ports;
