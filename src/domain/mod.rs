// Domain layer: the landscape model and the renderer port. Nothing here talks to the outside world.

pub mod model;
pub mod ports;
