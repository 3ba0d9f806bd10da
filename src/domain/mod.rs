// Domain layer: the presence rules, resolved-config model and the variable-source port.

pub mod key_presence;
pub mod model;
pub mod ports;
