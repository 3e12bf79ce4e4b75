pub mod ports;
pub mod range;
