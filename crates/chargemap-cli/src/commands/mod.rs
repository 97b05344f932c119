pub mod charge;
pub mod color;
pub mod ramp;
