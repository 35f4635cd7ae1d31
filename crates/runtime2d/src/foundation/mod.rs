//! Foundation utilities: math primitives and logging.

pub mod logging;
pub mod math;
