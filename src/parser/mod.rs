pub mod reading;

pub use reading::{parse_glucose, parse_pressure};
