//! Utility modules

pub mod logging;
pub mod path;
pub mod time;

pub use path::expand_inputs;
pub use time::{format_timestamp, parse_seconds};
