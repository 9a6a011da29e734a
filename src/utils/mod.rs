pub mod error;
pub mod log_sanitizer;

pub use error::*;
pub use log_sanitizer::*;
