//! Configuration sources, one module per layer.

pub mod environment;
pub mod explicit_file;
pub mod user_file;
