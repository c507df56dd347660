//! CML parsing: cursor, limits and the line grammar

pub mod config;
pub mod cursor;
pub mod line;

pub use config::{ParserConfig, DEFAULT_MAX_DEPTH, DEFAULT_MAX_SIZE};
pub use line::Parser;
