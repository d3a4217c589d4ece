//! Core types for the import pipeline

mod config;
mod record;
mod result;
mod value;

pub use config::*;
pub use record::*;
pub use result::*;
pub use value::*;
