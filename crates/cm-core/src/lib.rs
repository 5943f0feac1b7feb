//! Shared configuration, input and error types for cmerge.

pub mod config;
pub mod error;
pub mod source;

pub use config::MinifyConfig;
pub use error::{Expected, ExpectingError, MinifyError, Result};
pub use source::SourceUnit;
