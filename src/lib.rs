//! # pkfield
//!
//! Extracts the field delimited by `p: ` and ` k:` from every line of a text file that starts
//! with a digit.
//!
//! The core is [`extraction`]: a pure, lazy pass over the lines of a document. [`processor`]
//! wraps it with document loading and output formatting, and [`config`] layers settings over
//! the built-in defaults.

pub mod config;
pub mod error;
pub mod extraction;
pub mod processor;

pub use error::{ConfigError, ProcessingError};
pub use extraction::{extract, extract_document, extract_line, LineExtractor, Markers};
