//! # revlines - Reverse Line Reader
//!
//! Reads text files line by line starting with the last line and finishing with
//! the first, without loading the file into memory.
//!
//! ## Features
//!
//! - **Bounded Memory**: One working buffer and one line buffer, 1 MiB each by default
//! - **LF and CRLF**: Terminators are stripped; CRLF files read like LF files
//! - **Any Seekable Source**: Files, or anything implementing `Read + Seek`
//! - **Lazy**: Lines are produced on demand through a pull API or an `Iterator`
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Buffer and line-size bounds, optionally loaded from TOML
//! - [`reverse`] - Chunk loading, line assembly and the public reader

// Core modules
pub mod config;
pub mod error;

// Reverse reading engine
pub mod reverse;

// Re-export commonly used types for convenience
pub use config::ReaderConfig;
pub use error::{Result, RevLinesError};
pub use reverse::ReversedReader;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
