//! Backward, chunked line reading.
//!
//! This module reads a file from its tail toward its head through a bounded
//! working buffer and reconstructs lines as it goes. It is split into three
//! layers that compose top-down:
//!
//! - [`reader`] - the public [`ReversedReader`] surface
//! - `assembler` - turns reverse-scanned bytes into lines, handling LF/CRLF
//! - `chunk` - loads fixed-size chunks moving backward through the file
//!
//! plus [`validation`] for up-front path checks.

mod assembler;
mod chunk;
pub mod reader;
pub mod validation;

pub use reader::ReversedReader;
pub use validation::validate_file_path;
