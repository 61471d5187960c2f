//! Pull-based reverse line reader.
//!
//! [`ReversedReader`] is the public surface of the backward scan. It owns the
//! source, drives the chunk loader and line assembler, and hands out one line
//! per call, starting from the last line of the file.

use crate::config::ReaderConfig;
use crate::error::{Result, RevLinesError};
use crate::reverse::assembler::{LineAssembler, LineEnd, LF};
use crate::reverse::chunk::ChunkLoader;
use crate::reverse::validation::validate_file_path;
use bstr::ByteSlice;
use log::debug;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::iter::FusedIterator;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    /// More lines may be produced
    Ready,
    /// The head line was delivered, the source was empty, or a read failed
    Exhausted,
}

/// Reads a seekable source line by line, last line first
///
/// Memory use is bounded by [`ReaderConfig`]: one working buffer of
/// `chunk_size` bytes and one line buffer of fewer than `max_line_bytes` bytes.
/// Lines are returned without their LF or CRLF terminators, and a single
/// trailing LF at the end of the file does not produce an empty first line.
///
/// After an error the reader is exhausted: later calls return `Ok(None)`.
///
/// # Example
/// ```no_run
/// use revlines::ReversedReader;
///
/// let reader = ReversedReader::open("app.log")?;
/// for line in reader {
///     println!("{}", line?);
/// }
/// # Ok::<(), revlines::RevLinesError>(())
/// ```
#[derive(Debug)]
pub struct ReversedReader<R = File> {
    loader: ChunkLoader<R>,
    assembler: LineAssembler,
    state: ReaderState,
    file_len: u64,
    config: ReaderConfig,
}

impl ReversedReader<File> {
    /// Open a file for reverse reading with the default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ReaderConfig::default())
    }

    /// Open a file for reverse reading
    ///
    /// # Errors
    /// * `FileNotFound`, `NotAFile`, `PermissionDenied` from path validation
    /// * `ConfigError` if `config` has a zero bound
    /// * `FileError` if the file length or last byte cannot be read
    pub fn open_with_config(path: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = validate_file_path(path)?;

        debug!("Opened {} for reverse reading", path.display());
        Self::with_config(file, config)
    }
}

impl<R: Read + Seek> ReversedReader<R> {
    /// Wrap any seekable source with the default configuration
    pub fn from_source(source: R) -> Result<Self> {
        Self::with_config(source, ReaderConfig::default())
    }

    /// Wrap any seekable source
    ///
    /// The source length is taken by seeking to its end. If the final byte is an
    /// LF it is skipped here, so a terminated last line and an unterminated one
    /// read the same.
    pub fn with_config(mut source: R, config: ReaderConfig) -> Result<Self> {
        config.validate()?;

        let file_len = source
            .seek(SeekFrom::End(0))
            .map_err(|e| RevLinesError::file_error("Failed to determine file length", e))?;

        let mut remaining = file_len;
        if file_len > 0 {
            source
                .seek(SeekFrom::Start(file_len - 1))
                .map_err(|e| RevLinesError::file_error("Failed to seek to last byte", e))?;

            let mut last = [0u8; 1];
            source
                .read_exact(&mut last)
                .map_err(|e| RevLinesError::file_error("Failed to read last byte", e))?;

            if last[0] == LF {
                remaining -= 1;
            }
        }

        let state = if file_len == 0 {
            ReaderState::Exhausted
        } else {
            ReaderState::Ready
        };

        debug!(
            "Reversed reader ready: {file_len} bytes, chunk_size={}, max_line_bytes={}",
            config.chunk_size, config.max_line_bytes
        );

        Ok(Self {
            loader: ChunkLoader::new(source, remaining, config.chunk_size),
            assembler: LineAssembler::new(config.max_line_bytes),
            state,
            file_len,
            config,
        })
    }

    /// Return the next line as raw bytes, or `None` once every line was read
    ///
    /// The slice borrows the reader's line buffer and is valid until the next
    /// call. It never contains LF, and never contains CR.
    ///
    /// # Errors
    /// * `LineTooLong` if a line reaches `max_line_bytes` bytes
    /// * `FileError` if seeking or reading the source fails
    pub fn next_line_bytes(&mut self) -> Result<Option<&[u8]>> {
        if self.state == ReaderState::Exhausted {
            return Ok(None);
        }

        match self.assembler.assemble(&mut self.loader) {
            Ok(LineEnd::Terminator) => {}
            Ok(LineEnd::Head) => {
                debug!("Reached the head of the file");
                self.state = ReaderState::Exhausted;
            }
            Err(err) => {
                self.state = ReaderState::Exhausted;
                return Err(err);
            }
        }

        Ok(Some(self.assembler.take_line()))
    }

    /// Return the next line, or `None` once every line was read
    ///
    /// Bytes are decoded as UTF-8; invalid sequences are replaced with U+FFFD.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self
            .next_line_bytes()?
            .map(|bytes| bytes.to_str_lossy().into_owned()))
    }

    /// Total length of the source in bytes
    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Configuration this reader was built with
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Whether every line has been returned (or a read failed)
    pub fn is_exhausted(&self) -> bool {
        self.state == ReaderState::Exhausted
    }

    /// Release the reader and give back the underlying source
    pub fn into_inner(self) -> R {
        self.loader.into_inner()
    }

    /// Close the reader, releasing the underlying source
    pub fn close(self) {
        debug!(
            "Closing reversed reader ({} bytes never loaded)",
            self.loader.remaining()
        );
        drop(self.into_inner());
    }
}

impl<R: Read + Seek> Iterator for ReversedReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}

impl<R: Read + Seek> FusedIterator for ReversedReader<R> {}
