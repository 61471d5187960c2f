//! Line reconstruction from backward-scanned bytes.
//!
//! The assembler pulls bytes from a [`ChunkLoader`] in reverse and collects one
//! logical line at a time. Bytes land in the line buffer in scan order, so the
//! buffer holds the line reversed until [`LineAssembler::take_line`] flips it.

use crate::error::{Result, RevLinesError};
use crate::reverse::chunk::ChunkLoader;
use memchr::memrchr;
use std::io::{Read, Seek};

pub(crate) const LF: u8 = b'\n';
pub(crate) const CR: u8 = b'\r';

/// How an assembled line ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineEnd {
    /// An LF preceding the line was consumed; more lines may follow
    Terminator,
    /// The head of the file was reached; this is the first physical line
    Head,
}

/// Accumulates the bytes of one line, bounded by `max_line_bytes`
///
/// One slot of the cap stays reserved for the line terminator, so a line holds
/// at most `max_line_bytes - 1` bytes.
#[derive(Debug)]
pub(crate) struct LineAssembler {
    /// Line bytes in scan order (reversed relative to the file)
    line: Vec<u8>,
    max_line_bytes: usize,
}

impl LineAssembler {
    pub(crate) fn new(max_line_bytes: usize) -> Self {
        Self {
            line: Vec::new(),
            max_line_bytes,
        }
    }

    /// Assemble the next line, scanning backward through `loader`
    ///
    /// CR bytes are dropped wherever they appear, which normalizes CRLF to LF.
    ///
    /// # Errors
    /// * `LineTooLong` when the line reaches `max_line_bytes` bytes
    /// * I/O errors from refilling the working buffer
    pub(crate) fn assemble<R: Read + Seek>(
        &mut self,
        loader: &mut ChunkLoader<R>,
    ) -> Result<LineEnd> {
        self.line.clear();

        loop {
            if loader.is_drained() && !loader.load_next()? {
                return Ok(LineEnd::Head);
            }

            let chunk = loader.unread();
            let terminator = memrchr(LF, chunk);
            let line_start = terminator.map_or(0, |pos| pos + 1);

            for &byte in chunk[line_start..].iter().rev() {
                if byte == CR {
                    continue;
                }
                if self.line.len() + 1 == self.max_line_bytes {
                    return Err(RevLinesError::line_too_long(self.max_line_bytes));
                }
                self.line.push(byte);
            }

            match terminator {
                Some(pos) => {
                    // Consume the line bytes and the LF itself
                    let consumed = chunk.len() - pos;
                    loader.consume(consumed);
                    return Ok(LineEnd::Terminator);
                }
                None => {
                    let consumed = chunk.len();
                    loader.consume(consumed);
                }
            }
        }
    }

    /// Restore file order and hand out the assembled line
    pub(crate) fn take_line(&mut self) -> &[u8] {
        self.line.reverse();
        &self.line
    }
}
