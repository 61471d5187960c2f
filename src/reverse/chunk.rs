//! Backward chunk loading.
//!
//! [`ChunkLoader`] owns the byte source and walks it from the tail toward the
//! head, one fixed-size chunk at a time. Each chunk ends exactly where the
//! previous one started, so the chunks tile the file with no gaps or overlap.

use crate::error::{Result, RevLinesError};
use log::trace;
use std::io::{Read, Seek, SeekFrom};

/// Fills a bounded working buffer with the file region just before the cursor
#[derive(Debug)]
pub(crate) struct ChunkLoader<R> {
    source: R,

    /// Bytes of the file not yet loaded, all located before the cursor
    ///
    /// `remaining - 1` is the offset of the next unread byte going backward.
    /// Zero means the head of the file has been reached. Never increases.
    remaining: u64,

    /// Most recently loaded chunk, in file order
    ///
    /// Never longer than `chunk_size`; only the head chunk may be shorter.
    buffer: Vec<u8>,

    /// Number of bytes at the front of `buffer` not yet handed out
    ///
    /// Bytes are consumed from the back, so the unread region is always
    /// `buffer[..unread]`. Zero means the buffer needs a refill.
    unread: usize,

    chunk_size: usize,
}

impl<R: Read + Seek> ChunkLoader<R> {
    /// Create a loader positioned after the first `remaining` bytes of `source`
    ///
    /// `chunk_size` must be non-zero; [`ReaderConfig::validate`](crate::ReaderConfig::validate)
    /// guarantees this for every public constructor.
    pub(crate) fn new(source: R, remaining: u64, chunk_size: usize) -> Self {
        debug_assert!(chunk_size > 0);
        let capacity = remaining.min(chunk_size as u64) as usize;
        Self {
            source,
            remaining,
            buffer: Vec::with_capacity(capacity),
            unread: 0,
            chunk_size,
        }
    }

    /// Load the chunk that ends at the current file position
    ///
    /// Returns `Ok(false)` without touching the source when the head of the file
    /// was already reached. Otherwise the previous buffer contents are replaced
    /// and the cursor moves back by the size of the new chunk.
    ///
    /// # Errors
    /// Fails when seeking fails or when fewer bytes than requested can be read.
    pub(crate) fn load_next(&mut self) -> Result<bool> {
        if self.remaining == 0 {
            return Ok(false);
        }

        // `len` never exceeds `chunk_size`, so the cast is lossless
        let len = self.remaining.min(self.chunk_size as u64) as usize;
        let start = self.remaining - len as u64;

        self.source.seek(SeekFrom::Start(start)).map_err(|e| {
            RevLinesError::file_error(format!("Failed to seek to offset {start}"), e)
        })?;

        self.buffer.resize(len, 0);
        self.source.read_exact(&mut self.buffer).map_err(|e| {
            RevLinesError::file_error(
                format!("Failed to read {len} bytes at offset {start}"),
                e,
            )
        })?;

        trace!(
            "Loaded chunk [{start}, {}) ({len} bytes), {start} bytes left",
            start + len as u64
        );

        self.unread = len;
        self.remaining = start;
        Ok(true)
    }

    /// Unread bytes of the current chunk, in file order
    pub(crate) fn unread(&self) -> &[u8] {
        &self.buffer[..self.unread]
    }

    /// Mark the last `count` unread bytes as consumed
    pub(crate) fn consume(&mut self, count: usize) {
        debug_assert!(count <= self.unread);
        self.unread -= count;
    }

    /// Whether the buffer must be refilled before more bytes can be consumed
    pub(crate) fn is_drained(&self) -> bool {
        self.unread == 0
    }

    /// Bytes of the file not yet loaded
    pub(crate) fn remaining(&self) -> u64 {
        self.remaining
    }

    pub(crate) fn into_inner(self) -> R {
        self.source
    }
}
