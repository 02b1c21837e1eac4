use crate::pool::{BufferPool, PooledBuf};
use crate::writer::WriteError;
use std::io::Write;
use std::sync::Arc;
use tracing::trace;

/// The staging buffer and overflow policy shared by both writer kinds.
///
/// Owns the pooled buffer; the flush target is supplied per call, so the same
/// core serves the plain writer (sink) and the gzip writer (encoder).
#[derive(Debug)]
pub(super) struct BodyBuffer {
    buf: PooledBuf,
}

impl BodyBuffer {
    pub(super) fn acquire_from(pool: &Arc<BufferPool>) -> Self {
        Self { buf: pool.acquire() }
    }

    /// Stages `bytes`, flushing to `out` first when they would not fit.
    ///
    /// A payload larger than the whole buffer is written to `out` directly
    /// after the flush; staging it would only cost an extra copy. In both
    /// overflow paths a flush failure takes precedence in the returned error,
    /// even though the new bytes were still taken.
    pub(super) fn write<W: Write>(&mut self, out: &mut W, bytes: &[u8]) -> Result<usize, WriteError> {
        let len = bytes.len();
        if self.buf.len() + len <= self.buf.capacity() {
            self.buf.extend_from_slice(bytes);
            return Ok(len);
        }

        let flushed = self.flush(out);

        if len > self.buf.capacity() {
            let direct = out.write_all(bytes);
            flushed?;
            direct?;
            return Ok(len);
        }

        self.buf.extend_from_slice(bytes);
        flushed.map(|()| len)
    }

    /// Single-byte specialization of [`write`](Self::write).
    pub(super) fn write_byte<W: Write>(&mut self, out: &mut W, byte: u8) -> Result<(), WriteError> {
        if self.buf.len() < self.buf.capacity() {
            self.buf.extend_from_slice(&[byte]);
            return Ok(());
        }

        let flushed = self.flush(out);
        self.buf.extend_from_slice(&[byte]);
        flushed
    }

    /// Writes the pending bytes to `out` and resets the cursor.
    ///
    /// The cursor resets on failure too: bytes that failed to flush are lost,
    /// not retried.
    pub(super) fn flush<W: Write>(&mut self, out: &mut W) -> Result<(), WriteError> {
        if self.buf.is_empty() {
            return Ok(());
        }

        trace!(len = self.buf.len(), "flushing buffered body bytes");
        let result = out.write_all(&self.buf);
        self.buf.clear();
        result.map_err(WriteError::flush)
    }
}
