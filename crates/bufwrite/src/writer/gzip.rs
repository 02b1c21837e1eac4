use crate::pool::BufferPool;
use crate::sink::ResponseSink;
use crate::writer::buffered::BodyBuffer;
use crate::writer::{ResponseWriter, WriteError};
use flate2::Compression;
use flate2::write::GzEncoder;
use http::{HeaderMap, StatusCode};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// A buffered writer that flushes through a streaming gzip encoder.
///
/// Same staging buffer and overflow policy as
/// [`PlainWriter`](super::PlainWriter), but every flush target is a
/// [`GzEncoder`] wrapping the sink, so the sink only ever sees compressed
/// bytes. [`close`](ResponseWriter::close) flushes the remaining buffered
/// bytes into the encoder and then finalizes the stream -- the gzip trailer
/// and checksum reach the sink there and nowhere else.
pub struct GzipWriter<S: ResponseSink> {
    gz: GzEncoder<S>,
    buffer: BodyBuffer,
}

impl<S: ResponseSink> GzipWriter<S> {
    /// Creates a compressing writer for one response, buffering with the
    /// process-wide [`BufferPool`].
    pub fn new(sink: S) -> Self {
        Self::with_pool(sink, BufferPool::shared())
    }

    /// Creates a compressing writer whose buffer comes from a dedicated pool.
    pub fn with_pool(sink: S, pool: &Arc<BufferPool>) -> Self {
        Self { gz: GzEncoder::new(sink, Compression::best()), buffer: BodyBuffer::acquire_from(pool) }
    }
}

impl<S: ResponseSink> ResponseWriter for GzipWriter<S> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.gz.get_mut().headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.gz.get_mut().set_status(status);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, WriteError> {
        self.buffer.write(&mut self.gz, bytes)
    }

    fn write_str(&mut self, text: &str) -> Result<usize, WriteError> {
        self.buffer.write(&mut self.gz, text.as_bytes())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), WriteError> {
        self.buffer.write_byte(&mut self.gz, byte)
    }

    fn close(mut self) -> Result<(), WriteError> {
        let flushed = self.buffer.flush(&mut self.gz);

        trace!("finishing gzip stream");
        match (flushed, self.gz.finish()) {
            (Err(e), _) => Err(e),
            (Ok(()), Err(e)) => Err(WriteError::finish(e)),
            (Ok(()), Ok(_sink)) => Ok(()),
        }
    }
}

impl<S: ResponseSink> fmt::Debug for GzipWriter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GzipWriter").field("buffer", &self.buffer).finish_non_exhaustive()
    }
}
