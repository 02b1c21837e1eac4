use crate::pool::BufferPool;
use crate::sink::ResponseSink;
use crate::writer::buffered::BodyBuffer;
use crate::writer::{ResponseWriter, WriteError};
use http::{HeaderMap, StatusCode};
use std::sync::Arc;

/// A buffered writer that flushes straight to the sink.
///
/// Body bytes accumulate in a pooled buffer; the sink sees one write per
/// buffer overflow and one final write at [`close`](ResponseWriter::close).
/// Header and status access pass through to the sink untouched.
#[derive(Debug)]
pub struct PlainWriter<S: ResponseSink> {
    sink: S,
    buffer: BodyBuffer,
}

impl<S: ResponseSink> PlainWriter<S> {
    /// Creates a writer for one response, buffering with the process-wide
    /// [`BufferPool`].
    pub fn new(sink: S) -> Self {
        Self::with_pool(sink, BufferPool::shared())
    }

    /// Creates a writer whose buffer comes from a dedicated pool.
    pub fn with_pool(sink: S, pool: &Arc<BufferPool>) -> Self {
        Self { sink, buffer: BodyBuffer::acquire_from(pool) }
    }
}

impl<S: ResponseSink> ResponseWriter for PlainWriter<S> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.sink.headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        self.sink.set_status(status);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, WriteError> {
        self.buffer.write(&mut self.sink, bytes)
    }

    fn write_str(&mut self, text: &str) -> Result<usize, WriteError> {
        self.buffer.write(&mut self.sink, text.as_bytes())
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), WriteError> {
        self.buffer.write_byte(&mut self.sink, byte)
    }

    fn close(mut self) -> Result<(), WriteError> {
        self.buffer.flush(&mut self.sink)
    }
}
