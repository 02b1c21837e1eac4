//! Buffered writers for response bodies.
//!
//! Application code producing a body makes many small writes; the network
//! sink underneath is expensive to touch. The writers here sit between the
//! two, staging bytes in a pooled fixed-capacity buffer and writing to the
//! sink only when the buffer would overflow or the response is closed.
//!
//! # Components
//!
//! - [`ResponseWriter`]: the contract shared by both writer kinds
//! - [`PlainWriter`]: uncompressed passthrough to the sink
//! - [`GzipWriter`]: the same buffering, flushed through a streaming gzip
//!   encoder so the sink only sees compressed bytes
//! - [`Writer`]: picks one of the two from an `Accept-Encoding` value
//! - [`Piece`]: one value in a heterogeneous [`write_all`] sequence
//! - [`WriteError`]: the error taxonomy for every sink-facing operation
//!
//! A writer serves exactly one in-flight response and is driven by a single
//! logical flow; nothing here synchronizes. The one shared resource, the
//! staging buffer, comes from [`crate::pool`] and goes back on every exit
//! path.
//!
//! [`write_all`]: ResponseWriter::write_all

mod buffered;
mod error;
mod gzip;
mod piece;
mod plain;

pub use error::WriteError;
pub use gzip::GzipWriter;
pub use piece::Piece;
pub use plain::PlainWriter;

use crate::sink::ResponseSink;
use http::{HeaderMap, HeaderValue, StatusCode};
use tracing::trace;

/// The writer contract consumed by application code.
///
/// Write calls either complete against the in-memory buffer with no I/O or
/// perform one blocking flush to the underlying output. None of the methods
/// may be called concurrently on the same writer; a writer belongs to one
/// response and one flow.
pub trait ResponseWriter {
    /// Mutable access to the response headers, delegated to the sink.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status code, delegated to the sink.
    fn set_status(&mut self, status: StatusCode);

    /// Writes a byte sequence through the buffer.
    ///
    /// Returns the number of bytes accepted, which is always the full input.
    /// See [`WriteError::Flush`] for what an error does and does not say
    /// about the input.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, WriteError>;

    /// Writes the UTF-8 bytes of `text`, without intermediate allocation.
    fn write_str(&mut self, text: &str) -> Result<usize, WriteError>;

    /// Writes a single byte.
    fn write_byte(&mut self, byte: u8) -> Result<(), WriteError>;

    /// Writes a heterogeneous sequence of values in order.
    ///
    /// Each piece goes through the normal buffered path, so output order
    /// matches input order even across flushes. Integers are written as
    /// ASCII decimal text.
    fn write_all(&mut self, pieces: &[Piece<'_>]) -> Result<(), WriteError> {
        for piece in pieces {
            match *piece {
                Piece::Str(text) => {
                    self.write_str(text)?;
                }
                Piece::Bytes(bytes) => {
                    self.write(bytes)?;
                }
                Piece::Byte(byte) => self.write_byte(byte)?,
                Piece::Int(value) => {
                    self.write_str(itoa::Buffer::new().format(value))?;
                }
                Piece::Uint(value) => {
                    self.write_str(itoa::Buffer::new().format(value))?;
                }
            }
        }
        Ok(())
    }

    /// Flushes any pending buffered bytes and finalizes the output.
    ///
    /// Consumes the writer: the buffer returns to its pool and the writer
    /// cannot be touched again. Closing with nothing pending performs no
    /// buffer flush.
    fn close(self) -> Result<(), WriteError>
    where
        Self: Sized;
}

/// A response writer with the output mode selected per request.
///
/// Wraps either writer kind behind the same [`ResponseWriter`] contract, so
/// handler code does not branch on whether the response is compressed.
#[derive(Debug)]
pub enum Writer<S: ResponseSink> {
    /// Uncompressed passthrough
    Plain(PlainWriter<S>),
    /// Streaming gzip
    Gzip(GzipWriter<S>),
}

impl<S: ResponseSink> Writer<S> {
    /// Selects the output mode from the request's `Accept-Encoding` value.
    ///
    /// Picks gzip when the client names it, setting `Content-Encoding: gzip`
    /// on the response headers; anything else gets the identity writer.
    pub fn select(mut sink: S, accept_encoding: Option<&str>) -> Self {
        let wants_gzip = accept_encoding.is_some_and(|encodings| encodings.contains("gzip"));
        if wants_gzip {
            trace!("client accepts gzip, compressing response body");
            sink.headers_mut().insert(http::header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
            Self::Gzip(GzipWriter::new(sink))
        } else {
            Self::Plain(PlainWriter::new(sink))
        }
    }
}

impl<S: ResponseSink> ResponseWriter for Writer<S> {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        match self {
            Self::Plain(writer) => writer.headers_mut(),
            Self::Gzip(writer) => writer.headers_mut(),
        }
    }

    fn set_status(&mut self, status: StatusCode) {
        match self {
            Self::Plain(writer) => writer.set_status(status),
            Self::Gzip(writer) => writer.set_status(status),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<usize, WriteError> {
        match self {
            Self::Plain(writer) => writer.write(bytes),
            Self::Gzip(writer) => writer.write(bytes),
        }
    }

    fn write_str(&mut self, text: &str) -> Result<usize, WriteError> {
        match self {
            Self::Plain(writer) => writer.write_str(text),
            Self::Gzip(writer) => writer.write_str(text),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), WriteError> {
        match self {
            Self::Plain(writer) => writer.write_byte(byte),
            Self::Gzip(writer) => writer.write_byte(byte),
        }
    }

    fn close(self) -> Result<(), WriteError> {
        match self {
            Self::Plain(writer) => writer.close(),
            Self::Gzip(writer) => writer.close(),
        }
    }
}
