//! A buffered output layer for HTTP response bodies
//!
//! This crate sits between application code producing a response body and the
//! connection that transmits it. Handlers tend to emit bodies as many small
//! writes -- a label here, a number there -- while every write that reaches
//! the network sink is expensive. The writers here collapse those small
//! writes into few sink writes by staging bytes in a fixed-capacity buffer
//! that is flushed only on overflow and at close.
//!
//! # Features
//!
//! - Fixed-capacity staging buffer, flushed on overflow and at close
//! - Uncompressed and streaming-gzip output behind one writer contract
//! - Oversized payloads bypass the buffer and go to the sink directly
//! - Buffer memory reused across responses through a concurrency-safe pool
//! - Heterogeneous `write_all` sequences (text, bytes, integers) checked at
//!   compile time
//! - Use-after-close ruled out by construction: closing consumes the writer
//!
//! # Example
//!
//! ```
//! use http::StatusCode;
//! use micro_bufwrite::sink::ResponseSink;
//! use micro_bufwrite::writer::{Piece, PlainWriter, ResponseWriter, WriteError};
//! use std::io;
//! use tracing::Level;
//! use tracing_subscriber::FmtSubscriber;
//!
//! // a toy sink; real servers adapt their connection type instead
//! #[derive(Default)]
//! struct VecSink {
//!     headers: http::HeaderMap,
//!     status: Option<StatusCode>,
//!     out: Vec<u8>,
//! }
//!
//! impl io::Write for VecSink {
//!     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         self.out.extend_from_slice(buf);
//!         Ok(buf.len())
//!     }
//!
//!     fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! impl ResponseSink for VecSink {
//!     fn headers_mut(&mut self) -> &mut http::HeaderMap {
//!         &mut self.headers
//!     }
//!
//!     fn set_status(&mut self, status: StatusCode) {
//!         self.status = Some(status);
//!     }
//! }
//!
//! fn main() -> Result<(), WriteError> {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::WARN).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let mut sink = VecSink::default();
//!
//!     let mut writer = PlainWriter::new(&mut sink);
//!     writer.set_status(StatusCode::OK);
//!     writer.write_str("users online: ")?;
//!     writer.write_all(&[Piece::from(42u32), Piece::from(b'\n')])?;
//!     writer.close()?;
//!
//!     assert_eq!(sink.status, Some(StatusCode::OK));
//!     assert_eq!(sink.out, b"users online: 42\n");
//!     Ok(())
//! }
//! ```
//!
//! Compression is a per-request decision made by the caller; use
//! [`writer::Writer::select`] to pick gzip from the request's
//! `Accept-Encoding` value, or construct [`writer::GzipWriter`] directly.
//!
//! # Architecture
//!
//! The crate is organized into three modules, leaves first:
//!
//! - [`pool`]: reusable fixed-capacity buffers shared by all writers
//! - [`sink`]: the boundary trait to the underlying response transport
//! - [`writer`]: the buffered writers and their shared overflow policy
//!
//! Data flows application → buffer → \[gzip encoder\] → sink. The buffer is
//! the batching shim; the gzip encoder is an opaque streaming transform from
//! `flate2` that the compressing writer flushes into instead of the sink.
//!
//! # Error Handling
//!
//! Sink-facing failures surface as [`writer::WriteError`] from whichever call
//! triggered the flush; nothing is retried or logged away internally. A
//! failed flush does not reject the bytes of the triggering call -- see
//! [`writer::WriteError::Flush`] for the exact contract.
//!
//! # Limitations
//!
//! - A writer instance serves one response on one logical flow; it is not a
//!   synchronization point
//! - No chunked-transfer-encoding management and no content negotiation
//!   beyond the gzip/identity selection helper
//! - Buffer capacity is fixed at build time ([`pool::BUFFER_CAPACITY`])

pub mod pool;
pub mod sink;
pub mod writer;
