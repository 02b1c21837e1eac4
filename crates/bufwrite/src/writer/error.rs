use std::io;
use thiserror::Error;

/// Errors surfaced by [`ResponseWriter`](super::ResponseWriter) operations.
///
/// All variants wrap the sink-level [`io::Error`] that caused them; nothing is
/// retried or swallowed inside this crate.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Flushing previously buffered bytes to the output failed.
    ///
    /// The bytes handed to the call that triggered the flush were still
    /// accepted -- flushing the earlier data and taking the new data are
    /// independent write attempts. Once this error has been observed, an `Ok`
    /// from a later call does not mean the earlier data reached the sink.
    #[error("failed to flush buffered bytes: {source}")]
    Flush {
        #[source]
        source: io::Error,
    },

    /// A write that bypassed the buffer failed.
    ///
    /// Payloads larger than the buffer capacity go straight to the output;
    /// this reports that direct write failing.
    #[error("sink write failed: {source}")]
    Sink {
        #[from]
        source: io::Error,
    },

    /// Finalizing the gzip stream failed.
    ///
    /// Reported only by `close` on the compressing writer, where the trailing
    /// compressed bytes and checksum are written.
    #[error("failed to finish compression stream: {source}")]
    Finish {
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    pub fn flush<E: Into<io::Error>>(e: E) -> Self {
        Self::Flush { source: e.into() }
    }

    pub fn finish<E: Into<io::Error>>(e: E) -> Self {
        Self::Finish { source: e.into() }
    }
}
