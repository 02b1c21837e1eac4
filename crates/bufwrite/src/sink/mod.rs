//! The boundary to the underlying response transport.
//!
//! A [`ResponseSink`] is whatever ultimately carries response bytes toward the
//! network connection. This crate never constructs one; writers only need byte
//! delivery (the [`std::io::Write`] supertrait) plus access to the response
//! headers and status code, which the writers pass through untouched.

use http::{HeaderMap, StatusCode};
use std::io;

/// The destination that transmits bytes for one in-flight response.
///
/// Sink writes are blocking and are never retried by this crate; a failed
/// write surfaces as an error from whichever writer call triggered it.
pub trait ResponseSink: io::Write {
    /// Mutable access to the response headers.
    ///
    /// Headers must reach the wire before any body bytes per HTTP semantics;
    /// this layer does not enforce that ordering.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Sets the response status code.
    fn set_status(&mut self, status: StatusCode);
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn set_status(&mut self, status: StatusCode) {
        (**self).set_status(status);
    }
}
