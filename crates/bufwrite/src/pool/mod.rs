//! Reusable fixed-capacity buffers for response writers.
//!
//! Every response writer stages its body bytes in one buffer taken from a
//! [`BufferPool`]. Pooling keeps buffer memory alive across responses, so a
//! busy server pays the allocation cost once per concurrency level instead of
//! once per request.
//!
//! # Lifecycle
//!
//! - [`BufferPool::acquire`] hands out a recycled buffer when one is free,
//!   otherwise allocates a new one. The returned [`PooledBuf`] always has
//!   length zero and the pool's fixed capacity.
//! - A [`PooledBuf`] goes back to its pool when dropped, on every exit path.
//!   There is no explicit release call to forget.
//! - Recycled buffers are never freed back to the allocator while the process
//!   runs, and their contents are not zeroed between uses. Only the written
//!   prefix of a buffer is ever read.
//!
//! The pool is the one piece of shared mutable state in this crate and is safe
//! for concurrent `acquire`/drop from any number of in-flight responses.

use bytes::BytesMut;
use once_cell::sync::Lazy;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Capacity of the buffers in the process-wide pool, in bytes.
///
/// Writes are batched until they would cross this threshold, so it also bounds
/// how many body bytes a writer can hold back before touching the sink.
pub const BUFFER_CAPACITY: usize = 10_000;

static SHARED: Lazy<Arc<BufferPool>> = Lazy::new(|| BufferPool::new(BUFFER_CAPACITY));

/// A concurrency-safe pool of fixed-capacity byte buffers.
///
/// All buffers handed out by one pool share the same capacity; there is no
/// runtime resizing. Buffers are created on demand and recycled indefinitely.
pub struct BufferPool {
    free: Mutex<Vec<BytesMut>>,
    buffer_capacity: usize,
}

impl BufferPool {
    /// Creates an empty pool whose buffers all have `buffer_capacity` bytes.
    pub fn new(buffer_capacity: usize) -> Arc<Self> {
        Arc::new(Self { free: Mutex::new(Vec::new()), buffer_capacity })
    }

    /// The process-wide pool used by the writer constructors.
    ///
    /// Its buffers have [`BUFFER_CAPACITY`] bytes.
    pub fn shared() -> &'static Arc<BufferPool> {
        &SHARED
    }

    /// Takes a buffer from the pool, allocating only when none is free.
    ///
    /// The buffer starts at length zero. Prior contents beyond the length are
    /// unspecified; only the capacity is guaranteed.
    pub fn acquire(self: &Arc<Self>) -> PooledBuf {
        let recycled = self.free.lock().unwrap().pop();
        let buf = match recycled {
            Some(buf) => buf,
            None => {
                debug!(capacity = self.buffer_capacity, "buffer pool empty, allocating");
                BytesMut::with_capacity(self.buffer_capacity)
            }
        };
        PooledBuf { buf, capacity: self.buffer_capacity, pool: Arc::clone(self) }
    }

    fn release(&self, mut buf: BytesMut) {
        buf.clear();
        self.free.lock().unwrap().push(buf);
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("free", &self.free.lock().unwrap().len())
            .field("buffer_capacity", &self.buffer_capacity)
            .finish()
    }
}

/// A buffer owned by exactly one writer, returned to its pool on drop.
///
/// Dereferences to the underlying [`BytesMut`]; the length is the cursor of
/// valid pending bytes. [`capacity`](Self::capacity) reports the pool's fixed
/// capacity, which callers must respect when appending -- `BytesMut` itself
/// would silently grow past it.
pub struct PooledBuf {
    buf: BytesMut,
    capacity: usize,
    pool: Arc<BufferPool>,
}

impl PooledBuf {
    /// The fixed capacity of this buffer, in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Deref for PooledBuf {
    type Target = BytesMut;

    fn deref(&self) -> &Self::Target {
        &self.buf
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.buf
    }
}

impl AsRef<[u8]> for PooledBuf {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Debug for PooledBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuf")
            .field("len", &self.buf.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquired_buffer_is_empty_with_fixed_capacity() {
        let pool = BufferPool::new(16);
        let buf = pool.acquire();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn released_buffer_is_recycled() {
        let pool = BufferPool::new(16);
        {
            let mut buf = pool.acquire();
            buf.extend_from_slice(b"pending body");
        }

        // the same storage comes back, cursor reset, capacity intact
        let buf = pool.acquire();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(pool.free.lock().unwrap().len(), 0);
    }

    #[test]
    fn live_buffers_never_alias() {
        let pool = BufferPool::new(16);
        let mut first = pool.acquire();
        let mut second = pool.acquire();

        first.extend_from_slice(b"aaaa");
        second.extend_from_slice(b"bbbb");

        assert_eq!(&first[..], b"aaaa");
        assert_eq!(&second[..], b"bbbb");
        assert_ne!(first.as_ref().as_ptr(), second.as_ref().as_ptr());
    }

    #[test]
    fn buffers_return_to_their_own_pool() {
        let small = BufferPool::new(8);
        let large = BufferPool::new(32);

        drop(small.acquire());
        drop(large.acquire());

        assert_eq!(small.free.lock().unwrap().len(), 1);
        assert_eq!(large.free.lock().unwrap().len(), 1);
    }

    #[test]
    fn concurrent_acquire_and_release() {
        let pool = BufferPool::new(64);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buf = pool.acquire();
                        buf.extend_from_slice(b"spin");
                        assert_eq!(buf.capacity(), 64);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // every buffer made it back
        assert!(pool.free.lock().unwrap().len() <= 8);
    }

    #[test]
    fn shared_pool_uses_default_capacity() {
        let buf = BufferPool::shared().acquire();
        assert_eq!(buf.capacity(), BUFFER_CAPACITY);
    }
}
