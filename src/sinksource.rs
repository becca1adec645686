//! Streaming boundary between the codec and its callers.
//!
//! A [`Source`] hands the codec input as one or more contiguous chunks with a
//! `peek` + `skip` interface; a [`Sink`] accepts output chunks in order.  Both
//! are synchronous: the codec never blocks on them and never retries.
//!
//! [`ByteArraySource`] and [`SliceSink`] adapt plain byte slices;
//! `Vec<u8>` is a growable sink; [`WriterSink`] bridges to `std::io::Write`
//! at the edge of the crate, keeping `io::Error` out of the codec signatures.

use std::io;

/// Marker error: a sink rejected a write.
///
/// Sinks are expected to accept every write; rejection is exceptional and
/// aborts the operation.  Adapters that can say more about the failure (such
/// as [`WriterSink`]) record the detail on themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkError;

/// An ordered consumer of output byte chunks.
pub trait Sink {
    /// Append `bytes` to the output.
    fn append(&mut self, bytes: &[u8]) -> Result<(), SinkError>;
}

/// A producer of input bytes, exposed as a sequence of contiguous chunks.
pub trait Source {
    /// Total number of bytes left to read.
    fn available(&self) -> usize;

    /// Borrow the current contiguous chunk.  Empty only when exhausted.
    fn peek(&self) -> &[u8];

    /// Consume `n` bytes.  `n` must not exceed the length of the current
    /// `peek` chunk.
    fn skip(&mut self, n: usize);
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice adapters
// ─────────────────────────────────────────────────────────────────────────────

/// A [`Source`] over a single contiguous byte slice.
pub struct ByteArraySource<'a> {
    data: &'a [u8],
}

impl<'a> ByteArraySource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl Source for ByteArraySource<'_> {
    #[inline]
    fn available(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn peek(&self) -> &[u8] {
        self.data
    }

    #[inline]
    fn skip(&mut self, n: usize) {
        debug_assert!(n <= self.data.len());
        self.data = &self.data[n..];
    }
}

/// A [`Sink`] writing into a caller-provided slice, tracking its fill level.
///
/// Rejects writes that would run past the end of the slice.
pub struct SliceSink<'a> {
    dst: &'a mut [u8],
    pos: usize,
}

impl<'a> SliceSink<'a> {
    pub fn new(dst: &'a mut [u8]) -> Self {
        Self { dst, pos: 0 }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }
}

impl Sink for SliceSink<'_> {
    #[inline]
    fn append(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let end = self.pos.checked_add(bytes.len()).ok_or(SinkError)?;
        if end > self.dst.len() {
            return Err(SinkError);
        }
        self.dst[self.pos..end].copy_from_slice(bytes);
        self.pos = end;
        Ok(())
    }
}

impl Sink for Vec<u8> {
    #[inline]
    fn append(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std::io bridge
// ─────────────────────────────────────────────────────────────────────────────

/// A [`Sink`] forwarding to any `std::io::Write`.
///
/// The first I/O failure is kept in [`WriterSink::take_error`]; from the
/// codec's side it surfaces as the bare [`SinkError`] marker.
pub struct WriterSink<W: io::Write> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Retrieve the underlying I/O error, if a write failed.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for WriterSink<W> {
    fn append(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        if self.error.is_some() {
            return Err(SinkError);
        }
        match self.inner.write_all(bytes) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.error = Some(e);
                Err(SinkError)
            }
        }
    }
}
