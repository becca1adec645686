//! Frame validation without materializing the output.
//!
//! Drives the decompressor's tag parser with a writer that only counts, so
//! the cost is O(compressed size) in time and O(1) in memory regardless of
//! the declared uncompressed length.

use super::decompress::{decompress_tags, peek_uncompressed_length, DecompressError, Writer};

/// Counting writer: enforces the declared-length budget and offset validity,
/// stores nothing.
struct LengthTracker {
    produced: u64,
    limit: u64,
}

impl LengthTracker {
    fn new(limit: u64) -> Self {
        Self { produced: 0, limit }
    }
}

impl Writer for LengthTracker {
    #[inline]
    fn produced(&self) -> u64 {
        self.produced
    }

    #[inline]
    fn append(&mut self, data: &[u8]) -> Result<(), DecompressError> {
        self.produced += data.len() as u64;
        if self.produced > self.limit {
            return Err(DecompressError::OutputOverrun);
        }
        Ok(())
    }

    #[inline]
    fn copy_back(&mut self, offset: u64, len: usize) -> Result<(), DecompressError> {
        if offset == 0 || offset > self.produced {
            return Err(DecompressError::InvalidCopyOffset);
        }
        self.produced += len as u64;
        if self.produced > self.limit {
            return Err(DecompressError::OutputOverrun);
        }
        Ok(())
    }
}

/// Whether `src` is a well-formed frame that would decompress successfully.
///
/// Accepts exactly the inputs [`uncompress`](super::decompress::uncompress)
/// accepts, but never allocates output.
pub fn is_valid_compressed_buffer(src: &[u8]) -> bool {
    let Some((declared, consumed)) = peek_uncompressed_length(src) else {
        return false;
    };
    let mut tracker = LengthTracker::new(declared as u64);
    match decompress_tags(&src[consumed..], &mut tracker) {
        Ok(()) => tracker.produced() == declared as u64,
        Err(_) => false,
    }
}
