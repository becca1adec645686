//! `snappy` — a pure-Rust, byte-compatible implementation of the Snappy
//! compression format.
//!
//! Snappy is a stream-oriented LZ77-family codec that trades compression
//! ratio for throughput.  A compressed frame is self-delimiting: a varint
//! length prefix followed by tagged elements (literals and back-references).
//!
//! # Crate layout
//!
//! | Module       | Contents |
//! |--------------|----------|
//! | `raw`        | The codec core: fragment compressor, decompressor, validator, working memory. |
//! | `varint`     | Little-endian base-128 length-prefix codec. |
//! | `sinksource` | `Sink`/`Source` streaming boundary and slice/io adapters. |
//!
//! # One-shot usage
//!
//! ```
//! let data = b"abcabcabcabcabcabc";
//! let compressed = snappy::compress_to_vec(data).unwrap();
//! assert!(compressed.len() <= snappy::max_compressed_length(data.len()));
//! assert!(snappy::is_valid_compressed_buffer(&compressed));
//! assert_eq!(snappy::uncompress_to_vec(&compressed).unwrap(), data);
//! ```
//!
//! Every operation runs synchronously to completion; the only mutable state
//! is the caller-owned [`WorkingMemory`], so independent frames can be
//! processed from independent threads without any shared state.

pub mod raw;
pub mod sinksource;
pub mod varint;

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use raw::{
    compress, compress_source_to_sink, compress_to_sink, compress_to_vec, is_valid_compressed_buffer,
    max_compressed_length, peek_uncompressed_length, peek_uncompressed_length_from_source,
    uncompress, uncompress_to_sink, uncompress_to_vec, CompressError, DecompressError,
    WorkingMemory, BLOCK_SIZE,
};
pub use sinksource::{ByteArraySource, Sink, SinkError, SliceSink, Source, WriterSink};
