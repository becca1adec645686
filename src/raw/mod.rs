//! The raw Snappy format: varint length prefix followed by the tagged
//! literal/copy element stream.

pub mod compress;
pub mod decompress;
pub mod types;
pub mod validate;
pub mod wmem;

// Re-export the most important public API items at the module level.
pub use compress::{
    compress, compress_fragment, compress_source_to_sink, compress_to_sink, compress_to_vec,
    max_compressed_length, CompressError,
};
pub use decompress::{
    peek_uncompressed_length, peek_uncompressed_length_from_source, uncompress, uncompress_to_sink,
    uncompress_to_vec, DecompressError,
};
pub use types::{find_match_length, BLOCK_SIZE};
pub use validate::is_valid_compressed_buffer;
pub use wmem::WorkingMemory;
