#![no_main]
use libfuzzer_sys::fuzz_target;

// The validator and the decompressor share one parser; they must accept and
// reject exactly the same inputs.
fuzz_target!(|data: &[u8]| {
    let valid = snappy::is_valid_compressed_buffer(data);
    let decoded = snappy::uncompress_to_vec(data);
    assert_eq!(
        valid,
        decoded.is_ok(),
        "validator and decompressor disagree on a {}-byte input",
        data.len()
    );
});
