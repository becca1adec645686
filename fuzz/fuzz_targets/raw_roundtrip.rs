#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let compressed = snappy::compress_to_vec(data).expect("compression cannot fail on &[u8]");

    assert!(
        compressed.len() <= snappy::max_compressed_length(data.len()),
        "expansion bound violated: {} bytes compressed to {}",
        data.len(),
        compressed.len()
    );
    assert!(snappy::is_valid_compressed_buffer(&compressed));

    let recovered = snappy::uncompress_to_vec(&compressed).expect("own frame must decode");
    assert_eq!(recovered, data, "round-trip mismatch at {} bytes", data.len());
});
