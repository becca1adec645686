#![no_main]
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes fed straight to the decoder: must never panic, read out of
// bounds, or over-allocate — errors are the expected outcome.
fuzz_target!(|data: &[u8]| {
    let _ = snappy::uncompress_to_vec(data);

    if let Some((declared, _)) = snappy::peek_uncompressed_length(data) {
        // A bounded destination exercises the pre-sized entry point too.
        if declared <= 1 << 20 {
            let mut dst = vec![0u8; declared as usize];
            let _ = snappy::uncompress(data, &mut dst);
        }
    }
});
