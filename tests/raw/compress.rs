// Unit tests for the compression side:
//   - max_compressed_length formula values
//   - exact frames for the trivial inputs (empty, one byte)
//   - the expansion bound and determinism properties
//   - error paths: undersized destination
//   - compress_fragment driven directly, the way external drivers use it

use crate::common::{random_input, TestRand};
use snappy::raw::{compress_fragment, WorkingMemory};
use snappy::{
    compress, compress_to_vec, max_compressed_length, uncompress_to_vec, varint, CompressError,
    BLOCK_SIZE,
};

// ─────────────────────────────────────────────────────────────────────────────
// max_compressed_length
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn max_compressed_length_formula() {
    // 32 + n + n/6
    assert_eq!(max_compressed_length(0), 32);
    assert_eq!(max_compressed_length(1), 33);
    assert_eq!(max_compressed_length(5), 37);
    assert_eq!(max_compressed_length(6), 39);
    assert_eq!(max_compressed_length(1_000), 1_198);
    assert_eq!(max_compressed_length(BLOCK_SIZE), 32 + BLOCK_SIZE + BLOCK_SIZE / 6);
}

// ─────────────────────────────────────────────────────────────────────────────
// Exact frames
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_compresses_to_length_prefix_only() {
    assert_eq!(compress_to_vec(b"").unwrap(), [0x00]);
}

#[test]
fn single_byte_frame_layout() {
    // varint(1), literal tag for one byte, the byte itself.
    assert_eq!(compress_to_vec(b"a").unwrap(), [0x01, 0x00, 0x61]);
}

#[test]
fn short_input_is_a_single_literal() {
    // Below the scan margin everything is one literal element.
    let compressed = compress_to_vec(b"0123456789").unwrap();
    assert_eq!(compressed[0], 10); // varint(10)
    assert_eq!(compressed[1], 9 << 2); // literal, len - 1 in the tag
    assert_eq!(&compressed[2..], b"0123456789");
}

// ─────────────────────────────────────────────────────────────────────────────
// Properties
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn output_never_exceeds_the_bound() {
    let mut rnd = TestRand::new(1);
    for i in 0..200 {
        let input = random_input(&mut rnd, i);
        let compressed = compress_to_vec(&input).unwrap();
        assert!(
            compressed.len() <= max_compressed_length(input.len()),
            "len {} compressed to {}",
            input.len(),
            compressed.len()
        );
    }
}

#[test]
fn compression_is_deterministic() {
    let mut rnd = TestRand::new(7);
    let input = random_input(&mut rnd, 0);
    assert_eq!(compress_to_vec(&input).unwrap(), compress_to_vec(&input).unwrap());
}

#[test]
fn repetitive_input_actually_shrinks() {
    let input = vec![b'A'; 100_000];
    let compressed = compress_to_vec(&input).unwrap();
    // A 64-byte run costs a 3-byte copy element, so ~5% is the floor here.
    assert!(compressed.len() < input.len() / 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// Slice destination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compress_into_bound_sized_slice() {
    let input = b"slice destinations need no allocation ".repeat(100);
    let mut dst = vec![0u8; max_compressed_length(input.len())];
    let n = compress(&input, &mut dst).unwrap();
    assert_eq!(uncompress_to_vec(&dst[..n]).unwrap(), input);
}

#[test]
fn compress_rejects_undersized_destination() {
    let input: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    let mut dst = vec![0u8; 16];
    assert_eq!(compress(&input, &mut dst), Err(CompressError::OutputTooSmall));
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment compressor, driven directly
// ─────────────────────────────────────────────────────────────────────────────

/// Compress `input` as a single fragment regardless of block chopping, then
/// round-trip the hand-assembled frame through the normal decompressor.
fn verify_unblocked(input: &[u8]) {
    assert!(input.len() <= BLOCK_SIZE);

    let mut frame = Vec::new();
    varint::append32(&mut frame, input.len() as u32);

    let mut wmem = WorkingMemory::new();
    let table = wmem.hash_table(input.len());
    let mut dst = vec![0u8; max_compressed_length(input.len())];
    let n = compress_fragment(input, &mut dst, table);
    frame.extend_from_slice(&dst[..n]);

    assert_eq!(uncompress_to_vec(&frame).unwrap(), input);
}

#[test]
fn fragment_round_trips() {
    verify_unblocked(b"abc");
    verify_unblocked(&b"ab".repeat(1000));
    verify_unblocked(&vec![0u8; BLOCK_SIZE]);

    let mut rnd = TestRand::new(99);
    for i in 10..60 {
        let input = random_input(&mut rnd, i);
        verify_unblocked(&input[..input.len().min(BLOCK_SIZE)]);
    }
}

#[test]
fn fragment_with_long_literal_tail() {
    // Incompressible fragment: exercises the multi-byte literal length form.
    let mut rnd = TestRand::new(5);
    let input: Vec<u8> = (0..5000).map(|_| rnd.rand8()).collect();
    verify_unblocked(&input);
}
