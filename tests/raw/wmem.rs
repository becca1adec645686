// Unit tests for working memory:
//   - table sizing follows the smallest-power-of-two rule with its clamps
//   - a reused instance always hands out a zeroed table
//   - reuse across compress calls does not change the output bytes

use snappy::raw::{compress_fragment, max_compressed_length, WorkingMemory};
use snappy::BLOCK_SIZE;

#[test]
fn table_size_is_smallest_covering_power_of_two() {
    let mut wmem = WorkingMemory::new();
    for (fragment_len, expected) in [
        (0usize, 256usize),
        (1, 256),
        (255, 256),
        (256, 256),
        (257, 512),
        (4_000, 4_096),
        (4_096, 4_096),
        (4_097, 8_192),
        (16_384, 16_384),
        (16_385, 16_384),
        (BLOCK_SIZE, 16_384),
    ] {
        assert_eq!(
            wmem.hash_table(fragment_len).len(),
            expected,
            "fragment_len {fragment_len}"
        );
    }
}

#[test]
fn stale_entries_never_leak_between_fragments() {
    let mut wmem = WorkingMemory::new();
    wmem.hash_table(BLOCK_SIZE).fill(0x7777);
    // A smaller follow-up request re-zeroes the prefix it hands out.
    assert!(wmem.hash_table(1000).iter().all(|&slot| slot == 0));
    // And the full-size request re-zeroes everything.
    assert!(wmem.hash_table(BLOCK_SIZE).iter().all(|&slot| slot == 0));
}

#[test]
fn reused_memory_reproduces_identical_output() {
    let input = b"the quick brown fox jumps over the lazy dog. ".repeat(200);
    let mut dst_a = vec![0u8; max_compressed_length(input.len())];
    let mut dst_b = vec![0u8; max_compressed_length(input.len())];

    let mut wmem = WorkingMemory::new();
    let n_a = compress_fragment(&input, &mut dst_a, wmem.hash_table(input.len()));
    // Pollute with an unrelated fragment, then recompress the original.
    let junk: Vec<u8> = (0..BLOCK_SIZE).map(|i| (i * 31) as u8).collect();
    let mut junk_dst = vec![0u8; max_compressed_length(junk.len())];
    compress_fragment(&junk, &mut junk_dst, wmem.hash_table(junk.len()));
    let n_b = compress_fragment(&input, &mut dst_b, wmem.hash_table(input.len()));

    assert_eq!(n_a, n_b);
    assert_eq!(&dst_a[..n_a], &dst_b[..n_b]);
}
