//! Snappy compression — fragment encoder and whole-frame drivers.
//!
//! A frame is the varint-encoded uncompressed length followed by the
//! element stream.  The input is chopped into fragments of at most
//! [`BLOCK_SIZE`] bytes; each fragment is encoded independently against a
//! freshly zeroed hash table, so back-references never reach outside their
//! fragment.
//!
//! The match finder is deliberately cheap: one 16-bit slot per hash bucket,
//! no chaining, no lazy matching.  A collision is just a miss, and after a
//! run of misses the scan cursor accelerates so incompressible input still
//! costs O(n).

use crate::sinksource::{ByteArraySource, Sink, SliceSink, Source};
use crate::varint;

use super::types::{
    copy16, find_match_length, hash_bytes, load32_le, load64_le, u32_at_offset, BLOCK_SIZE,
    INPUT_MARGIN_BYTES, MAX_HASH_TABLE_SIZE, TAG_COPY_1_BYTE_OFFSET, TAG_COPY_2_BYTE_OFFSET,
    TAG_LITERAL,
};
use super::wmem::WorkingMemory;

// ─────────────────────────────────────────────────────────────────────────────
// Error type
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by the compression entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressError {
    /// The input length cannot be represented in the 32-bit frame prefix.
    InputTooLarge,
    /// The destination slice is smaller than the compressed frame.
    OutputTooSmall,
    /// The sink rejected a write.
    Sink,
}

// ─────────────────────────────────────────────────────────────────────────────
// Worst-case sizing
// ─────────────────────────────────────────────────────────────────────────────

/// Upper bound on the compressed size of `source_len` input bytes:
/// `32 + source_len + source_len / 6`.
///
/// Callers of [`compress`] may size their destination to this bound.
#[inline]
pub fn max_compressed_length(source_len: usize) -> usize {
    32 + source_len + source_len / 6
}

// ─────────────────────────────────────────────────────────────────────────────
// Element emitters
// ─────────────────────────────────────────────────────────────────────────────

/// Emit the literal `input[from..to]` at `dst[op..]`, returning the new
/// cursor.
///
/// With `allow_fast_path`, literals of at most 16 bytes are written as one
/// fixed 16-byte copy; the caller must then guarantee 16 readable bytes at
/// `input[from..]` (the scan margin does) — the condition re-checks both
/// windows before taking the shortcut.
fn emit_literal(
    dst: &mut [u8],
    mut op: usize,
    input: &[u8],
    from: usize,
    to: usize,
    allow_fast_path: bool,
) -> usize {
    let len = to - from;
    debug_assert!(len >= 1);
    let n = len - 1;

    if n < 60 {
        dst[op] = TAG_LITERAL | ((n as u8) << 2);
        op += 1;
        if allow_fast_path && len <= 16 && from + 16 <= input.len() && op + 16 <= dst.len() {
            copy16(input, from, dst, op);
            return op + len;
        }
    } else {
        // Length does not fit the tag byte: emit it as 1..=4 trailing LE bytes.
        let base = op;
        op += 1;
        let mut rem = n;
        let mut count: usize = 0;
        while rem > 0 {
            dst[op] = (rem & 0xff) as u8;
            op += 1;
            rem >>= 8;
            count += 1;
        }
        debug_assert!((1..=4).contains(&count));
        dst[base] = TAG_LITERAL | (((59 + count) as u8) << 2);
    }

    dst[op..op + len].copy_from_slice(&input[from..to]);
    op + len
}

/// Emit one copy element of length 4..=64.
///
/// Picks the 1-byte-offset form when both the length (< 12) and the offset
/// (< 2048) allow it; otherwise the 2-byte-offset form.  Fragment-local
/// offsets never need the 4-byte form.
#[inline]
fn emit_copy_up_to_64(dst: &mut [u8], op: usize, offset: usize, len: usize) -> usize {
    debug_assert!((4..=64).contains(&len));
    debug_assert!(offset >= 1 && offset < BLOCK_SIZE);

    if len < 12 && offset < 2048 {
        dst[op] = TAG_COPY_1_BYTE_OFFSET | (((len - 4) as u8) << 2) | (((offset >> 8) as u8) << 5);
        dst[op + 1] = offset as u8;
        op + 2
    } else {
        dst[op] = TAG_COPY_2_BYTE_OFFSET | (((len - 1) as u8) << 2);
        dst[op + 1] = offset as u8;
        dst[op + 2] = (offset >> 8) as u8;
        op + 3
    }
}

/// Emit copy elements covering a match of arbitrary length ≥ 4.
///
/// A single element carries at most 64 bytes.  The split keeps every piece
/// in range: 64 while ≥ 68 remain, then 60 if more than 64 remain (so the
/// final piece is still ≥ 4), then the rest.
fn emit_copy(dst: &mut [u8], mut op: usize, offset: usize, mut len: usize) -> usize {
    while len >= 68 {
        op = emit_copy_up_to_64(dst, op, offset, 64);
        len -= 64;
    }
    if len > 64 {
        op = emit_copy_up_to_64(dst, op, offset, 60);
        len -= 60;
    }
    emit_copy_up_to_64(dst, op, offset, len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragment compressor
// ─────────────────────────────────────────────────────────────────────────────

/// Compress one fragment of at most [`BLOCK_SIZE`] bytes into `dst`,
/// returning the number of bytes written.
///
/// `table` is a zeroed power-of-two hash table from
/// [`WorkingMemory::hash_table`], sized for this fragment.  `dst` must hold
/// at least [`max_compressed_length`]`(input.len())` bytes.
pub fn compress_fragment(input: &[u8], dst: &mut [u8], table: &mut [u16]) -> usize {
    let input_len = input.len();
    debug_assert!(input_len <= BLOCK_SIZE);
    debug_assert!(table.len().is_power_of_two());
    debug_assert!(table.len() <= MAX_HASH_TABLE_SIZE);
    debug_assert!(dst.len() >= max_compressed_length(input_len));

    let shift = 32 - table.len().trailing_zeros();
    let mut op = 0usize;
    let mut next_emit = 0usize;

    // Breaking out of 'scan at any point falls through to the trailing
    // literal that flushes [next_emit, input_len).
    'scan: {
        if input_len < INPUT_MARGIN_BYTES {
            break 'scan;
        }
        // The scan stops here; every load below stays within the fragment.
        let ip_limit = input_len - INPUT_MARGIN_BYTES;

        let mut ip = 1usize;
        let mut next_hash = hash_bytes(load32_le(input, ip), shift);

        loop {
            // ── Find a match ─────────────────────────────────────────────────
            // After 32 consecutive misses the step grows by one every 32
            // further misses, keeping the scan linear on incompressible data.
            let mut skip: u32 = 32;
            let mut next_ip = ip;
            let mut candidate: usize;
            loop {
                ip = next_ip;
                let hash = next_hash;
                debug_assert_eq!(hash, hash_bytes(load32_le(input, ip), shift));
                let bytes_between_hash_lookups = (skip >> 5) as usize;
                skip += 1;
                next_ip = ip + bytes_between_hash_lookups;
                if next_ip > ip_limit {
                    break 'scan;
                }
                next_hash = hash_bytes(load32_le(input, next_ip), shift);
                candidate = table[hash as usize] as usize;
                debug_assert!(candidate < ip);
                table[hash as usize] = ip as u16;

                if load32_le(input, ip) == load32_le(input, candidate) {
                    break;
                }
            }

            // ── Flush the pending literal run ────────────────────────────────
            op = emit_literal(dst, op, input, next_emit, ip, true);

            // ── Extend and emit matches ──────────────────────────────────────
            // As long as the 4 bytes right after an emitted copy match a
            // table candidate, emit the next copy directly without going back
            // through the scan loop above.
            let mut input_bytes: u64;
            loop {
                let base = ip;
                let matched = 4 + find_match_length(&input[candidate + 4..], &input[ip + 4..]);
                ip += matched;
                debug_assert!(ip <= input_len);
                op = emit_copy(dst, op, base - candidate, matched);
                next_emit = ip;
                if ip >= ip_limit {
                    break 'scan;
                }

                // One 8-byte load at ip-1 feeds two probes: insert the hash
                // covering the last 4 match bytes (enables chained matches),
                // then look up the position right after the match.
                input_bytes = load64_le(input, ip - 1);
                let prev_hash = hash_bytes(u32_at_offset(input_bytes, 0), shift);
                table[prev_hash as usize] = (ip - 1) as u16;
                let cur_hash = hash_bytes(u32_at_offset(input_bytes, 1), shift);
                candidate = table[cur_hash as usize] as usize;
                let candidate_bytes = load32_le(input, candidate);
                table[cur_hash as usize] = ip as u16;

                if u32_at_offset(input_bytes, 1) != candidate_bytes {
                    break;
                }
            }

            next_hash = hash_bytes(u32_at_offset(input_bytes, 2), shift);
            ip += 1;
        }
    }

    // ── Trailing literal ─────────────────────────────────────────────────────
    if next_emit < input_len {
        op = emit_literal(dst, op, input, next_emit, input_len, false);
    }
    op
}

// ─────────────────────────────────────────────────────────────────────────────
// Frame drivers
// ─────────────────────────────────────────────────────────────────────────────

/// Compress everything `reader` yields into `writer` as one frame, returning
/// the total number of bytes appended.
///
/// This is the primary driver: the slice and Vec entry points below wrap it.
/// Non-contiguous sources are gathered block-by-block into a scratch buffer;
/// a contiguous source ([`ByteArraySource`]) is compressed in place.
pub fn compress_source_to_sink<R, W>(reader: &mut R, writer: &mut W) -> Result<usize, CompressError>
where
    R: Source + ?Sized,
    W: Sink + ?Sized,
{
    let uncompressed_len = reader.available();
    if uncompressed_len as u64 > u32::MAX as u64 {
        return Err(CompressError::InputTooLarge);
    }

    let mut written = 0usize;
    let mut prefix = [0u8; varint::MAX_LEN];
    let prefix_len = varint::encode32(&mut prefix, uncompressed_len as u32);
    writer
        .append(&prefix[..prefix_len])
        .map_err(|_| CompressError::Sink)?;
    written += prefix_len;

    let mut wmem = WorkingMemory::new();
    let mut block_scratch: Vec<u8> = Vec::new();
    let mut out_scratch = vec![0u8; max_compressed_length(BLOCK_SIZE)];

    let mut remaining = uncompressed_len;
    while remaining > 0 {
        let num_to_read = remaining.min(BLOCK_SIZE);
        let table = wmem.hash_table(num_to_read);

        let out_len = if reader.peek().len() >= num_to_read {
            let n = compress_fragment(&reader.peek()[..num_to_read], &mut out_scratch, table);
            reader.skip(num_to_read);
            n
        } else {
            // Source is fragmented: gather one block into scratch first.
            block_scratch.clear();
            while block_scratch.len() < num_to_read {
                let chunk = reader.peek();
                let take = chunk.len().min(num_to_read - block_scratch.len());
                debug_assert!(take > 0, "source ended before its declared length");
                if take == 0 {
                    break;
                }
                block_scratch.extend_from_slice(&chunk[..take]);
                reader.skip(take);
            }
            compress_fragment(&block_scratch, &mut out_scratch, table)
        };

        writer
            .append(&out_scratch[..out_len])
            .map_err(|_| CompressError::Sink)?;
        written += out_len;
        remaining -= num_to_read;
    }

    Ok(written)
}

/// Compress `src` into `writer`, returning the number of bytes appended.
pub fn compress_to_sink<W: Sink + ?Sized>(src: &[u8], writer: &mut W) -> Result<usize, CompressError> {
    let mut reader = ByteArraySource::new(src);
    compress_source_to_sink(&mut reader, writer)
}

/// Compress `src` into the caller-provided `dst`, returning the compressed
/// length.
///
/// `dst` must hold at least [`max_compressed_length`]`(src.len())` bytes;
/// a smaller destination yields [`CompressError::OutputTooSmall`].
pub fn compress(src: &[u8], dst: &mut [u8]) -> Result<usize, CompressError> {
    let mut sink = SliceSink::new(dst);
    match compress_to_sink(src, &mut sink) {
        Ok(n) => Ok(n),
        Err(CompressError::Sink) => Err(CompressError::OutputTooSmall),
        Err(e) => Err(e),
    }
}

/// Compress `src` into a freshly allocated `Vec`.
pub fn compress_to_vec(src: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut out = Vec::with_capacity(max_compressed_length(src.len()).min(1 << 20));
    compress_to_sink(src, &mut out)?;
    Ok(out)
}
