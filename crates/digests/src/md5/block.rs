//! MD5 block compression: the 64-step mixing procedure of RFC 1321.
//!
//! Every schedule that drives the rounds (additive constants, rotation
//! amounts, and message-word indices) is embedded as a literal table so the
//! output is bit-for-bit reproducible on every platform. Nothing is derived
//! from floating-point trigonometry at runtime.

/// Initial accumulator values A, B, C, D (RFC 1321 section 3.3).
///
/// Serialized little-endian the four words spell the byte pattern
/// `01 23 45 67 89 ab cd ef fe dc ba 98 76 54 32 10`.
pub(super) const INIT: [u32; 4] = [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476];

/// Additive constants for the 64 steps (RFC 1321 section 3.4).
///
/// `K[i]` equals `floor(2^32 * abs(sin(i + 1)))`, captured here as fixed
/// literals. One row per group of four steps.
#[rustfmt::skip]
const K: [u32; 64] = [
    0xd76a_a478, 0xe8c7_b756, 0x2420_70db, 0xc1bd_ceee,
    0xf57c_0faf, 0x4787_c62a, 0xa830_4613, 0xfd46_9501,
    0x6980_98d8, 0x8b44_f7af, 0xffff_5bb1, 0x895c_d7be,
    0x6b90_1122, 0xfd98_7193, 0xa679_438e, 0x49b4_0821,
    0xf61e_2562, 0xc040_b340, 0x265e_5a51, 0xe9b6_c7aa,
    0xd62f_105d, 0x0244_1453, 0xd8a1_e681, 0xe7d3_fbc8,
    0x21e1_cde6, 0xc337_07d6, 0xf4d5_0d87, 0x455a_14ed,
    0xa9e3_e905, 0xfcef_a3f8, 0x676f_02d9, 0x8d2a_4c8a,
    0xfffa_3942, 0x8771_f681, 0x6d9d_6122, 0xfde5_380c,
    0xa4be_ea44, 0x4bde_cfa9, 0xf6bb_4b60, 0xbebf_bc70,
    0x289b_7ec6, 0xeaa1_27fa, 0xd4ef_3085, 0x0488_1d05,
    0xd9d4_d039, 0xe6db_99e5, 0x1fa2_7cf8, 0xc4ac_5665,
    0xf429_2244, 0x432a_ff97, 0xab94_23a7, 0xfc93_a039,
    0x655b_59c3, 0x8f0c_cc92, 0xffef_f47d, 0x8584_5dd1,
    0x6fa8_7e4f, 0xfe2c_e6e0, 0xa301_4314, 0x4e08_11a1,
    0xf753_7e82, 0xbd3a_f235, 0x2ad7_d2bb, 0xeb86_d391,
];

/// Left-rotation amounts for the 64 steps (RFC 1321 section 3.4), one row
/// per round of sixteen.
#[rustfmt::skip]
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

/// Message-word indices for the 64 steps (RFC 1321 Appendix A), one row per
/// round of sixteen: round one walks the words in order, the later rounds
/// permute them with strides of 5, 3, and 7.
#[rustfmt::skip]
const M: [usize; 64] = [
    0,  1,  2,  3,  4,  5,  6,  7,  8,  9, 10, 11, 12, 13, 14, 15,
    1,  6, 11,  0,  5, 10, 15,  4,  9, 14,  3,  8, 13,  2,  7, 12,
    5,  8, 11, 14,  1,  4,  7, 10, 13,  0,  3,  6,  9, 12, 15,  2,
    0,  7, 14,  5, 12,  3, 10,  1,  8, 15,  6, 13,  4, 11,  2,  9,
];

/// Round 1 mixing function: `(x & y) | (!x & z)`.
#[inline]
const fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Round 2 mixing function: `(x & z) | (y & !z)`.
#[inline]
const fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & !z)
}

/// Round 3 mixing function: `x ^ y ^ z`.
#[inline]
const fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// Round 4 mixing function: `y ^ (x | !z)`.
#[inline]
const fn i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | !z)
}

/// Runs one compression round over a complete 64-byte block.
///
/// Decodes the block into sixteen little-endian 32-bit words, mixes them
/// through four rounds of sixteen steps, and folds the result back into
/// `state` with wrapping additions.
///
/// `block` must hold exactly 64 bytes; both call sites feed whole blocks.
#[inline]
pub(super) fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), 64, "compression consumes whole blocks");

    let mut words = [0u32; 16];
    for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let mut a = state[0];
    let mut b = state[1];
    let mut c = state[2];
    let mut d = state[3];

    for step in 0..64 {
        let mixed = match step >> 4 {
            0 => f(b, c, d),
            1 => g(b, c, d),
            2 => h(b, c, d),
            _ => i(b, c, d),
        };
        let rotated = a
            .wrapping_add(mixed)
            .wrapping_add(words[M[step]])
            .wrapping_add(K[step])
            .rotate_left(S[step]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(rotated);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}
