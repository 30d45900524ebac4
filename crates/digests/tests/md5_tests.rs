//! MD5 engine integration tests.
//!
//! Validates the implementation against:
//! 1. RFC 1321 official test vectors
//! 2. Padding boundaries around the 56-byte threshold
//! 3. Chunked and reader-driven streaming
//! 4. The RustCrypto `md-5` crate on random inputs
//! 5. The system `md5sum` binary where available

use std::io::Write;
use std::process::{Command, Stdio};

use digests::{Md5, digest, hex_digest};

/// Builds an n-byte fixture cycling through the ASCII digits.
fn digits(len: usize) -> Vec<u8> {
    b"0123456789".iter().copied().cycle().take(len).collect()
}

// ============================================================================
// RFC 1321 Official Test Vectors
// ============================================================================

/// RFC 1321 Section A.5 defines the official MD5 test suite; the fox
/// sentences are the canonical supplementary vectors.
mod rfc1321_test_vectors {
    use super::*;

    #[test]
    fn rfc1321_empty_string() {
        assert_eq!(hex_digest(b""), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn rfc1321_single_char_a() {
        assert_eq!(hex_digest(b"a"), "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn rfc1321_abc() {
        assert_eq!(hex_digest(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn rfc1321_message_digest() {
        assert_eq!(
            hex_digest(b"message digest"),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
    }

    #[test]
    fn rfc1321_lowercase_alphabet() {
        assert_eq!(
            hex_digest(b"abcdefghijklmnopqrstuvwxyz"),
            "c3fcd3d76192e4007dfb496cca67e13b"
        );
    }

    #[test]
    fn rfc1321_alphanumeric() {
        assert_eq!(
            hex_digest(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"),
            "d174ab98d277d9f5a5611c2c9f419d9f"
        );
    }

    #[test]
    fn rfc1321_eighty_digits() {
        assert_eq!(
            hex_digest(
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890"
            ),
            "57edf4a22be3c955ac49da2e2107b67a"
        );
    }

    #[test]
    fn quick_brown_fox() {
        assert_eq!(
            hex_digest(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn quick_brown_fox_with_period() {
        assert_eq!(
            hex_digest(b"The quick brown fox jumps over the lazy dog."),
            "e4d909c290d0fb1ca068ffaddf22cbd0"
        );
    }
}

// ============================================================================
// Single Bytes
// ============================================================================

mod single_byte {
    use super::*;

    #[test]
    fn single_zero_byte() {
        assert_eq!(hex_digest(&[0x00]), "93b885adfe0da089cdf634904fd59f71");
    }

    #[test]
    fn single_one_byte() {
        assert_eq!(hex_digest(&[0x01]), "55a54008ad1ba589aa210d2629c1df41");
    }

    #[test]
    fn single_ff_byte() {
        assert_eq!(hex_digest(&[0xff]), "00594fd4f42ba43fc1ca0427a0576295");
    }

    #[test]
    fn all_byte_values_in_order() {
        let data: Vec<u8> = (0..=255u8).collect();
        assert_eq!(hex_digest(&data), "e2c865db4162bed963bfaa9ef6ac18f0");
    }
}

// ============================================================================
// Padding Boundaries
// ============================================================================

/// Lengths straddling the 56-byte threshold exercise both padding branches:
/// below it the bit count fits after the 0x80 marker in the same block,
/// at or above it the count spills into an extra block.
mod padding_boundaries {
    use super::*;

    const CASES: &[(usize, &str)] = &[
        (55, "6e7a4fc92eb1c3f6e652425bcc8d44b5"),
        (56, "8af270b2847610e742b0791b53648c09"),
        (57, "c620bace4cde41bc45a14cfa62ee3487"),
        (63, "c5e256437e758092dbfe06283e489019"),
        (64, "7f7bfd348709deeaace19e3f535f8c54"),
        (65, "beb9f48bc802ca5ca043bcc15e219a5a"),
        (119, "42eec8502cb0ed8f0d05aa5a24463b6a"),
        (120, "71877a6051c58e0e9246babc177ca5f2"),
        (121, "1f714d06ee59deaae4c91966f9e4b7a2"),
        (128, "1f7d0dad0e987e87a084268b8aaaf77b"),
    ];

    #[test]
    fn digit_fixtures_across_both_branches() {
        for &(len, expected) in CASES {
            assert_eq!(
                hex_digest(&digits(len)),
                expected,
                "digest mismatch for {len}-byte input"
            );
        }
    }

    #[test]
    fn sixty_four_zero_bytes() {
        assert_eq!(hex_digest(&[0u8; 64]), "3b5d3c7d207e37dceeedd301e35e2e58");
    }
}

// ============================================================================
// Chunking Invariance
// ============================================================================

mod chunking_invariance {
    use super::*;

    /// Splits `data` at every single boundary point and confirms the split
    /// digest matches the one-call digest.
    fn assert_split_invariant(data: &[u8]) {
        let expected = digest(data);
        for split in 0..=data.len() {
            let mut md5 = Md5::new();
            md5.update(&data[..split]);
            md5.update(&data[split..]);
            assert_eq!(
                md5.digest(),
                expected,
                "split at byte {split} changed the digest"
            );
        }
    }

    #[test]
    fn every_split_point_of_the_fox_sentence() {
        assert_split_invariant(b"The quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn every_split_point_across_two_blocks() {
        assert_split_invariant(&digits(128));
    }

    #[test]
    fn byte_at_a_time_matches_one_call() {
        let data = digits(200);
        let mut md5 = Md5::new();
        for byte in &data {
            md5.update(std::slice::from_ref(byte));
        }
        assert_eq!(md5.digest(), digest(&data));
    }

    #[test]
    fn uneven_three_way_split() {
        let data = digits(150);
        let mut md5 = Md5::new();
        md5.update(&data[..1]);
        md5.update(&data[1..97]);
        md5.update(&data[97..]);
        assert_eq!(md5.digest(), digest(&data));
    }
}

// ============================================================================
// Streaming API
// ============================================================================

mod streaming_api {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn fixed_chunk_sizes_match_one_call() {
        let data = digits(1000);
        let expected = digest(&data);

        for chunk_len in [1, 3, 7, 64, 100] {
            let mut md5 = Md5::new();
            for chunk in data.chunks(chunk_len) {
                md5.update(chunk);
            }
            assert_eq!(
                md5.digest(),
                expected,
                "chunk length {chunk_len} changed the digest"
            );
        }
    }

    #[test]
    fn thousand_a_bytes() {
        let data = vec![b'a'; 1000];
        assert_eq!(hex_digest(&data), "cabe45dcc9ae5b66ba86600cca6b8ba8");
    }

    #[test]
    fn million_a_bytes_streamed() {
        let chunk = vec![b'a'; 10_000];
        let mut md5 = Md5::new();
        for _ in 0..100 {
            md5.update(&chunk);
        }
        assert_eq!(md5.hex_digest(), "7707d6ae4e027c70eea2a935c2296f21");
    }

    #[test]
    fn reader_consumption_matches_slice_update() {
        let data = digits(100_000);
        let mut streamed = Md5::new();
        let consumed = streamed
            .update_reader(&mut Cursor::new(&data[..]))
            .expect("cursor reads cannot fail");

        assert_eq!(consumed, data.len() as u64);
        assert_eq!(streamed.digest(), digest(&data));
    }

    /// Streaming 512 MiB of zeros wraps the low bit-count word (2^32 bits),
    /// exercising the carry into the high word.
    #[test]
    fn low_count_word_carry_at_512_mib() {
        let mut reader = std::io::repeat(0).take(512 * 1024 * 1024);
        let mut md5 = Md5::new();
        let consumed = md5
            .update_reader(&mut reader)
            .expect("repeat reads cannot fail");

        assert_eq!(consumed, 512 * 1024 * 1024);
        assert_eq!(md5.hex_digest(), "aa559b4e3523a6c931f08f4df52d58f2");
    }
}

// ============================================================================
// Cross-Validation Against the RustCrypto `md-5` Crate
// ============================================================================

mod cross_validation {
    use super::*;
    use md5::{Digest as _, Md5 as RefMd5};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn reference_digest(data: &[u8]) -> [u8; 16] {
        let mut hasher = RefMd5::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    #[test]
    fn agrees_on_fixed_inputs() {
        let cases: &[&[u8]] = &[
            b"",
            b"a",
            b"abc",
            b"The quick brown fox jumps over the lazy dog",
            &[0u8; 64],
            &[0xffu8; 129],
        ];
        for &data in cases {
            assert_eq!(digest(data).into_bytes(), reference_digest(data));
        }
    }

    #[test]
    fn agrees_on_random_inputs() {
        let mut rng = StdRng::seed_from_u64(0x1321);
        for _ in 0..200 {
            let len = rng.gen_range(0..4096);
            let mut data = vec![0u8; len];
            rng.fill(&mut data[..]);

            assert_eq!(
                digest(&data).into_bytes(),
                reference_digest(&data),
                "divergence from reference on a {len}-byte input"
            );
        }
    }

    #[test]
    fn agrees_on_random_chunk_decompositions() {
        let mut rng = StdRng::seed_from_u64(0x1989);
        let data: Vec<u8> = (0..10_000).map(|_| rng.r#gen()).collect();
        let expected = reference_digest(&data);

        for _ in 0..20 {
            let mut md5 = Md5::new();
            let mut rest = &data[..];
            while !rest.is_empty() {
                let take = rng.gen_range(1..=rest.len().min(777));
                md5.update(&rest[..take]);
                rest = &rest[take..];
            }
            assert_eq!(md5.digest().into_bytes(), expected);
        }
    }
}

// ============================================================================
// System md5sum Comparison
// ============================================================================

mod system_md5sum_comparison {
    use super::*;

    /// Runs the system md5sum on the given data and returns the hex digest,
    /// or `None` when the binary is unavailable.
    fn system_md5sum(data: &[u8]) -> Option<String> {
        let mut child = Command::new("md5sum")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        {
            let stdin = child.stdin.as_mut()?;
            stdin.write_all(data).ok()?;
        }

        let output = child.wait_with_output().ok()?;
        if !output.status.success() {
            return None;
        }

        // md5sum output format: "hash  -"
        let stdout = String::from_utf8(output.stdout).ok()?;
        stdout.split_whitespace().next().map(str::to_owned)
    }

    #[test]
    fn compare_fixed_inputs_with_system() {
        let cases: &[&[u8]] = &[b"", b"abc", b"Hello, World!", &[0x42]];
        for &data in cases {
            if let Some(system_hash) = system_md5sum(data) {
                assert_eq!(
                    hex_digest(data),
                    system_hash,
                    "mismatch with system md5sum on {data:?}"
                );
            }
        }
    }

    #[test]
    fn compare_block_multiples_with_system() {
        for len in [64, 128, 4096] {
            let data = digits(len);
            if let Some(system_hash) = system_md5sum(&data) {
                assert_eq!(
                    hex_digest(&data),
                    system_hash,
                    "mismatch with system md5sum on a {len}-byte input"
                );
            }
        }
    }
}
