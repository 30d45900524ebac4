//! Incremental MD5 digest engine (RFC 1321).
//!
//! The engine consumes a byte stream through repeated [`Md5::update`] calls
//! and produces the 16-byte digest with [`Md5::digest`]. Splitting the input
//! across calls never changes the result: feeding a message in any sequence
//! of chunks is equivalent to one call with the concatenation.
//!
//! # Finalization
//!
//! [`Md5::digest`] takes `&self` and finalizes a copy of the internal state,
//! so the engine survives finalization untouched: call it repeatedly, keep
//! appending input afterwards, or [`Clone`] the engine to share a common
//! message prefix across several suffixes.
//!
//! # Example
//!
//! ```
//! use digests::Md5;
//!
//! let mut md5 = Md5::new();
//! md5.update(b"The quick brown fox ");
//! md5.update(b"jumps over the lazy dog");
//! assert_eq!(md5.hex_digest(), "9e107d9d372bb6826bd81d3542a419d6");
//! ```

use std::io::{self, Read};

mod block;
mod digest;

#[cfg(test)]
mod tests;

pub use digest::Md5Digest;

/// Incremental MD5 context.
///
/// Holds the four accumulator words, the partial-block buffer, and the
/// two-word bit counter. All state is plain owned data, so [`Clone`] yields
/// a fully independent engine.
#[derive(Clone, Debug)]
pub struct Md5 {
    /// Accumulators A, B, C, D.
    state: [u32; 4],
    /// Total message length in bits, mod 2^64: low word first, carries
    /// propagate into the high word.
    count: [u32; 2],
    /// Pending bytes of an incomplete block; only `buffer_len` are live.
    buffer: [u8; 64],
    buffer_len: usize,
}

impl Md5 {
    /// Number of bytes in an MD5 digest.
    pub const DIGEST_LEN: usize = 16;

    /// Number of bytes consumed by one compression round.
    pub const BLOCK_LEN: usize = 64;

    /// Default buffer length used by [`update_reader`](Self::update_reader).
    pub const DEFAULT_READER_BUFFER_LEN: usize = 32 * 1024;

    /// Creates an engine with empty counters and the initial accumulators.
    ///
    /// # Examples
    ///
    /// ```
    /// use digests::Md5;
    ///
    /// let md5 = Md5::new();
    /// assert_eq!(md5.hex_digest(), "d41d8cd98f00b204e9800998ecf8427e");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: block::INIT,
            count: [0, 0],
            buffer: [0; 64],
            buffer_len: 0,
        }
    }

    /// Resets the engine back to its freshly-constructed state.
    pub const fn reset(&mut self) {
        self.state = block::INIT;
        self.count = [0, 0];
        self.buffer = [0; 64];
        self.buffer_len = 0;
    }

    /// Appends `data` to the logical message.
    ///
    /// Every complete 64-byte block formed by the buffered remainder plus
    /// the new bytes runs one compression round; a trailing partial block is
    /// retained for the next call. Calling `update` repeatedly is equivalent
    /// to a single call with the concatenated input, in call order.
    ///
    /// # Examples
    ///
    /// ```
    /// use digests::Md5;
    ///
    /// let mut chunked = Md5::new();
    /// chunked.update(b"ab");
    /// chunked.update(b"c");
    ///
    /// let mut whole = Md5::new();
    /// whole.update(b"abc");
    /// assert_eq!(chunked.digest(), whole.digest());
    /// ```
    pub fn update(&mut self, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        self.advance_count(data.len());

        let mut rest = data;
        if self.buffer_len > 0 {
            let take = (Self::BLOCK_LEN - self.buffer_len).min(rest.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&rest[..take]);
            self.buffer_len += take;
            rest = &rest[take..];

            if self.buffer_len < Self::BLOCK_LEN {
                return;
            }
            block::compress(&mut self.state, &self.buffer);
            self.buffer_len = 0;
        }

        let mut blocks = rest.chunks_exact(Self::BLOCK_LEN);
        for chunk in &mut blocks {
            block::compress(&mut self.state, chunk);
        }

        let remainder = blocks.remainder();
        self.buffer[..remainder.len()].copy_from_slice(remainder);
        self.buffer_len = remainder.len();
    }

    /// Updates the engine by consuming data from an [`io::Read`] implementation.
    ///
    /// Returns the number of bytes consumed. Reads interrupted by signals
    /// are retried; any other I/O error is returned as-is and leaves the
    /// engine reflecting the bytes consumed so far.
    ///
    /// # Errors
    ///
    /// Returns an [`io::ErrorKind::InvalidInput`] error when `buffer` is
    /// empty, otherwise propagates errors from `reader`.
    pub fn update_reader_with_buffer<R: Read>(
        &mut self,
        reader: &mut R,
        buffer: &mut [u8],
    ) -> io::Result<u64> {
        if buffer.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "digest reader buffer must not be empty",
            ));
        }

        let mut total = 0u64;
        loop {
            match reader.read(buffer) {
                Ok(0) => break,
                Ok(n) => {
                    self.update(&buffer[..n]);
                    total = total.saturating_add(n as u64);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(total)
    }

    /// Convenience wrapper around
    /// [`update_reader_with_buffer`](Self::update_reader_with_buffer) that
    /// allocates a heap buffer of
    /// [`DEFAULT_READER_BUFFER_LEN`](Self::DEFAULT_READER_BUFFER_LEN) bytes.
    ///
    /// # Errors
    ///
    /// Propagates errors from `reader`.
    pub fn update_reader<R: Read>(&mut self, reader: &mut R) -> io::Result<u64> {
        let mut buffer = vec![0u8; Self::DEFAULT_READER_BUFFER_LEN];
        self.update_reader_with_buffer(reader, &mut buffer)
    }

    /// Finalizes the message and returns the 16-byte digest, leaving the
    /// engine untouched.
    ///
    /// A copy of the state absorbs the padding: one `0x80` byte, zero bytes
    /// until the buffered length reaches 56 mod 64, then the original bit
    /// count as eight little-endian bytes (low word first). The live
    /// accumulators, buffer, and counters never change, so finalizing twice
    /// yields identical bytes and later `update` calls behave as if
    /// `digest` had never run.
    ///
    /// # Examples
    ///
    /// ```
    /// use digests::Md5;
    ///
    /// let mut md5 = Md5::new();
    /// md5.update(b"abc");
    /// let first = md5.digest();
    /// assert_eq!(first, md5.digest());
    ///
    /// md5.update(b"def");
    /// assert_eq!(md5.hex_digest(), digests::hex_digest(b"abcdef"));
    /// ```
    #[must_use]
    pub fn digest(&self) -> Md5Digest {
        let mut state = self.state;
        let mut last = [0u8; Self::BLOCK_LEN];
        last[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        last[self.buffer_len] = 0x80;

        // The eight-byte bit count lands at offset 56; a tail of 56 or more
        // buffered bytes pushes it into an extra block.
        if self.buffer_len >= Self::BLOCK_LEN - 8 {
            block::compress(&mut state, &last);
            last = [0u8; Self::BLOCK_LEN];
        }

        last[56..60].copy_from_slice(&self.count[0].to_le_bytes());
        last[60..64].copy_from_slice(&self.count[1].to_le_bytes());
        block::compress(&mut state, &last);

        Md5Digest::from_words(state)
    }

    /// Returns the 32-character lowercase hex encoding of [`digest`](Self::digest).
    #[must_use]
    pub fn hex_digest(&self) -> String {
        self.digest().to_hex()
    }

    /// Advances the bit counter by `8 * len`, carrying into the high word.
    fn advance_count(&mut self, len: usize) {
        let bits = (len as u64).wrapping_shl(3);
        let (low, carried) = self.count[0].overflowing_add(bits as u32);
        self.count[0] = low;
        self.count[1] = self.count[1]
            .wrapping_add((bits >> 32) as u32)
            .wrapping_add(u32::from(carried));
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the MD5 digest of `data` in one call.
///
/// # Examples
///
/// ```
/// use digests::md5;
///
/// let digest = md5::digest(b"");
/// assert_eq!(digest.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[must_use]
pub fn digest(data: &[u8]) -> Md5Digest {
    let mut md5 = Md5::new();
    md5.update(data);
    md5.digest()
}

/// Computes the lowercase hex MD5 digest of `data` in one call.
#[must_use]
pub fn hex_digest(data: &[u8]) -> String {
    digest(data).to_hex()
}
