use core::fmt;

/// 16-byte MD5 digest value.
///
/// The bytes are the four accumulator words A, B, C, D serialized
/// little-endian in that order, matching the wire layout mandated by
/// RFC 1321. The type is a plain value: copy it, hash it, or compare it
/// without touching the engine that produced it.
///
/// # Examples
///
/// ```
/// use digests::md5;
///
/// let digest = md5::digest(b"abc");
/// assert_eq!(digest.to_hex(), "900150983cd24fb0d6963f7d28e17f72");
/// assert_eq!(format!("{digest:x}"), digest.to_hex());
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Md5Digest([u8; 16]);

impl Md5Digest {
    /// Packs the final accumulator words into digest bytes, little-endian
    /// word by word.
    pub(super) fn from_words(words: [u32; 4]) -> Self {
        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(bytes)
    }

    /// Returns a reference to the digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Consumes the digest and returns the bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns the 32-character lowercase hex rendering, two digits per
    /// byte, most significant nibble first.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }
}

macro_rules! impl_hex_fmt {
    ($kind:ident, $format:literal) => {
        impl fmt::$kind for Md5Digest {
            fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                for byte in &self.0 {
                    write!(formatter, $format, byte)?;
                }
                Ok(())
            }
        }
    };
}

impl_hex_fmt!(LowerHex, "{:02x}");
impl_hex_fmt!(UpperHex, "{:02X}");

impl fmt::Display for Md5Digest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, formatter)
    }
}

impl fmt::Debug for Md5Digest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Md5Digest({self:x})")
    }
}

impl AsRef<[u8]> for Md5Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Md5Digest> for [u8; 16] {
    fn from(digest: Md5Digest) -> Self {
        digest.into_bytes()
    }
}
