#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use digests::Md5Digest;

mod error;

pub use error::FingerprintError;

/// Opening boundary line of a PEM-encoded public key.
pub const PEM_HEADER: &str = "-----BEGIN PUBLIC KEY-----";

/// Closing boundary line of a PEM-encoded public key.
pub const PEM_FOOTER: &str = "-----END PUBLIC KEY-----";

/// MD5 fingerprint of public-key material.
///
/// Displays as sixteen colon-separated two-digit lowercase hex groups, the
/// form servers echo back for registered keys:
///
/// ```
/// let print = fingerprint::fingerprint_der(b"abc");
/// assert_eq!(
///     print.to_string(),
///     "90:01:50:98:3c:d2:4f:b0:d6:96:3f:7d:28:e1:7f:72"
/// );
/// ```
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Fingerprint(Md5Digest);

impl Fingerprint {
    /// Returns the underlying MD5 digest.
    #[must_use]
    pub const fn digest(&self) -> Md5Digest {
        self.0
    }

    /// Returns the fingerprint as raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }

    /// Consumes the fingerprint and returns the raw digest bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 16] {
        self.0.into_bytes()
    }

    /// Renders the fingerprint as 32 lowercase hex digits without colons.
    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<Md5Digest> for Fingerprint {
    fn from(digest: Md5Digest) -> Self {
        Self(digest)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, byte) in self.0.as_bytes().iter().enumerate() {
            if index > 0 {
                f.write_str(":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

/// Computes the fingerprint of raw DER key material.
#[must_use]
pub fn fingerprint_der(der: &[u8]) -> Fingerprint {
    Fingerprint(digests::digest(der))
}

/// Computes the fingerprint of a PEM-encoded public key.
///
/// The base64 payload between the `BEGIN PUBLIC KEY` and `END PUBLIC KEY`
/// boundary lines is decoded back to DER and hashed as a single message.
/// Text outside the boundary lines is ignored, so concatenated bundles and
/// keys with surrounding commentary fingerprint the same as the bare key.
///
/// # Errors
///
/// Returns [`FingerprintError`] when a boundary line is missing or the
/// payload is not valid base64.
///
/// # Examples
///
/// ```
/// let pem = "-----BEGIN PUBLIC KEY-----\nYWJj\n-----END PUBLIC KEY-----\n";
/// let print = fingerprint::fingerprint_pem(pem)?;
/// assert_eq!(
///     print.to_string(),
///     "90:01:50:98:3c:d2:4f:b0:d6:96:3f:7d:28:e1:7f:72"
/// );
/// # Ok::<(), fingerprint::FingerprintError>(())
/// ```
pub fn fingerprint_pem(pem: &str) -> Result<Fingerprint, FingerprintError> {
    let der = STANDARD.decode(pem_body(pem)?)?;
    Ok(fingerprint_der(&der))
}

/// Extracts the base64 payload between the PEM boundary lines, dropping all
/// ASCII whitespace so line wrapping and CRLF endings do not affect the
/// decode.
fn pem_body(pem: &str) -> Result<String, FingerprintError> {
    let Some(header_at) = pem.find(PEM_HEADER) else {
        return Err(FingerprintError::MissingHeader);
    };
    let after_header = &pem[header_at + PEM_HEADER.len()..];

    let Some(footer_at) = after_header.find(PEM_FOOTER) else {
        return Err(FingerprintError::MissingFooter);
    };

    Ok(after_header[..footer_at]
        .chars()
        .filter(|ch| !ch.is_ascii_whitespace())
        .collect())
}
