//! Error types.

use core::fmt;

/// Result type with the `k256-schnorr` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by signing and by public key decoding.
///
/// A signature which fails to verify is *not* an error: verification reports
/// it as a `false` result.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The secret scalar is zero or not less than the group order `n`.
    InvalidPrivateKey,

    /// The public key is not a valid SEC1 compressed encoding of a point on
    /// the curve: bad parity tag, x-coordinate not less than `p`, or no
    /// matching y-coordinate.
    InvalidPublicKey,

    /// The derived nonce reduced to zero modulo `n`.
    NonceDerivationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPrivateKey => f.write_str("invalid private key"),
            Error::InvalidPublicKey => f.write_str("invalid public key"),
            Error::NonceDerivationFailed => f.write_str("nonce derivation failed"),
        }
    }
}

impl core::error::Error for Error {}

#[cfg(feature = "signature")]
impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
