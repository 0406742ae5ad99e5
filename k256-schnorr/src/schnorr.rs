//! Schnorr signatures over secp256k1 using the tagged hashes of [BIP340].
//!
//! # About
//!
//! A signature is the x-coordinate of a nonce point `R = k·G` followed by
//! the scalar `s = k + e·d mod n`, where the challenge `e` binds `R`, the
//! signer's public x-coordinate and the 32-byte message. Both the secret key
//! and the nonce are negated when needed so that `d·G` and `R` have even
//! y-coordinates, which lets the signature and the challenge commit to
//! x-coordinates only.
//!
//! Nonces are derived from the secret key and message, optionally mixed with
//! auxiliary randomness, so signing never depends on an external RNG.
//!
//! Public keys travel as 33-byte SEC1 compressed points. Only their
//! x-coordinate enters the challenge and the verification equation always
//! uses the even-y point with that x, so keys with either parity tag verify
//! the same signatures.
//!
//! # Usage
//!
#![cfg_attr(all(feature = "signature", feature = "std"), doc = "```")]
#![cfg_attr(not(all(feature = "signature", feature = "std")), doc = "```ignore")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use k256_schnorr::{
//!     signature::{Signer, Verifier},
//!     SigningKey, VerifyingKey,
//! };
//!
//! //
//! // Signing
//! //
//! let signing_key = SigningKey::from_bytes(&[0x42; 32])?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes(); // 33-bytes
//!
//! let message = b"Schnorr signatures prove knowledge of a secret in the random oracle model";
//! let signature = Signer::sign(&signing_key, message); // SHA-256 prehash
//!
//! //
//! // Verification
//! //
//! let verifying_key = VerifyingKey::from_sec1_bytes(&verifying_key_bytes)?;
//! Verifier::verify(&verifying_key, message, &signature)?;
//! # Ok(())
//! # }
//! ```
//!
//! [BIP340]: https://github.com/bitcoin/bips/blob/master/bip-0340.mediawiki

#![allow(non_snake_case)]

mod signing;
mod verifying;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{CompressedPoint, FieldBytes, MessageBytes, Result, Scalar, SignatureBytes};
use core::fmt;
use elliptic_curve::{subtle::CtOption, zeroize::Zeroize};
use sha2::{Digest, Sha256};

const AUX_TAG: &[u8] = b"BIP0340/aux";
const NONCE_TAG: &[u8] = b"BIP0340/nonce";
const CHALLENGE_TAG: &[u8] = b"BIP0340/challenge";

/// Schnorr signature: the nonce point's x-coordinate `r` followed by the
/// scalar `s`, both big endian.
///
/// Any 64 bytes can be held in a [`Signature`]. Out-of-range `r` or `s`
/// values are caught by verification, which rejects them.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Signature {
    bytes: SignatureBytes,
}

impl Signature {
    /// Size of a Schnorr signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Wrap serialized signature bytes.
    pub const fn from_bytes(bytes: &SignatureBytes) -> Self {
        Self { bytes: *bytes }
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        self.bytes
    }

    /// Get the `r` component of this signature.
    pub fn r_bytes(&self) -> FieldBytes {
        let mut r = FieldBytes::default();
        r.copy_from_slice(&self.bytes[..Self::BYTE_SIZE / 2]);
        r
    }

    /// Get the `s` component of this signature.
    pub fn s_bytes(&self) -> FieldBytes {
        let mut s = FieldBytes::default();
        s.copy_from_slice(&self.bytes[Self::BYTE_SIZE / 2..]);
        s
    }

    /// Assemble a signature from its components.
    pub(crate) fn from_components(r: &FieldBytes, s: &Scalar) -> Self {
        let mut bytes = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = bytes.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(r);
        s_bytes.copy_from_slice(&s.to_bytes());
        Self { bytes }
    }
}

impl From<SignatureBytes> for Signature {
    fn from(bytes: SignatureBytes) -> Signature {
        Signature::from_bytes(&bytes)
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x")?;
        for byte in self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "signature")]
impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        SignatureBytes::try_from(bytes)
            .map(Signature::from)
            .map_err(|_| signature::Error::new())
    }
}

#[cfg(feature = "signature")]
impl signature::SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }
}

/// Sign a 32-byte message with the given big endian secret key.
///
/// Deterministic: the nonce is derived from the key and message alone.
pub fn sign(secret_key: &FieldBytes, message: &MessageBytes) -> Result<SignatureBytes> {
    let signing_key = SigningKey::from_bytes(secret_key)?;
    Ok(signing_key.sign(message)?.to_bytes())
}

/// Sign a 32-byte message, mixing `aux_rand` into the nonce.
pub fn sign_with_aux_rand(
    secret_key: &FieldBytes,
    message: &MessageBytes,
    aux_rand: &FieldBytes,
) -> Result<SignatureBytes> {
    let signing_key = SigningKey::from_bytes(secret_key)?;
    Ok(signing_key.sign_with_aux_rand(message, aux_rand)?.to_bytes())
}

/// Verify a signature against a SEC1 compressed public key.
///
/// Returns an error only if the public key cannot be decoded. A signature
/// which does not verify, including one with `r ≥ p` or `s ≥ n`, yields
/// `Ok(false)`.
pub fn verify(
    public_key: &CompressedPoint,
    message: &MessageBytes,
    signature: &SignatureBytes,
) -> Result<bool> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)?;
    Ok(verifying_key.verify(message, &Signature::from_bytes(signature)))
}

/// Compute the SEC1 compressed encoding of `d·G` for the given big endian
/// secret key `d`.
pub fn public_key(secret_key: &FieldBytes) -> Result<CompressedPoint> {
    let signing_key = SigningKey::from_bytes(secret_key)?;
    Ok(signing_key.verifying_key().to_sec1_bytes())
}

/// Challenge scalar `e = hash_BIP0340/challenge(r_x || public_x || message) mod n`.
pub(crate) fn challenge(
    r_x: &FieldBytes,
    public_x: &FieldBytes,
    message: &MessageBytes,
) -> Scalar {
    let digest: FieldBytes = tagged_hash(CHALLENGE_TAG)
        .chain_update(r_x)
        .chain_update(public_x)
        .chain_update(message)
        .finalize()
        .into();

    Scalar::reduce_bytes(&digest)
}

/// Nonce scalar for the even-y normalized `secret` key.
///
/// Returns `None` if the derived value reduces to zero.
pub(crate) fn nonce(
    secret: &Scalar,
    public_x: &FieldBytes,
    message: &MessageBytes,
    aux_rand: &FieldBytes,
) -> CtOption<Scalar> {
    let mut t: FieldBytes = tagged_hash(AUX_TAG).chain_update(aux_rand).finalize().into();
    let mut secret_bytes = secret.to_bytes();

    for (a, b) in t.iter_mut().zip(secret_bytes.iter()) {
        *a ^= b
    }

    let mut rand: FieldBytes = tagged_hash(NONCE_TAG)
        .chain_update(t)
        .chain_update(public_x)
        .chain_update(message)
        .finalize()
        .into();

    let k = Scalar::reduce_bytes(&rand);

    t.zeroize();
    secret_bytes.zeroize();
    rand.zeroize();

    CtOption::new(k, !k.is_zero())
}

fn tagged_hash(tag: &[u8]) -> Sha256 {
    let tag_hash = Sha256::digest(tag);
    let mut digest = Sha256::new();
    digest.update(tag_hash);
    digest.update(tag_hash);
    digest
}
