//! Schnorr signing key.

use super::{Signature, VerifyingKey, challenge, nonce};
use crate::{Error, FieldBytes, MessageBytes, ProjectivePoint, Result, Scalar};
use elliptic_curve::{
    point::AffineCoordinates,
    subtle::{ConditionallySelectable, CtOption},
    zeroize::{Zeroize, ZeroizeOnDrop},
};

#[cfg(feature = "signature")]
use {
    sha2::{Digest, Sha256},
    signature::{KeypairRef, Signer, hazmat::PrehashSigner},
};

/// Schnorr signing key.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar, negated if needed so that its public point has an even
    /// y-coordinate.
    secret_key: Scalar,

    /// Verifying key for the scalar as it was given.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Parse signing key from big endian-encoded bytes.
    ///
    /// Returns [`Error::InvalidPrivateKey`] if the integer is zero or not less
    /// than the group order.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        let secret_key = Scalar::from_bytes(bytes).and_then(|d| CtOption::new(d, !d.is_zero()));
        Option::from(secret_key)
            .map(Self::from_nonzero_scalar)
            .ok_or(Error::InvalidPrivateKey)
    }

    fn from_nonzero_scalar(mut secret_key: Scalar) -> Self {
        let point = ProjectivePoint::mul_by_generator(&secret_key).to_affine();

        let mut negated = -secret_key;
        secret_key.conditional_assign(&negated, point.y_is_odd());
        negated.zeroize();

        SigningKey {
            secret_key,
            verifying_key: VerifyingKey { point },
        }
    }

    /// Get the [`VerifyingKey`] that corresponds to this signing key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Compute a deterministic Schnorr signature over a 32-byte message.
    ///
    /// Equivalent to [`SigningKey::sign_with_aux_rand`] with all-zero
    /// auxiliary data.
    pub fn sign(&self, message: &MessageBytes) -> Result<Signature> {
        self.sign_with_aux_rand(message, &[0u8; 32])
    }

    /// Compute a Schnorr signature over a 32-byte message, mixing `aux_rand`
    /// into the nonce.
    ///
    /// Returns [`Error::NonceDerivationFailed`] in the negligible case where
    /// the derived nonce is zero.
    pub fn sign_with_aux_rand(
        &self,
        message: &MessageBytes,
        aux_rand: &FieldBytes,
    ) -> Result<Signature> {
        let public_x = self.verifying_key.to_x_only_bytes();

        let mut k: Scalar = Option::from(nonce(&self.secret_key, &public_x, message, aux_rand))
            .ok_or(Error::NonceDerivationFailed)?;

        let R = ProjectivePoint::mul_by_generator(&k).to_affine();

        let mut negated = -k;
        k.conditional_assign(&negated, R.y_is_odd());
        negated.zeroize();

        let r = R.x();
        let e = challenge(&r, &public_x, message);

        // e·d' and the public e reveal d'
        let mut ed = e * self.secret_key;
        let s = k + ed;
        k.zeroize();
        ed.zeroize();

        Ok(Signature::from_components(&r, &s))
    }
}

//
// `*Signer` trait impls
//

#[cfg(feature = "signature")]
impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        let message =
            <&MessageBytes>::try_from(prehash).map_err(|_| signature::Error::new())?;
        Ok(self.sign(message)?)
    }
}

#[cfg(feature = "signature")]
impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        let digest: MessageBytes = Sha256::digest(msg).into();
        Ok(self.sign(&digest)?)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_key.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

#[cfg(feature = "signature")]
impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}
