//! Schnorr verifying key.

use super::{Signature, challenge};
use crate::{
    AffinePoint, CompressedPoint, Error, FieldBytes, FieldElement, MessageBytes, ProjectivePoint,
    Result, Scalar,
};
use elliptic_curve::{
    group::prime::PrimeCurveAffine,
    point::AffineCoordinates,
    subtle::{Choice, ConditionallySelectable},
};

#[cfg(feature = "signature")]
use {
    sha2::{Digest, Sha256},
    signature::{Verifier, hazmat::PrehashVerifier},
};

/// Schnorr verifying key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Decoded public point, with the parity it was encoded with
    pub(super) point: AffinePoint,
}

impl VerifyingKey {
    /// Parse a 33-byte SEC1 compressed public key.
    ///
    /// Returns [`Error::InvalidPublicKey`] if the tag is not `0x02`/`0x03`,
    /// the x-coordinate is not less than `p`, or no point has that
    /// x-coordinate.
    pub fn from_sec1_bytes(bytes: &CompressedPoint) -> Result<Self> {
        Option::from(AffinePoint::decompress(bytes))
            .map(|point| Self { point })
            .ok_or(Error::InvalidPublicKey)
    }

    /// Parse a 32-byte x-only public key, taking the point with even y.
    pub fn from_x_only_bytes(bytes: &FieldBytes) -> Result<Self> {
        Option::from(AffinePoint::lift_x(bytes, Choice::from(0)))
            .map(|point| Self { point })
            .ok_or(Error::InvalidPublicKey)
    }

    /// Serialize as a SEC1 compressed point.
    pub fn to_sec1_bytes(&self) -> CompressedPoint {
        self.point.to_compressed()
    }

    /// Serialize the x-coordinate.
    pub fn to_x_only_bytes(&self) -> FieldBytes {
        self.point.x()
    }

    /// Borrow the inner [`AffinePoint`] this type wraps.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// The point with this key's x-coordinate and an even y-coordinate.
    fn even_y_point(&self) -> AffinePoint {
        AffinePoint::conditional_select(&self.point, &-self.point, self.point.y_is_odd())
    }

    /// Verify a Schnorr signature over a 32-byte message.
    ///
    /// Returns `false` when `r ≥ p`, `s ≥ n`, or the signature equation does
    /// not hold.
    pub fn verify(&self, message: &MessageBytes, signature: &Signature) -> bool {
        let r_bytes = signature.r_bytes();

        let Some(r): Option<FieldElement> = FieldElement::from_bytes(&r_bytes).into() else {
            return false;
        };
        let Some(s): Option<Scalar> = Scalar::from_bytes(&signature.s_bytes()).into() else {
            return false;
        };

        let e = challenge(&r_bytes, &self.to_x_only_bytes(), message);

        let R = ProjectivePoint::lincomb(
            &ProjectivePoint::GENERATOR,
            &s,
            &self.even_y_point().to_curve(),
            &-e,
        )
        .to_affine();

        if R.is_identity().into() || R.y_is_odd().into() || R.x != r {
            return false;
        }

        true
    }
}

//
// `*Verifier` trait impls
//

#[cfg(feature = "signature")]
impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let message =
            <&MessageBytes>::try_from(prehash).map_err(|_| signature::Error::new())?;

        if self.verify(message, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

#[cfg(feature = "signature")]
impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        let digest: MessageBytes = Sha256::digest(msg).into();
        self.verify_prehash(&digest, signature)
    }
}

//
// Other trait impls
//

impl From<VerifyingKey> for AffinePoint {
    fn from(vk: VerifyingKey) -> AffinePoint {
        *vk.as_affine()
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(vk: &VerifyingKey) -> AffinePoint {
        *vk.as_affine()
    }
}
