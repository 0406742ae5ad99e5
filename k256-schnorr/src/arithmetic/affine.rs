//! Affine points

#![allow(clippy::op_ref)]

use super::{CURVE_EQUATION_B, FieldElement, ProjectivePoint, Scalar};
use crate::{CompressedPoint, FieldBytes};
use core::ops::{Mul, Neg};
use elliptic_curve::{
    consts::U33,
    generic_array::GenericArray,
    group::{GroupEncoding, prime::PrimeCurveAffine},
    point::AffineCoordinates,
    sec1::Tag,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

/// Fixed-width [`GroupEncoding`] representation of a point: the SEC1
/// compressed form, or 33 zero bytes for the identity.
pub type EncodedPoint = GenericArray<u8, U33>;

/// secp256k1 curve point expressed in affine coordinates.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// x-coordinate
    pub(crate) x: FieldElement,

    /// y-coordinate
    pub(crate) y: FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead to permit `const`
    /// constructors for `IDENTITY` and `GENERATOR`.
    pub(super) infinity: u8,
}

impl AffinePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of secp256k1.
    ///
    /// ```text
    /// Gₓ = 79be667e f9dcbbac 55a06295 ce870b07 029bfcdb 2dce28d9 59f2815b 16f81798
    /// Gᵧ = 483ada77 26a3c465 5da4fbfc 0e1108a8 fd17b448 a6855419 9c47d08f fb10d4b8
    /// ```
    pub const GENERATOR: Self = Self {
        x: FieldElement::from_bytes_unchecked(&[
            0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
            0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b,
            0x16, 0xf8, 0x17, 0x98,
        ]),
        y: FieldElement::from_bytes_unchecked(&[
            0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11,
            0x08, 0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f,
            0xfb, 0x10, 0xd4, 0xb8,
        ]),
        infinity: 0,
    };

    /// Create a new [`AffinePoint`] with the given coordinates.
    pub(crate) const fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y, infinity: 0 }
    }

    /// Does this point satisfy `y² = x³ + 7`? The identity is considered on
    /// the curve.
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = self.x.square() * &self.x + &CURVE_EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }

    /// Recovers the point with the given x-coordinate whose y-coordinate has
    /// the requested parity: odd when `y_is_odd` is set, even otherwise.
    ///
    /// BIP340's `lift_x` is `lift_x(x, Choice::from(0))`.
    ///
    /// Returns `None` if `x_bytes` is not a field element or `x³ + 7` is not
    /// a square.
    pub fn lift_x(x_bytes: &FieldBytes, y_is_odd: Choice) -> CtOption<Self> {
        FieldElement::from_bytes(x_bytes).and_then(|x| {
            let alpha = x.square() * &x + &CURVE_EQUATION_B;
            alpha.sqrt().map(|beta| {
                let y = FieldElement::conditional_select(
                    &beta.negate(),
                    &beta,
                    beta.is_odd().ct_eq(&y_is_odd),
                );
                Self::new(x, y)
            })
        })
    }

    /// Parses a 33-byte SEC1 compressed point.
    ///
    /// The tag must be [`Tag::CompressedEvenY`] or [`Tag::CompressedOddY`],
    /// the x-coordinate must be less than `p`, and it must lie on the curve.
    /// The identity has no encoding here.
    pub fn decompress(bytes: &CompressedPoint) -> CtOption<Self> {
        // The tag is public
        let y_is_odd = match Tag::from_u8(bytes[0]) {
            Ok(Tag::CompressedEvenY) => Choice::from(0),
            Ok(Tag::CompressedOddY) => Choice::from(1),
            _ => return CtOption::new(Self::IDENTITY, Choice::from(0)),
        };

        let mut x_bytes = FieldBytes::default();
        x_bytes.copy_from_slice(&bytes[1..]);
        Self::lift_x(&x_bytes, y_is_odd)
    }

    /// Serializes this point in SEC1 compressed form.
    ///
    /// The identity serializes as 33 zero bytes, which [`decompress`] rejects.
    ///
    /// [`decompress`]: AffinePoint::decompress
    pub fn to_compressed(&self) -> CompressedPoint {
        let mut result = [0u8; 33];
        result[0] = u8::conditional_select(
            &(Tag::CompressedEvenY as u8),
            &(Tag::CompressedOddY as u8),
            self.y_is_odd(),
        );
        result[1..].copy_from_slice(&self.x.to_bytes());

        let identity = [0u8; 33];
        let mut encoded = [0u8; 33];
        for (out, (id, pt)) in encoded
            .iter_mut()
            .zip(identity.iter().zip(result.iter()))
        {
            *out = u8::conditional_select(pt, id, self.is_identity());
        }
        encoded
    }
}

impl PrimeCurveAffine for AffinePoint {
    type Scalar = Scalar;
    type Curve = ProjectivePoint;

    /// Returns the identity of the group: the point at infinity.
    fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the base point of secp256k1.
    fn generator() -> Self {
        Self::GENERATOR
    }

    /// Is this point the identity point?
    fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Convert to curve representation.
    fn to_curve(&self) -> ProjectivePoint {
        ProjectivePoint::from(*self)
    }
}

impl AffineCoordinates for AffinePoint {
    type FieldRepr = FieldBytes;

    fn x(&self) -> FieldBytes {
        self.x.to_bytes()
    }

    fn y_is_odd(&self) -> Choice {
        self.y.is_odd()
    }
}

impl GroupEncoding for AffinePoint {
    type Repr = EncodedPoint;

    fn from_bytes(bytes: &EncodedPoint) -> CtOption<Self> {
        let mut compressed = [0u8; 33];
        compressed.copy_from_slice(bytes);

        // All-zero bytes are the identity, mirroring `to_compressed`
        let is_identity = compressed[..].ct_eq(&[0u8; 33][..]);
        let point = Self::decompress(&compressed);
        let decoded = Self::conditional_select(
            &point.unwrap_or(Self::IDENTITY),
            &Self::IDENTITY,
            is_identity,
        );
        CtOption::new(decoded, point.is_some() | is_identity)
    }

    fn from_bytes_unchecked(bytes: &EncodedPoint) -> CtOption<Self> {
        // No unchecked conversion possible for compressed points
        Self::from_bytes(bytes)
    }

    fn to_bytes(&self) -> EncodedPoint {
        EncodedPoint::clone_from_slice(&self.to_compressed())
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &AffinePoint, b: &AffinePoint, choice: Choice) -> AffinePoint {
        AffinePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        let both_identity = self.is_identity() & other.is_identity();
        let same_coordinates = self.x.ct_eq(&other.x)
            & self.y.ct_eq(&other.y)
            & self.infinity.ct_eq(&other.infinity);
        both_identity | same_coordinates
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

impl Mul<Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: Scalar) -> ProjectivePoint {
        ProjectivePoint::from(self) * scalar
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = ProjectivePoint;

    fn mul(self, scalar: &Scalar) -> ProjectivePoint {
        ProjectivePoint::from(self) * scalar
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> Self::Output {
        AffinePoint {
            x: self.x,
            y: self.y.negate(),
            infinity: self.infinity,
        }
    }
}
