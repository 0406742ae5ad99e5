//! Field arithmetic modulo p = 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1

use super::util::Limbs;
use crate::FieldBytes;
use elliptic_curve::{
    group::ff::PrimeField,
    subtle::{Choice, ConstantTimeEq, CtOption},
};

/// Constant representing the modulus
/// p = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE FFFFFC2F
const MODULUS: Limbs = [
    0xFFFF_FFFE_FFFF_FC2F,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// R = 2^256 mod p
const R: Limbs = [0x0000_0001_0000_03D1, 0, 0, 0];

/// R^2 = 2^512 mod p
const R2: Limbs = [0x0000_07A2_000E_90A1, 0x0000_0000_0000_0001, 0, 0];

/// INV = -(p^-1 mod 2^64) mod 2^64
const INV: u64 = 0xD838_091D_D225_3531;

/// p - 2
const MODULUS_MINUS_TWO: Limbs = [
    0xFFFF_FFFE_FFFF_FC2D,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// (p + 1) / 4
const SQRT_EXPONENT: Limbs = [
    0xFFFF_FFFF_BFFF_FF0C,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x3FFF_FFFF_FFFF_FFFF,
];

/// p as a hex string
const MODULUS_HEX: &str = "0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f";

/// An element in the finite field used for curve coordinates.
// Elements are always in Montgomery form; i.e., FieldElement(a) = aR mod p,
// with R = 2^256.
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) Limbs);

impl_montgomery_arithmetic!(
    name: FieldElement,
    modulus: MODULUS,
    r: R,
    r2: R2,
    inv: INV,
    modulus_minus_two: MODULUS_MINUS_TWO
);

impl FieldElement {
    /// Parses a big endian byte array without checking that it is less
    /// than `p`. Values outside the field are reduced.
    pub(crate) const fn from_bytes_unchecked(bytes: &FieldBytes) -> Self {
        Self::from_limbs_unchecked(super::util::bytes_to_limbs(bytes))
    }

    /// Returns the square root of self mod p, or `None` if no square root
    /// exists, i.e. `self` is a quadratic non-residue.
    ///
    /// Since `p ≡ 3 mod 4` the candidate root is `self^((p + 1) / 4)`.
    pub fn sqrt(&self) -> CtOption<Self> {
        let sqrt = self.pow_vartime(&SQRT_EXPONENT);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }
}

impl PrimeField for FieldElement {
    type Repr = FieldBytes;

    const MODULUS: &'static str = MODULUS_HEX;
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self = Self::from_limbs_unchecked([
        0xFFFF_FFFF_7FFF_FE18,
        0xFFFF_FFFF_FFFF_FFFF,
        0xFFFF_FFFF_FFFF_FFFF,
        0x7FFF_FFFF_FFFF_FFFF,
    ]);
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 1;
    const ROOT_OF_UNITY: Self = Self::ONE.negate();
    const ROOT_OF_UNITY_INV: Self = Self::ONE.negate();
    const DELTA: Self = Self::from_u64(9);

    fn from_repr(bytes: FieldBytes) -> CtOption<Self> {
        Self::from_bytes(&bytes)
    }

    fn to_repr(&self) -> FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        Self::is_odd(self)
    }
}

#[cfg(test)]
impl FieldElement {
    pub(crate) fn modulus_as_biguint() -> num_bigint::BigUint {
        crate::arithmetic::dev::limbs_to_biguint(&MODULUS)
    }
}
