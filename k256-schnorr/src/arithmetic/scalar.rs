//! Scalar field arithmetic modulo n = 115792089237316195423570985008687907852837564279074904382605163141518161494337

use super::util::{Limbs, bytes_to_limbs, sub_inner};
use crate::FieldBytes;
use elliptic_curve::{
    group::ff::PrimeField,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
};

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
const MODULUS: Limbs = [
    0xBFD2_5E8C_D036_4141,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// R = 2^256 mod n
const R: Limbs = [
    0x402D_A173_2FC9_BEBF,
    0x4551_2319_50B7_5FC4,
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0000,
];

/// R^2 = 2^512 mod n
const R2: Limbs = [
    0x896C_F214_67D7_D140,
    0x7414_96C2_0E7C_F878,
    0xE697_F5E4_5BCD_07C6,
    0x9D67_1CD5_81C6_9BC5,
];

/// INV = -(n^-1 mod 2^64) mod 2^64
const INV: u64 = 0x4B0D_FF66_5588_B13F;

/// n - 2
const MODULUS_MINUS_TWO: Limbs = [
    0xBFD2_5E8C_D036_413F,
    0xBAAE_DCE6_AF48_A03B,
    0xFFFF_FFFF_FFFF_FFFE,
    0xFFFF_FFFF_FFFF_FFFF,
];

/// (t - 1) / 2, where n - 1 = 2^6 · t with t odd
const T_MINUS_ONE_DIV_TWO: Limbs = [
    0x777F_A4BD_19A0_6C82,
    0xFD75_5DB9_CD5E_9140,
    0xFFFF_FFFF_FFFF_FFFF,
    0x01FF_FFFF_FFFF_FFFF,
];

/// n as a hex string
const MODULUS_HEX: &str = "0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// An element in the finite field modulo n: the order of the secp256k1
/// group.
///
/// Secret keys and nonces are scalars, so everything here runs in constant
/// time.
// Stored in Montgomery form, see `FieldElement`.
#[derive(Clone, Copy)]
pub struct Scalar(pub(crate) Limbs);

impl_montgomery_arithmetic!(
    name: Scalar,
    modulus: MODULUS,
    r: R,
    r2: R2,
    inv: INV,
    modulus_minus_two: MODULUS_MINUS_TWO
);

impl Scalar {
    /// Interprets the given big endian bytes as an integer and reduces it
    /// modulo n.
    ///
    /// Any 256-bit integer is less than `2n`, so a single conditional
    /// subtraction suffices.
    pub fn reduce_bytes(bytes: &FieldBytes) -> Self {
        let limbs = bytes_to_limbs(bytes);
        Self::from_limbs_unchecked(sub_inner(&limbs, 0, &MODULUS, &MODULUS))
    }
}

impl Scalar {
    /// Returns the square root of self mod n, or `None` if no square root
    /// exists.
    ///
    /// Tonelli-Shanks' algorithm for q mod 16 = 1
    /// <https://eprint.iacr.org/2012/685.pdf> (page 12, algorithm 5)
    pub fn sqrt(&self) -> CtOption<Self> {
        // Note: `pow_vartime` is constant-time with respect to `self`
        let w = self.pow_vartime(&T_MINUS_ONE_DIV_TWO);

        let mut v = Self::S;
        let mut x = *self * &w;
        let mut b = x * &w;
        let mut z = Self::ROOT_OF_UNITY;

        for max_v in (1..=Self::S).rev() {
            let mut k = 1;
            let mut tmp = b.square();
            let mut j_less_than_v = Choice::from(1);

            for j in 2..max_v {
                let tmp_is_one = tmp.ct_eq(&Self::ONE);
                let squared = Self::conditional_select(&tmp, &z, tmp_is_one).square();
                tmp = Self::conditional_select(&squared, &tmp, tmp_is_one);
                let new_z = Self::conditional_select(&z, &squared, tmp_is_one);
                j_less_than_v &= !j.ct_eq(&v);
                k = u32::conditional_select(&j, &k, tmp_is_one);
                z = Self::conditional_select(&z, &new_z, j_less_than_v);
            }

            let result = x * &z;
            x = Self::conditional_select(&result, &x, b.ct_eq(&Self::ONE));
            z = z.square();
            b *= &z;
            v = k;
        }

        CtOption::new(x, x.square().ct_eq(self))
    }
}

impl PrimeField for Scalar {
    type Repr = FieldBytes;

    const MODULUS: &'static str = MODULUS_HEX;
    const NUM_BITS: u32 = 256;
    const CAPACITY: u32 = 255;
    const TWO_INV: Self = Self::from_limbs_unchecked([
        0xDFE9_2F46_681B_20A1,
        0x5D57_6E73_57A4_501D,
        0xFFFF_FFFF_FFFF_FFFF,
        0x7FFF_FFFF_FFFF_FFFF,
    ]);
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(7);
    const S: u32 = 6;
    const ROOT_OF_UNITY: Self = Self::from_limbs_unchecked([
        0x992F_4B54_02B0_52F2,
        0x98BD_EAB6_8075_6045,
        0xDF98_79A3_FBC4_83A8,
        0x0C1D_C060_E7A9_1986,
    ]);
    const ROOT_OF_UNITY_INV: Self = Self::from_limbs_unchecked([
        0xB6FB_30A0_884F_0D1C,
        0x77A2_7591_0AA4_13C3,
        0xEFC7_B0C7_5B8C_BB72,
        0xFD3A_E181_F12D_7096,
    ]);
    const DELTA: Self = Self::from_limbs_unchecked([
        0x1994_17C8_C0BB_7601,
        0xD63B_78E7_80E1_341E,
        0x000C_BC21_FE45_61C8,
        0x0000_0000_0000_0000,
    ]);

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
impl Scalar {
    pub(crate) fn modulus_as_biguint() -> num_bigint::BigUint {
        crate::arithmetic::dev::limbs_to_biguint(&MODULUS)
    }
}

#[cfg(test)]
mod tests {
    use super::Scalar;
    use crate::arithmetic::dev::{biguint_to_bytes, bytes_to_biguint};
    use elliptic_curve::group::ff::{Field, PrimeField};
    use hex_literal::hex;
    use num_bigint::{BigUint, ToBigUint};
    use proptest::prelude::*;

    /// n - 1
    const MODULUS_MINUS_ONE: [u8; 32] =
        hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364140");

    impl From<&BigUint> for Scalar {
        fn from(x: &BigUint) -> Self {
            let bytes = biguint_to_bytes(x);
            Self::from_bytes(&bytes).unwrap()
        }
    }

    impl ToBigUint for Scalar {
        fn to_biguint(&self) -> Option<BigUint> {
            Some(bytes_to_biguint(&self.to_bytes()))
        }
    }

    #[test]
    fn range_check() {
        let n = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
        let n_plus_one = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364142");
        assert!(bool::from(Scalar::from_bytes(&n).is_none()));
        assert!(bool::from(Scalar::from_bytes(&n_plus_one).is_none()));
        assert!(bool::from(Scalar::from_bytes(&[0xff; 32]).is_none()));
        assert!(bool::from(Scalar::from_bytes(&MODULUS_MINUS_ONE).is_some()));
        assert!(bool::from(Scalar::from_bytes(&[0; 32]).is_some()));
    }

    #[test]
    fn negate() {
        let zero_neg = -Scalar::ZERO;
        assert_eq!(zero_neg, Scalar::ZERO);

        let one_neg = -Scalar::ONE;
        assert_eq!(one_neg.to_bytes(), MODULUS_MINUS_ONE);

        let modulus_minus_one_neg = -Scalar::from_bytes(&MODULUS_MINUS_ONE).unwrap();
        assert_eq!(modulus_minus_one_neg, Scalar::ONE);
    }

    #[test]
    fn reduce_bytes() {
        // n reduces to zero, n + 1 to one
        let n = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");
        let n_plus_one = hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364142");
        assert_eq!(Scalar::reduce_bytes(&n), Scalar::ZERO);
        assert_eq!(Scalar::reduce_bytes(&n_plus_one), Scalar::ONE);

        // 2^256 - 1 mod n
        assert_eq!(
            Scalar::reduce_bytes(&[0xff; 32]).to_bytes(),
            hex!("000000000000000000000000000000014551231950B75FC4402DA1732FC9BEBE")
        );

        // values below n are unchanged
        assert_eq!(
            Scalar::reduce_bytes(&MODULUS_MINUS_ONE).to_bytes(),
            MODULUS_MINUS_ONE
        );
    }

    #[test]
    fn invert() {
        assert!(bool::from(Scalar::ZERO.invert().is_none()));

        let one = Scalar::ONE;
        assert_eq!(one.invert().unwrap(), one);

        let three = Scalar::from(3u64);
        assert_eq!(three * &three.invert().unwrap(), one);
    }

    #[test]
    fn two_inv_constant() {
        assert_eq!(Scalar::from(2u64) * Scalar::TWO_INV, Scalar::ONE);
    }

    #[test]
    fn root_of_unity_constant() {
        assert!(Scalar::S < 64);
        assert_eq!(
            Scalar::ROOT_OF_UNITY.pow_vartime(&[1u64 << Scalar::S, 0, 0, 0]),
            Scalar::ONE
        );
        assert_ne!(
            Scalar::ROOT_OF_UNITY.pow_vartime(&[1u64 << (Scalar::S - 1), 0, 0, 0]),
            Scalar::ONE
        );
    }

    #[test]
    fn root_of_unity_inv_constant() {
        assert_eq!(
            Scalar::ROOT_OF_UNITY * Scalar::ROOT_OF_UNITY_INV,
            Scalar::ONE
        );
    }

    #[test]
    fn delta_constant() {
        assert_eq!(
            Scalar::DELTA,
            Scalar::MULTIPLICATIVE_GENERATOR.pow_vartime(&[1u64 << Scalar::S, 0, 0, 0])
        );
    }

    #[test]
    fn repr_round_trip() {
        let bytes = MODULUS_MINUS_ONE;
        let scalar = Scalar::from_repr(bytes).unwrap();
        assert_eq!(scalar.to_repr(), bytes);
        assert!(bool::from(PrimeField::is_even(&scalar)));
        assert!(bool::from(Scalar::from_repr([0xff; 32]).is_none()));
    }

    #[test]
    fn sqrt() {
        for &n in &[1u64, 4, 9, 16, 25, 36, 49, 64] {
            let scalar = Scalar::from(n);
            let sqrt = scalar.sqrt().unwrap();
            assert_eq!(sqrt.square(), scalar);
        }

        // The multiplicative generator is not a square
        assert!(bool::from(Scalar::MULTIPLICATIVE_GENERATOR.sqrt().is_none()));
    }

    #[test]
    fn random_is_in_range() {
        let mut rng = rand_core::OsRng;
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        assert!(bool::from(Scalar::from_repr(a.to_repr()).is_some()));
        assert_ne!(a, b);
    }

    #[test]
    fn zeroize() {
        use elliptic_curve::zeroize::Zeroize;

        let mut scalar = -Scalar::from(42u64);
        scalar.zeroize();
        assert_eq!(scalar, Scalar::ZERO);
    }

    #[test]
    fn sum_and_product() {
        let values = [Scalar::from(2u64), Scalar::from(3u64), Scalar::from(5u64)];
        assert_eq!(values.iter().sum::<Scalar>(), Scalar::from(10u64));
        assert_eq!(values.iter().product::<Scalar>(), Scalar::from(30u64));
        assert_eq!(values.into_iter().sum::<Scalar>(), Scalar::from(10u64));
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
            let mut res = bytes_to_biguint(&bytes);
            let m = Scalar::modulus_as_biguint();
            // Modulus is 256 bit long, same as the maximum `res`,
            // so this is guaranteed to land us in the correct range.
            if res >= m {
                res -= m;
            }
            Scalar::from(&res)
        }
    }

    proptest! {
        #[test]
        fn fuzzy_add(a in scalar(), b in scalar()) {
            let a_bi = a.to_biguint().unwrap();
            let b_bi = b.to_biguint().unwrap();
            let res_bi = (&a_bi + &b_bi) % Scalar::modulus_as_biguint();
            assert_eq!(a + &b, Scalar::from(&res_bi));
        }

        #[test]
        fn fuzzy_sub(a in scalar(), b in scalar()) {
            let m = Scalar::modulus_as_biguint();
            let a_bi = a.to_biguint().unwrap();
            let b_bi = b.to_biguint().unwrap();
            let res_bi = (&m + &a_bi - &b_bi) % &m;
            assert_eq!(a - &b, Scalar::from(&res_bi));
        }

        #[test]
        fn fuzzy_mul(a in scalar(), b in scalar()) {
            let a_bi = a.to_biguint().unwrap();
            let b_bi = b.to_biguint().unwrap();
            let res_bi = (&a_bi * &b_bi) % Scalar::modulus_as_biguint();
            assert_eq!(a * &b, Scalar::from(&res_bi));
        }

        #[test]
        fn fuzzy_reduce(bytes in any::<[u8; 32]>()) {
            let res_bi = bytes_to_biguint(&bytes) % Scalar::modulus_as_biguint();
            assert_eq!(Scalar::reduce_bytes(&bytes), Scalar::from(&res_bi));
        }

        #[test]
        fn fuzzy_invert(a in scalar()) {
            let a = if bool::from(a.is_zero()) { Scalar::ONE } else { a };
            let a_bi = a.to_biguint().unwrap();
            let inv_bi = a.invert().unwrap().to_biguint().unwrap();
            let m = Scalar::modulus_as_biguint();
            assert_eq!((&inv_bi * &a_bi) % &m, 1.to_biguint().unwrap());
        }
    }
}
