//! Macros for defining Montgomery-form field element types.

/// Implements a prime field element type whose internal representation is
/// four little-endian 64-bit limbs in Montgomery form, i.e.
/// `Elem(a) = a·2^256 mod m`.
///
/// Accepts the following parameters:
///
/// - name of the element newtype, which must wrap a `Limbs` array
/// - modulus `m` as little-endian limbs
/// - `R = 2^256 mod m`
/// - `R² = 2^512 mod m`
/// - `inv = -m^-1 mod 2^64`
/// - `m - 2`, the Fermat inversion exponent
///
/// # Inherent impls
/// - `const ZERO: Self`
/// - `const ONE: Self` (multiplicative identity)
/// - `pub const fn from_u64`
/// - `pub fn from_bytes`
/// - `pub fn to_bytes`
/// - `pub fn is_zero`
/// - `pub fn is_odd`
/// - `pub const fn add`, `sub`, `double`, `multiply`, `square`, `negate`
/// - `pub fn pow_vartime`
/// - `pub fn invert`
///
/// The type must also provide an inherent `sqrt`, which `ff::Field` forwards
/// to.
///
/// # Trait impls
/// - `ff::Field`
/// - `ConditionallySelectable`, `ConstantTimeEq`
/// - `Debug`, `Default`, `Eq`, `PartialEq`
/// - `Zeroize`
/// - `Add`, `AddAssign`, `Sub`, `SubAssign`, `Mul`, `MulAssign`, `Neg`
/// - `Sum`, `Product`
macro_rules! impl_montgomery_arithmetic {
    (
        name: $fe:ident,
        modulus: $modulus:expr,
        r: $r:expr,
        r2: $r2:expr,
        inv: $inv:expr,
        modulus_minus_two: $modulus_minus_two:expr
    ) => {
        impl $fe {
            /// Zero element (additive identity).
            pub const ZERO: Self = Self([0, 0, 0, 0]);

            /// Multiplicative identity.
            pub const ONE: Self = Self($r);

            /// Converts canonical limbs into Montgomery form.
            ///
            /// Inputs greater than or equal to the modulus are reduced.
            pub(crate) const fn from_limbs_unchecked(limbs: $crate::arithmetic::util::Limbs) -> Self {
                Self($crate::arithmetic::util::montgomery_mul(&limbs, &$r2, &$modulus, $inv))
            }

            /// Converts out of Montgomery form, returning canonical limbs.
            pub(crate) const fn to_canonical(self) -> $crate::arithmetic::util::Limbs {
                $crate::arithmetic::util::montgomery_mul(&self.0, &[1, 0, 0, 0], &$modulus, $inv)
            }

            /// Creates an element from a small integer.
            pub const fn from_u64(w: u64) -> Self {
                Self::from_limbs_unchecked([w, 0, 0, 0])
            }

            /// Attempts to parse the given big endian byte array as an element.
            ///
            /// Returns `None` if the bytes do not encode an integer less than
            /// the modulus.
            pub fn from_bytes(bytes: &$crate::FieldBytes) -> ::elliptic_curve::subtle::CtOption<Self> {
                let limbs = $crate::arithmetic::util::bytes_to_limbs(bytes);
                let in_range = $crate::arithmetic::util::ct_lt(&limbs, &$modulus);
                ::elliptic_curve::subtle::CtOption::new(Self::from_limbs_unchecked(limbs), in_range)
            }

            /// Returns the big endian encoding of this element.
            pub fn to_bytes(&self) -> $crate::FieldBytes {
                $crate::arithmetic::util::limbs_to_bytes(&self.to_canonical())
            }

            /// Is this element zero?
            pub fn is_zero(&self) -> ::elliptic_curve::subtle::Choice {
                ::elliptic_curve::subtle::ConstantTimeEq::ct_eq(self, &Self::ZERO)
            }

            /// Is the canonical representative of this element odd?
            pub fn is_odd(&self) -> ::elliptic_curve::subtle::Choice {
                ::elliptic_curve::subtle::Choice::from((self.to_canonical()[0] & 1) as u8)
            }

            /// Returns `self + rhs`.
            #[inline]
            pub const fn add(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::add_mod(&self.0, &rhs.0, &$modulus))
            }

            /// Returns `self - rhs`.
            #[inline]
            pub const fn sub(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::sub_mod(&self.0, &rhs.0, &$modulus))
            }

            /// Returns `2·self`.
            #[inline]
            #[must_use]
            pub const fn double(&self) -> Self {
                Self::add(self, self)
            }

            /// Returns `self · rhs`.
            #[inline]
            pub const fn multiply(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::montgomery_mul(
                    &self.0, &rhs.0, &$modulus, $inv,
                ))
            }

            /// Returns `self²`.
            #[inline]
            #[must_use]
            pub const fn square(&self) -> Self {
                Self::multiply(self, self)
            }

            /// Returns `-self`.
            #[inline]
            pub const fn negate(&self) -> Self {
                Self::sub(&Self::ZERO, self)
            }

            /// Raises to the power `exp`, given as little-endian limbs.
            ///
            /// Runs in time dependent on `exp` but not on `self`, so it is
            /// only ever called with public exponents.
            pub fn pow_vartime(&self, exp: &$crate::arithmetic::util::Limbs) -> Self {
                let mut res = Self::ONE;
                for limb in exp.iter().rev() {
                    for i in (0..64).rev() {
                        res = res.square();
                        if (limb >> i) & 1 == 1 {
                            res = res.multiply(self);
                        }
                    }
                }
                res
            }

            /// Returns `self^-1`, computed as `self^(m - 2)` by Fermat's little
            /// theorem.
            ///
            /// Returns `None` if `self` is zero.
            pub fn invert(&self) -> ::elliptic_curve::subtle::CtOption<Self> {
                ::elliptic_curve::subtle::CtOption::new(self.pow_vartime(&$modulus_minus_two), !self.is_zero())
            }
        }

        impl ::elliptic_curve::group::ff::Field for $fe {
            const ZERO: Self = Self::ZERO;
            const ONE: Self = Self::ONE;

            fn random(mut rng: impl ::elliptic_curve::rand_core::RngCore) -> Self {
                // Rejection sampling gives a uniformly distributed element.
                let mut bytes = $crate::FieldBytes::default();
                loop {
                    rng.fill_bytes(&mut bytes);
                    if let Some(element) = Self::from_bytes(&bytes).into() {
                        return element;
                    }
                }
            }

            fn is_zero(&self) -> ::elliptic_curve::subtle::Choice {
                Self::is_zero(self)
            }

            #[must_use]
            fn square(&self) -> Self {
                Self::square(self)
            }

            #[must_use]
            fn double(&self) -> Self {
                Self::double(self)
            }

            fn invert(&self) -> ::elliptic_curve::subtle::CtOption<Self> {
                Self::invert(self)
            }

            fn sqrt(&self) -> ::elliptic_curve::subtle::CtOption<Self> {
                Self::sqrt(self)
            }

            fn sqrt_ratio(num: &Self, div: &Self) -> (::elliptic_curve::subtle::Choice, Self) {
                ::elliptic_curve::group::ff::helpers::sqrt_ratio_generic(num, div)
            }
        }

        impl ::elliptic_curve::subtle::ConditionallySelectable for $fe {
            fn conditional_select(a: &Self, b: &Self, choice: ::elliptic_curve::subtle::Choice) -> Self {
                let mut limbs = [0u64; 4];
                for (limb, (a, b)) in limbs.iter_mut().zip(a.0.iter().zip(b.0.iter())) {
                    *limb = <u64 as ::elliptic_curve::subtle::ConditionallySelectable>::conditional_select(
                        a, b, choice,
                    );
                }
                Self(limbs)
            }
        }

        impl ::elliptic_curve::subtle::ConstantTimeEq for $fe {
            fn ct_eq(&self, other: &Self) -> ::elliptic_curve::subtle::Choice {
                ::elliptic_curve::subtle::ConstantTimeEq::ct_eq(&self.0[..], &other.0[..])
            }
        }

        impl ::core::fmt::Debug for $fe {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}(0x", stringify!($fe))?;
                for byte in self.to_bytes() {
                    write!(f, "{:02x}", byte)?;
                }
                write!(f, ")")
            }
        }

        impl Default for $fe {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl Eq for $fe {}

        impl PartialEq for $fe {
            fn eq(&self, other: &Self) -> bool {
                ::elliptic_curve::subtle::ConstantTimeEq::ct_eq(self, other).into()
            }
        }

        impl ::elliptic_curve::zeroize::Zeroize for $fe {
            fn zeroize(&mut self) {
                ::elliptic_curve::zeroize::Zeroize::zeroize(&mut self.0);
            }
        }

        impl From<u64> for $fe {
            fn from(w: u64) -> Self {
                Self::from_u64(w)
            }
        }

        field_op!($fe, Add, add, AddAssign, add_assign, add);
        field_op!($fe, Sub, sub, SubAssign, sub_assign, sub);
        field_op!($fe, Mul, mul, MulAssign, mul_assign, multiply);

        impl ::core::ops::Neg for $fe {
            type Output = $fe;

            fn neg(self) -> $fe {
                self.negate()
            }
        }

        impl ::core::ops::Neg for &$fe {
            type Output = $fe;

            fn neg(self) -> $fe {
                self.negate()
            }
        }

        impl ::core::iter::Sum for $fe {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ZERO, |acc, x| acc + &x)
            }
        }

        impl<'a> ::core::iter::Sum<&'a $fe> for $fe {
            fn sum<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.fold(Self::ZERO, |acc, x| acc + x)
            }
        }

        impl ::core::iter::Product for $fe {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::ONE, |acc, x| acc * &x)
            }
        }

        impl<'a> ::core::iter::Product<&'a $fe> for $fe {
            fn product<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.fold(Self::ONE, |acc, x| acc * x)
            }
        }
    };
}

/// Emits `core::ops` trait wrappers for an inherent `const fn` arithmetic
/// method.
macro_rules! field_op {
    ($fe:ident, $op:ident, $func:ident, $op_assign:ident, $func_assign:ident, $inner_func:ident) => {
        impl ::core::ops::$op for $fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: $fe) -> $fe {
                <$fe>::$inner_func(&self, &rhs)
            }
        }

        impl ::core::ops::$op<&$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: &$fe) -> $fe {
                <$fe>::$inner_func(&self, rhs)
            }
        }

        impl ::core::ops::$op<&$fe> for &$fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: &$fe) -> $fe {
                <$fe>::$inner_func(self, rhs)
            }
        }

        impl ::core::ops::$op_assign for $fe {
            #[inline]
            fn $func_assign(&mut self, rhs: $fe) {
                *self = <$fe>::$inner_func(self, &rhs);
            }
        }

        impl ::core::ops::$op_assign<&$fe> for $fe {
            #[inline]
            fn $func_assign(&mut self, rhs: &$fe) {
                *self = <$fe>::$inner_func(self, rhs);
            }
        }
    };
}
