//! Limb-level helpers shared by the field and scalar implementations.

use crate::FieldBytes;
use elliptic_curve::subtle::Choice;

/// Number of 64-bit limbs in a field element or scalar.
pub(crate) const LIMBS: usize = 4;

/// Little-endian 64-bit limbs of a 256-bit integer.
pub(crate) type Limbs = [u64; LIMBS];

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The borrow is either `0` or `u64::MAX`.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Interprets a big endian byte array as little-endian limbs.
pub(crate) const fn bytes_to_limbs(bytes: &FieldBytes) -> Limbs {
    let mut limbs = [0u64; LIMBS];
    let mut i = 0;
    while i < LIMBS {
        let mut word = 0u64;
        let mut j = 0;
        while j < 8 {
            word = (word << 8) | (bytes[(LIMBS - 1 - i) * 8 + j] as u64);
            j += 1;
        }
        limbs[i] = word;
        i += 1;
    }
    limbs
}

/// Serializes little-endian limbs as a big endian byte array.
pub(crate) fn limbs_to_bytes(limbs: &Limbs) -> FieldBytes {
    let mut bytes = [0u8; 32];
    for (chunk, limb) in bytes.chunks_exact_mut(8).zip(limbs.iter().rev()) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

/// Is `lhs < rhs`? Runs in constant time.
pub(crate) fn ct_lt(lhs: &Limbs, rhs: &Limbs) -> Choice {
    let mut borrow = 0;
    for i in 0..LIMBS {
        borrow = sbb(lhs[i], rhs[i], borrow).1;
    }
    Choice::from((borrow as u8) & 1)
}

/// Computes `(lhs + 2^256·carry) - rhs`, adding `modulus` back if the
/// subtraction underflowed.
///
/// Reduces sums and Montgomery products lying in `[0, 2·modulus)` when
/// `rhs = modulus`, and implements modular subtraction when `carry = 0`.
#[inline]
pub(crate) const fn sub_inner(lhs: &Limbs, carry: u64, rhs: &Limbs, modulus: &Limbs) -> Limbs {
    let (w0, borrow) = sbb(lhs[0], rhs[0], 0);
    let (w1, borrow) = sbb(lhs[1], rhs[1], borrow);
    let (w2, borrow) = sbb(lhs[2], rhs[2], borrow);
    let (w3, borrow) = sbb(lhs[3], rhs[3], borrow);
    let (_, borrow) = sbb(carry, 0, borrow);

    // If underflow occurred on the final limb, borrow = 0xfff...fff, otherwise
    // borrow = 0x000...000. Thus, we use it as a mask to conditionally add the
    // modulus.
    let (w0, c) = adc(w0, modulus[0] & borrow, 0);
    let (w1, c) = adc(w1, modulus[1] & borrow, c);
    let (w2, c) = adc(w2, modulus[2] & borrow, c);
    let (w3, _) = adc(w3, modulus[3] & borrow, c);

    [w0, w1, w2, w3]
}

/// Computes `lhs + rhs mod modulus` for reduced inputs.
#[inline]
pub(crate) const fn add_mod(lhs: &Limbs, rhs: &Limbs, modulus: &Limbs) -> Limbs {
    let (w0, carry) = adc(lhs[0], rhs[0], 0);
    let (w1, carry) = adc(lhs[1], rhs[1], carry);
    let (w2, carry) = adc(lhs[2], rhs[2], carry);
    let (w3, carry) = adc(lhs[3], rhs[3], carry);
    sub_inner(&[w0, w1, w2, w3], carry, modulus, modulus)
}

/// Computes `lhs - rhs mod modulus` for reduced inputs.
#[inline]
pub(crate) const fn sub_mod(lhs: &Limbs, rhs: &Limbs, modulus: &Limbs) -> Limbs {
    sub_inner(lhs, 0, rhs, modulus)
}

/// Montgomery multiplication: computes `x·y·2^-256 mod modulus`.
///
/// Coarsely integrated operand scanning (CIOS), interleaving each row of the
/// schoolbook product with one word of Montgomery reduction. `inv` must be
/// `-modulus^-1 mod 2^64`.
///
/// References:
/// - Handbook of Applied Cryptography, Chapter 14, Algorithm 14.36
///   <http://cacr.uwaterloo.ca/hac/about/chap14.pdf>
/// - Koç, Acar, Kaliski: "Analyzing and Comparing Montgomery Multiplication
///   Algorithms", IEEE Micro 1996
pub(crate) const fn montgomery_mul(x: &Limbs, y: &Limbs, modulus: &Limbs, inv: u64) -> Limbs {
    let mut t = [0u64; LIMBS + 2];
    let mut i = 0;

    while i < LIMBS {
        let mut carry = 0;
        let mut j = 0;
        while j < LIMBS {
            let (w, c) = mac(t[j], x[j], y[i], carry);
            t[j] = w;
            carry = c;
            j += 1;
        }
        let (w, c) = adc(t[LIMBS], carry, 0);
        t[LIMBS] = w;
        t[LIMBS + 1] = c;

        let u = t[0].wrapping_mul(inv);
        let (_, c) = mac(t[0], u, modulus[0], 0);
        carry = c;
        j = 1;
        while j < LIMBS {
            let (w, c) = mac(t[j], u, modulus[j], carry);
            t[j - 1] = w;
            carry = c;
            j += 1;
        }
        let (w, c) = adc(t[LIMBS], carry, 0);
        t[LIMBS - 1] = w;
        t[LIMBS] = t[LIMBS + 1] + c;

        i += 1;
    }

    // Result may be within `modulus` of the correct value
    sub_inner(&[t[0], t[1], t[2], t[3]], t[LIMBS], modulus, modulus)
}
