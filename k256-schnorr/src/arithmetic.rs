//! A pure-Rust implementation of group operations on secp256k1.
//!
//! Field elements and scalars are stored as four 64-bit limbs in Montgomery
//! form. Every operation which may touch secret data runs in time independent
//! of its inputs: branching only ever happens on public values such as fixed
//! exponents.

#[macro_use]
mod macros;

pub(crate) mod affine;
pub(crate) mod field;
pub(crate) mod projective;
pub(crate) mod scalar;

mod util;

#[cfg(test)]
pub(crate) mod dev;

pub use self::{
    affine::{AffinePoint, EncodedPoint},
    field::FieldElement,
    projective::ProjectivePoint,
    scalar::Scalar,
};

/// `b = 7` in the curve equation `y² = x³ + 7`.
pub(crate) const CURVE_EQUATION_B: FieldElement = FieldElement::from_u64(7);

/// `3b`, used by the complete addition formulas.
pub(crate) const CURVE_EQUATION_B3: FieldElement = FieldElement::from_u64(21);
