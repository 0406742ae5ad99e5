#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
//! ```
//! # fn main() -> Result<(), k256_schnorr::Error> {
//! use hex_literal::hex;
//!
//! let secret_key = hex!("B7E151628AED2A6ABF7158809CF4F3C762E7160F38B4DA56A784D9045190CFEF");
//! let message = hex!("243F6A8885A308D313198A2E03707344A4093822299F31D0082EFA98EC4E6C89");
//!
//! let public_key = k256_schnorr::public_key(&secret_key)?; // 33-byte compressed point
//! let signature = k256_schnorr::sign(&secret_key, &message)?; // 64 bytes: r || s
//!
//! assert!(k256_schnorr::verify(&public_key, &message, &signature)?);
//! # Ok(())
//! # }
//! ```

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod arithmetic;
pub mod schnorr;

mod error;

pub use crate::{
    arithmetic::{AffinePoint, FieldElement, ProjectivePoint, Scalar},
    error::{Error, Result},
    schnorr::{
        Signature, SigningKey, VerifyingKey, public_key, sign, sign_with_aux_rand, verify,
    },
};

pub use elliptic_curve;

#[cfg(feature = "signature")]
pub use signature;

/// Big endian serialization of a field element or scalar.
pub type FieldBytes = [u8; 32];

/// SEC1-encoded compressed curve point: a `0x02`/`0x03` parity tag followed
/// by the big endian x-coordinate.
pub type CompressedPoint = [u8; 33];

/// Fixed-size message accepted by the signature scheme.
///
/// This is typically itself the hash of the actual payload.
pub type MessageBytes = [u8; 32];

/// Serialized Schnorr signature: `r || s`.
pub type SignatureBytes = [u8; 64];
