// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

#![no_std]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/edwards25519/0.1.0")]

//! Group arithmetic for the twisted Edwards form of Curve25519, as used
//! by Ed25519.
//!
//! This crate provides the group layer of an Ed25519 implementation:
//!
//! * the [`edwards::EdwardsPoint`] type, a point on the curve
//!   `-x² + y² = 1 + d·x²y²` over GF(2²⁵⁵ - 19), with constant-time
//!   addition, subtraction, and negation;
//! * constant-time fixed-base scalar multiplication by the Ed25519
//!   basepoint, [`edwards::EdwardsPoint::mul_base`], and constant-time
//!   variable-base multiplication via the `Mul` impls;
//! * variable-time double-base multiplication `aA + bB`,
//!   [`edwards::EdwardsPoint::vartime_double_scalar_mul_basepoint`],
//!   intended for signature verification where all inputs are public;
//! * the [`scalar::Scalar`] type with arithmetic modulo the basepoint
//!   order `l = 2²⁵² + 27742317777372353535851937790883648493`;
//! * the standard 32-byte point encoding,
//!   [`edwards::CompressedEdwardsY`], including the `negate`-flavoured
//!   decompression used by verifiers.
//!
//! Hashing and the EdDSA protocol itself are out of scope; this crate is
//! the arithmetic core a signing/verification layer builds on.
//!
//! # Constant-time guarantees
//!
//! Operations that may touch secret data (scalar reduction and
//! multiply-add, fixed-base and variable-base scalar multiplication,
//! table lookups) execute a data-independent sequence of instructions
//! with no secret-dependent branches or memory accesses, using the
//! [`subtle`] traits for selection and negation.  Functions with
//! `vartime` in their name are exempt: they must only ever be given
//! public inputs.

//------------------------------------------------------------------------
// External dependencies
//------------------------------------------------------------------------

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

// Internal macros. Must come first!
#[macro_use]
pub(crate) mod macros;

//------------------------------------------------------------------------
// Public modules
//------------------------------------------------------------------------

// Scalar arithmetic mod l = 2^252 + ..., the order of the basepoint
pub mod scalar;

// Point operations on the Edwards form of Curve25519
pub mod edwards;

// Useful constants, like the Ed25519 basepoint
pub mod constants;

// Errors returned when rejecting untrusted encodings
pub mod errors;

// External (and internal) traits
pub mod traits;

//------------------------------------------------------------------------
// Internal modules
//------------------------------------------------------------------------

// Finite field arithmetic mod p = 2^255 - 19
pub(crate) mod field;

// The internal curve models (P2, P1xP1, and the cached Niels forms)
pub(crate) mod curve_models;

// Scalar multiplication backends
pub(crate) mod scalar_mul;

// Generic code for window lookups
pub(crate) mod window;
