// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Errors returned when rejecting untrusted point encodings.

use core::fmt;
use core::fmt::Display;

/// The error returned when a 32-byte string is not the encoding of a
/// point on the curve.
///
/// Decompression is the only fallible operation in this crate; every
/// arithmetic operation is total.  On receiving this error a caller must
/// reject the input outright (a malformed public key or signature
/// component) and must not use the rejected value in any further
/// computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodeError;

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot decompress Edwards point")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
