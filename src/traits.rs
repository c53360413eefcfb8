// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Module for common traits.

use subtle::ConstantTimeEq;

// ------------------------------------------------------------------------
// Public traits
// ------------------------------------------------------------------------

/// Trait for getting the identity element of a point type.
pub trait Identity {
    /// Returns the identity element of the curve.
    /// Can be used as a constructor.
    fn identity() -> Self;
}

/// Trait for testing if a curve point is equivalent to the identity point.
pub trait IsIdentity {
    /// Return true if this element is the identity element of the curve.
    fn is_identity(&self) -> bool;
}

/// Implement generic identity equality testing for point representations
/// with constant-time equality testing and a defined identity constructor.
impl<T> IsIdentity for T
where
    T: ConstantTimeEq + Identity,
{
    fn is_identity(&self) -> bool {
        self.ct_eq(&T::identity()).into()
    }
}

// ------------------------------------------------------------------------
// Private traits
// ------------------------------------------------------------------------

/// Trait for checking whether a point is on the curve.
///
/// This is intended only for debugging and testing, since it should be
/// impossible for a user of the public API to construct an invalid point.
#[allow(dead_code)]
pub(crate) trait ValidityCheck {
    /// Checks whether the point is on the curve. Not CT.
    fn is_valid(&self) -> bool;
}
