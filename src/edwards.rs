// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Group operations for points on the twisted Edwards form of
//! Curve25519.
//!
//! The [`EdwardsPoint`] type holds a point in extended ("P3")
//! coordinates `(X:Y:Z:T)` with `XY = ZT`, the working representation
//! for the unified addition formulas.  Compressed points on the wire
//! are [`CompressedEdwardsY`]: 32 bytes holding the little-endian
//! `y`-coordinate with the sign of `x` folded into the top bit, the
//! standard Ed25519 encoding.
//!
//! Scalar multiplication comes in three flavours:
//!
//! * [`EdwardsPoint::mul_base`], constant-time multiplication of the
//!   basepoint, backed by a precomputed table of multiples;
//! * the `Mul` impls between [`EdwardsPoint`] and
//!   [`Scalar`](crate::scalar::Scalar), constant-time multiplication of
//!   an arbitrary point;
//! * [`EdwardsPoint::vartime_double_scalar_mul_basepoint`], a faster
//!   variable-time computation of `aA + bB` for signature
//!   verification, where nothing is secret.
#![allow(non_snake_case)]

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, Neg};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::constants;
use crate::curve_models::{AffineNielsPoint, CompletedPoint, ProjectiveNielsPoint, ProjectivePoint};
use crate::errors::DecodeError;
use crate::field::FieldElement;
use crate::scalar::{clamp_integer, Scalar};
use crate::scalar_mul;
use crate::traits::Identity;
use crate::traits::ValidityCheck;
#[cfg(feature = "precomputed-tables")]
use crate::window::LookupTable;

// ------------------------------------------------------------------------
// Compressed points
// ------------------------------------------------------------------------

/// In "Edwards y" format, the curve point `(x,y)` is determined by the
/// `y`-coordinate and the sign of `x`, marshalled into 32 bytes.
///
/// The first 255 bits of a `CompressedEdwardsY` represent the
/// `y`-coordinate.  The high bit of the 32nd byte is the sign of `x`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct CompressedEdwardsY(pub [u8; 32]);

impl ConstantTimeEq for CompressedEdwardsY {
    fn ct_eq(&self, other: &CompressedEdwardsY) -> Choice {
        self.as_bytes().ct_eq(other.as_bytes())
    }
}

impl Debug for CompressedEdwardsY {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "CompressedEdwardsY: {:?}", self.as_bytes())
    }
}

impl Identity for CompressedEdwardsY {
    fn identity() -> CompressedEdwardsY {
        CompressedEdwardsY([
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ])
    }
}

impl Default for CompressedEdwardsY {
    fn default() -> CompressedEdwardsY {
        CompressedEdwardsY::identity()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for CompressedEdwardsY {
    /// Reset this `CompressedEdwardsY` to the compressed form of the
    /// identity element.
    fn zeroize(&mut self) {
        self.0.zeroize();
        self.0[0] = 1;
    }
}

impl CompressedEdwardsY {
    /// View this `CompressedEdwardsY` as an array of bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `CompressedEdwardsY` to an array of bytes.
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Attempt to decompress to the **negation** of the encoded point.
    ///
    /// The `y`-coordinate is read from the low 255 bits, the
    /// corresponding `x` is recovered from the curve equation as
    /// `x = u v³ (u v⁷)^((p-5)/8)` with `u = y² - 1`, `v = d y² + 1`,
    /// and the candidate is validated against `v x² = ±u`.  If neither
    /// sign matches, the bytes do not encode a curve point and
    /// [`DecodeError`] is returned.
    ///
    /// On success the returned point is `(-x, y)` relative to the
    /// encoded sign bit — the *negation* of the encoded point.  This
    /// matches the reference Ed25519 verification flow, which folds the
    /// negation of the public key into the double-base multiplication
    /// `s·B - k·A` rather than negating separately.  Callers wanting
    /// the encoded point itself must negate the result.
    ///
    /// Runs in variable time: point encodings are public data.
    pub fn decompress_negate_vartime(&self) -> Result<EdwardsPoint, DecodeError> {
        let Y = FieldElement::from_bytes(self.as_bytes());
        let Z = FieldElement::ONE;
        let YY = Y.square();
        let u = &YY - &Z; // u =  y²-1
        let v = &(&YY * &constants::EDWARDS_D) + &Z; // v = dy²+1

        // Candidate root x = u v³ (u v⁷)^((p-5)/8); valid because
        // p ≡ 5 (mod 8).
        let v3 = &v.square() * &v;
        let v7 = &v3.square() * &v;
        let uv7 = &u * &v7;
        let mut X = &(&u * &v3) * &uv7.pow_p58();

        // Now vx² is either u (x was a square root of u/v), -u (and
        // multiplying x by sqrt(-1) repairs it), or neither, in which
        // case y is not on the curve.
        let vxx = &v * &X.square();
        let check = &vxx - &u;
        if check.is_zero().unwrap_u8() != 1u8 {
            let check2 = &vxx + &u;
            if check2.is_zero().unwrap_u8() != 1u8 {
                return Err(DecodeError);
            }
            X = &X * &constants::SQRT_M1;
        }

        // Negate the point: flip the sign of x exactly when it agrees
        // with the encoded sign bit.
        if X.is_negative().unwrap_u8() == (self.as_bytes()[31] >> 7) {
            X = -&X;
        }

        let T = &X * &Y;
        Ok(EdwardsPoint { X, Y, Z, T })
    }
}

// ------------------------------------------------------------------------
// Extended points
// ------------------------------------------------------------------------

/// An `EdwardsPoint` represents a point on the Edwards form of
/// Curve25519, in extended coordinates.
#[derive(Copy, Clone)]
pub struct EdwardsPoint {
    pub(crate) X: FieldElement,
    pub(crate) Y: FieldElement,
    pub(crate) Z: FieldElement,
    pub(crate) T: FieldElement,
}

impl Identity for EdwardsPoint {
    fn identity() -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::ONE,
            Z: FieldElement::ONE,
            T: FieldElement::ZERO,
        }
    }
}

impl Default for EdwardsPoint {
    fn default() -> EdwardsPoint {
        EdwardsPoint::identity()
    }
}

impl Debug for EdwardsPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "EdwardsPoint{{\n\tX: {:?},\n\tY: {:?},\n\tZ: {:?},\n\tT: {:?}\n}}",
            &self.X, &self.Y, &self.Z, &self.T
        )
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for EdwardsPoint {
    /// Reset this `EdwardsPoint` to the identity element.
    fn zeroize(&mut self) {
        self.X.zeroize();
        self.T.zeroize();
        self.Y = FieldElement::ONE;
        self.Z = FieldElement::ONE;
    }
}

impl ConstantTimeEq for EdwardsPoint {
    /// Test equality of the represented points, independent of the
    /// projective scaling of the coordinates: `X₁/Z₁ = X₂/Z₂` and
    /// `Y₁/Z₁ = Y₂/Z₂` iff `X₁Z₂ = X₂Z₁` and `Y₁Z₂ = Y₂Z₁`.
    fn ct_eq(&self, other: &EdwardsPoint) -> Choice {
        (&self.X * &other.Z).ct_eq(&(&other.X * &self.Z))
            & (&self.Y * &other.Z).ct_eq(&(&other.Y * &self.Z))
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &EdwardsPoint) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for EdwardsPoint {}

impl ValidityCheck for EdwardsPoint {
    fn is_valid(&self) -> bool {
        let point_on_curve = self.as_projective().is_valid();
        let on_segre_image = (&self.X * &self.Y) == (&self.Z * &self.T);

        point_on_curve && on_segre_image
    }
}

// ------------------------------------------------------------------------
// Point conversions
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Convert to the P2 model, dropping the `T` coordinate.
    pub(crate) fn as_projective(&self) -> ProjectivePoint {
        ProjectivePoint {
            X: self.X,
            Y: self.Y,
            Z: self.Z,
        }
    }

    /// Convert to the cached Niels form used by the readdition
    /// formulas.
    pub(crate) fn as_projective_niels(&self) -> ProjectiveNielsPoint {
        ProjectiveNielsPoint {
            Y_plus_X: &self.Y + &self.X,
            Y_minus_X: &self.Y - &self.X,
            Z: self.Z,
            T2d: &self.T * &constants::EDWARDS_D2,
        }
    }

    /// Dehomogenize to the affine Niels form.  Mainly for building
    /// precomputed tables; this is not constant time.
    pub(crate) fn as_affine_niels(&self) -> AffineNielsPoint {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let xy2d = &(&x * &y) * &constants::EDWARDS_D2;
        AffineNielsPoint {
            y_plus_x: &y + &x,
            y_minus_x: &y - &x,
            xy2d,
        }
    }

    /// Compress this point to the 32-byte Edwards-y wire format.
    pub fn compress(&self) -> CompressedEdwardsY {
        let recip = self.Z.invert();
        let x = &self.X * &recip;
        let y = &self.Y * &recip;
        let mut s = y.to_bytes();
        s[31] ^= x.is_negative().unwrap_u8() << 7;
        CompressedEdwardsY(s)
    }
}

// ------------------------------------------------------------------------
// Doubling
// ------------------------------------------------------------------------

impl EdwardsPoint {
    /// Add this point to itself.
    pub(crate) fn double(&self) -> EdwardsPoint {
        self.as_projective().double().as_extended()
    }

    /// Compute `2^k * self` by successive doublings.  Requires `k > 0`.
    ///
    /// The doublings stay in the P2 model; only the final one pays for
    /// the conversion back to P3.
    pub(crate) fn mul_by_pow_2(&self, k: u32) -> EdwardsPoint {
        debug_assert!(k > 0);
        let mut r: CompletedPoint;
        let mut s = self.as_projective();
        for _ in 0..(k - 1) {
            r = s.double();
            s = r.as_projective();
        }
        // Unroll last iteration so we can directly convert back to P3.
        s.double().as_extended()
    }
}

// ------------------------------------------------------------------------
// Addition and Subtraction
// ------------------------------------------------------------------------

impl<'a, 'b> Add<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn add(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self + &other.as_projective_niels()).as_extended()
    }
}
define_add_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> AddAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) + rhs;
    }
}

impl AddAssign<EdwardsPoint> for EdwardsPoint {
    fn add_assign(&mut self, rhs: EdwardsPoint) {
        *self += &rhs;
    }
}

impl<'a, 'b> Sub<&'b EdwardsPoint> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    fn sub(self, other: &'b EdwardsPoint) -> EdwardsPoint {
        (self - &other.as_projective_niels()).as_extended()
    }
}
define_sub_variants!(LHS = EdwardsPoint, RHS = EdwardsPoint, Output = EdwardsPoint);

impl<'b> SubAssign<&'b EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: &'b EdwardsPoint) {
        *self = (self as &EdwardsPoint) - rhs;
    }
}

impl SubAssign<EdwardsPoint> for EdwardsPoint {
    fn sub_assign(&mut self, rhs: EdwardsPoint) {
        *self -= &rhs;
    }
}

// ------------------------------------------------------------------------
// Negation
// ------------------------------------------------------------------------

impl<'a> Neg for &'a EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        EdwardsPoint {
            X: -(&self.X),
            Y: self.Y,
            Z: self.Z,
            T: -(&self.T),
        }
    }
}

impl Neg for EdwardsPoint {
    type Output = EdwardsPoint;

    fn neg(self) -> EdwardsPoint {
        -&self
    }
}

// ------------------------------------------------------------------------
// Scalar multiplication
// ------------------------------------------------------------------------

impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsPoint {
    type Output = EdwardsPoint;
    /// Scalar multiplication: compute `scalar * self`, in constant
    /// time.
    ///
    /// For basepoint multiplication [`EdwardsPoint::mul_base`] is about
    /// four times faster.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        scalar_mul::variable_base::mul(self, scalar)
    }
}
define_mul_variants!(LHS = EdwardsPoint, RHS = Scalar, Output = EdwardsPoint);

impl<'a, 'b> Mul<&'b EdwardsPoint> for &'a Scalar {
    type Output = EdwardsPoint;
    /// Scalar multiplication: compute `self * point`, in constant time.
    fn mul(self, point: &'b EdwardsPoint) -> EdwardsPoint {
        point * self
    }
}
define_mul_variants!(LHS = Scalar, RHS = EdwardsPoint, Output = EdwardsPoint);

impl EdwardsPoint {
    /// Fixed-base scalar multiplication by the Ed25519 basepoint.
    ///
    /// Runs in constant time with respect to the scalar, which is
    /// typically a secret key or nonce.  The scalar must be below
    /// 2^255 with `bytes[31] <= 127`, which holds for every reduced or
    /// clamped scalar.
    ///
    /// Uses the precomputed basepoint table when the
    /// `precomputed-tables` feature is enabled (the default), and the
    /// generic constant-time multiplication otherwise.
    pub fn mul_base(scalar: &Scalar) -> EdwardsPoint {
        #[cfg(not(feature = "precomputed-tables"))]
        {
            scalar * &constants::ED25519_BASEPOINT_POINT
        }
        #[cfg(feature = "precomputed-tables")]
        {
            constants::ED25519_BASEPOINT_TABLE.mul_base(scalar)
        }
    }

    /// Multiply this point by `clamp_integer(bytes)`.
    ///
    /// The multiplication routines only require their scalar input to
    /// lie below 2^255, which clamping guarantees, so it is fine that
    /// the clamped integer is not reduced mod `l`.
    pub fn mul_clamped(self, bytes: [u8; 32]) -> EdwardsPoint {
        let s = Scalar::from_bits(clamp_integer(bytes));
        &s * &self
    }

    /// Multiply the basepoint by `clamp_integer(bytes)`.
    ///
    /// This is the operation deriving an Ed25519 public key from the
    /// clamped digest of a seed.
    pub fn mul_base_clamped(bytes: [u8; 32]) -> EdwardsPoint {
        let s = Scalar::from_bits(clamp_integer(bytes));
        EdwardsPoint::mul_base(&s)
    }

    /// Compute `a*A + b*B` in variable time, where `B` is the Ed25519
    /// basepoint.
    ///
    /// # Warning
    ///
    /// This function is *not* constant time; every input must be
    /// public.  It exists for signature verification, where `a` and
    /// `b` are derived from the (public) signature and message and `A`
    /// is the public key.
    pub fn vartime_double_scalar_mul_basepoint(
        a: &Scalar,
        A: &EdwardsPoint,
        b: &Scalar,
    ) -> EdwardsPoint {
        scalar_mul::vartime_double_base::mul(a, A, b).as_extended()
    }
}

// ------------------------------------------------------------------------
// The basepoint table
// ------------------------------------------------------------------------

/// A precomputed table of multiples of the basepoint, for accelerating
/// fixed-base scalar multiplication.
///
/// The `i`-th entry holds the lookup table of
/// `[j * 16^(2i) * B, j = 1..8]` in affine Niels form, so that a
/// radix-16 recoded scalar can be multiplied with 64 table additions
/// and 4 doublings.
#[cfg(feature = "precomputed-tables")]
#[derive(Clone)]
pub struct EdwardsBasepointTable(pub(crate) [LookupTable<AffineNielsPoint>; 32]);

#[cfg(feature = "precomputed-tables")]
impl EdwardsBasepointTable {
    /// Create a table of precomputed multiples of `basepoint`.
    pub(crate) fn create(basepoint: &EdwardsPoint) -> EdwardsBasepointTable {
        let mut table = EdwardsBasepointTable([LookupTable::default(); 32]);
        let mut P = *basepoint;
        for i in 0..32 {
            // P = 16^(2i) * B
            table.0[i] = LookupTable::from(&P);
            P = P.mul_by_pow_2(8);
        }
        table
    }

    /// Get the basepoint of this table as an `EdwardsPoint`.
    pub fn basepoint(&self) -> EdwardsPoint {
        // self.0[0].select(1) = 1*(16^2)^0*B
        (&EdwardsPoint::identity() + &self.0[0].select(1)).as_extended()
    }

    /// The computation uses Pippenger's algorithm, as described on page
    /// 13 of the Ed25519 paper.  Write the scalar `a` in radix 16 with
    /// coefficients in [-8,8), i.e.,
    ///
    ///    `a = a_0 + a_1*16^1 + ... + a_63*16^63`,
    ///
    /// with -8 ≤ a_i < 8, -8 ≤ a_63 ≤ 8.  Then, grouping even and odd
    /// coefficients,
    ///
    ///    `a*B = a_0*16^0*B + a_2*16^2*B + ... + a_62*16^62*B`
    ///    `    + a_1*16^1*B + a_3*16^3*B + ... + a_63*16^63*B`
    ///    `    =      (a_0*16^0*B + a_2*16^2*B + ... + a_62*16^62*B)`
    ///    `      + 16*(a_1*16^0*B + a_3*16^2*B + ... + a_63*16^62*B)`.
    ///
    /// The lookup table stores the multiples `j*16^(2i)*B`, selected in
    /// constant time; the scalar's radix-16 digits are bounded by the
    /// table range thanks to the recentering recoding.
    pub fn mul_base(&self, scalar: &Scalar) -> EdwardsPoint {
        let a = scalar.to_radix_16();

        let tables = &self.0;
        let mut P = EdwardsPoint::identity();

        for i in (0..64).filter(|x| x % 2 == 1) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P = P.mul_by_pow_2(4);

        for i in (0..64).filter(|x| x % 2 == 0) {
            P = (&P + &tables[i / 2].select(a[i])).as_extended();
        }

        P
    }
}

#[cfg(feature = "precomputed-tables")]
impl<'a, 'b> Mul<&'b Scalar> for &'a EdwardsBasepointTable {
    type Output = EdwardsPoint;

    /// Construct an `EdwardsPoint` from a `Scalar` `a` by computing the
    /// multiple `aB` of this basepoint table's basepoint `B`.
    fn mul(self, scalar: &'b Scalar) -> EdwardsPoint {
        self.mul_base(scalar)
    }
}

#[cfg(feature = "precomputed-tables")]
impl<'a, 'b> Mul<&'a EdwardsBasepointTable> for &'b Scalar {
    type Output = EdwardsPoint;

    fn mul(self, table: &'a EdwardsBasepointTable) -> EdwardsPoint {
        table.mul_base(self)
    }
}

#[cfg(feature = "precomputed-tables")]
impl Debug for EdwardsBasepointTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EdwardsBasepointTable([\n")?;
        for table in self.0.iter() {
            writeln!(f, "\t{:?},", table)?;
        }
        write!(f, "])")
    }
}

// ------------------------------------------------------------------------
// Affine compression
// ------------------------------------------------------------------------

/// Compress raw affine coordinates directly into Edwards-y format,
/// reversing the byte order to match a requested output key size.
///
/// The coordinates are taken on trust: no check is performed that
/// `(x, y)` lies on the curve.  This is an auxiliary conversion for
/// callers that already hold affine coordinates produced elsewhere
/// (e.g. from a Montgomery-form conversion) and need the compressed
/// encoding in big-endian order; `key_size` is the number of output
/// bytes, at most 32.
#[cfg(feature = "alloc")]
pub fn compress_affine(x: &[u8; 32], y: &[u8; 32], key_size: usize) -> Vec<u8> {
    debug_assert!(key_size <= 32);

    let x = FieldElement::from_bytes(x);
    let y = FieldElement::from_bytes(y);

    let mut s = y.to_bytes();
    s[31] ^= x.is_negative().unwrap_u8() << 7;

    let mut out = Vec::new();
    out.resize(key_size, 0u8);
    for (i, byte) in s.iter().take(key_size).enumerate() {
        out[key_size - 1 - i] = *byte;
    }
    out
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::IsIdentity;

    /// The compressed Ed25519 basepoint, y = 4/5.
    static BASE_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
        0x66, 0x66,
    ]);

    /// Compressed Edwards Y form of 2*basepoint.
    static BASE2_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xc9, 0xa3, 0xf8, 0x6a, 0xae, 0x46, 0x5f, 0x0e, 0x56, 0x51, 0x38, 0x64, 0x51, 0x0f, 0x39,
        0x97, 0x56, 0x1f, 0xa2, 0xc9, 0xe8, 0x5e, 0xa2, 0x1d, 0xc2, 0x29, 0x23, 0x09, 0xf3, 0xcd,
        0x60, 0x22,
    ]);

    /// Compressed Edwards Y form of 16*basepoint.
    static BASE16_CMPRSSD: CompressedEdwardsY = CompressedEdwardsY([
        0xeb, 0x27, 0x67, 0xc1, 0x37, 0xab, 0x7a, 0xd8, 0x27, 0x9c, 0x07, 0x8e, 0xff, 0x11, 0x6a,
        0xb0, 0x78, 0x6e, 0xad, 0x3a, 0x2e, 0x0f, 0x98, 0x9f, 0x72, 0xc3, 0x7f, 0x82, 0xf2, 0x96,
        0x96, 0x70,
    ]);

    /// The little-endian bytes of the x-coordinate of the basepoint.
    /// = 15112221349535400772501151409588531511454012693041857206046113283949847762202
    static BASE_X_COORD_BYTES: [u8; 32] = [
        0x1a, 0xd5, 0x25, 0x8f, 0x60, 0x2d, 0x56, 0xc9, 0xb2, 0xa7, 0x25, 0x95, 0x60, 0xc7, 0x2c,
        0x69, 0x5c, 0xdc, 0xd6, 0xfd, 0x31, 0xe2, 0xa4, 0xc0, 0xfe, 0x53, 0x6e, 0xcd, 0xd3, 0x36,
        0x69, 0x21,
    ];

    /// 4493907448824000747700850167940867464579944529806937181821189941592931634714
    static A_SCALAR: Scalar = Scalar([
        0x1a, 0x0e, 0x97, 0x8a, 0x90, 0xf6, 0x62, 0x2d, 0x37, 0x47, 0x02, 0x3f, 0x8a, 0xd8, 0x26,
        0x4d, 0xa7, 0x58, 0xaa, 0x1b, 0x88, 0xe0, 0x40, 0xd1, 0x58, 0x9e, 0x7b, 0x7f, 0x23, 0x76,
        0xef, 0x09,
    ]);

    /// 2506056684125797857694181776241676200180934651973138769173342316833279714961
    static B_SCALAR: Scalar = Scalar([
        0x91, 0x26, 0x7a, 0xcf, 0x25, 0xc2, 0x09, 0x1b, 0xa2, 0x17, 0x74, 0x7b, 0x66, 0xf0, 0xb3,
        0x2e, 0x9d, 0xf2, 0xa5, 0x67, 0x41, 0xcf, 0xda, 0xc4, 0x56, 0xa7, 0xd4, 0xaa, 0xb8, 0x60,
        0x8a, 0x05,
    ]);

    /// A_SCALAR * basepoint, computed with ed25519.py
    static A_TIMES_BASEPOINT: CompressedEdwardsY = CompressedEdwardsY([
        0xea, 0x27, 0xe2, 0x60, 0x53, 0xdf, 0x1b, 0x59, 0x56, 0xf1, 0x4d, 0x5d, 0xec, 0x3c, 0x34,
        0xc3, 0x84, 0xa2, 0x69, 0xb7, 0x4c, 0xc3, 0x80, 0x3e, 0xa8, 0xe2, 0xe7, 0xc9, 0x42, 0x5e,
        0x40, 0xa5,
    ]);

    /// A_SCALAR * (A_TIMES_BASEPOINT) + B_SCALAR * BASEPOINT
    /// computed with ed25519.py
    static DOUBLE_SCALAR_MULT_RESULT: CompressedEdwardsY = CompressedEdwardsY([
        0x7d, 0xfd, 0x6c, 0x45, 0xaf, 0x6d, 0x6e, 0x0e, 0xba, 0x20, 0x37, 0x1a, 0x23, 0x64, 0x59,
        0xc4, 0xc0, 0x46, 0x83, 0x43, 0xde, 0x70, 0x4b, 0x85, 0x09, 0x6f, 0xfe, 0x35, 0x4f, 0x13,
        0x2b, 0x42,
    ]);

    /// The (reduced) scalar 2.
    fn two() -> Scalar {
        let mut two_bytes = [0u8; 32];
        two_bytes[0] = 2;
        Scalar::from_bits(two_bytes)
    }

    /// Decompress the (positive) point encoded by `compressed`.
    fn decompress(compressed: &CompressedEdwardsY) -> EdwardsPoint {
        -compressed.decompress_negate_vartime().unwrap()
    }

    #[test]
    fn basepoint_mult_zero_vs_identity() {
        let P = EdwardsPoint::mul_base(&Scalar::ZERO);
        assert!(P.is_identity());
        assert_eq!(P.compress(), CompressedEdwardsY::identity());
    }

    #[test]
    fn basepoint_mult_one_vs_basepoint() {
        let bp = EdwardsPoint::mul_base(&Scalar::ONE);
        assert_eq!(bp.compress(), BASE_CMPRSSD);
        assert_eq!(bp, constants::ED25519_BASEPOINT_POINT);
    }

    #[test]
    fn basepoint_mult_vs_ed25519py() {
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    #[test]
    fn basepoint_mult_two_vs_doubling() {
        let P = EdwardsPoint::mul_base(&two());
        assert_eq!(P.compress(), BASE2_CMPRSSD);
        // The doubling formulas must agree.
        let doubled = constants::ED25519_BASEPOINT_POINT.double();
        assert_eq!(doubled.compress(), BASE2_CMPRSSD);
    }

    #[test]
    fn basepoint_mult_by_basepoint_order_is_identity() {
        // l in little-endian bytes; mul_base requires bytes[31] <= 127,
        // which holds since l < 2^253.
        let l_bytes = Scalar::from_bits([
            0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ]);
        let should_be_id = EdwardsPoint::mul_base(&l_bytes);
        assert!(should_be_id.is_identity());
    }

    #[test]
    fn mul_by_pow_2_vs_mult() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        assert_eq!(bp.mul_by_pow_2(4).compress(), BASE16_CMPRSSD);
    }

    #[test]
    fn basepoint_mult_is_homomorphic() {
        // mul_base(a) + mul_base(b) == mul_base(a + b mod l)
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        let bB = EdwardsPoint::mul_base(&B_SCALAR);
        let aB_plus_bB = &aB + &bB;
        let a_plus_b_B = EdwardsPoint::mul_base(&(&A_SCALAR + &B_SCALAR));
        assert_eq!(aB_plus_bB.compress(), a_plus_b_B.compress());
    }

    #[test]
    fn scalar_mult_vs_basepoint_mult() {
        // The generic constant-time multiplication agrees with the
        // table-based fixed-base path.
        let aB = &A_SCALAR * &constants::ED25519_BASEPOINT_POINT;
        assert_eq!(aB.compress(), A_TIMES_BASEPOINT);
    }

    #[test]
    fn basepoint_plus_basepoint_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = &bp + &bp;
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    #[test]
    fn basepoint_plus_basepoint_projective_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_added = (&bp + &bp.as_projective_niels()).as_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    #[test]
    fn basepoint_plus_basepoint_affine_niels_vs_basepoint2() {
        let bp = constants::ED25519_BASEPOINT_POINT;
        let bp_affine_niels = bp.as_affine_niels();
        let bp_added = (&bp + &bp_affine_niels).as_extended();
        assert_eq!(bp_added.compress(), BASE2_CMPRSSD);
    }

    #[test]
    fn add_vs_sub_of_negation() {
        let aB = EdwardsPoint::mul_base(&A_SCALAR);
        let bB = EdwardsPoint::mul_base(&B_SCALAR);
        assert_eq!(&aB - &bB, &aB + &(-&bB));
    }

    #[test]
    fn extended_point_equality_handles_scaling() {
        let id1 = EdwardsPoint::identity();
        let mut two_bytes = [0u8; 32];
        two_bytes[0] = 2;
        // A projectively-scaled copy of the identity.
        let id2 = EdwardsPoint {
            X: FieldElement::ZERO,
            Y: FieldElement::from_bytes(&two_bytes),
            Z: FieldElement::from_bytes(&two_bytes),
            T: FieldElement::ZERO,
        };
        assert_eq!(id1, id2);
    }

    #[test]
    fn basepoint_is_valid() {
        assert!(constants::ED25519_BASEPOINT_POINT.is_valid());
        assert!(EdwardsPoint::identity().is_valid());
    }

    #[test]
    fn decompress_negate_vs_basepoint() {
        let minus_bp = BASE_CMPRSSD.decompress_negate_vartime().unwrap();
        assert!(minus_bp.is_valid());
        assert_eq!(minus_bp, -constants::ED25519_BASEPOINT_POINT);
        // Round trip through the negation recovers the input bytes.
        assert_eq!((-minus_bp).compress(), BASE_CMPRSSD);
    }

    #[test]
    fn decompress_negate_recovers_x_coordinate() {
        let base_X = FieldElement::from_bytes(&BASE_X_COORD_BYTES);
        let bp = decompress(&BASE_CMPRSSD);
        assert!(bp.is_valid());
        // Decompression gives Z = 1, so coordinates are affine.
        assert_eq!(bp.X, base_X);
        assert_eq!(bp.compress(), BASE_CMPRSSD);
    }

    #[test]
    fn decompress_sign_handling() {
        // Manually set the high bit of the last byte to flip the sign.
        let mut minus_basepoint_bytes = *BASE_CMPRSSD.as_bytes();
        minus_basepoint_bytes[31] |= 1 << 7;
        let minus_basepoint = decompress(&CompressedEdwardsY(minus_basepoint_bytes));
        // The y-coordinates agree and the x-coordinates differ by sign.
        assert_eq!(minus_basepoint.X, -(&constants::ED25519_BASEPOINT_POINT.X));
        assert_eq!(minus_basepoint.Y, constants::ED25519_BASEPOINT_POINT.Y);
        assert_eq!(minus_basepoint.Z, constants::ED25519_BASEPOINT_POINT.Z);
        assert_eq!(minus_basepoint.T, -(&constants::ED25519_BASEPOINT_POINT.T));
    }

    #[test]
    fn decompress_rejects_non_curve_encodings() {
        // About half of all y-coordinates have no corresponding x;
        // among y = 2..50 the probability every value decodes is
        // below 2^-48, so demand at least one rejection.  Every
        // successful decoding must satisfy the curve equation.
        let mut rejected = 0;
        for y in 2u8..=50 {
            let mut bytes = [0u8; 32];
            bytes[0] = y;
            match CompressedEdwardsY(bytes).decompress_negate_vartime() {
                Err(DecodeError) => rejected += 1,
                Ok(minus_p) => assert!(minus_p.is_valid()),
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn vartime_double_scalar_mul_basepoint_vs_ed25519py() {
        let A = decompress(&A_TIMES_BASEPOINT);
        let result = EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &A, &B_SCALAR);
        assert_eq!(result.compress(), DOUBLE_SCALAR_MULT_RESULT);
    }

    #[test]
    fn vartime_double_scalar_mul_vs_constant_time_paths() {
        let A = decompress(&A_TIMES_BASEPOINT);
        let vartime = EdwardsPoint::vartime_double_scalar_mul_basepoint(&A_SCALAR, &A, &B_SCALAR);
        let consttime = &(&A_SCALAR * &A) + &EdwardsPoint::mul_base(&B_SCALAR);
        assert_eq!(vartime.compress(), consttime.compress());
    }

    #[test]
    fn vartime_double_scalar_mul_of_zeros_is_identity() {
        let A = decompress(&A_TIMES_BASEPOINT);
        let result =
            EdwardsPoint::vartime_double_scalar_mul_basepoint(&Scalar::ZERO, &A, &Scalar::ZERO);
        assert!(result.is_identity());
    }

    #[test]
    fn mul_base_clamped_vs_mul_clamped() {
        let bytes = [0x42u8; 32];
        let direct = EdwardsPoint::mul_base_clamped(bytes);
        let via_point = constants::ED25519_BASEPOINT_POINT.mul_clamped(bytes);
        assert_eq!(direct.compress(), via_point.compress());
    }

    #[test]
    fn affine_odd_multiples_of_basepoint_vs_mul_base() {
        // Entry i of the table holds (2i+1)*B.
        for i in 0..8 {
            let mut k = [0u8; 32];
            k[0] = 2 * i + 1;
            let odd_multiple = (&EdwardsPoint::identity()
                + &constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT.select((2 * i + 1) as usize))
                .as_extended();
            let expected = EdwardsPoint::mul_base(&Scalar::from_bits(k));
            assert_eq!(odd_multiple.compress(), expected.compress());
        }
    }

    #[cfg(feature = "precomputed-tables")]
    #[test]
    fn basepoint_table_basepoint_vs_constant() {
        let table = &constants::ED25519_BASEPOINT_TABLE;
        assert_eq!(table.basepoint().compress(), BASE_CMPRSSD);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn compress_affine_vs_compress() {
        let y_bytes = constants::ED25519_BASEPOINT_POINT.Y.to_bytes();
        let out = compress_affine(&BASE_X_COORD_BYTES, &y_bytes, 32);
        let mut expected = BASE_CMPRSSD.to_bytes();
        expected.reverse();
        assert_eq!(out[..], expected[..]);
    }
}
