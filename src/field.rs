// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Field arithmetic for GF(2²⁵⁵ - 19), using 64-bit limbs with 128-bit
//! products.
//!
//! Field elements are represented in radix 2⁵¹ as five `u64`s.  On
//! x86_64 the multiplications lower to `MUL` instructions taking 64-bit
//! inputs and producing 128-bit outputs.
//!
//! This module is the arithmetic substrate for the curve code in the
//! rest of the crate and is not part of the public API.

use core::fmt::Debug;
use core::ops::Neg;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// A `FieldElement` represents an element of the field GF(2²⁵⁵ - 19).
///
/// The coefficients are allowed to grow up to 2⁵⁴ between reductions
/// mod `p`; every function below documents no tighter bound only when
/// the standard 54-bit input bound applies.
#[derive(Copy, Clone)]
pub(crate) struct FieldElement(pub(crate) [u64; 5]);

/// Convert an array of (at least) eight bytes into a `u64`.
#[inline]
pub(crate) fn load8(input: &[u8]) -> u64 {
    (input[0] as u64)
        | ((input[1] as u64) << 8)
        | ((input[2] as u64) << 16)
        | ((input[3] as u64) << 24)
        | ((input[4] as u64) << 32)
        | ((input[5] as u64) << 40)
        | ((input[6] as u64) << 48)
        | ((input[7] as u64) << 56)
}

/// Convert an array of (at least) four bytes into an `i64`.
#[inline]
pub(crate) fn load4(input: &[u8]) -> i64 {
    (input[0] as i64)
        | ((input[1] as i64) << 8)
        | ((input[2] as i64) << 16)
        | ((input[3] as i64) << 24)
}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl ConstantTimeEq for FieldElement {
    /// Test equality between two `FieldElement`s by comparing their
    /// canonical byte encodings.
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for FieldElement {}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        FieldElement([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
            u64::conditional_select(&a.0[3], &b.0[3], choice),
            u64::conditional_select(&a.0[4], &b.0[4], choice),
        ])
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        for i in 0..5 {
            self.0[i].conditional_assign(&other.0[i], choice);
        }
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut output = *self;
        output += rhs;
        output
    }
}

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) - rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        // To avoid underflow, first add a multiple of p.
        // 16*p = p << 4 is larger than any 54-bit rhs limb.
        FieldElement::reduce([
            (self.0[0] + 36028797018963664u64) - rhs.0[0],
            (self.0[1] + 36028797018963952u64) - rhs.0[1],
            (self.0[2] + 36028797018963952u64) - rhs.0[2],
            (self.0[3] + 36028797018963952u64) - rhs.0[3],
            (self.0[4] + 36028797018963952u64) - rhs.0[4],
        ])
    }
}

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        /// Multiply two 64-bit integers with 128 bits of output.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a: &[u64; 5] = &self.0;
        let b: &[u64; 5] = &rhs.0;

        // 64-bit precomputations to avoid 128-bit multiplications
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        // Multiply to get 128-bit coefficients of output.
        //
        // Each c[i] < 2^(2b) * (1 + i + (4 - i)*19) < 2^(2b + 6.27),
        // where b is the bitlength of the input limbs, so the carries
        // below fit in u64 whenever b <= 54.
        let     c0: u128 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1: u128 = m(a[1], b[0]) + m(a[0], b[1])  + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2: u128 = m(a[2], b[0]) + m(a[1], b[1])  + m(a[0], b[2])  + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3: u128 = m(a[3], b[0]) + m(a[2], b[1])  + m(a[1], b[2])  + m(a[0], b[3])  + m(a[4], b4_19);
        let mut c4: u128 = m(a[4], b[0]) + m(a[3], b[1])  + m(a[2], b[2])  + m(a[1], b[3])  + m(a[0], b[4]);

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));
        debug_assert!(b.iter().all(|&x| x < (1 << 54)));

        // Casting to u64 and back tells the compiler that the carry is
        // bounded by 2^64, so that the addition is a u128 + u64 rather
        // than u128 + u128.
        let low_51_bit_mask = (1u64 << 51) - 1;
        c1 += (c0 >> 51) as u64 as u128;
        let mut out0: u64 = (c0 as u64) & low_51_bit_mask;
        c2 += (c1 >> 51) as u64 as u128;
        let out1: u64 = (c1 as u64) & low_51_bit_mask;
        c3 += (c2 >> 51) as u64 as u128;
        let out2: u64 = (c2 as u64) & low_51_bit_mask;
        c4 += (c3 >> 51) as u64 as u128;
        let out3: u64 = (c3 as u64) & low_51_bit_mask;
        out0 += ((c4 >> 51) as u64) * 19;
        let out4: u64 = (c4 as u64) & low_51_bit_mask;

        FieldElement::reduce([out0, out1, out2, out3, out4])
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        // See commentary in the Sub impl.
        FieldElement::reduce([
            36028797018963664u64 - self.0[0],
            36028797018963952u64 - self.0[1],
            36028797018963952u64 - self.0[2],
            36028797018963952u64 - self.0[3],
            36028797018963952u64 - self.0[4],
        ])
    }
}

impl FieldElement {
    /// The additive identity.
    pub(crate) const ZERO: FieldElement = FieldElement([0, 0, 0, 0, 0]);
    /// The multiplicative identity.
    pub(crate) const ONE: FieldElement = FieldElement([1, 0, 0, 0, 0]);

    /// Given 64-bit input limbs, reduce to enforce the bound
    /// `limbs[i] < 2^51 + epsilon`.
    #[inline(always)]
    fn reduce(mut limbs: [u64; 5]) -> FieldElement {
        let low_51_bit_mask = (1u64 << 51) - 1;

        // Since the input limbs are bounded by 2^64, the carries are
        // bounded by 2^13; multiplying the top carry by 19 and adding
        // it to the low limb cannot overflow.
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= low_51_bit_mask;
        limbs[1] &= low_51_bit_mask;
        limbs[2] &= low_51_bit_mask;
        limbs[3] &= low_51_bit_mask;
        limbs[4] &= low_51_bit_mask;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;

        FieldElement(limbs)
    }

    /// Load a `FieldElement` from the low 255 bits of a 256-bit input.
    ///
    /// # Warning
    ///
    /// This function does not check that the input is canonical: it
    /// masks the high bit, but happily decodes `2^255 - 18` as `1`.
    /// Applications needing canonicality must re-encode and compare.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> FieldElement {
        let low_51_bit_mask = (1u64 << 51) - 1;
        FieldElement([
            // load bits [  0, 64), no shift
            load8(&bytes[0..]) & low_51_bit_mask,
            // load bits [ 48,112), shift to [ 51,102)
            (load8(&bytes[6..]) >> 3) & low_51_bit_mask,
            // load bits [ 96,160), shift to [102,153)
            (load8(&bytes[12..]) >> 6) & low_51_bit_mask,
            // load bits [152,216), shift to [153,204)
            (load8(&bytes[19..]) >> 1) & low_51_bit_mask,
            // load bits [192,256), shift to [204,255)
            (load8(&bytes[24..]) >> 12) & low_51_bit_mask,
        ])
    }

    /// Serialize this `FieldElement` to 32 bytes.  The encoding is
    /// canonical.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        // First carry to the range [0, 2^255); we need [0, 2^255 - 19).
        let mut limbs = FieldElement::reduce(self.0).0;

        // Let h = limbs[0] + limbs[1]*2^51 + ... + limbs[4]*2^204.
        //
        // Write h = pq + r with 0 <= r < p.  Since h < 2^255, q is 0
        // or 1, and h >= p <=> h + 19 >= 2^255, so q is the carry bit
        // of h + 19.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        // Now r = h - pq = h + 19q - 2^255 q; add 19q, carry, and
        // discard the bit at position 255.
        limbs[0] += 19 * q;

        let low_51_bit_mask = (1u64 << 51) - 1;
        limbs[1] += limbs[0] >> 51;
        limbs[0] &= low_51_bit_mask;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= low_51_bit_mask;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= low_51_bit_mask;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= low_51_bit_mask;
        // carry out of limbs[4] is 2^255 q: discard it
        limbs[4] &= low_51_bit_mask;

        // Gather the limbs into bytes; byte i holds bits [8i, 8i+8),
        // which straddle a limb boundary when 8i mod 51 > 43.
        let mut s = [0u8; 32];
        for (i, byte) in s.iter_mut().enumerate() {
            let bit = 8 * i;
            let limb = bit / 51;
            let shift = bit % 51;
            let mut value = limbs[limb] >> shift;
            if shift > 43 && limb < 4 {
                value |= limbs[limb + 1] << (51 - shift);
            }
            *byte = value as u8;
        }

        // High bit must be clear after canonical reduction.
        debug_assert!((s[31] & 0b1000_0000u8) == 0u8);

        s
    }

    #[inline(always)]
    fn square_inner(&self) -> [u64; 5] {
        /// Multiply two 64-bit integers with 128 bits of output.
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a: &[u64; 5] = &self.0;

        // Precomputation: 64-bit multiply by 19
        let a3_19 = 19 * a[3];
        let a4_19 = 19 * a[4];

        // Same coefficient bound as in Mul: carries fit whenever the
        // input limbs are below 2^54.
        let     c0: u128 = m(a[0],  a[0]) + 2 * (m(a[1], a4_19) + m(a[2], a3_19));
        let mut c1: u128 = m(a[3], a3_19) + 2 * (m(a[0],  a[1]) + m(a[2], a4_19));
        let mut c2: u128 = m(a[1],  a[1]) + 2 * (m(a[0],  a[2]) + m(a[4], a3_19));
        let mut c3: u128 = m(a[4], a4_19) + 2 * (m(a[0],  a[3]) + m(a[1],  a[2]));
        let mut c4: u128 = m(a[2],  a[2]) + 2 * (m(a[0],  a[4]) + m(a[1],  a[3]));

        debug_assert!(a.iter().all(|&x| x < (1 << 54)));

        let low_51_bit_mask = (1u64 << 51) - 1;
        c1 += (c0 >> 51) as u64 as u128;
        let mut out0: u64 = (c0 as u64) & low_51_bit_mask;
        c2 += (c1 >> 51) as u64 as u128;
        let out1: u64 = (c1 as u64) & low_51_bit_mask;
        c3 += (c2 >> 51) as u64 as u128;
        let out2: u64 = (c2 as u64) & low_51_bit_mask;
        c4 += (c3 >> 51) as u64 as u128;
        let out3: u64 = (c3 as u64) & low_51_bit_mask;
        out0 += ((c4 >> 51) as u64) * 19;
        let out4: u64 = (c4 as u64) & low_51_bit_mask;

        [out0, out1, out2, out3, out4]
    }

    /// Returns the square of this field element.
    pub(crate) fn square(&self) -> FieldElement {
        FieldElement::reduce(self.square_inner())
    }

    /// Returns 2 times the square of this field element.
    ///
    /// Requires limbs below 2^53 so the doubling cannot overflow.
    pub(crate) fn square2(&self) -> FieldElement {
        let mut limbs = self.square_inner();
        for limb in limbs.iter_mut() {
            *limb *= 2;
        }
        FieldElement::reduce(limbs)
    }

    /// Compute `self^(2^k)` by `k` successive squarings.
    ///
    /// Requires `k > 0`.
    fn pow2k(&self, k: u32) -> FieldElement {
        debug_assert!(k > 0);
        let mut z = self.square();
        for _ in 1..k {
            z = z.square();
        }
        z
    }

    /// Compute `(self^(2^250 - 1), self^11)`, used as a common
    /// subexpression of `invert()` and `pow_p58()`.
    #[rustfmt::skip] // keep alignment of explanatory comments
    fn pow22501(&self) -> (FieldElement, FieldElement) {
        // Each temporary t_i below is self^e_i; squaring doubles the
        // exponent and multiplication adds them.
        //
        // Temporary t_i                      Nonzero bits of e_i
        let t0  = self.square();           // 1
        let t1  = t0.square().square();    // 3
        let t2  = self * &t1;              // 3,0
        let t3  = &t0 * &t2;               // 3,1,0
        let t4  = t3.square();             // 4,2,1
        let t5  = &t2 * &t4;               // 4,3,2,1,0
        let t6  = t5.pow2k(5);             // 9,8,7,6,5
        let t7  = &t6 * &t5;               // 9..0
        let t8  = t7.pow2k(10);            // 19..10
        let t9  = &t8 * &t7;               // 19..0
        let t10 = t9.pow2k(20);            // 39..20
        let t11 = &t10 * &t9;              // 39..0
        let t12 = t11.pow2k(10);           // 49..10
        let t13 = &t12 * &t7;              // 49..0
        let t14 = t13.pow2k(50);           // 99..50
        let t15 = &t14 * &t13;             // 99..0
        let t16 = t15.pow2k(100);          // 199..100
        let t17 = &t16 * &t15;             // 199..0
        let t18 = t17.pow2k(50);           // 249..50
        let t19 = &t18 * &t13;             // 249..0

        (t19, t3)
    }

    /// Given a nonzero field element, compute its inverse: self^(p-2).
    ///
    /// Returns zero on input zero.
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn invert(&self) -> FieldElement {
        // The bits of p - 2 = 2^255 - 21 are 11010111111...11.
        //
        //                                 nonzero bits of exponent
        let (t19, t3) = self.pow22501();   // t19: 249..0 ; t3: 3,1,0
        let t20 = t19.pow2k(5);            // 254..5
        &t20 * &t3                         // 254..5,3,1,0
    }

    /// Raise this field element to the power `(p - 5)/8 = 2^252 - 3`,
    /// the exponent used by the square-root computation in point
    /// decompression (valid because p ≡ 5 (mod 8)).
    #[rustfmt::skip] // keep alignment of explanatory comments
    pub(crate) fn pow_p58(&self) -> FieldElement {
        // The bits of (p - 5)/8 are 101111.....11.
        //
        //                                 nonzero bits of exponent
        let (t19, _) = self.pow22501();    // 249..0
        let t20 = t19.pow2k(2);            // 251..2
        self * &t20                        // 251..2,0
    }

    /// Determine if this `FieldElement` is negative in the sense used
    /// by the Ed25519 paper: `x` is negative if its canonical encoding
    /// has the low bit set.
    pub(crate) fn is_negative(&self) -> Choice {
        let bytes = self.to_bytes();
        (bytes[0] & 1).into()
    }

    /// Determine if this `FieldElement` is zero.
    pub(crate) fn is_zero(&self) -> Choice {
        let zero = [0u8; 32];
        let bytes = self.to_bytes();

        bytes.ct_eq(&zero)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Random element a of GF(2^255-19), from Sage:
    /// a = 1070314506888354081329385823235218444233221\
    ///     2228051251926706380353716438957572
    static A_BYTES: [u8; 32] = [
        0x04, 0xfe, 0xdf, 0x98, 0xa7, 0xfa, 0x0a, 0x68, 0x84, 0x92, 0xbd, 0x59, 0x08, 0x07, 0xa7,
        0x03, 0x9e, 0xd1, 0xf6, 0xf2, 0xe1, 0xd9, 0xe2, 0xa4, 0xa4, 0x51, 0x47, 0x36, 0xf3, 0xc3,
        0xa9, 0x17,
    ];

    /// Byte representation of a**2
    static ASQ_BYTES: [u8; 32] = [
        0x75, 0x97, 0x24, 0x9e, 0xe6, 0x06, 0xfe, 0xab, 0x24, 0x04, 0x56, 0x68, 0x07, 0x91, 0x2d,
        0x5d, 0x0b, 0x0f, 0x3f, 0x1c, 0xb2, 0x6e, 0xf2, 0xe2, 0x63, 0x9c, 0x12, 0xba, 0x73, 0x0b,
        0xe3, 0x62,
    ];

    /// Byte representation of 1/a
    static AINV_BYTES: [u8; 32] = [
        0x96, 0x1b, 0xcd, 0x8d, 0x4d, 0x5e, 0xa2, 0x3a, 0xe9, 0x36, 0x37, 0x93, 0xdb, 0x7b, 0x4d,
        0x70, 0xb8, 0x0d, 0xc0, 0x55, 0xd0, 0x4c, 0x1d, 0x7b, 0x90, 0x71, 0xd8, 0xe9, 0xb6, 0x18,
        0xe6, 0x30,
    ];

    /// Byte representation of a^((p-5)/8)
    static AP58_BYTES: [u8; 32] = [
        0x6a, 0x4f, 0x24, 0x89, 0x1f, 0x57, 0x60, 0x36, 0xd0, 0xbe, 0x12, 0x3c, 0x8f, 0xf5, 0xb1,
        0x59, 0xe0, 0xf0, 0xb8, 0x1b, 0x20, 0xd2, 0xb5, 0x1f, 0x15, 0x21, 0xf9, 0xe3, 0xe1, 0x61,
        0x21, 0x55,
    ];

    #[test]
    fn a_mul_a_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, &a * &a);
    }

    #[test]
    fn a_square_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(asq, a.square());
    }

    #[test]
    fn a_square2_vs_a_squared_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);
        assert_eq!(a.square2(), &asq + &asq);
    }

    #[test]
    fn a_invert_vs_inverse_of_a_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ainv = FieldElement::from_bytes(&AINV_BYTES);
        let should_be_inverse = a.invert();
        assert_eq!(ainv, should_be_inverse);
        assert_eq!(FieldElement::ONE, &a * &should_be_inverse);
    }

    #[test]
    fn a_p58_vs_ap58_constant() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let ap58 = FieldElement::from_bytes(&AP58_BYTES);
        assert_eq!(ap58, a.pow_p58());
    }

    #[test]
    fn from_bytes_highbit_is_ignored() {
        let mut cleared_bytes = A_BYTES;
        cleared_bytes[31] &= 127u8;
        let with_highbit_set = FieldElement::from_bytes(&A_BYTES);
        let without_highbit_set = FieldElement::from_bytes(&cleared_bytes);
        assert_eq!(without_highbit_set, with_highbit_set);
    }

    #[test]
    fn encoding_round_trips_and_is_canonical() {
        let a = FieldElement::from_bytes(&A_BYTES);
        assert_eq!(a.to_bytes(), A_BYTES);

        // 2^255 - 18 is a non-canonical encoding of 1.
        let mut noncanonical = [0xffu8; 32];
        noncanonical[0] = 0xee;
        noncanonical[31] = 0x7f;
        let one = FieldElement::from_bytes(&noncanonical);
        assert_eq!(one.to_bytes(), FieldElement::ONE.to_bytes());
    }

    #[test]
    fn negation_vs_subtraction_from_zero() {
        let a = FieldElement::from_bytes(&A_BYTES);
        let minus_a = -&a;
        assert_eq!(minus_a, &FieldElement::ZERO - &a);
        assert_eq!(&a + &minus_a, FieldElement::ZERO);
    }

    #[test]
    fn conditional_assign_and_negate() {
        use subtle::ConditionallyNegatable;

        let a = FieldElement::from_bytes(&A_BYTES);
        let asq = FieldElement::from_bytes(&ASQ_BYTES);

        let mut t = a;
        t.conditional_assign(&asq, Choice::from(0u8));
        assert_eq!(t, a);
        t.conditional_assign(&asq, Choice::from(1u8));
        assert_eq!(t, asq);

        let mut t = a;
        t.conditional_negate(Choice::from(0u8));
        assert_eq!(t, a);
        t.conditional_negate(Choice::from(1u8));
        assert_eq!(t, -&a);
    }
}
