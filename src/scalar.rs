// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Arithmetic on scalars modulo the group order.
//!
//! The Ed25519 basepoint `B` has prime order
//!
//! `l = 2^252 + 27742317777372353535851937790883648493`,
//!
//! so a multiple `aB` depends only on `a (mod l)`.  The [`Scalar`]
//! struct holds an integer in 32 little-endian bytes; arithmetic is
//! performed on twelve 21-bit limbs in `i64` accumulators, so that
//! limb products and their sums stay well inside 64 bits.  Scalars are
//! kept in byte form between operations, which gives the scalar
//! multiplication code cheap access to individual bits and nibbles.

use core::fmt::Debug;
use core::ops::{Add, Mul};

use subtle::Choice;
use subtle::ConstantTimeEq;

#[cfg(feature = "rand_core")]
use rand_core::{CryptoRng, RngCore};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::field::load4;

/// The low 21 bits of a limb.
const MASK_21_BITS: i64 = (1 << 21) - 1;

/// The `Scalar` struct holds an integer `s < 2^255`, interpreted as an
/// element of the ring of integers modulo
/// `l = 2^252 + 27742317777372353535851937790883648493`.
///
/// Scalars produced by the `from_bytes_mod_order*` constructors and by
/// the arithmetic operations are canonical, i.e. fully reduced mod `l`.
/// [`Scalar::from_bits`] additionally admits raw 255-bit integers, as
/// required for multiplication by clamped secret keys.
#[derive(Copy, Clone)]
pub struct Scalar(pub(crate) [u8; 32]);

impl Debug for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Scalar{{\n\tbytes: {:?}\n}}", &self.0)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Scalar) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        self.ct_eq(other).into()
    }
}
impl Eq for Scalar {}

#[cfg(feature = "zeroize")]
impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<'a, 'b> Add<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    /// Compute `self + rhs (mod l)`.  Both inputs are expected to be
    /// reduced; the result always is.
    fn add(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, &Scalar::ONE, rhs)
    }
}
define_add_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl<'a, 'b> Mul<&'b Scalar> for &'a Scalar {
    type Output = Scalar;

    /// Compute `self * rhs (mod l)`.
    fn mul(self, rhs: &'b Scalar) -> Scalar {
        Scalar::multiply_add(self, rhs, &Scalar::ZERO)
    }
}
define_mul_variants!(LHS = Scalar, RHS = Scalar, Output = Scalar);

impl Scalar {
    /// The scalar `0`.
    pub const ZERO: Scalar = Scalar([0u8; 32]);

    /// The scalar `1`.
    pub const ONE: Scalar = Scalar([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0,
    ]);

    /// Construct a `Scalar` by reducing a 256-bit little-endian integer
    /// modulo the group order `l`.
    pub fn from_bytes_mod_order(bytes: [u8; 32]) -> Scalar {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&bytes);
        Scalar::from_bytes_mod_order_wide(&wide)
    }

    /// Construct a `Scalar` by reducing a 512-bit little-endian integer
    /// modulo the group order `l`.
    ///
    /// The output is the canonical representative, so reducing the
    /// zero-extension of an already-reduced scalar returns it
    /// unchanged.
    pub fn from_bytes_mod_order_wide(input: &[u8; 64]) -> Scalar {
        let mut limbs = Scalar::unpack_wide_limbs(input);
        Scalar::reduce_limbs(&mut limbs);
        Scalar::pack_limbs(&limbs)
    }

    /// Construct a `Scalar` from the low 255 bits of a 256-bit integer,
    /// without reducing mod `l`.
    ///
    /// This is intended for multiplying by scalars that are merely
    /// clamped rather than reduced, such as Ed25519 secret key halves;
    /// the scalar multiplication routines only require their input to
    /// be below 2^255.
    pub fn from_bits(mut bytes: [u8; 32]) -> Scalar {
        // Ensure invariant that s < 2^255
        bytes[31] &= 0b0111_1111;
        Scalar(bytes)
    }

    /// Return a `Scalar` chosen uniformly at random using a
    /// user-provided CSPRNG, by wide reduction of 64 random bytes.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        let mut scalar_bytes = [0u8; 64];
        rng.fill_bytes(&mut scalar_bytes);
        Scalar::from_bytes_mod_order_wide(&scalar_bytes)
    }

    /// View this `Scalar` as an array of little-endian bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Copy this `Scalar` to an array of little-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Compute `(a * b) + c (mod l)`.
    ///
    /// This is the primitive an EdDSA signer uses to compute
    /// `s = r + k*a (mod l)`.  It is exact for all 256-bit inputs: the
    /// reduction does not require its inputs to be canonical, only to
    /// fit in 32 bytes.  Runs in constant time.
    pub fn multiply_add(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
        let al = Scalar::unpack_limbs(&a.0);
        let bl = Scalar::unpack_limbs(&b.0);
        let cl = Scalar::unpack_limbs(&c.0);

        // Schoolbook product, then add c.  The top limbs of unreduced
        // inputs hold up to 25 bits, so a coefficient is at most
        // 12 * 2^50 + 2^25, far below i64::MAX.
        let mut limbs = [0i64; 24];
        for i in 0..12 {
            limbs[i] = cl[i];
        }
        for i in 0..12 {
            for j in 0..12 {
                limbs[i + j] += al[i] * bl[j];
            }
        }

        Scalar::reduce_limbs(&mut limbs);
        Scalar::pack_limbs(&limbs)
    }

    /// Unpack 32 bytes into 12 21-bit limbs.  The top limb is left
    /// unmasked and holds the remaining high bits (up to 25).
    fn unpack_limbs(bytes: &[u8; 32]) -> [i64; 12] {
        let mut limbs = [0i64; 12];
        for (i, limb) in limbs.iter_mut().enumerate().take(11) {
            let bit = 21 * i;
            *limb = (load4(&bytes[bit / 8..]) >> (bit & 7)) & MASK_21_BITS;
        }
        limbs[11] = load4(&bytes[28..]) >> 7;
        limbs
    }

    /// Unpack 64 bytes into 24 21-bit limbs, top limb unmasked.
    fn unpack_wide_limbs(input: &[u8; 64]) -> [i64; 24] {
        let mut limbs = [0i64; 24];
        for (i, limb) in limbs.iter_mut().enumerate().take(23) {
            let bit = 21 * i;
            *limb = (load4(&input[bit / 8..]) >> (bit & 7)) & MASK_21_BITS;
        }
        limbs[23] = load4(&input[60..]) >> 3;
        limbs
    }

    /// Pack the low 12 limbs into bytes.  The limbs must be
    /// non-negative and reduced, i.e. below 2^21 (the top limb may
    /// carry a 22nd bit).
    fn pack_limbs(limbs: &[i64; 24]) -> Scalar {
        let mut s = [0u8; 32];
        for (i, limb) in limbs.iter().enumerate().take(12) {
            // Limb i contributes bits [21i, 21(i+1)); shifted into
            // position it spans at most four bytes.
            let bit = 21 * i;
            let value = (*limb as u64) << (bit & 7);
            let start = bit / 8;
            for k in 0..4 {
                if start + k < 32 {
                    s[start + k] |= (value >> (8 * k)) as u8;
                }
            }
        }
        Scalar(s)
    }

    /// Reduce 24 limbs to 12, modulo
    ///
    /// `l = 2^252 + 27742317777372353535851937790883648493`.
    ///
    /// Since `2^252 = -27742317777372353535851937790883648493 (mod l)`,
    /// and the right-hand side decomposes into 21-bit limbs as
    ///
    /// ```text
    /// rhs =    666643 * 2^0
    ///        + 470296 * 2^21
    ///        + 654183 * 2^42
    ///        - 997805 * 2^63
    ///        + 136657 * 2^84
    ///        - 683901 * 2^105
    /// ```
    ///
    /// the `(12+k)`-th limb, which weighs `2^(252 + 21k)`, can be
    /// eliminated by adding its product with these six constants onto
    /// limbs `k` through `k+5`.  Carry passes are interleaved between
    /// elimination rounds to keep every limb small enough that the
    /// products cannot overflow; the final two elimination/carry
    /// rounds leave the canonical representative.
    fn reduce_limbs(limbs: &mut [i64; 24]) {
        /// Eliminate the `i`-th limb by folding it onto limbs
        /// `i-12` .. `i-7`.
        #[inline]
        fn do_reduction(limbs: &mut [i64; 24], i: usize) {
            limbs[i - 12] += limbs[i] * 666643;
            limbs[i - 11] += limbs[i] * 470296;
            limbs[i - 10] += limbs[i] * 654183;
            limbs[i - 9] -= limbs[i] * 997805;
            limbs[i - 8] += limbs[i] * 136657;
            limbs[i - 7] -= limbs[i] * 683901;
            limbs[i] = 0;
        }

        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb.
        /// Postcondition: `0 <= limbs[i] < 2^21`.
        #[inline]
        fn do_carry_uncentered(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = limbs[i] >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }

        /// Carry excess from the `i`-th limb into the `(i+1)`-th limb.
        /// Postcondition: `-2^20 <= limbs[i] < 2^20`.
        #[inline]
        fn do_carry_centered(limbs: &mut [i64; 24], i: usize) {
            let carry: i64 = (limbs[i] + (1 << 20)) >> 21;
            limbs[i + 1] += carry;
            limbs[i] -= carry << 21;
        }

        for i in 0..23 {
            do_carry_centered(limbs, i);
        }
        for i in (1..23).step_by(2) {
            do_carry_centered(limbs, i);
        }

        for i in (18..24).rev() {
            do_reduction(limbs, i);
        }

        for i in (6..18).step_by(2) {
            do_carry_centered(limbs, i);
        }
        for i in (7..16).step_by(2) {
            do_carry_centered(limbs, i);
        }

        for i in (12..18).rev() {
            do_reduction(limbs, i);
        }

        for i in (0..12).step_by(2) {
            do_carry_centered(limbs, i);
        }
        for i in (1..12).step_by(2) {
            do_carry_centered(limbs, i);
        }

        do_reduction(limbs, 12);

        for i in 0..12 {
            do_carry_uncentered(limbs, i);
        }

        do_reduction(limbs, 12);

        for i in 0..11 {
            do_carry_uncentered(limbs, i);
        }
    }

    /// Write this scalar in radix 16, with coefficients in `[-8, 8)`,
    /// i.e. compute `a_i` such that
    ///
    /// `a = a_0 + a_1*16^1 + ... + a_63*16^63`,
    ///
    /// with `-8 <= a_i < 8` for `0 <= i < 63` and `-8 <= a_63 <= 8`.
    ///
    /// Precondition: `self[31] <= 127`, which holds whenever `self` is
    /// reduced or clamped.
    pub(crate) fn to_radix_16(&self) -> [i8; 64] {
        debug_assert!(self.0[31] <= 127);
        let mut output = [0i8; 64];

        // Step 1: change radix from 256 (bytes) to 16 (nibbles).
        #[inline(always)]
        fn bot_half(x: u8) -> u8 {
            x & 15
        }
        #[inline(always)]
        fn top_half(x: u8) -> u8 {
            (x >> 4) & 15
        }

        for i in 0..32 {
            output[2 * i] = bot_half(self.0[i]) as i8;
            output[2 * i + 1] = top_half(self.0[i]) as i8;
        }
        // Since self[31] <= 127, output[63] <= 7.

        // Step 2: recenter coefficients from [0,16) to [-8,8).
        for i in 0..63 {
            let carry = (output[i] + 8) >> 4;
            output[i] -= carry << 4;
            output[i + 1] += carry;
        }
        // output[63] is not recentered; it increases by at most the
        // carry, so output[63] <= 8.

        output
    }

    /// Compute a width-5 "non-adjacent form" of this scalar: a signed
    /// binary expansion `sum(naf[i] * 2^i)` in which every nonzero
    /// coefficient is odd and bounded by 15, so that nonzero
    /// coefficients are as sparse as possible.
    ///
    /// The expansion starts from the plain bits of the scalar and
    /// greedily merges runs of up to 6 bits into a single signed odd
    /// digit, carrying upwards when the merged digit would go
    /// negative.  This recoding branches on the scalar's bits and is
    /// therefore **not constant time**; it is used only by the
    /// `vartime` multiplication paths, whose inputs are public.
    pub(crate) fn non_adjacent_form(&self) -> [i8; 256] {
        // Step 1: write out the bits of the scalar.
        let mut naf = [0i8; 256];
        for i in 0..256 {
            // The bottom 3 bits of i index the bit, the rest the byte.
            naf[i] = ((self.0[i >> 3] >> (i & 7)) & 1u8) as i8;
        }

        // Step 2: zero coefficients by carrying them upwards or downwards.
        'bits: for i in 0..256 {
            if naf[i] == 0 {
                continue 'bits;
            }
            'window: for b in 1..6 {
                if i + b >= 256 {
                    break 'window;
                }
                if naf[i + b] == 0 {
                    continue 'window;
                }
                let potential_carry = naf[i + b] << b;
                if naf[i] + potential_carry <= 15 {
                    // Eliminate naf[i+b] by carrying its value onto naf[i].
                    naf[i] += potential_carry;
                    naf[i + b] = 0;
                } else if naf[i] - potential_carry >= -15 {
                    // Eliminate naf[i+b] by carrying its value upwards.
                    naf[i] -= potential_carry; // Subtract 2^(i+b)
                    'carry: for k in i + b..256 {
                        if naf[k] != 0 {
                            // Since naf[k] = 0 or 1 for k > i, naf[k] == 1.
                            naf[k] = 0; // Subtract 2^k
                        } else {
                            // By now we have subtracted 2^k =
                            // 2^(i+b) + 2^(i+b) + 2^(i+b+1) + ... + 2^(k-1).
                            naf[k] = 1; // Add back 2^k.
                            break 'carry;
                        }
                    }
                }
            }
        }

        naf
    }
}

/// Clamp a 32-byte integer for use as an Ed25519 secret scalar, as
/// specified in RFC 8032: clear the low three bits, clear the high bit,
/// set the second-highest bit.
///
/// Clamping is applied by the signing layer before key material ever
/// reaches the multiplication routines here; it guarantees the result
/// is a multiple of the cofactor and lies below 2^255, as
/// [`crate::edwards::EdwardsPoint::mul_base`] requires.
pub fn clamp_integer(mut bytes: [u8; 32]) -> [u8; 32] {
    bytes[0] &= 0b1111_1000;
    bytes[31] &= 0b0111_1111;
    bytes[31] |= 0b0100_0000;
    bytes
}
