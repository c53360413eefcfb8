// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Variable-time double-base scalar multiplication.
#![allow(non_snake_case)]

use core::cmp::Ordering;

use crate::constants;
use crate::curve_models::{ProjectiveNielsPoint, ProjectivePoint};
use crate::edwards::EdwardsPoint;
use crate::scalar::Scalar;
use crate::traits::Identity;
use crate::window::NafLookupTable5;

/// Compute `a*A + b*B` in variable time, where `B` is the Ed25519
/// basepoint.
///
/// The result is returned in the P2 model, ready for a caller to
/// normalize or encode.  Since this routine branches on the digits of
/// both scalars, it must only be used where `a`, `A` and `b` are all
/// public — in practice, signature verification.
pub(crate) fn mul(a: &Scalar, A: &EdwardsPoint, b: &Scalar) -> ProjectivePoint {
    let a_naf = a.non_adjacent_form();
    let b_naf = b.non_adjacent_form();

    // Find the starting index: the most significant position at which
    // either recoding is nonzero.
    let mut i: usize = 255;
    for j in (0..256).rev() {
        i = j;
        if a_naf[i] != 0 || b_naf[i] != 0 {
            break;
        }
    }

    let table_A = NafLookupTable5::<ProjectiveNielsPoint>::from(A);
    let table_B = &constants::AFFINE_ODD_MULTIPLES_OF_BASEPOINT;

    let mut r = ProjectivePoint::identity();
    loop {
        let mut t = r.double();

        match a_naf[i].cmp(&0) {
            Ordering::Greater => t = &t.as_extended() + &table_A.select(a_naf[i] as usize),
            Ordering::Less => t = &t.as_extended() - &table_A.select(-a_naf[i] as usize),
            Ordering::Equal => {}
        }

        match b_naf[i].cmp(&0) {
            Ordering::Greater => t = &t.as_extended() + &table_B.select(b_naf[i] as usize),
            Ordering::Less => t = &t.as_extended() - &table_B.select(-b_naf[i] as usize),
            Ordering::Equal => {}
        }

        r = t.as_projective();

        if i == 0 {
            break;
        }
        i -= 1;
    }

    r
}
