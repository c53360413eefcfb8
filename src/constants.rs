// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Various constants: the curve parameters `d` and `2d`, a square root
//! of `-1` in GF(2²⁵⁵-19), the Ed25519 basepoint, and the precomputed
//! tables of basepoint multiples consumed by the scalar multiplication
//! routines.
//!
//! Field-element constants are spelled as radix-2⁵¹ limb literals.
//! The large fixed-base table is derived data: it is built once, on
//! first use, from [`ED25519_BASEPOINT_POINT`] using the crate's own
//! (tested) arithmetic, which makes its entries bit-exact multiples of
//! the standard generator by construction.
#![allow(non_snake_case)]

#[cfg(feature = "precomputed-tables")]
use once_cell::sync::Lazy;

use crate::curve_models::AffineNielsPoint;
use crate::edwards::{CompressedEdwardsY, EdwardsPoint};
use crate::field::FieldElement;
use crate::scalar::Scalar;
use crate::window::NafLookupTable5;

#[cfg(feature = "precomputed-tables")]
use crate::edwards::EdwardsBasepointTable;

/// Edwards `d` value, equal to `-121665/121666 mod p`.
pub(crate) const EDWARDS_D: FieldElement = FieldElement([
    929955233495203,
    466365720129213,
    1662059464998953,
    2033849074728123,
    1442794654840575,
]);

/// Edwards `2*d` value, equal to `2*(-121665/121666) mod p`.
pub(crate) const EDWARDS_D2: FieldElement = FieldElement([
    1859910466990425,
    932731440258426,
    1072319116312658,
    1815898335770999,
    633789495995903,
]);

/// Precomputed value of one of the square roots of -1 (mod p).
pub(crate) const SQRT_M1: FieldElement = FieldElement([
    1718705420411056,
    234908883556509,
    2233514472574048,
    2117202627021982,
    765476049583133,
]);

/// The Ed25519 basepoint, as a `CompressedEdwardsY`.
pub const ED25519_BASEPOINT_COMPRESSED: CompressedEdwardsY = CompressedEdwardsY([
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
]);

/// The Ed25519 basepoint, as an `EdwardsPoint`.
///
/// The basepoint has `y = 4/5`; this is called `_POINT` to distinguish
/// it from `ED25519_BASEPOINT_TABLE`, which should be preferred for
/// scalar multiplication (it is much faster).
pub const ED25519_BASEPOINT_POINT: EdwardsPoint = EdwardsPoint {
    X: FieldElement([
        1738742601995546,
        1146398526822698,
        2070867633025821,
        562264141797630,
        587772402128613,
    ]),
    Y: FieldElement([
        1801439850948184,
        1351079888211148,
        450359962737049,
        900719925474099,
        1801439850948198,
    ]),
    Z: FieldElement([1, 0, 0, 0, 0]),
    T: FieldElement([
        1841354044333475,
        16398895984059,
        755974180946558,
        900171276175154,
        1821297809914039,
    ]),
};

/// `l` is the order of basepoint, i.e.
/// `2^252 + 27742317777372353535851937790883648493`, as an unreduced
/// `Scalar` (it is congruent to zero mod itself).
pub const BASEPOINT_ORDER: Scalar = Scalar([
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde,
    0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x10,
]);

/// Odd multiples of the basepoint `[B, 3B, 5B, 7B, 9B, 11B, 13B, 15B]`,
/// in affine Niels form, used by the variable-time double-base
/// multiplication.
pub(crate) const AFFINE_ODD_MULTIPLES_OF_BASEPOINT: NafLookupTable5<AffineNielsPoint> =
    NafLookupTable5([
        AffineNielsPoint {
            y_plus_x: FieldElement([
                1288382639258501,
                245678601348599,
                269427782077623,
                1462984067271730,
                137412439391563,
            ]),
            y_minus_x: FieldElement([
                62697248952638,
                204681361388450,
                631292143396476,
                338455783676468,
                1213667448819585,
            ]),
            xy2d: FieldElement([
                301289933810280,
                1259582250014073,
                1422107436869536,
                796239922652654,
                1953934009299142,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                1601611775252272,
                1720807796594148,
                1132070835939856,
                1260455018889551,
                2147779492816911,
            ]),
            y_minus_x: FieldElement([
                316559037616741,
                2177824224946892,
                1459442586438991,
                1461528397712656,
                751590696113597,
            ]),
            xy2d: FieldElement([
                1850748884277385,
                1200145853858453,
                1068094770532492,
                672251375690438,
                1586055907191707,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                769950342298419,
                132954430919746,
                844085933195555,
                974092374476333,
                726076285546016,
            ]),
            y_minus_x: FieldElement([
                425251763115706,
                608463272472562,
                442562545713235,
                837766094556764,
                374555092627893,
            ]),
            xy2d: FieldElement([
                1086255230780037,
                274979815921559,
                1960002765731872,
                929474102396301,
                1190409889297339,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                665000864555967,
                2065379846933859,
                370231110385876,
                350988370788628,
                1233371373142985,
            ]),
            y_minus_x: FieldElement([
                2019367628972465,
                676711900706637,
                110710997811333,
                1108646842542025,
                517791959672113,
            ]),
            xy2d: FieldElement([
                965130719900578,
                247011430587952,
                526356006571389,
                91986625355052,
                2157223321444601,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                1802695059465007,
                1664899123557221,
                593559490740857,
                2160434469266659,
                927570450755031,
            ]),
            y_minus_x: FieldElement([
                1725674970513508,
                1933645953859181,
                1542344539275782,
                1767788773573747,
                1297447965928905,
            ]),
            xy2d: FieldElement([
                1381809363726107,
                1430341051343062,
                2061843536018959,
                1551778050872521,
                2036394857967624,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                1970894096313054,
                528066325833207,
                1619374932191227,
                2207306624415883,
                1169170329061080,
            ]),
            y_minus_x: FieldElement([
                2070390218572616,
                1458919061857835,
                624171843017421,
                1055332792707765,
                433987520732508,
            ]),
            xy2d: FieldElement([
                893653801273833,
                1168026499324677,
                1242553501121234,
                1306366254304474,
                1086752658510815,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                213454002618221,
                939771523987438,
                1159882208056014,
                317388369627517,
                621213314200687,
            ]),
            y_minus_x: FieldElement([
                1971678598905747,
                338026507889165,
                762398079972271,
                655096486107477,
                42299032696322,
            ]),
            xy2d: FieldElement([
                177130678690680,
                1754759263300204,
                1864311296286618,
                1180675631479880,
                1292726903152791,
            ]),
        },
        AffineNielsPoint {
            y_plus_x: FieldElement([
                1913163449625248,
                460779200291993,
                2193883288642314,
                1008900146920800,
                1721983679009502,
            ]),
            y_minus_x: FieldElement([
                1070401523076875,
                1272492007800961,
                1910153608563310,
                2075579521696771,
                1191169788841221,
            ]),
            xy2d: FieldElement([
                692896803108118,
                500174642072499,
                2068223309439677,
                1162190621851337,
                1426986007309901,
            ]),
        },
    ]);

/// The precomputed table of multiples of the basepoint, for accelerated
/// fixed-base scalar multiplication.
///
/// Constructed on first use from [`ED25519_BASEPOINT_POINT`] and
/// immutable afterwards; construction is race-free and happens at most
/// once per process.
#[cfg(feature = "precomputed-tables")]
pub static ED25519_BASEPOINT_TABLE: Lazy<EdwardsBasepointTable> =
    Lazy::new(|| EdwardsBasepointTable::create(&ED25519_BASEPOINT_POINT));

#[cfg(test)]
mod test {
    use super::*;
    use crate::traits::ValidityCheck;

    #[test]
    fn basepoint_is_valid() {
        assert!(ED25519_BASEPOINT_POINT.is_valid());
    }

    #[test]
    fn basepoint_vs_compressed_constant() {
        assert_eq!(
            ED25519_BASEPOINT_POINT.compress(),
            ED25519_BASEPOINT_COMPRESSED
        );
    }

    /// Test that `d = -121665/121666 mod p`.
    #[test]
    fn edwards_d_vs_ratio() {
        let mut a_bytes = [0u8; 32];
        let mut b_bytes = [0u8; 32];
        // 121665 = 0x01db41, 121666 = 0x01db42
        a_bytes[0] = 0x41;
        a_bytes[1] = 0xdb;
        a_bytes[2] = 0x01;
        b_bytes[0] = 0x42;
        b_bytes[1] = 0xdb;
        b_bytes[2] = 0x01;
        let a = FieldElement::from_bytes(&a_bytes);
        let b = FieldElement::from_bytes(&b_bytes);
        let d = &(-&a) * &b.invert();
        assert_eq!(d, EDWARDS_D);
        assert_eq!(&d + &d, EDWARDS_D2);
    }

    /// Test that `SQRT_M1` squares to `-1`.
    #[test]
    fn sqrt_minus_one() {
        let minus_one = -&FieldElement::ONE;
        assert_eq!(SQRT_M1.square(), minus_one);
    }

    /// The basepoint times the group order is the identity.
    #[test]
    fn basepoint_order_vs_basepoint() {
        use crate::traits::IsIdentity;
        let should_be_id = EdwardsPoint::mul_base(&Scalar::from_bits(BASEPOINT_ORDER.to_bytes()));
        assert!(should_be_id.is_identity());
    }
}
