//! Drive the group arithmetic through the Ed25519 flows it exists to
//! serve, against the RFC 8032 test vectors.
//!
//! This crate deliberately contains no hashing and no protocol layer,
//! so the EdDSA key derivation, signing, and verification equations are
//! spelled out here with SHA-512 from the `sha2` crate.

use edwards25519::edwards::{CompressedEdwardsY, EdwardsPoint};
use edwards25519::scalar::{clamp_integer, Scalar};

use sha2::{Digest, Sha512};

/// RFC 8032 section 7.1 test vectors: (secret key, public key, message,
/// signature), all hex-encoded.
static RFC8032_TEST_VECTORS: &[(&str, &str, &str, &str)] = &[
    (
        "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        "",
        "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    ),
    (
        "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
        "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        "72",
        "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    ),
    (
        "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
        "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        "af82",
        "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
    ),
];

fn decode32(hex_str: &str) -> [u8; 32] {
    let bytes = hex::decode(hex_str).unwrap();
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    out
}

fn decode64(hex_str: &str) -> [u8; 64] {
    let bytes = hex::decode(hex_str).unwrap();
    let mut out = [0u8; 64];
    out.copy_from_slice(&bytes);
    out
}

/// Expand a seed into the clamped secret scalar and the prefix used for
/// nonce generation (RFC 8032 section 5.1.5).
fn expand_seed(seed: &[u8; 32]) -> (Scalar, [u8; 32]) {
    let mut h = [0u8; 64];
    h.copy_from_slice(&Sha512::digest(seed));
    let mut scalar_bytes = [0u8; 32];
    scalar_bytes.copy_from_slice(&h[..32]);
    let mut prefix = [0u8; 32];
    prefix.copy_from_slice(&h[32..]);
    (Scalar::from_bits(clamp_integer(scalar_bytes)), prefix)
}

/// RFC 8032 section 5.1.6: R = rB, s = r + H(R, A, m)*a (mod l).
fn sign(seed: &[u8; 32], message: &[u8]) -> [u8; 64] {
    let (a, prefix) = expand_seed(seed);
    let A = EdwardsPoint::mul_base(&a).compress();

    let mut r_wide = [0u8; 64];
    r_wide.copy_from_slice(
        &Sha512::new()
            .chain_update(prefix)
            .chain_update(message)
            .finalize(),
    );
    let r = Scalar::from_bytes_mod_order_wide(&r_wide);
    let R = EdwardsPoint::mul_base(&r).compress();

    let mut k_wide = [0u8; 64];
    k_wide.copy_from_slice(
        &Sha512::new()
            .chain_update(R.as_bytes())
            .chain_update(A.as_bytes())
            .chain_update(message)
            .finalize(),
    );
    let k = Scalar::from_bytes_mod_order_wide(&k_wide);

    // The secret scalar a is clamped, not reduced; multiply_add is
    // exact regardless.
    let s = Scalar::multiply_add(&k, &a, &r);

    let mut signature = [0u8; 64];
    signature[..32].copy_from_slice(R.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    signature
}

/// RFC 8032 section 5.1.7, in the form used by the reference
/// implementation: recompute R' = sB - H(R, A, m)·A and compare with
/// the R from the signature.  The subtraction comes for free from the
/// negate-flavoured decompression of A.
fn verify(public_key: &[u8; 32], message: &[u8], signature: &[u8; 64]) -> bool {
    let minus_A = match CompressedEdwardsY(*public_key).decompress_negate_vartime() {
        Ok(point) => point,
        Err(_) => return false,
    };

    let mut s_bytes = [0u8; 32];
    s_bytes.copy_from_slice(&signature[32..]);
    if s_bytes[31] & 0b1110_0000 != 0 {
        // s must be below 2^253; full canonicity checking is the
        // protocol layer's concern.
        return false;
    }
    let s = Scalar::from_bits(s_bytes);

    let mut k_wide = [0u8; 64];
    k_wide.copy_from_slice(
        &Sha512::new()
            .chain_update(&signature[..32])
            .chain_update(public_key)
            .chain_update(message)
            .finalize(),
    );
    let k = Scalar::from_bytes_mod_order_wide(&k_wide);

    let R_check = EdwardsPoint::vartime_double_scalar_mul_basepoint(&k, &minus_A, &s);

    R_check.compress().as_bytes() == &signature[..32]
}

#[test]
fn rfc8032_public_key_derivation() {
    for (seed_hex, public_hex, _, _) in RFC8032_TEST_VECTORS {
        let seed = decode32(seed_hex);
        let (a, _) = expand_seed(&seed);
        let A = EdwardsPoint::mul_base(&a).compress();
        assert_eq!(A.to_bytes(), decode32(public_hex));
    }
}

#[test]
fn rfc8032_signatures() {
    for (seed_hex, _, message_hex, signature_hex) in RFC8032_TEST_VECTORS {
        let seed = decode32(seed_hex);
        let message = hex::decode(message_hex).unwrap();
        let signature = sign(&seed, &message);
        assert_eq!(signature[..], decode64(signature_hex)[..]);
    }
}

#[test]
fn rfc8032_verification() {
    for (_, public_hex, message_hex, signature_hex) in RFC8032_TEST_VECTORS {
        let public_key = decode32(public_hex);
        let message = hex::decode(message_hex).unwrap();
        let signature = decode64(signature_hex);
        assert!(verify(&public_key, &message, &signature));
    }
}

#[test]
fn corrupted_signatures_do_not_verify() {
    let (_, public_hex, message_hex, signature_hex) = RFC8032_TEST_VECTORS[0];
    let public_key = decode32(public_hex);
    let message = hex::decode(message_hex).unwrap();
    let good = decode64(signature_hex);

    // Flip one bit of R, then one bit of s.
    for byte in [0usize, 32] {
        let mut bad = good;
        bad[byte] ^= 1;
        assert!(!verify(&public_key, &message, &bad));
    }

    // Sign under the wrong message.
    assert!(!verify(&public_key, b"?", &good));
}
