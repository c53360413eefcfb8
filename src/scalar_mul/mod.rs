// -*- mode: rust; -*-
//
// This file is part of edwards25519.
// See LICENSE for licensing information.

//! Implementations of the scalar multiplication strategies: a
//! constant-time variable-base ladder for secret scalars, and a
//! variable-time double-base routine for signature verification.

pub mod variable_base;

pub mod vartime_double_base;
