//! Splitting of a validator key into operator bound shares.
//!
//! A validator secret key is split with Shamir secret sharing over the BLS12-381 scalar field, so
//! that any `threshold_for(n)` shares can reproduce the signing capability of the key while fewer
//! learn nothing about it. Every share private key is then encrypted to exactly one operator's RSA
//! key. The pairing of share `i` with operator `i` is the critical invariant of the whole
//! registration pipeline, [`split_for_operators`] produces both halves of the pairing in one step
//! so the ordering can not drift between two separate calls.

pub use encrypt::{decrypt_share, encrypt, encrypt_bound, encrypt_share};
pub use error::{EncryptError, SplitError};
pub use split::{
    reconstruct, split, split_for_operators, split_with_rng, threshold_for, validator_public_key,
    BoundShare,
};

mod bls;
mod encrypt;
mod error;
mod split;
