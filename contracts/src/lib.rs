//! The token rules every AirMile transaction must satisfy.
//!
//! Inputs and outputs are partitioned by [`AssetIdentity`](airmile_types::AssetIdentity)
//! into [`TokenGroup`]s. Each group must be governed by exactly one token
//! command whose indices cover it exactly, and each command kind carries its
//! own rules:
//!
//! - **Issue**: no inputs, every output positive, issuer signs.
//! - **Move**: inputs and outputs present, every output positive, input and
//!   output sums equal (overflow-checked), every input holder signs.
//! - **Redeem**: inputs present, no outputs, issuer and every holder sign.
//!
//! Verification is pure: the same transaction always yields the same result.

pub mod error;
pub mod group;
pub mod verifier;

pub use error::RuleViolation;
pub use group::{group_states, TokenGroup};
pub use verifier::{verify, verify_groups};
