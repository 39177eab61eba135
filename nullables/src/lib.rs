//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator a flow needs is available here in a form that:
//! - derives keys deterministically from party names
//! - never touches the filesystem or the network
//! - can be configured programmatically
//!
//! Usage: run a flow against a [`NullHub`] to exercise it without peers, or
//! install a [`SkintPolicy`] on a node to make it refuse large amounts.

pub mod hub;
pub mod identity;
pub mod notary;
pub mod policy;

pub use hub::NullHub;
pub use identity::TestIdentity;
pub use notary::NullNotary;
pub use policy::SkintPolicy;
