//! The AirMile assembly protocols.
//!
//! Each protocol run is a [`Flow`] executed by one initiating node against a
//! [`ServiceHub`]. Counterparties take part through [`FlowSession`]s and run
//! [`respond`] on their side. The only suspension points are session sends
//! and receives, notarisation, and awaiting acknowledgements; building and
//! verification happen synchronously in between.
//!
//! - [`IssueFlow`]: the issuer mints holdings for one or more holders.
//! - [`MoveFlow`]: current holders re-assign holdings to new holders.
//! - [`RedeemFlow`]: holdings are destroyed with the issuer's consent.
//!
//! All three end in [`finality::finalise`], a two-phase commit: every
//! participant checks the fully signed transaction and acknowledges, the
//! notary signs if inputs are consumed, then every participant records it.

pub mod error;
pub mod finality;
pub mod issue;
pub mod move_tokens;
pub mod progress;
pub mod redeem;
pub mod resolve;
pub mod responder;
pub mod services;
pub mod session;
pub mod signatures;

pub use error::{FlowError, NotaryError};
pub use issue::{IssueFlow, IssueState};
pub use move_tokens::{MoveFlow, MoveState};
pub use progress::ProgressTracker;
pub use redeem::{RedeemFlow, RedeemState};
pub use responder::respond;
pub use services::{AcceptAll, Flow, NotaryService, ServiceHub, SigningPolicy};
pub use session::{FlowSession, SessionMessage, TransactionRole};
