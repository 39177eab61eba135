//! Pre-built [`tracing::Span`] constructors for node operations.
//!
//! Consistent span names and field sets make it easy to follow a single
//! flow across the initiator and every responder it talks to.

use tracing::{info_span, Span};

/// Span covering one flow run by `node`.
pub fn flow_span(flow: &str, node: &str) -> Span {
    info_span!("flow", flow = %flow, node = %node)
}

/// Span covering `node` responding to a session opened by `initiator`.
pub fn responder_span(node: &str, initiator: &str) -> Span {
    info_span!("respond", node = %node, initiator = %initiator)
}

/// Span covering a notarisation request.
pub fn notarise_span(notary: &str, tx_id: &str) -> Span {
    info_span!("notarise", notary = %notary, tx_id = %tx_id)
}
