//! Before/after photo comparison.
//!
//! Merges a procedure's reference photo ("Original") with its follow-up
//! photos ("Evolução") into one date-sorted timeline and keeps the slider
//! state: the two selected positions and the reveal boundary. The reveal
//! percent only feeds the view's clip path.

mod selector;
mod types;

pub use selector::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
