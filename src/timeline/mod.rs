//! Procedure indicators: per-month counts of a patient's procedures.
//!
//! Groups performed procedures by calendar month of the current year,
//! counts them and ranks the most frequent procedure types per month.
//! Produces the chart series (oldest month first) and the monthly
//! breakdown (newest month first) from a single bucketing pass.

mod aggregates;
mod types;

pub use aggregates::*;
pub use types::*;

// ── Tests ──────────────────────────────────────────────────────────────────
