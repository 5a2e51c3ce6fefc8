use serde::{Deserialize, Serialize};

use crate::models::ProcedureType;

/// How many times one procedure type was performed in a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    pub procedure_type: ProcedureType,
    pub count: u32,
}

/// Count and top procedure types for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Zero-based month index (0 = January).
    pub month_index: u32,
    pub month_label: String,
    pub total_count: u32,
    /// Descending by count; ties keep first-encountered order.
    pub top_types: Vec<TypeCount>,
}

/// One bar of the monthly totals chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub month_index: u32,
    pub month_abbr: String,
    pub total: u32,
}

/// Both views of the year, built from the same bucketed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyIndicators {
    pub year: i32,
    /// Chronological: January first.
    pub chart: Vec<ChartPoint>,
    /// Reverse chronological: current month first.
    pub breakdown: Vec<MonthlySummary>,
}

impl KeyIndicators {
    pub fn year_total(&self) -> u32 {
        self.chart.iter().map(|p| p.total).sum()
    }
}
