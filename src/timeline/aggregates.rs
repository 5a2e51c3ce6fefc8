use chrono::{Datelike, NaiveDate};

use crate::locale;
use crate::models::{ProcedureRecord, ProcedureType};
use super::types::*;

/// Procedure types ranked per month unless a caller asks otherwise.
pub const TOP_TYPES_PER_MONTH: usize = 3;

/// Monthly summaries for `now`'s year, most recent month first.
pub fn summarize<'a, I>(records: I, now: NaiveDate) -> Vec<MonthlySummary>
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    key_indicators(records, now).breakdown
}

/// Monthly totals for `now`'s year, January first.
pub fn chart_series<'a, I>(records: I, now: NaiveDate) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    key_indicators(records, now).chart
}

pub fn key_indicators<'a, I>(records: I, now: NaiveDate) -> KeyIndicators
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    key_indicators_with_limit(records, now, TOP_TYPES_PER_MONTH)
}

/// Buckets `records` by month of `now`'s year, then walks the elapsed
/// months once, emitting the chart point and the summary side by side.
/// Months after `now` are never emitted.
pub fn key_indicators_with_limit<'a, I>(records: I, now: NaiveDate, top_n: usize) -> KeyIndicators
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    let year = now.year();
    let buckets = bucket_by_month(records, year);
    let current_month = now.month0() as usize;

    let mut chart = Vec::with_capacity(current_month + 1);
    let mut breakdown = Vec::with_capacity(current_month + 1);

    for (month, types) in buckets.iter().enumerate().take(current_month + 1) {
        let month_index = month as u32;
        let total = types.len() as u32;

        chart.push(ChartPoint {
            month_index,
            month_abbr: locale::month_abbr(month_index),
            total,
        });

        breakdown.push(MonthlySummary {
            month_index,
            month_label: locale::month_name(month_index).to_string(),
            total_count: total,
            top_types: rank_types(types, top_n),
        });
    }

    breakdown.reverse();

    KeyIndicators {
        year,
        chart,
        breakdown,
    }
}

/// Procedure types per month, in input order. Other years are dropped.
fn bucket_by_month<'a, I>(records: I, year: i32) -> [Vec<ProcedureType>; 12]
where
    I: IntoIterator<Item = &'a ProcedureRecord>,
{
    let mut buckets: [Vec<ProcedureType>; 12] = Default::default();
    for record in records {
        if record.performed_at.year() == year {
            buckets[record.performed_at.month0() as usize].push(record.procedure_type);
        }
    }
    buckets
}

/// Frequency table in first-seen order, then a stable sort by count so
/// ties keep that order.
fn rank_types(types: &[ProcedureType], top_n: usize) -> Vec<TypeCount> {
    let mut counts: Vec<TypeCount> = Vec::new();
    for &procedure_type in types {
        match counts.iter_mut().find(|c| c.procedure_type == procedure_type) {
            Some(entry) => entry.count += 1,
            None => counts.push(TypeCount {
                procedure_type,
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}
