use crate::locale;
use crate::models::ProcedureRecord;
use super::types::*;

/// Reveal percent a fresh comparison starts at.
pub const DEFAULT_REVEAL_PERCENT: f64 = 50.0;

/// Merges the before image with the after images into one timeline,
/// sorted ascending by date. The sort is stable, so a before image dated
/// the same day as an after image stays first.
pub fn merge_timeline(before: Option<TimelineEntry>, afters: Vec<TimelineEntry>) -> Vec<TimelineEntry> {
    let mut entries: Vec<TimelineEntry> = Vec::with_capacity(afters.len() + 1);

    if let Some(entry) = before {
        entries.push(TimelineEntry {
            label: EntryLabel::Original,
            ..entry
        });
    }
    entries.extend(afters.into_iter().map(|entry| TimelineEntry {
        label: EntryLabel::Evolution,
        ..entry
    }));

    entries.sort_by_key(|e| e.taken_at);
    entries
}

/// Timeline for one procedure: the before image is dated at the
/// procedure itself.
pub fn timeline_for(record: &ProcedureRecord) -> Vec<TimelineEntry> {
    let before = record
        .before_image
        .as_ref()
        .map(|uri| TimelineEntry::original(uri.clone(), record.performed_at));
    let afters = record
        .after_images
        .iter()
        .map(|img| TimelineEntry::evolution(img.uri.clone(), img.taken_at))
        .collect();
    merge_timeline(before, afters)
}

/// Holds the comparison timeline and the two selected positions.
///
/// Indices are clamped into the timeline on every write, so `left()` and
/// `right()` are always `Some` unless the timeline is empty.
#[derive(Debug, Clone)]
pub struct ComparisonSelector {
    entries: Vec<TimelineEntry>,
    selection: SelectionState,
    default_reveal: f64,
}

impl Default for ComparisonSelector {
    fn default() -> Self {
        Self::with_default_reveal(DEFAULT_REVEAL_PERCENT)
    }
}

impl ComparisonSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_reveal(percent: f64) -> Self {
        let default_reveal = clamp_percent(percent).unwrap_or(DEFAULT_REVEAL_PERCENT);
        Self {
            entries: Vec::new(),
            selection: SelectionState {
                left_index: 0,
                right_index: 0,
                reveal_percent: default_reveal,
            },
            default_reveal,
        }
    }

    pub fn for_procedure(record: &ProcedureRecord) -> Self {
        let mut selector = Self::new();
        selector.load_procedure(record);
        selector
    }

    /// Replaces the timeline and resets the selection: left on the
    /// oldest image, right on the newest, reveal back to its default.
    pub fn set_before_after(&mut self, before: Option<TimelineEntry>, afters: Vec<TimelineEntry>) {
        self.entries = merge_timeline(before, afters);
        self.reset();
        tracing::debug!(entries = self.entries.len(), "Comparison timeline loaded");
    }

    pub fn load_procedure(&mut self, record: &ProcedureRecord) {
        self.entries = timeline_for(record);
        self.reset();
        tracing::debug!(
            procedure_id = %record.id,
            entries = self.entries.len(),
            "Comparison timeline loaded for procedure"
        );
    }

    /// Out-of-range indices clamp to the nearest bound.
    pub fn select_left(&mut self, index: i64) -> usize {
        self.selection.left_index = self.clamp_index(index);
        self.selection.left_index
    }

    pub fn select_right(&mut self, index: i64) -> usize {
        self.selection.right_index = self.clamp_index(index);
        self.selection.right_index
    }

    /// Carousel navigation for the right-hand image; wraps at both ends.
    pub fn step_right(&mut self, forward: bool) -> usize {
        let len = self.entries.len();
        if len == 0 {
            return 0;
        }
        let current = self.selection.right_index;
        self.selection.right_index = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.selection.right_index
    }

    /// Clamps to 0..=100. NaN is ignored.
    pub fn set_reveal(&mut self, percent: f64) -> f64 {
        if let Some(value) = clamp_percent(percent) {
            self.selection.reveal_percent = value;
        }
        self.selection.reveal_percent
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A slider needs two images to compare.
    pub fn is_comparable(&self) -> bool {
        self.entries.len() >= 2
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn left(&self) -> Option<&TimelineEntry> {
        self.entries.get(self.selection.left_index)
    }

    pub fn right(&self) -> Option<&TimelineEntry> {
        self.entries.get(self.selection.right_index)
    }

    /// Polygon that shows the right image from the left edge up to the
    /// reveal boundary.
    pub fn clip_path(&self) -> String {
        let p = format_percent(self.selection.reveal_percent);
        format!("polygon(0 0, {p}% 0, {p}% 100%, 0 100%)")
    }

    /// `None` for an empty timeline; the view shows its empty state.
    pub fn view(&self) -> Option<ComparisonView> {
        let left = self.left()?.clone();
        let right = self.right()?.clone();
        let p = format_percent(self.selection.reveal_percent);

        Some(ComparisonView {
            position_caption: format!(
                "Foto {} de {}",
                self.selection.right_index + 1,
                self.entries.len()
            ),
            date_caption: format!("Tirada em: {}", locale::format_date(right.taken_at)),
            left,
            right,
            reveal_percent: self.selection.reveal_percent,
            clip_path: self.clip_path(),
            handle_offset: format!("calc({p}% - 2px)"),
        })
    }

    /// Left on the oldest image, right on the newest, reveal at its default.
    fn reset(&mut self) {
        self.selection = SelectionState {
            left_index: 0,
            right_index: self.entries.len().saturating_sub(1),
            reveal_percent: self.default_reveal,
        };
    }

    fn clamp_index(&self, index: i64) -> usize {
        let max = self.entries.len().saturating_sub(1) as i64;
        index.clamp(0, max) as usize
    }
}

fn clamp_percent(percent: f64) -> Option<f64> {
    if percent.is_nan() {
        None
    } else {
        Some(percent.clamp(0.0, 100.0))
    }
}

/// Whole numbers print without a fraction ("50", not "50.0").
fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}
