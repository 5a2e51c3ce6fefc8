use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the procedure an image documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryLabel {
    /// The reference photo taken when the procedure was performed.
    Original,
    /// A later photo documenting the result.
    Evolution,
}

impl EntryLabel {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Original => "Original",
            Self::Evolution => "Evolução",
        }
    }
}

/// One dated image on the comparison timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub uri: String,
    pub taken_at: NaiveDate,
    pub label: EntryLabel,
}

impl TimelineEntry {
    pub fn original(uri: impl Into<String>, taken_at: NaiveDate) -> Self {
        Self {
            uri: uri.into(),
            taken_at,
            label: EntryLabel::Original,
        }
    }

    pub fn evolution(uri: impl Into<String>, taken_at: NaiveDate) -> Self {
        Self {
            uri: uri.into(),
            taken_at,
            label: EntryLabel::Evolution,
        }
    }
}

/// Transient slider state. Reset whenever the timeline is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    pub left_index: usize,
    pub right_index: usize,
    /// Horizontal clip boundary, always within 0..=100.
    pub reveal_percent: f64,
}

/// Everything the slider view needs to render one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub left: TimelineEntry,
    pub right: TimelineEntry,
    pub reveal_percent: f64,
    /// CSS clip-path applied to the right-hand image.
    pub clip_path: String,
    /// CSS `left` of the divider handle.
    pub handle_offset: String,
    /// "Foto 2 de 3"
    pub position_caption: String,
    /// "Tirada em: 20/01/2026"
    pub date_caption: String,
}
