use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ReportStatus;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub date: NaiveDate,
    pub report_type: String,
    pub doctor: String,
    pub status: ReportStatus,
}

/// Coarse classification used to pick a report icon and filter the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportKind {
    Biopsy,
    Blood,
    Other,
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        let lower = self.report_type.to_lowercase();
        if lower.contains("biópsia") || lower.contains("biopsia") {
            ReportKind::Biopsy
        } else if lower.contains("sangue") {
            ReportKind::Blood
        } else {
            ReportKind::Other
        }
    }

    /// Case-insensitive keyword match on the report type and doctor.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.trim().to_lowercase();
        needle.is_empty()
            || self.report_type.to_lowercase().contains(&needle)
            || self.doctor.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(report_type: &str) -> Report {
        Report {
            id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            report_type: report_type.into(),
            doctor: "Dra. Flavia Novis".into(),
            status: ReportStatus::Available,
        }
    }

    #[test]
    fn kind_from_type_text() {
        assert_eq!(report("Biópsia de Pele").kind(), ReportKind::Biopsy);
        assert_eq!(report("Exame de Sangue").kind(), ReportKind::Blood);
        assert_eq!(report("Dermatoscopia").kind(), ReportKind::Other);
    }

    #[test]
    fn keyword_match() {
        let r = report("Biópsia de Pele");
        assert!(r.matches("pele"));
        assert!(r.matches("flavia"));
        assert!(r.matches("  "));
        assert!(!r.matches("sangue"));
    }
}
