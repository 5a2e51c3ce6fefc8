//! pt-BR presentation helpers: month names and date formats.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

const WEEKDAY_ABBRS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

/// Full capitalised month name for a zero-based month index.
/// Out-of-range indices wrap.
pub fn month_name(month_index: u32) -> &'static str {
    MONTH_NAMES[(month_index % 12) as usize]
}

/// Three-letter capitalised month abbreviation ("Jan", "Fev", "Mar", ...).
pub fn month_abbr(month_index: u32) -> String {
    month_name(month_index).chars().take(3).collect()
}

/// dd/MM/yyyy
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// dd/MM/yyyy às HH:MM
pub fn format_date_time(at: NaiveDateTime) -> String {
    format!("{} às {}", format_date(at.date()), at.format("%H:%M"))
}

/// "Seg, 05"
pub fn weekday_label(date: NaiveDate) -> String {
    let idx = date.weekday().num_days_from_sunday() as usize;
    format!("{}, {:02}", WEEKDAY_ABBRS[idx], date.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_and_abbreviations() {
        assert_eq!(month_name(0), "Janeiro");
        assert_eq!(month_name(2), "Março");
        assert_eq!(month_abbr(2), "Mar");
        assert_eq!(month_abbr(8), "Set");
        assert_eq!(month_abbr(11), "Dez");
    }

    #[test]
    fn month_index_wraps() {
        assert_eq!(month_name(12), "Janeiro");
    }

    #[test]
    fn brazilian_date_format() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(d), "05/01/2026");
        assert_eq!(
            format_date_time(d.and_hms_opt(9, 30, 0).unwrap()),
            "05/01/2026 às 09:30"
        );
    }

    #[test]
    fn weekday_labels() {
        // 2026-10-16 is a Friday
        let d = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(weekday_label(d), "Sex, 16");
    }
}
