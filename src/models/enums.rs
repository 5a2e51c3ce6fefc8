use crate::store::StoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + display_name + std::str::FromStr pattern.
/// Parsing accepts either the slug or the display name.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal, $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }

            pub fn display_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.display_name())
            }
        }

        impl std::str::FromStr for $name {
            type Err = StoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s | $label => Ok(Self::$variant)),+,
                    _ => Err(StoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(ProcedureType {
    Botox => "botox", "Botox",
    Preenchimento => "preenchimento", "Preenchimento",
    Rotina => "rotina", "Rotina",
    LiftingFacial => "lifting", "Lifting Facial",
});

str_enum!(AppointmentStatus {
    Confirmed => "confirmed", "Confirmado",
    Completed => "completed", "Realizado",
    Cancelled => "cancelled", "Cancelado",
});

str_enum!(ReportStatus {
    Available => "available", "Disponível",
    InReview => "in_review", "Em Análise",
});

impl ProcedureType {
    /// Routine check-ups never carry before/after photos.
    pub fn takes_photos(&self) -> bool {
        !matches!(self, Self::Rotina)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn procedure_type_round_trip() {
        for (variant, s, label) in [
            (ProcedureType::Botox, "botox", "Botox"),
            (ProcedureType::Preenchimento, "preenchimento", "Preenchimento"),
            (ProcedureType::Rotina, "rotina", "Rotina"),
            (ProcedureType::LiftingFacial, "lifting", "Lifting Facial"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(variant.display_name(), label);
            assert_eq!(ProcedureType::from_str(s).unwrap(), variant);
            assert_eq!(ProcedureType::from_str(label).unwrap(), variant);
        }
    }

    #[test]
    fn appointment_status_labels() {
        assert_eq!(AppointmentStatus::Confirmed.to_string(), "Confirmado");
        assert_eq!(AppointmentStatus::Completed.to_string(), "Realizado");
        assert_eq!(
            AppointmentStatus::from_str("Cancelado").unwrap(),
            AppointmentStatus::Cancelled
        );
    }

    #[test]
    fn report_status_labels() {
        assert_eq!(ReportStatus::InReview.display_name(), "Em Análise");
        assert_eq!(ReportStatus::from_str("available").unwrap(), ReportStatus::Available);
    }

    #[test]
    fn all_lists_every_variant() {
        assert_eq!(ProcedureType::ALL.len(), 4);
        assert_eq!(AppointmentStatus::ALL.len(), 3);
        assert_eq!(ReportStatus::ALL.len(), 2);
    }

    #[test]
    fn only_routine_skips_photos() {
        assert!(!ProcedureType::Rotina.takes_photos());
        assert!(ProcedureType::Botox.takes_photos());
        assert!(ProcedureType::LiftingFacial.takes_photos());
    }

    #[test]
    fn invalid_enum_returns_error() {
        let err = ProcedureType::from_str("laser").unwrap_err();
        assert!(matches!(err, StoreError::InvalidEnum { ref field, .. } if field == "ProcedureType"));
        assert!(AppointmentStatus::from_str("").is_err());
        assert!(ReportStatus::from_str("BOTOX").is_err());
    }
}
