use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ProcedureType;

/// One performed procedure, with optional before/after photo references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    pub id: Uuid,
    pub performed_at: NaiveDate,
    pub procedure_type: ProcedureType,
    pub before_image: Option<String>,
    pub after_images: Vec<AfterImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AfterImage {
    pub uri: String,
    pub taken_at: NaiveDate,
}

/// Partial photo update produced by the photo dialog.
/// `None` leaves a field untouched; `Some(None)` clears the before image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoUpdate {
    pub before_image: Option<Option<String>>,
    pub after_images: Option<Vec<AfterImage>>,
}

impl ProcedureRecord {
    pub fn new(performed_at: NaiveDate, procedure_type: ProcedureType) -> Self {
        Self {
            id: Uuid::new_v4(),
            performed_at,
            procedure_type,
            before_image: None,
            after_images: Vec::new(),
        }
    }

    pub fn has_photos(&self) -> bool {
        self.before_image.is_some() || !self.after_images.is_empty()
    }

    /// Photos are the only mutable part of a record.
    pub fn apply_photos(&mut self, update: PhotoUpdate) {
        if let Some(before) = update.before_image {
            self.before_image = before.filter(|uri| !uri.is_empty());
        }
        if let Some(afters) = update.after_images {
            self.after_images = afters;
        }
    }
}

/// Catalog entry for a procedure the clinic offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureConfig {
    pub procedure_type: ProcedureType,
    pub description: String,
    pub image_url: String,
    /// Days after the procedure when the late-result evaluation is due.
    /// Zero disables follow-up.
    pub delay_days: u32,
}

/// The clinic's default procedure catalog.
pub fn default_catalog() -> Vec<ProcedureConfig> {
    let entry = |procedure_type, description: &str, query: &str, delay_days| ProcedureConfig {
        procedure_type,
        description: description.into(),
        image_url: format!("https://img.usecurling.com/p/400/300?q={query}"),
        delay_days,
    };

    vec![
        entry(
            ProcedureType::Botox,
            "Aplicação de toxina botulínica para suavizar rugas e linhas de expressão.",
            "botox%20injection",
            30,
        ),
        entry(
            ProcedureType::Preenchimento,
            "Uso de ácido hialurônico para restaurar volume e contorno facial.",
            "facial%20filler",
            15,
        ),
        entry(
            ProcedureType::Rotina,
            "Consultas regulares para acompanhamento da saúde da pele e prevenção.",
            "skincare%20routine",
            0,
        ),
        entry(
            ProcedureType::LiftingFacial,
            "Procedimentos para combater a flacidez e promover o rejuvenescimento da pele.",
            "face%20lifting",
            45,
        ),
    ]
}
