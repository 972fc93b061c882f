//! Medical history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A clinical record for a past visit. Read-only for the relation engine,
/// which only derives "has history" and "last visit" from these entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistoryEntry {
    /// Unique entry ID
    pub id: String,
    /// Pet this entry belongs to
    pub pet_id: String,
    /// Visit date
    pub date: DateTime<Utc>,
    /// Diagnosis text
    pub diagnosis: String,
    /// Prescribed treatment
    pub treatment: Option<String>,
    /// Attending veterinarian
    pub vet_name: String,
    /// Additional notes
    pub notes: Option<String>,
}

impl MedicalHistoryEntry {
    /// Create a new history entry with required fields.
    pub fn new(pet_id: String, date: DateTime<Utc>, diagnosis: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_id,
            date,
            diagnosis,
            treatment: None,
            vet_name: String::new(),
            notes: None,
        }
    }
}
