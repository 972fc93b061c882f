//! Pet models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An animal patient, owned by exactly one client at a time.
///
/// `owner_id` is the single ownership edge in the model and may dangle when
/// the referenced owner record has been removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// Unique pet ID
    pub id: String,
    /// Pet name
    pub name: String,
    /// Species (e.g. "perro", "gato")
    pub species: String,
    /// Breed
    pub breed: String,
    /// Sex
    pub sex: String,
    /// Date of birth
    pub birth_date: NaiveDate,
    /// Owning client reference (may dangle)
    pub owner_id: String,
    /// Next scheduled visit, if any
    pub next_appointment: Option<DateTime<Utc>>,
    /// Most recent vaccination date
    pub last_vaccine_date: Option<NaiveDate>,
    /// Photo reference
    pub photo: Option<String>,
}

impl Pet {
    /// Create a new pet with required fields.
    pub fn new(name: String, species: String, owner_id: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            species,
            breed: "unknown".into(),
            sex: "unknown".into(),
            birth_date: NaiveDate::default(),
            owner_id,
            next_appointment: None,
            last_vaccine_date: None,
            photo: None,
        }
    }

    /// Build a placeholder pet record from appointment data.
    ///
    /// Used by auto-repair when an appointment references a pet that does not
    /// exist anywhere in the system. Breed and sex are placeholders and the
    /// birth date is the epoch sentinel; a blank species falls back to
    /// "unspecified".
    pub fn synthesized(pet_name: &str, species: &str, owner_id: &str) -> Self {
        let species = if species.trim().is_empty() {
            "unspecified".to_string()
        } else {
            species.to_string()
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: pet_name.to_string(),
            species,
            breed: "unspecified".into(),
            sex: "unspecified".into(),
            birth_date: NaiveDate::default(),
            owner_id: owner_id.to_string(),
            next_appointment: None,
            last_vaccine_date: None,
            photo: None,
        }
    }

    /// Get the canonical species name (lowercase).
    pub fn canonical_species(&self) -> String {
        self.species.to_lowercase()
    }
}
