//! Referential integrity checks over appointment snapshots.
//!
//! Pipeline: Resolution pass → Defect classification → {valid | invalid | fixable}

mod repair;

pub use repair::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::enrich::Enricher;
use crate::models::{Appointment, MedicalHistoryEntry, Owner, Pet, RelationRecord};

/// A referential defect detected for one appointment.
///
/// Defects are data-quality states, not failures: they are classified and
/// returned, never thrown. The `Display` text is the issue string recorded
/// on the flagged entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
pub enum Defect {
    #[error("pet not found: no record matches \"{pet_name}\"")]
    PetNotFound { pet_name: String, species: String },

    #[error("owner not found for pet \"{pet_name}\"")]
    OwnerNotFound { pet_id: String, pet_name: String },

    #[error("ownership mismatch: pet \"{pet_name}\" records owner {recorded_owner_id}, resolved owner is {resolved_owner_id}")]
    OwnershipMismatch {
        pet_id: String,
        pet_name: String,
        recorded_owner_id: String,
        resolved_owner_id: String,
    },
}

/// An appointment flagged as invalid or fixable, with the defect that
/// triggered it and, when a deterministic correction exists, a suggested fix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlaggedAppointment {
    pub appointment: Appointment,
    pub defect: Defect,
    pub suggested_fix: Option<String>,
}

/// Partition of an appointment set into valid, invalid and fixable.
///
/// Every input appointment lands in exactly one of the three lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    /// Fully consistent appointments, carrying their relation records
    pub valid: Vec<RelationRecord>,
    /// Defective appointments with no automatic correction
    pub invalid: Vec<FlaggedAppointment>,
    /// Defective appointments a deterministic repair can correct
    pub fixable: Vec<FlaggedAppointment>,
}

impl ValidationReport {
    /// Total appointments across the partition.
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.fixable.len()
    }

    /// Serialize for persistence by the caller.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Integrity validator over appointment/pet/owner snapshots.
pub struct Validator {
    enricher: Enricher,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a validator with the default enricher.
    pub fn new() -> Self {
        Self {
            enricher: Enricher::new(),
        }
    }

    /// Create a validator around a customized enricher.
    pub fn with_enricher(enricher: Enricher) -> Self {
        Self { enricher }
    }

    /// Partition `appointments` into valid / invalid / fixable.
    ///
    /// Each appointment is examined once with a single enrich-style
    /// resolution pass; the first applicable defect wins and later branches
    /// are not evaluated. The history set and `now` are only needed to fill
    /// in the relation records carried by valid entries.
    pub fn validate(
        &self,
        appointments: &[Appointment],
        pets: &[Pet],
        owners: &[Owner],
        history: &[MedicalHistoryEntry],
        now: DateTime<Utc>,
    ) -> ValidationReport {
        let mut report = ValidationReport {
            valid: Vec::new(),
            invalid: Vec::new(),
            fixable: Vec::new(),
        };
        let client_candidates = owners.iter().filter(|o| o.is_client()).count();

        for appointment in appointments {
            let record = self.enricher.enrich(appointment, pets, owners, history, now);

            match (&record.pet, &record.owner) {
                (None, _) => {
                    let species = if appointment.species.trim().is_empty() {
                        "unspecified".to_string()
                    } else {
                        appointment.species.clone()
                    };
                    let fix = format!(
                        "create a new {} record named \"{}\"",
                        species, appointment.pet_name
                    );
                    report.fixable.push(FlaggedAppointment {
                        appointment: appointment.clone(),
                        defect: Defect::PetNotFound {
                            pet_name: appointment.pet_name.clone(),
                            species,
                        },
                        suggested_fix: Some(fix),
                    });
                }
                (Some(pet), None) => {
                    let defect = Defect::OwnerNotFound {
                        pet_id: pet.id.clone(),
                        pet_name: pet.name.clone(),
                    };
                    if client_candidates > 0 {
                        report.fixable.push(FlaggedAppointment {
                            appointment: appointment.clone(),
                            suggested_fix: Some(format!(
                                "assign one of {} client owner candidates to pet \"{}\"",
                                client_candidates, pet.name
                            )),
                            defect,
                        });
                    } else {
                        report.invalid.push(FlaggedAppointment {
                            appointment: appointment.clone(),
                            defect,
                            suggested_fix: None,
                        });
                    }
                }
                (Some(pet), Some(owner)) if pet.owner_id != owner.id => {
                    report.fixable.push(FlaggedAppointment {
                        appointment: appointment.clone(),
                        defect: Defect::OwnershipMismatch {
                            pet_id: pet.id.clone(),
                            pet_name: pet.name.clone(),
                            recorded_owner_id: pet.owner_id.clone(),
                            resolved_owner_id: owner.id.clone(),
                        },
                        suggested_fix: Some(format!(
                            "update pet \"{}\" owner to {}",
                            pet.name, owner.id
                        )),
                    });
                }
                _ => report.valid.push(record),
            }
        }

        debug!(
            valid = report.valid.len(),
            invalid = report.invalid.len(),
            fixable = report.fixable.len(),
            "integrity validation finished"
        );

        report
    }
}
