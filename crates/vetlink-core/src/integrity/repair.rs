//! Deterministic auto-repair for recoverable referential defects.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Appointment, Owner, Pet};
use crate::resolver::resolve_pet;

/// A defect the repair pass could not correct. Processing always continues
/// with the remaining appointments; these are reported, never thrown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
pub enum RepairError {
    #[error("cannot synthesize pet \"{pet_name}\" for appointment {appointment_id}: no client owner exists")]
    NoOwnerForSynthesizedPet {
        appointment_id: String,
        pet_name: String,
    },

    #[error("cannot reassign pet \"{pet_name}\" ({pet_id}): no client owner exists")]
    NoOwnerForReassignment {
        appointment_id: String,
        pet_id: String,
        pet_name: String,
    },
}

/// One corrective action applied by the repair pass; the structured audit
/// trail callers persist alongside the corrected records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AppliedFix {
    SynthesizedPet {
        appointment_id: String,
        pet_id: String,
        pet_name: String,
        owner_id: String,
    },
    ReassignedOwner {
        appointment_id: String,
        pet_id: String,
        previous_owner_id: String,
        owner_id: String,
    },
}

/// Result bundle of one repair pass.
///
/// All output collections are new allocations; input snapshots are never
/// touched. Callers commit the corrected pets and re-supply updated
/// snapshots on the next engine call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepairOutcome {
    /// The input appointments, copied through unchanged
    pub appointments: Vec<Appointment>,
    /// The input pets with ownership repairs applied
    pub pets: Vec<Pet>,
    /// Pets synthesized for appointments whose pet did not exist
    pub new_pets: Vec<Pet>,
    /// Audit trail of every correction applied
    pub applied_fixes: Vec<AppliedFix>,
    /// Defects that could not be corrected
    pub errors: Vec<RepairError>,
}

impl RepairOutcome {
    /// Whether every detected defect was corrected.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Serialize for persistence by the caller.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Apply deterministic corrective actions, one pass in input order.
///
/// Per appointment:
/// - unresolvable pet: synthesize a placeholder pet owned by the first
///   client owner, or record an error when no client owner exists (a pet is
///   never invented with a dangling owner);
/// - resolved pet whose `owner_id` references no existing owner record:
///   reassign to the first client owner, or record an error. An edge that
///   points at an existing owner is left alone, whatever its role, matching
///   what owner resolution accepts.
///
/// Appointments are repaired indirectly — the pass corrects pets and copies
/// every appointment through unchanged. Pets synthesized earlier in the run
/// are visible to later appointments, so two appointments for the same
/// unknown pet share one synthesized record. Repairs are single-candidate
/// only: ambiguity between multiple plausible owners is left to the
/// validator's fixable output for a human decision.
pub fn auto_fix(
    appointments: &[Appointment],
    pets: &[Pet],
    owners: &[Owner],
) -> RepairOutcome {
    let mut working: Vec<Pet> = pets.to_vec();
    let mut applied_fixes = Vec::new();
    let mut errors = Vec::new();

    let first_client = owners.iter().find(|o| o.is_client());

    for appointment in appointments {
        let resolved_id = resolve_pet(appointment, &working).map(|m| m.pet.id.clone());

        match resolved_id {
            None => match first_client {
                Some(owner) => {
                    let pet = Pet::synthesized(
                        &appointment.pet_name,
                        &appointment.species,
                        &owner.id,
                    );
                    info!(
                        pet_name = %pet.name,
                        owner_id = %owner.id,
                        appointment_id = %appointment.id,
                        "synthesized missing pet record"
                    );
                    applied_fixes.push(AppliedFix::SynthesizedPet {
                        appointment_id: appointment.id.clone(),
                        pet_id: pet.id.clone(),
                        pet_name: pet.name.clone(),
                        owner_id: owner.id.clone(),
                    });
                    working.push(pet);
                }
                None => {
                    warn!(
                        pet_name = %appointment.pet_name,
                        appointment_id = %appointment.id,
                        "cannot synthesize pet: no client owner exists"
                    );
                    errors.push(RepairError::NoOwnerForSynthesizedPet {
                        appointment_id: appointment.id.clone(),
                        pet_name: appointment.pet_name.clone(),
                    });
                }
            },
            Some(pet_id) => {
                let Some(idx) = working.iter().position(|p| p.id == pet_id) else {
                    continue;
                };
                let dangling = !owners.iter().any(|o| o.id == working[idx].owner_id);
                if !dangling {
                    continue;
                }
                match first_client {
                    Some(owner) => {
                        let previous = std::mem::replace(
                            &mut working[idx].owner_id,
                            owner.id.clone(),
                        );
                        info!(
                            pet_id = %working[idx].id,
                            previous_owner_id = %previous,
                            owner_id = %owner.id,
                            "reassigned dangling pet ownership"
                        );
                        applied_fixes.push(AppliedFix::ReassignedOwner {
                            appointment_id: appointment.id.clone(),
                            pet_id: working[idx].id.clone(),
                            previous_owner_id: previous,
                            owner_id: owner.id.clone(),
                        });
                    }
                    None => {
                        warn!(
                            pet_id = %working[idx].id,
                            "cannot reassign pet ownership: no client owner exists"
                        );
                        errors.push(RepairError::NoOwnerForReassignment {
                            appointment_id: appointment.id.clone(),
                            pet_id: working[idx].id.clone(),
                            pet_name: working[idx].name.clone(),
                        });
                    }
                }
            }
        }
    }

    let new_pets = working.split_off(pets.len());

    RepairOutcome {
        appointments: appointments.to_vec(),
        pets: working,
        new_pets,
        applied_fixes,
        errors,
    }
}
