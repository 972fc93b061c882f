//! Derived relation models produced by the enrichment pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Appointment, Owner, Pet};

/// Triage level derived from appointment reason text and timing.
///
/// Variant order gives `Low < Medium < High`, so the derived `Ord` sorts
/// by severity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// How a pet was matched to an appointment.
///
/// Strategies are listed in resolution order; only the first hit is ever
/// reported. `PartialName` carries a Jaro-Winkler similarity between the two
/// names as a diagnostic — it never influences which candidate was picked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PetMatchStrategy {
    /// `appointment.pet_id` matched a pet record
    ById,
    /// Exact case-sensitive name match
    ExactName,
    /// Case-insensitive exact name match
    NameIgnoreCase,
    /// Bidirectional substring containment, first candidate in input order
    PartialName { similarity: f64 },
}

impl PetMatchStrategy {
    /// Whether the match used the authoritative foreign key.
    pub fn is_authoritative(&self) -> bool {
        matches!(self, PetMatchStrategy::ById)
    }
}

/// How an owner was matched to an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OwnerMatchStrategy {
    /// `appointment.owner_id` matched a client record
    ByAppointmentRef,
    /// The resolved pet's `owner_id` matched an owner record
    ByPetOwnership,
    /// Best-effort guess: first client owning another pet of the same species
    SpeciesHeuristic,
}

impl OwnerMatchStrategy {
    /// Whether this match is a heuristic guess that must not be presented
    /// as authoritative.
    pub fn is_guess(&self) -> bool {
        matches!(self, OwnerMatchStrategy::SpeciesHeuristic)
    }
}

/// The denormalized view joining an appointment to its resolved pet and
/// owner plus computed urgency and history flags.
///
/// Produced fresh on every enrichment call and never cached; the engine is a
/// pure function of its input snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationRecord {
    /// The source appointment
    pub appointment: Appointment,
    /// Resolved pet, if any
    pub pet: Option<Pet>,
    /// Resolved owner, if any
    pub owner: Option<Owner>,
    /// Strategy that matched the pet
    pub pet_match: Option<PetMatchStrategy>,
    /// Strategy that matched the owner
    pub owner_match: Option<OwnerMatchStrategy>,
    /// Triage level
    pub urgency: Urgency,
    /// Whether any medical history exists for the resolved pet
    pub has_history: bool,
    /// Most recent history entry date for the resolved pet
    pub last_visit: Option<DateTime<Utc>>,
}

impl RelationRecord {
    /// Whether no pet record could be resolved.
    pub fn missing_pet(&self) -> bool {
        self.pet.is_none()
    }

    /// Whether no owner record could be resolved.
    pub fn missing_owner(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether the owner was matched by the species heuristic and should be
    /// surfaced as a guess.
    pub fn owner_is_guess(&self) -> bool {
        self.owner_match.map_or(false, |m| m.is_guess())
    }
}
