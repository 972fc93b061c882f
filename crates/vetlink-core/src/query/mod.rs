//! Filter and sort operations over enriched relation records.

mod stats;

pub use stats::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AppointmentState, RelationRecord, Urgency};

/// Sorts unresolved owners after every real name, whatever the alphabet.
const UNRESOLVED_OWNER_SENTINEL: char = char::MAX;

/// Filter criteria over relation records.
///
/// All provided criteria are AND-ed together; `None` (or a blank string on
/// the text criteria) disables a criterion.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecordFilter {
    /// Resolved owner id
    pub owner_id: Option<String>,
    /// Appointment species, case-insensitive
    pub species: Option<String>,
    /// Triage level
    pub urgency: Option<Urgency>,
    /// Appointment state
    pub state: Option<AppointmentState>,
    /// Veterinarian name, case-insensitive
    pub vet_name: Option<String>,
    /// Inclusive lower bound on the scheduled time
    pub scheduled_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the scheduled time
    pub scheduled_until: Option<DateTime<Utc>>,
    /// Free-text term matched case-insensitively against pet name, reason,
    /// species, breed, owner name, phone and email
    pub search: Option<String>,
}

impl RecordFilter {
    /// Whether a record satisfies every active criterion.
    pub fn matches(&self, record: &RelationRecord) -> bool {
        let appointment = &record.appointment;

        if let Some(owner_id) = active(&self.owner_id) {
            match &record.owner {
                Some(owner) if owner.id == owner_id => {}
                _ => return false,
            }
        }

        if let Some(species) = active(&self.species) {
            if appointment.canonical_species() != species.to_lowercase() {
                return false;
            }
        }

        if let Some(urgency) = self.urgency {
            if record.urgency != urgency {
                return false;
            }
        }

        if let Some(state) = self.state {
            if appointment.state != state {
                return false;
            }
        }

        if let Some(vet_name) = active(&self.vet_name) {
            if appointment.vet_name.to_lowercase() != vet_name.to_lowercase() {
                return false;
            }
        }

        if let Some(from) = self.scheduled_from {
            if appointment.scheduled_at < from {
                return false;
            }
        }
        if let Some(until) = self.scheduled_until {
            if appointment.scheduled_at > until {
                return false;
            }
        }

        if let Some(term) = active(&self.search) {
            let term = term.to_lowercase();
            let mut haystacks: Vec<&str> = vec![
                &appointment.pet_name,
                &appointment.reason,
                &appointment.species,
            ];
            if let Some(pet) = &record.pet {
                haystacks.push(&pet.breed);
            }
            if let Some(owner) = &record.owner {
                haystacks.push(&owner.name);
                haystacks.push(&owner.phone);
                haystacks.push(&owner.email);
            }
            if !haystacks.iter().any(|h| h.to_lowercase().contains(&term)) {
                return false;
            }
        }

        true
    }
}

/// Treat blank strings as a disabled criterion.
fn active(criterion: &Option<String>) -> Option<&str> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Filter records by the given criteria, preserving input order.
pub fn filter(records: &[RelationRecord], criteria: &RecordFilter) -> Vec<RelationRecord> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Sort keys over relation records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    DateAsc,
    DateDesc,
    /// High before Medium before Low; stable within a level
    Urgency,
    PetName,
    /// Unresolved owners sort last
    OwnerName,
}

/// Return a sorted copy of `records`. All sorts are stable, so records that
/// compare equal keep their original relative order.
pub fn sort(records: &[RelationRecord], key: SortKey) -> Vec<RelationRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::DateAsc => sorted.sort_by_key(|r| r.appointment.scheduled_at),
        SortKey::DateDesc => {
            sorted.sort_by(|a, b| b.appointment.scheduled_at.cmp(&a.appointment.scheduled_at))
        }
        SortKey::Urgency => sorted.sort_by(|a, b| b.urgency.cmp(&a.urgency)),
        SortKey::PetName => {
            sorted.sort_by(|a, b| a.appointment.pet_name.cmp(&b.appointment.pet_name))
        }
        SortKey::OwnerName => sorted.sort_by(|a, b| owner_key(a).cmp(&owner_key(b))),
    }
    sorted
}

fn owner_key(record: &RelationRecord) -> String {
    record
        .owner
        .as_ref()
        .map(|o| o.name.clone())
        .unwrap_or_else(|| UNRESOLVED_OWNER_SENTINEL.to_string())
}
