//! Aggregate statistics over relation records.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AppointmentState, RelationRecord, Urgency};

/// Counters over an enriched record set. Everything is computed in a single
/// pass; nothing is cached between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RelationStats {
    /// Total records
    pub total: usize,
    /// Scheduled on the current UTC calendar day
    pub today: usize,
    /// In the future and confirmed or under review
    pub upcoming: usize,
    /// Under review or pending payment
    pub pending: usize,
    /// Completed visits
    pub completed: usize,
    /// High-urgency records
    pub high_urgency: usize,
    /// Scheduled inside the next seven days
    pub next_seven_days: usize,
    /// Records with no resolved owner
    pub missing_owner: usize,
    /// Records with no resolved pet
    pub missing_pet: usize,
    /// Record count per canonical species
    pub by_species: BTreeMap<String, usize>,
    /// Distinct resolved owners
    pub distinct_owners: usize,
    /// Distinct resolved pets
    pub distinct_pets: usize,
}

impl RelationStats {
    /// Serialize for persistence or display by the caller.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Compute aggregate statistics as of `now`.
pub fn stats(records: &[RelationRecord], now: DateTime<Utc>) -> RelationStats {
    let mut out = RelationStats {
        total: records.len(),
        ..Default::default()
    };
    let week_end = now + Duration::days(7);
    let mut owner_ids: HashSet<&str> = HashSet::new();
    let mut pet_ids: HashSet<&str> = HashSet::new();

    for record in records {
        let appointment = &record.appointment;
        let scheduled = appointment.scheduled_at;

        if scheduled.date_naive() == now.date_naive() {
            out.today += 1;
        }
        if scheduled > now
            && matches!(
                appointment.state,
                AppointmentState::Confirmed | AppointmentState::UnderReview
            )
        {
            out.upcoming += 1;
        }
        if matches!(
            appointment.state,
            AppointmentState::UnderReview | AppointmentState::PendingPayment
        ) {
            out.pending += 1;
        }
        if appointment.state == AppointmentState::Completed {
            out.completed += 1;
        }
        if record.urgency == Urgency::High {
            out.high_urgency += 1;
        }
        if scheduled >= now && scheduled < week_end {
            out.next_seven_days += 1;
        }

        match &record.owner {
            Some(owner) => {
                owner_ids.insert(owner.id.as_str());
            }
            None => out.missing_owner += 1,
        }
        match &record.pet {
            Some(pet) => {
                pet_ids.insert(pet.id.as_str());
            }
            None => out.missing_pet += 1,
        }

        *out
            .by_species
            .entry(appointment.canonical_species())
            .or_insert(0) += 1;
    }

    out.distinct_owners = owner_ids.len();
    out.distinct_pets = pet_ids.len();
    out
}
