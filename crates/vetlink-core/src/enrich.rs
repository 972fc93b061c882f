//! Relation enrichment: joins each appointment to its resolved pet and
//! owner, triage level, and medical-history flags.

use chrono::{DateTime, Utc};

use crate::models::{Appointment, MedicalHistoryEntry, Owner, Pet, RelationRecord};
use crate::resolver::{resolve_owner, resolve_pet};
use crate::triage::UrgencyClassifier;

/// Enricher that builds denormalized [`RelationRecord`]s.
///
/// The enricher never mutates its inputs and never caches output between
/// calls: each call is a pure function of the snapshots it receives (plus
/// the `now` instant used by urgency and window logic).
pub struct Enricher {
    classifier: UrgencyClassifier,
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher {
    /// Create an enricher with the default urgency classifier.
    pub fn new() -> Self {
        Self {
            classifier: UrgencyClassifier::new(),
        }
    }

    /// Create an enricher with a customized classifier.
    pub fn with_classifier(classifier: UrgencyClassifier) -> Self {
        Self { classifier }
    }

    /// Enrich a single appointment.
    pub fn enrich(
        &self,
        appointment: &Appointment,
        pets: &[Pet],
        owners: &[Owner],
        history: &[MedicalHistoryEntry],
        now: DateTime<Utc>,
    ) -> RelationRecord {
        // Step 1: resolve the pet
        let pet_match = resolve_pet(appointment, pets);

        // Step 2: resolve the owner, using the resolved pet
        let owner_match = resolve_owner(
            appointment,
            pet_match.as_ref().map(|m| m.pet),
            owners,
            pets,
        );

        // Step 3: classify urgency
        let urgency = self
            .classifier
            .classify(&appointment.reason, appointment.scheduled_at, now);

        // Step 4: derive history flags for the resolved pet
        let (has_history, last_visit) = match &pet_match {
            Some(m) => {
                let mut has_history = false;
                let mut last_visit: Option<DateTime<Utc>> = None;
                for entry in history.iter().filter(|e| e.pet_id == m.pet.id) {
                    has_history = true;
                    if last_visit.map_or(true, |d| entry.date > d) {
                        last_visit = Some(entry.date);
                    }
                }
                (has_history, last_visit)
            }
            None => (false, None),
        };

        RelationRecord {
            appointment: appointment.clone(),
            pet: pet_match.as_ref().map(|m| m.pet.clone()),
            owner: owner_match.as_ref().map(|m| m.owner.clone()),
            pet_match: pet_match.map(|m| m.strategy),
            owner_match: owner_match.map(|m| m.strategy),
            urgency,
            has_history,
            last_visit,
        }
    }

    /// Enrich a whole appointment set, preserving input order.
    pub fn enrich_all(
        &self,
        appointments: &[Appointment],
        pets: &[Pet],
        owners: &[Owner],
        history: &[MedicalHistoryEntry],
        now: DateTime<Utc>,
    ) -> Vec<RelationRecord> {
        appointments
            .iter()
            .map(|a| self.enrich(a, pets, owners, history, now))
            .collect()
    }

    /// Get the classifier for direct access.
    pub fn classifier(&self) -> &UrgencyClassifier {
        &self.classifier
    }
}
