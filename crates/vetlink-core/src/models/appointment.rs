//! Appointment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an appointment.
///
/// `PendingPayment → UnderReview → Confirmed → {Completed | NoShow}`, with
/// side exits to `Cancelled`, `Expired` and `Rejected`. The relation engine
/// only reads state; transitions are driven by the booking layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentState {
    /// Booked, payment not yet received
    PendingPayment,
    /// Paid, awaiting clinic review
    UnderReview,
    /// Accepted by the clinic
    Confirmed,
    /// Visit took place
    Completed,
    /// Client did not show up
    NoShow,
    /// Cancelled by client or clinic
    Cancelled,
    /// Payment window lapsed
    Expired,
    /// Declined during review
    Rejected,
}

impl AppointmentState {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentState::Completed
                | AppointmentState::Cancelled
                | AppointmentState::Expired
                | AppointmentState::Rejected
                | AppointmentState::NoShow
        )
    }

    /// Whether the booking layer may move an appointment from this state to `next`.
    pub fn can_transition_to(&self, next: AppointmentState) -> bool {
        use AppointmentState::*;
        matches!(
            (self, next),
            (PendingPayment, UnderReview)
                | (UnderReview, Confirmed)
                | (Confirmed, Completed)
                | (Confirmed, NoShow)
                | (Confirmed, Cancelled)
                | (UnderReview, Cancelled)
                | (PendingPayment, Expired)
                | (UnderReview, Expired)
                | (UnderReview, Rejected)
        )
    }
}

/// A scheduled veterinary visit.
///
/// `pet_name` is the authoritative display string and is always present,
/// even when `pet_id` is absent or dangling. It is the fallback matching key
/// for pet resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique appointment ID
    pub id: String,
    /// Denormalized pet name (always present)
    pub pet_name: String,
    /// Pet reference, may be missing or dangling
    pub pet_id: Option<String>,
    /// Booking client reference, may be missing or dangling
    pub owner_id: Option<String>,
    /// Species as entered at booking time
    pub species: String,
    /// Scheduled date and time
    pub scheduled_at: DateTime<Utc>,
    /// Lifecycle state
    pub state: AppointmentState,
    /// Veterinarian display name
    pub vet_name: String,
    /// Veterinarian reference
    pub vet_id: Option<String>,
    /// Free-text reason for the visit
    pub reason: String,
    /// Consultation type (e.g. "general", "vacunación")
    pub consultation_type: String,
    /// Clinic location
    pub location: String,
    /// Quoted price
    pub price: f64,
    /// Client-visible notes
    pub notes: Option<String>,
    /// Internal clinic notes
    pub admin_notes: Option<String>,
    /// Payment receipt reference
    pub receipt_ref: Option<String>,
}

impl Appointment {
    /// Create a new appointment with required fields.
    pub fn new(pet_name: String, species: String, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pet_name,
            pet_id: None,
            owner_id: None,
            species,
            scheduled_at,
            state: AppointmentState::PendingPayment,
            vet_name: String::new(),
            vet_id: None,
            reason: String::new(),
            consultation_type: "general".into(),
            location: String::new(),
            price: 0.0,
            notes: None,
            admin_notes: None,
            receipt_ref: None,
        }
    }

    /// Get the canonical species name (lowercase).
    pub fn canonical_species(&self) -> String {
        self.species.to_lowercase()
    }
}
