//! Property tests for the engine's structural guarantees.
//!
//! Record sets are generated from small name/species pools so that every
//! combination of hit, miss, case mismatch and dangling reference shows up.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;

use vetlink_core::{
    auto_fix, sort, Appointment, AppointmentState, Enricher, Owner, Pet, Role, SortKey,
    Urgency, Validator,
};

const NAMES: [&str; 6] = ["Rocky", "rocky", "Luna", "Misu", "Rex", "Fantasma"];
const SPECIES: [&str; 3] = ["perro", "gato", "ave"];
const REASONS: [&str; 4] = [
    "chequeo",
    "mucho dolor",
    "lleva días con diarrea",
    "revisión de rutina",
];
const STATES: [AppointmentState; 8] = [
    AppointmentState::PendingPayment,
    AppointmentState::UnderReview,
    AppointmentState::Confirmed,
    AppointmentState::Completed,
    AppointmentState::NoShow,
    AppointmentState::Cancelled,
    AppointmentState::Expired,
    AppointmentState::Rejected,
];

fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
}

type OwnerSpec = (usize, u8);
type PetSpec = (usize, usize, usize);
type ApptSpec = (usize, usize, i64, usize, usize);

fn assemble(
    owner_specs: &[OwnerSpec],
    pet_specs: &[PetSpec],
    appt_specs: &[ApptSpec],
) -> (Vec<Appointment>, Vec<Pet>, Vec<Owner>) {
    let owners: Vec<Owner> = owner_specs
        .iter()
        .map(|(name, role)| {
            let mut owner = Owner::new_client(
                NAMES[*name].to_string(),
                "600000000".into(),
                "x@example.com".into(),
            );
            owner.role = match role % 3 {
                0 => Role::Client,
                1 => Role::Vet,
                _ => Role::Admin,
            };
            owner
        })
        .collect();

    let pets: Vec<Pet> = pet_specs
        .iter()
        .map(|(name, species, owner_ref)| {
            // Out-of-range refs model dangling ownership edges.
            let owner_id = owners
                .get(*owner_ref)
                .map(|o| o.id.clone())
                .unwrap_or_else(|| "dangling".into());
            Pet::new(NAMES[*name].to_string(), SPECIES[*species].to_string(), owner_id)
        })
        .collect();

    let now = anchor();
    let appointments: Vec<Appointment> = appt_specs
        .iter()
        .map(|(name, species, hours, state, reason)| {
            let mut appt = Appointment::new(
                NAMES[*name].to_string(),
                SPECIES[*species].to_string(),
                now + Duration::hours(*hours),
            );
            appt.state = STATES[*state];
            appt.reason = REASONS[*reason].to_string();
            appt
        })
        .collect();

    (appointments, pets, owners)
}

fn owner_specs() -> impl Strategy<Value = Vec<OwnerSpec>> {
    prop::collection::vec((0usize..6, any::<u8>()), 0..4)
}

fn pet_specs() -> impl Strategy<Value = Vec<PetSpec>> {
    prop::collection::vec((0usize..6, 0usize..3, 0usize..5), 0..5)
}

fn appt_specs() -> impl Strategy<Value = Vec<ApptSpec>> {
    prop::collection::vec((0usize..6, 0usize..3, -48i64..120, 0usize..8, 0usize..4), 0..8)
}

proptest! {
    /// valid ∪ invalid ∪ fixable is the input set, exactly once each.
    #[test]
    fn validation_partitions_exactly(
        owners in owner_specs(),
        pets in pet_specs(),
        appts in appt_specs(),
    ) {
        let (appointments, pets, owners) = assemble(&owners, &pets, &appts);
        let now = anchor();
        let report = Validator::new().validate(&appointments, &pets, &owners, &[], now);

        prop_assert_eq!(report.total(), appointments.len());

        let mut partitioned: Vec<&str> = report
            .valid
            .iter()
            .map(|r| r.appointment.id.as_str())
            .chain(report.invalid.iter().map(|f| f.appointment.id.as_str()))
            .chain(report.fixable.iter().map(|f| f.appointment.id.as_str()))
            .collect();
        partitioned.sort_unstable();

        let mut expected: Vec<&str> = appointments.iter().map(|a| a.id.as_str()).collect();
        expected.sort_unstable();

        prop_assert_eq!(partitioned, expected);
    }

    /// Repair conserves the appointment set and the original pet count, and
    /// reports errors only when no client owner exists.
    #[test]
    fn repair_conserves_inputs(
        owners in owner_specs(),
        pets in pet_specs(),
        appts in appt_specs(),
    ) {
        let (appointments, pets, owners) = assemble(&owners, &pets, &appts);
        let outcome = auto_fix(&appointments, &pets, &owners);

        prop_assert_eq!(&outcome.appointments, &appointments);
        prop_assert_eq!(outcome.pets.len(), pets.len());

        let has_client = owners.iter().any(|o| o.is_client());
        if has_client {
            prop_assert!(outcome.errors.is_empty());
        } else {
            prop_assert!(outcome.new_pets.is_empty());
        }
    }

    /// One repair round reaches a fixed point: with a client owner present,
    /// revalidating the corrected snapshot flags nothing.
    #[test]
    fn repair_then_revalidate_is_clean(
        owners in owner_specs(),
        pets in pet_specs(),
        appts in appt_specs(),
    ) {
        let (appointments, pets, owners) = assemble(&owners, &pets, &appts);
        prop_assume!(owners.iter().any(|o| o.is_client()));

        let outcome = auto_fix(&appointments, &pets, &owners);
        let mut corrected = outcome.pets.clone();
        corrected.extend(outcome.new_pets.clone());

        let report =
            Validator::new().validate(&outcome.appointments, &corrected, &owners, &[], anchor());

        prop_assert!(report.invalid.is_empty());
        prop_assert!(report.fixable.is_empty());
        prop_assert_eq!(report.valid.len(), appointments.len());
    }

    /// Urgency sort is totally ordered by level and stable within a level.
    #[test]
    fn urgency_sort_is_ordered_and_stable(
        owners in owner_specs(),
        pets in pet_specs(),
        appts in appt_specs(),
    ) {
        let (appointments, pets, owners) = assemble(&owners, &pets, &appts);
        let records =
            Enricher::new().enrich_all(&appointments, &pets, &owners, &[], anchor());
        let sorted = sort(&records, SortKey::Urgency);

        prop_assert_eq!(sorted.len(), records.len());
        prop_assert!(sorted.windows(2).all(|w| w[0].urgency >= w[1].urgency));

        for level in [Urgency::High, Urgency::Medium, Urgency::Low] {
            let original: Vec<&str> = records
                .iter()
                .filter(|r| r.urgency == level)
                .map(|r| r.appointment.id.as_str())
                .collect();
            let after: Vec<&str> = sorted
                .iter()
                .filter(|r| r.urgency == level)
                .map(|r| r.appointment.id.as_str())
                .collect();
            prop_assert_eq!(original, after);
        }
    }

    /// Enrichment of identical inputs is structurally identical.
    #[test]
    fn enrichment_is_deterministic(
        owners in owner_specs(),
        pets in pet_specs(),
        appts in appt_specs(),
    ) {
        let (appointments, pets, owners) = assemble(&owners, &pets, &appts);
        let enricher = Enricher::new();
        let now = anchor();

        let first = enricher.enrich_all(&appointments, &pets, &owners, &[], now);
        let second = enricher.enrich_all(&appointments, &pets, &owners, &[], now);

        prop_assert_eq!(first, second);
    }
}
