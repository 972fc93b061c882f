//! Owner resolution chain.

use crate::models::{Appointment, Owner, OwnerMatchStrategy, Pet};

/// A resolved owner together with the strategy that matched it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OwnerMatch<'a> {
    pub owner: &'a Owner,
    pub strategy: OwnerMatchStrategy,
}

/// Resolve an appointment to an owner record.
///
/// Strategies in order, first hit wins:
/// 1. Exact match on `appointment.owner_id` against a client-role owner.
/// 2. The resolved pet's `owner_id`.
/// 3. First client owner holding at least one other pet of the resolved
///    pet's species. This is a best-effort guess; the returned strategy is
///    flagged (`OwnerMatchStrategy::is_guess`) so callers never present it
///    as authoritative.
///
/// The full pet set is needed for strategy 3, which inspects each
/// candidate's other pets.
pub fn resolve_owner<'a>(
    appointment: &Appointment,
    pet: Option<&Pet>,
    owners: &'a [Owner],
    pets: &[Pet],
) -> Option<OwnerMatch<'a>> {
    if let Some(owner_id) = &appointment.owner_id {
        if let Some(owner) = owners.iter().find(|o| o.is_client() && &o.id == owner_id) {
            return Some(OwnerMatch {
                owner,
                strategy: OwnerMatchStrategy::ByAppointmentRef,
            });
        }
    }

    let pet = pet?;

    if let Some(owner) = owners.iter().find(|o| o.id == pet.owner_id) {
        return Some(OwnerMatch {
            owner,
            strategy: OwnerMatchStrategy::ByPetOwnership,
        });
    }

    let species = pet.canonical_species();
    owners
        .iter()
        .find(|o| {
            o.is_client()
                && pets.iter().any(|p| {
                    p.id != pet.id && p.owner_id == o.id && p.canonical_species() == species
                })
        })
        .map(|owner| OwnerMatch {
            owner,
            strategy: OwnerMatchStrategy::SpeciesHeuristic,
        })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::Role;

    #[test]
    fn test_appointment_ref_beats_pet_ownership() {
        let booked_by = Owner::new_client("Ana".into(), "".into(), "".into());
        let recorded = Owner::new_client("Berta".into(), "".into(), "".into());
        let pet = Pet::new("Rocky".into(), "perro".into(), recorded.id.clone());

        let mut appt = Appointment::new("Rocky".into(), "perro".into(), Utc::now());
        appt.owner_id = Some(booked_by.id.clone());

        let owners = vec![recorded, booked_by.clone()];
        let pets = vec![pet.clone()];
        let m = resolve_owner(&appt, Some(&pet), &owners, &pets).expect("match");
        assert_eq!(m.owner.id, booked_by.id);
        assert!(matches!(m.strategy, OwnerMatchStrategy::ByAppointmentRef));
    }

    #[test]
    fn test_heuristic_skips_non_client_owners() {
        let mut vet = Owner::new_client("Dra. Ruiz".into(), "".into(), "".into());
        vet.role = Role::Vet;
        let stray = Pet::new("Rex".into(), "perro".into(), "gone".into());
        let vets_dog = Pet::new("Toby".into(), "perro".into(), vet.id.clone());

        let owners = vec![vet];
        let pets = vec![stray.clone(), vets_dog];
        let appt = Appointment::new("Rex".into(), "perro".into(), Utc::now());

        assert!(resolve_owner(&appt, Some(&stray), &owners, &pets).is_none());
    }

    #[test]
    fn test_no_pet_and_no_ref_yields_none() {
        let owners = vec![Owner::new_client("Ana".into(), "".into(), "".into())];
        let appt = Appointment::new("Rex".into(), "perro".into(), Utc::now());
        assert!(resolve_owner(&appt, None, &owners, &[]).is_none());
    }
}
