//! Pet resolution chain.

use strsim::jaro_winkler;

use crate::models::{Appointment, Pet, PetMatchStrategy};

/// A resolved pet together with the strategy that matched it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetMatch<'a> {
    pub pet: &'a Pet,
    pub strategy: PetMatchStrategy,
}

/// Resolve an appointment to a pet record.
///
/// Strategies in order, first hit wins:
/// 1. Exact match on `appointment.pet_id`, when present.
/// 2. Exact case-sensitive match on name.
/// 3. Case-insensitive exact match on name.
/// 4. Bidirectional substring containment on name, case-insensitive;
///    ties resolve to the first candidate in input order.
pub fn resolve_pet<'a>(appointment: &Appointment, pets: &'a [Pet]) -> Option<PetMatch<'a>> {
    if let Some(pet_id) = &appointment.pet_id {
        if let Some(pet) = pets.iter().find(|p| &p.id == pet_id) {
            return Some(PetMatch {
                pet,
                strategy: PetMatchStrategy::ById,
            });
        }
    }

    if let Some(pet) = pets.iter().find(|p| p.name == appointment.pet_name) {
        return Some(PetMatch {
            pet,
            strategy: PetMatchStrategy::ExactName,
        });
    }

    let wanted = appointment.pet_name.to_lowercase();
    if let Some(pet) = pets.iter().find(|p| p.name.to_lowercase() == wanted) {
        return Some(PetMatch {
            pet,
            strategy: PetMatchStrategy::NameIgnoreCase,
        });
    }

    // An empty name would substring-match every candidate.
    if wanted.is_empty() {
        return None;
    }

    pets.iter()
        .find(|p| {
            let name = p.name.to_lowercase();
            name.contains(&wanted) || wanted.contains(&name)
        })
        .map(|pet| PetMatch {
            pet,
            strategy: PetMatchStrategy::PartialName {
                similarity: jaro_winkler(&wanted, &pet.name.to_lowercase()),
            },
        })
}
