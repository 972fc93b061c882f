//! Entity resolution for loosely-linked appointment records.
//!
//! Appointments reference pets and owners through foreign keys that may be
//! missing or dangling, so each entity is resolved through an ordered
//! fallback chain. The first strategy that hits wins and no further
//! strategies are attempted; absence of a match is a normal state, not an
//! error.

mod owner;
mod pet;

pub use owner::*;
pub use pet::*;
