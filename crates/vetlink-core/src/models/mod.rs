//! Domain models for the vetlink engine.

mod appointment;
mod history;
mod owner;
mod pet;
mod relation;

pub use appointment::*;
pub use history::*;
pub use owner::*;
pub use pet::*;
pub use relation::*;
