// Service exports
pub mod roster;

pub use roster::{RosterError, RosterStore};
