//! Core data models for the showcase page.

mod achievement;
mod game;
mod ids;
mod profile;
mod showcase;

pub use achievement::*;
pub use game::*;
pub use ids::*;
pub use profile::*;
pub use showcase::*;
