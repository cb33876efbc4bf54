//! Core data types for jugglematch
//!
//! All output records implement SSZ serialization for deterministic
//! encoding. All numeric skill/score values use fixed-point representation
//! (scaled by 10^8).
//!
//! ## Types
//!
//! - [`Juggler`]: an agent seeking a seat, with ranked preferences
//! - [`Circuit`]: a capacity-limited group with skill emphasis weights
//! - [`SkillVector`]: the three rated dimensions shared by both sides
//! - [`RosterEntry`], [`Displacement`], [`AssignmentReceipt`]: reporter records
//! - [`AssignError`]: the two fatal failure kinds

mod circuit;
mod error;
mod juggler;
mod report;
pub mod score;

// Re-export all types at module level
pub use circuit::Circuit;
pub use error::AssignError;
pub use juggler::Juggler;
pub use report::{AssignmentReceipt, Displacement, RosterEntry};
pub use score::SkillVector;
