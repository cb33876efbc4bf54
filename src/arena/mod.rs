//! Arena storage for the matching run.
//!
//! ## Architecture
//!
//! All entity state lives in one place, the [`MatchPool`]:
//!
//! - **Slab-backed juggler arena**: O(1) lookup by stable slab key;
//!   entities are never removed during a run, so keys double as handles
//! - **Dense circuit table**: circuit ids index their circuit and roster
//!   directly
//! - **Per-circuit rosters**: seating-ordered membership of slab keys
//!
//! Engine operations exchange ids and slab keys only, never references
//! into the arena, so there is exactly one owner of every roster and no
//! aliased mutation.
//!
//! ## Components
//!
//! - [`Roster`]: the members seated on a single circuit
//! - [`MatchPool`]: entities, rosters, capacity, and the reporting surface
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Lookup by slab key | O(1) |
//! | Lookup by juggler id | O(1) |
//! | Seat / unseat | O(capacity) |
//! | Weakest member | O(capacity) |

pub mod pool;
pub mod roster;

pub use pool::MatchPool;
pub use roster::Roster;
