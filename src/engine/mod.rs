//! Placement engine and stability audit for jugglematch.
//!
//! ## Design Principles
//!
//! 1. **Determinism**: same input and input order always produce the same
//!    assignment
//! 2. **Fixed-Point Math**: no floating-point operations anywhere
//! 3. **Synchronous Execution**: a displacement chain resolves completely
//!    before the next juggler is processed
//! 4. **Explicit Tie-Breaks**: an incumbent never loses its seat to an
//!    equal-scoring newcomer
//!
//! ## Placement Rules
//!
//! - Each juggler proposes to its completed preference list in order
//! - A circuit with spare capacity accepts outright
//! - A full circuit evicts its weakest member (or the newcomer on a score
//!   tie), who proposes onward; chains cascade until a seat is free
//!
//! ## Example
//!
//! ```
//! use jugglematch::arena::MatchPool;
//! use jugglematch::engine::{verify_stability, PlacementEngine};
//! use jugglematch::types::{Circuit, Juggler, SkillVector};
//!
//! let mut pool = MatchPool::new();
//! pool.add_circuit(Circuit::new(0, SkillVector::new(100_000_000, 0, 0))).unwrap();
//! pool.add_circuit(Circuit::new(1, SkillVector::new(0, 100_000_000, 0))).unwrap();
//! pool.add_juggler(Juggler::new(0, SkillVector::new(900_000_000, 100_000_000, 0), vec![0])).unwrap();
//! pool.add_juggler(Juggler::new(1, SkillVector::new(400_000_000, 800_000_000, 0), vec![0, 1])).unwrap();
//!
//! let receipt = PlacementEngine::new().place_all(&mut pool).unwrap();
//! assert_eq!(receipt.jugglers_placed, 2);
//! assert!(verify_stability(&pool).unwrap().is_stable());
//! ```

pub mod placer;
pub mod stability;

pub use placer::{PlaceOutcome, PlacementEngine};
pub use stability::{verify_stability, StabilityReport};
