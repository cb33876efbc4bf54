//! Deferred-acceptance placement with cascading displacement.
//!
//! ## Algorithm
//!
//! Each juggler proposes to its preferences in order. A circuit with spare
//! capacity accepts outright; a full circuit accepts and then evicts its
//! weakest member, who becomes the next proposer. The chain is a simple
//! loop with one pending evictee slot (no recursion, no queue), and it
//! terminates because every hop advances some juggler's cursor and cursors
//! never retreat.
//!
//! ## Tie-Break
//!
//! When the roster minimum ties the just-seated newcomer's score, the
//! newcomer is the one evicted. An incumbent never loses its seat to an
//! equal-scoring arrival, which is what makes repeated runs over the same
//! input land on the same assignment.
//!
//! ## Ordering
//!
//! `place_all` processes jugglers in input order, and each chain resolves
//! completely before the next juggler is touched. Visitation order can
//! change which stable assignment is reached when several exist; it never
//! changes whether the result is stable.

use log::{debug, trace};

use crate::arena::MatchPool;
use crate::types::{AssignError, AssignmentReceipt, Displacement};

/// Result of placing a single juggler, including its displacement chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceOutcome {
    /// Circuit where the chain came to rest
    pub resting_circuit: u64,

    /// Proposals made while resolving the chain (1 = no displacement)
    pub hops: usize,

    /// Every eviction the chain caused, in order
    pub displacements: Vec<Displacement>,
}

/// Deferred-acceptance placement engine.
///
/// Stateless apart from run counters; all entity state lives in the
/// [`MatchPool`].
///
/// ## Example
///
/// ```
/// use jugglematch::arena::MatchPool;
/// use jugglematch::engine::PlacementEngine;
/// use jugglematch::types::{Circuit, Juggler, SkillVector};
///
/// let mut pool = MatchPool::new();
/// pool.add_circuit(Circuit::new(0, SkillVector::new(100_000_000, 0, 0))).unwrap();
/// pool.add_juggler(Juggler::new(0, SkillVector::new(500_000_000, 0, 0), vec![0])).unwrap();
///
/// let mut engine = PlacementEngine::new();
/// let receipt = engine.place_all(&mut pool).unwrap();
///
/// assert_eq!(receipt.jugglers_placed, 1);
/// assert_eq!(pool.roster_len(0), 1);
/// ```
#[derive(Debug, Default)]
pub struct PlacementEngine {
    /// Evictions across all chains so far
    total_displacements: u64,
}

impl PlacementEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Evictions across every chain this engine has run
    #[inline]
    pub fn total_displacements(&self) -> u64 {
        self.total_displacements
    }

    /// Seat one juggler, resolving the full displacement chain it causes.
    ///
    /// On return every roster the chain touched is back within capacity.
    ///
    /// # Errors
    ///
    /// - [`AssignError::MalformedInput`] if the juggler id is unknown, the
    ///   pool capacity has not been derived, preference completion fails,
    ///   or a score overflows.
    /// - [`AssignError::ExhaustedPreferences`] if any juggler in the chain
    ///   runs out of circuits to try. The run is unsalvageable; rosters
    ///   touched by the failed chain are left mid-chain.
    pub fn place(
        &mut self,
        pool: &mut MatchPool,
        juggler_id: u64,
    ) -> Result<PlaceOutcome, AssignError> {
        if pool.team_capacity() == 0 {
            return Err(AssignError::MalformedInput {
                record: "pool".to_string(),
                reason: "team capacity not derived before placement".to_string(),
            });
        }

        let key = pool.juggler_key(juggler_id)?;
        pool.complete_preferences(key)?;

        let capacity = pool.team_capacity();
        let mut current = key;
        let mut hops = 0usize;
        let mut displacements = Vec::new();

        loop {
            let circuit_id = pool.advance_cursor(current)?;
            let score = pool.score_against(current, circuit_id)?;
            pool.seat(current, circuit_id, score);
            hops += 1;
            trace!(
                "J{} proposes to C{} with score {}",
                pool.juggler(current).expect("Invalid juggler key").id,
                circuit_id,
                score
            );

            if pool.roster_len(circuit_id) <= capacity {
                // Chain ends: no eviction needed
                return Ok(PlaceOutcome {
                    resting_circuit: circuit_id,
                    hops,
                    displacements,
                });
            }

            // Overfull by exactly one: evict the weakest member, except
            // that an incumbent minimum which merely ties the newcomer
            // keeps its seat and the newcomer bounces instead.
            let (weak_key, weak_score) = pool
                .weakest_member(circuit_id)
                .expect("overfull roster has members");
            let (evictee, evictee_score) = if weak_score == score {
                (current, score)
            } else {
                (weak_key, weak_score)
            };

            pool.unseat(evictee, circuit_id);
            let evicted_id = pool.juggler(evictee).expect("Invalid juggler key").id;
            debug!("J{} displaced from C{} (score {})", evicted_id, circuit_id, evictee_score);

            displacements.push(Displacement::new(evicted_id, circuit_id, evictee_score));
            self.total_displacements += 1;
            current = evictee;
        }
    }

    /// Place every registered juggler, in input order.
    ///
    /// Derives the uniform capacity first if the loader has not injected
    /// one. Each juggler's chain resolves completely before the next
    /// juggler is processed.
    ///
    /// # Returns
    ///
    /// An [`AssignmentReceipt`] with run totals and the state root of the
    /// final assignment.
    pub fn place_all(&mut self, pool: &mut MatchPool) -> Result<AssignmentReceipt, AssignError> {
        if pool.team_capacity() == 0 {
            pool.derive_team_capacity()?;
        }

        let mut displaced = 0u64;
        for key in pool.juggler_keys() {
            let juggler_id = pool.juggler(key).expect("Invalid juggler key").id;
            let outcome = self.place(pool, juggler_id)?;
            displaced += outcome.displacements.len() as u64;
        }

        Ok(AssignmentReceipt::new(
            pool.juggler_count() as u64,
            pool.circuit_count() as u64,
            pool.team_capacity() as u64,
            displaced,
            pool.state_root(),
        ))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
