//! Post-hoc stability audit: blocking-pair detection.
//!
//! ## What Is Checked
//!
//! An assignment is stable when no juggler could move to a circuit it
//! ranked higher than its seat while being at least as good a fit as that
//! circuit's weakest current member. For every seated juggler the auditor
//! probes each strictly-more-preferred circuit and compares the probe
//! score with the incumbent minimum on that roster.
//!
//! The abstract check is "insert the juggler temporarily, take the
//! minimum of the enlarged roster, remove the juggler again". That probe
//! score is strictly greater than the enlarged-roster minimum exactly
//! when it is strictly greater than the incumbent minimum, so the audit
//! borrows the pool immutably and every roster is trivially left exactly
//! as it was found.

use std::collections::BTreeMap;

use crate::arena::MatchPool;
use crate::types::AssignError;

/// Outcome of a stability audit.
///
/// Maps each juggler with at least one blocking pair to the circuits that
/// block, in preference order. Ordered by juggler id so repeated audits
/// of the same assignment report identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StabilityReport {
    violations: BTreeMap<u64, Vec<u64>>,
}

impl StabilityReport {
    /// Whether the assignment admits no blocking pair
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of blocking circuits recorded for one juggler
    pub fn violation_count(&self, juggler_id: u64) -> usize {
        self.violations.get(&juggler_id).map_or(0, Vec::len)
    }

    /// Total blocking pairs across all jugglers
    pub fn total_violations(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    /// The full violation map: juggler id to blocking circuit ids
    #[inline]
    pub fn violations(&self) -> &BTreeMap<u64, Vec<u64>> {
        &self.violations
    }
}

/// Audit the current assignment for blocking pairs.
///
/// For each seated juggler, every circuit strictly more preferred than
/// its seat is probed; a probe score strictly above that roster's
/// incumbent minimum is a blocking pair. Jugglers that never proposed are
/// skipped; there is nothing to audit for them.
///
/// An empty report is the success criterion for a correctly run matching.
///
/// # Errors
///
/// [`AssignError::MalformedInput`] if a probe score overflows fixed-point
/// range.
///
/// # Example
///
/// ```
/// use jugglematch::arena::MatchPool;
/// use jugglematch::engine::{verify_stability, PlacementEngine};
/// use jugglematch::types::{Circuit, Juggler, SkillVector};
///
/// let mut pool = MatchPool::new();
/// pool.add_circuit(Circuit::new(0, SkillVector::new(100_000_000, 0, 0))).unwrap();
/// pool.add_juggler(Juggler::new(0, SkillVector::new(500_000_000, 0, 0), vec![0])).unwrap();
///
/// PlacementEngine::new().place_all(&mut pool).unwrap();
///
/// let report = verify_stability(&pool).unwrap();
/// assert!(report.is_stable());
/// ```
pub fn verify_stability(pool: &MatchPool) -> Result<StabilityReport, AssignError> {
    let mut violations = BTreeMap::new();

    for key in pool.juggler_keys() {
        let juggler = pool.juggler(key).expect("Invalid juggler key");
        let rank = match juggler.preference_rank() {
            Some(rank) => rank,
            None => continue,
        };

        let mut blocking = Vec::new();
        for &circuit_id in &juggler.full_prefs()[..rank] {
            let probe = pool.score_against(key, circuit_id)?;
            if let Some((_, incumbent_min)) = pool.weakest_member(circuit_id) {
                if probe > incumbent_min {
                    blocking.push(circuit_id);
                }
            }
            // An empty roster cannot block: the probe would be its own
            // minimum there
        }

        if !blocking.is_empty() {
            violations.insert(juggler.id, blocking);
        }
    }

    Ok(StabilityReport { violations })
}

// ============================================================================
// Unit Tests
// ============================================================================
