//! The match pool: arena storage for jugglers, circuits, and rosters.
//!
//! ## Architecture
//!
//! The pool is the single owner of every entity in a run:
//!
//! - **Slab**: pre-allocated juggler storage; O(1) key lookup. Entities
//!   are never removed, so slab keys are stable for the life of a run and
//!   double as the handles every engine operation exchanges.
//! - **HashMap**: juggler id to slab key mapping for O(1) lookup by id
//! - **Dense circuit table**: circuit ids are required dense ascending,
//!   so a circuit id indexes its `Circuit` and `Roster` directly
//!
//! Engine operations take and return ids and slab keys, never raw entity
//! handles; all mutation funnels through the pool.
//!
//! ## Deterministic Orders
//!
//! - Jugglers iterate in input (insertion) order
//! - Circuits iterate ascending by id
//! - Roster members iterate in seating order
//!
//! ## Example
//!
//! ```
//! use jugglematch::arena::MatchPool;
//! use jugglematch::types::{Circuit, Juggler, SkillVector};
//!
//! let mut pool = MatchPool::new();
//! pool.add_circuit(Circuit::new(0, SkillVector::new(1, 0, 0))).unwrap();
//! pool.add_circuit(Circuit::new(1, SkillVector::new(0, 1, 0))).unwrap();
//!
//! pool.add_juggler(Juggler::new(0, SkillVector::new(5, 5, 5), vec![1])).unwrap();
//! pool.add_juggler(Juggler::new(1, SkillVector::new(3, 3, 3), vec![0])).unwrap();
//!
//! assert_eq!(pool.derive_team_capacity().unwrap(), 1);
//! ```

use std::collections::HashMap;

use slab::Slab;

use crate::arena::Roster;
use crate::types::{AssignError, AssignmentReceipt, Circuit, Juggler, RosterEntry};

/// Arena of jugglers and circuits with per-circuit rosters.
///
/// Owns all entity state for a single matching run. Created once from the
/// loader's records; entities live until the pool is dropped.
#[derive(Debug, Clone)]
pub struct MatchPool {
    /// Pre-allocated juggler storage
    /// Key: slab key, Value: Juggler
    jugglers: Slab<Juggler>,

    /// Juggler id to slab key mapping (for O(1) lookup by id)
    juggler_index: HashMap<u64, usize>,

    /// Circuits, indexed by their dense id
    circuits: Vec<Circuit>,

    /// One roster per circuit, parallel to `circuits`
    rosters: Vec<Roster>,

    /// Uniform per-circuit capacity; 0 until derived or injected
    team_capacity: usize,
}

impl Default for MatchPool {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchPool {
    /// Create a new empty pool
    pub fn new() -> Self {
        Self {
            jugglers: Slab::new(),
            juggler_index: HashMap::new(),
            circuits: Vec::new(),
            rosters: Vec::new(),
            team_capacity: 0,
        }
    }

    /// Create a pool with pre-allocated juggler capacity
    ///
    /// # Example
    ///
    /// ```
    /// use jugglematch::arena::MatchPool;
    ///
    /// let pool = MatchPool::with_capacity(2_700);
    /// assert!(pool.is_empty());
    /// ```
    pub fn with_capacity(juggler_capacity: usize) -> Self {
        Self {
            jugglers: Slab::with_capacity(juggler_capacity),
            juggler_index: HashMap::with_capacity(juggler_capacity),
            circuits: Vec::new(),
            rosters: Vec::new(),
            team_capacity: 0,
        }
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Register a circuit.
    ///
    /// Circuit ids must be dense ascending: the i-th circuit added must
    /// carry id `i`. Preference completion is defined over the contiguous
    /// range `0..circuit_count`, so anything else is unsatisfiable.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the id is out of sequence
    /// (which also covers duplicates).
    pub fn add_circuit(&mut self, circuit: Circuit) -> Result<(), AssignError> {
        let expected = self.circuits.len() as u64;
        if circuit.id != expected {
            return Err(AssignError::malformed_circuit(
                circuit.id,
                format!("circuit ids must be dense ascending (expected {})", expected),
            ));
        }

        self.rosters.push(Roster::new(circuit.id));
        self.circuits.push(circuit);
        Ok(())
    }

    /// Register a juggler.
    ///
    /// # Returns
    ///
    /// The slab key for the new juggler.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] on a duplicate juggler id.
    pub fn add_juggler(&mut self, juggler: Juggler) -> Result<usize, AssignError> {
        if self.juggler_index.contains_key(&juggler.id) {
            return Err(AssignError::malformed_juggler(juggler.id, "duplicate id"));
        }

        let id = juggler.id;
        let key = self.jugglers.insert(juggler);
        self.juggler_index.insert(id, key);
        Ok(key)
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    /// Number of registered jugglers
    #[inline]
    pub fn juggler_count(&self) -> usize {
        self.jugglers.len()
    }

    /// Number of registered circuits
    #[inline]
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Check if the pool holds no jugglers
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jugglers.is_empty()
    }

    /// The uniform per-circuit capacity (0 = not yet derived)
    #[inline]
    pub fn team_capacity(&self) -> usize {
        self.team_capacity
    }

    /// Inject a loader-derived capacity.
    ///
    /// Normally [`MatchPool::derive_team_capacity`] is used instead; this
    /// exists for loaders that compute the capacity themselves.
    pub fn set_team_capacity(&mut self, capacity: usize) {
        self.team_capacity = capacity;
    }

    /// Derive the uniform capacity as `floor(jugglers / circuits)`.
    ///
    /// Populations that do not divide evenly leave the remainder jugglers
    /// without a seat anywhere; the run will surface that as
    /// [`AssignError::ExhaustedPreferences`] when a chain runs off the
    /// end of a list.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if there are no circuits or the
    /// derived capacity would be zero.
    pub fn derive_team_capacity(&mut self) -> Result<usize, AssignError> {
        if self.circuits.is_empty() {
            return Err(AssignError::MalformedInput {
                record: "pool".to_string(),
                reason: "no circuits registered".to_string(),
            });
        }

        let capacity = self.jugglers.len() / self.circuits.len();
        if capacity == 0 {
            return Err(AssignError::MalformedInput {
                record: "pool".to_string(),
                reason: format!(
                    "{} jugglers across {} circuits derives a capacity of zero",
                    self.jugglers.len(),
                    self.circuits.len()
                ),
            });
        }

        self.team_capacity = capacity;
        Ok(capacity)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Get the slab key for a juggler id
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the id is unknown.
    pub fn juggler_key(&self, juggler_id: u64) -> Result<usize, AssignError> {
        self.juggler_index
            .get(&juggler_id)
            .copied()
            .ok_or_else(|| AssignError::malformed_juggler(juggler_id, "unknown juggler id"))
    }

    /// Get a reference to a juggler by slab key
    #[inline]
    pub fn juggler(&self, key: usize) -> Option<&Juggler> {
        self.jugglers.get(key)
    }

    /// Get a reference to a juggler by id
    #[inline]
    pub fn juggler_by_id(&self, juggler_id: u64) -> Option<&Juggler> {
        self.juggler_index
            .get(&juggler_id)
            .and_then(|&key| self.jugglers.get(key))
    }

    /// Juggler slab keys in input order
    pub fn juggler_keys(&self) -> Vec<usize> {
        // Keys are never removed, so slab iteration order is input order
        self.jugglers.iter().map(|(key, _)| key).collect()
    }

    /// Get a reference to a circuit by id
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the id is unknown.
    pub fn circuit(&self, circuit_id: u64) -> Result<&Circuit, AssignError> {
        usize::try_from(circuit_id)
            .ok()
            .and_then(|idx| self.circuits.get(idx))
            .ok_or_else(|| AssignError::malformed_circuit(circuit_id, "unknown circuit id"))
    }

    /// Get a reference to a circuit's roster
    #[inline]
    pub fn roster(&self, circuit_id: u64) -> Option<&Roster> {
        usize::try_from(circuit_id)
            .ok()
            .and_then(|idx| self.rosters.get(idx))
    }

    /// Number of members seated on a circuit
    ///
    /// # Panics
    ///
    /// Panics if the circuit id is unknown.
    #[inline]
    pub fn roster_len(&self, circuit_id: u64) -> usize {
        self.rosters[circuit_id as usize].len()
    }

    // ========================================================================
    // Engine Primitives
    // ========================================================================
    //
    // These are the only operations that mutate cursor, match_score, or
    // roster membership. The placement engine drives them; everything else
    // observes.

    /// Complete a juggler's preference list if not already done
    pub fn complete_preferences(&mut self, key: usize) -> Result<(), AssignError> {
        let circuit_count = self.circuits.len();
        let juggler = self
            .jugglers
            .get_mut(key)
            .ok_or_else(|| AssignError::MalformedInput {
                record: format!("key {}", key),
                reason: "unknown juggler key".to_string(),
            })?;

        if juggler.is_completed() {
            return Ok(());
        }
        juggler.complete_preferences(circuit_count)
    }

    /// Advance a juggler's cursor to its next preference.
    ///
    /// # Returns
    ///
    /// The circuit id now under the cursor.
    ///
    /// # Errors
    ///
    /// [`AssignError::ExhaustedPreferences`] if every circuit has already
    /// been tried.
    ///
    /// # Panics
    ///
    /// Panics if the key is not in the arena.
    pub fn advance_cursor(&mut self, key: usize) -> Result<u64, AssignError> {
        let juggler = self.jugglers.get_mut(key).expect("Invalid juggler key");

        let next = match juggler.cursor {
            None => 0,
            Some(k) => k + 1,
        };
        if next >= juggler.full_prefs().len() {
            return Err(AssignError::ExhaustedPreferences {
                juggler: juggler.id,
                attempts: juggler.full_prefs().len(),
            });
        }

        juggler.cursor = Some(next);
        Ok(juggler.full_prefs()[next])
    }

    /// Score a juggler against a circuit.
    ///
    /// Recomputed on every call; never cached across roster changes.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the circuit id is unknown or
    /// the score overflows fixed-point range.
    pub fn score_against(&self, key: usize, circuit_id: u64) -> Result<u64, AssignError> {
        let juggler = self.jugglers.get(key).expect("Invalid juggler key");
        let circuit = self.circuit(circuit_id)?;

        circuit.match_value(&juggler.skills).ok_or_else(|| {
            AssignError::malformed_juggler(juggler.id, format!("score overflow at C{}", circuit_id))
        })
    }

    /// Seat a juggler on a circuit with its realized score.
    ///
    /// The caller is responsible for having advanced the cursor so that
    /// the juggler's current preference is `circuit_id`.
    ///
    /// # Panics
    ///
    /// Panics if the key or circuit id is not in the arena.
    pub fn seat(&mut self, key: usize, circuit_id: u64, score: u64) {
        let juggler = self.jugglers.get_mut(key).expect("Invalid juggler key");
        juggler.match_score = score;
        self.rosters[circuit_id as usize].push(key);
    }

    /// Unseat a juggler from a circuit's roster.
    ///
    /// The juggler's cursor is left where it is; the next proposal
    /// advances it.
    ///
    /// # Returns
    ///
    /// `true` if the juggler was seated there.
    pub fn unseat(&mut self, key: usize, circuit_id: u64) -> bool {
        self.rosters[circuit_id as usize].remove(key)
    }

    /// The weakest member of a circuit's roster and its score.
    ///
    /// Ties resolve to the first-seated member among the minimums.
    pub fn weakest_member(&self, circuit_id: u64) -> Option<(usize, u64)> {
        self.rosters[circuit_id as usize].weakest(&self.jugglers)
    }

    // ========================================================================
    // Reporting Surface
    // ========================================================================

    /// Every seated juggler as a [`RosterEntry`], in deterministic order:
    /// circuits ascending, members in seating order.
    pub fn roster_entries(&self) -> Vec<RosterEntry> {
        let mut entries = Vec::with_capacity(self.jugglers.len());
        for roster in &self.rosters {
            for &key in roster.members() {
                let juggler = self.jugglers.get(key).expect("Invalid roster member key");
                let rank = juggler
                    .preference_rank()
                    .expect("seated juggler has a cursor") as u64;
                entries.push(RosterEntry::new(
                    roster.circuit_id,
                    juggler.id,
                    juggler.match_score,
                    rank,
                ));
            }
        }
        entries
    }

    /// A juggler's score against every circuit on its explicit
    /// (truncated) preference list, in ranked order.
    ///
    /// This is the per-member match table reporters print next to each
    /// roster.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the juggler id is unknown, a
    /// listed circuit does not exist, or a score overflows.
    pub fn choice_scores(&self, juggler_id: u64) -> Result<Vec<(u64, u64)>, AssignError> {
        let key = self.juggler_key(juggler_id)?;
        let juggler = self.jugglers.get(key).expect("Invalid juggler key");

        let mut scores = Vec::with_capacity(juggler.input_prefs().len());
        for &circuit_id in juggler.input_prefs() {
            let score = self.score_against(key, circuit_id)?;
            scores.push((circuit_id, score));
        }
        Ok(scores)
    }

    /// SHA-256 state root over the SSZ encoding of every roster entry.
    ///
    /// Deterministic for a given final assignment; two runs over the same
    /// input produce the same root.
    pub fn state_root(&self) -> [u8; 32] {
        let mut bytes = Vec::with_capacity(self.jugglers.len() * 32);
        for entry in self.roster_entries() {
            let encoded = ssz_rs::serialize(&entry).expect("fixed-size SSZ cannot fail");
            bytes.extend_from_slice(&encoded);
        }
        AssignmentReceipt::compute_hash(&bytes)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SkillVector;
    use crate::types::score::to_fixed;

    fn fx(s: &str) -> u64 {
        to_fixed(s).unwrap()
    }

    fn two_circuit_pool() -> MatchPool {
        let mut pool = MatchPool::new();
        pool.add_circuit(Circuit::new(0, SkillVector::new(fx("7"), fx("3"), fx("9"))))
            .unwrap();
        pool.add_circuit(Circuit::new(1, SkillVector::new(fx("2"), fx("8"), fx("1"))))
            .unwrap();
        pool
    }

    #[test]
    fn test_pool_new() {
        let pool = MatchPool::new();

        assert!(pool.is_empty());
        assert_eq!(pool.juggler_count(), 0);
        assert_eq!(pool.circuit_count(), 0);
        assert_eq!(pool.team_capacity(), 0);
    }

    #[test]
    fn test_pool_with_capacity() {
        let pool = MatchPool::with_capacity(10_000);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_add_circuit_dense_ids() {
        let mut pool = MatchPool::new();
        pool.add_circuit(Circuit::new(0, SkillVector::default())).unwrap();
        pool.add_circuit(Circuit::new(1, SkillVector::default())).unwrap();

        assert_eq!(pool.circuit_count(), 2);
        assert_eq!(pool.circuit(1).unwrap().id, 1);
    }

    #[test]
    fn test_add_circuit_rejects_gap() {
        let mut pool = MatchPool::new();
        pool.add_circuit(Circuit::new(0, SkillVector::default())).unwrap();

        let err = pool.add_circuit(Circuit::new(2, SkillVector::default())).unwrap_err();
        assert!(matches!(err, AssignError::MalformedInput { .. }));
        assert!(err.to_string().contains("C2"));
    }

    #[test]
    fn test_add_circuit_rejects_duplicate() {
        let mut pool = MatchPool::new();
        pool.add_circuit(Circuit::new(0, SkillVector::default())).unwrap();

        let err = pool.add_circuit(Circuit::new(0, SkillVector::default())).unwrap_err();
        assert!(matches!(err, AssignError::MalformedInput { .. }));
    }

    #[test]
    fn test_add_juggler_rejects_duplicate_id() {
        let mut pool = two_circuit_pool();
        pool.add_juggler(Juggler::new(5, SkillVector::default(), vec![]))
            .unwrap();

        let err = pool
            .add_juggler(Juggler::new(5, SkillVector::default(), vec![]))
            .unwrap_err();
        assert!(matches!(err, AssignError::MalformedInput { .. }));
        assert!(err.to_string().contains("J5"));
    }

    #[test]
    fn test_derive_team_capacity() {
        let mut pool = two_circuit_pool();
        for id in 0..6 {
            pool.add_juggler(Juggler::new(id, SkillVector::default(), vec![]))
                .unwrap();
        }

        assert_eq!(pool.derive_team_capacity().unwrap(), 3);
        assert_eq!(pool.team_capacity(), 3);
    }

    #[test]
    fn test_derive_team_capacity_floors() {
        let mut pool = two_circuit_pool();
        for id in 0..7 {
            pool.add_juggler(Juggler::new(id, SkillVector::default(), vec![]))
                .unwrap();
        }

        // 7 jugglers / 2 circuits = 3 (remainder dropped)
        assert_eq!(pool.derive_team_capacity().unwrap(), 3);
    }

    #[test]
    fn test_derive_team_capacity_no_circuits() {
        let mut pool = MatchPool::new();
        pool.add_juggler(Juggler::new(0, SkillVector::default(), vec![]))
            .unwrap();

        let err = pool.derive_team_capacity().unwrap_err();
        assert!(matches!(err, AssignError::MalformedInput { .. }));
    }

    #[test]
    fn test_derive_team_capacity_zero() {
        // More circuits than jugglers floors to zero
        let mut pool = two_circuit_pool();
        pool.add_juggler(Juggler::new(0, SkillVector::default(), vec![]))
            .unwrap();

        let err = pool.derive_team_capacity().unwrap_err();
        assert!(matches!(err, AssignError::MalformedInput { .. }));
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn test_juggler_lookup() {
        let mut pool = two_circuit_pool();
        let key = pool
            .add_juggler(Juggler::new(42, SkillVector::default(), vec![1]))
            .unwrap();

        assert_eq!(pool.juggler_key(42).unwrap(), key);
        assert_eq!(pool.juggler(key).unwrap().id, 42);
        assert_eq!(pool.juggler_by_id(42).unwrap().id, 42);
        assert!(pool.juggler_key(99).is_err());
        assert!(pool.juggler_by_id(99).is_none());
    }

    #[test]
    fn test_juggler_keys_input_order() {
        let mut pool = two_circuit_pool();
        let k0 = pool
            .add_juggler(Juggler::new(10, SkillVector::default(), vec![]))
            .unwrap();
        let k1 = pool
            .add_juggler(Juggler::new(3, SkillVector::default(), vec![]))
            .unwrap();
        let k2 = pool
            .add_juggler(Juggler::new(7, SkillVector::default(), vec![]))
            .unwrap();

        // Input order, not id order
        assert_eq!(pool.juggler_keys(), vec![k0, k1, k2]);
    }

    #[test]
    fn test_advance_cursor_and_exhaustion() {
        let mut pool = two_circuit_pool();
        let key = pool
            .add_juggler(Juggler::new(0, SkillVector::default(), vec![1]))
            .unwrap();
        pool.complete_preferences(key).unwrap();

        assert_eq!(pool.advance_cursor(key).unwrap(), 1);
        assert_eq!(pool.advance_cursor(key).unwrap(), 0);

        let err = pool.advance_cursor(key).unwrap_err();
        assert_eq!(
            err,
            AssignError::ExhaustedPreferences {
                juggler: 0,
                attempts: 2
            }
        );
    }

    #[test]
    fn test_score_against() {
        let mut pool = two_circuit_pool();
        let key = pool
            .add_juggler(Juggler::new(
                0,
                SkillVector::new(fx("9"), fx("2"), fx("5")),
                vec![],
            ))
            .unwrap();

        // C0: 7*9 + 3*2 + 9*5 = 114
        assert_eq!(pool.score_against(key, 0).unwrap(), fx("114"));
        // C1: 2*9 + 8*2 + 1*5 = 39
        assert_eq!(pool.score_against(key, 1).unwrap(), fx("39"));

        assert!(pool.score_against(key, 9).is_err());
    }

    #[test]
    fn test_seat_unseat() {
        let mut pool = two_circuit_pool();
        let key = pool
            .add_juggler(Juggler::new(0, SkillVector::default(), vec![]))
            .unwrap();

        pool.seat(key, 1, 555);
        assert_eq!(pool.roster_len(1), 1);
        assert_eq!(pool.juggler(key).unwrap().match_score, 555);
        assert!(pool.roster(1).unwrap().contains(key));

        assert!(pool.unseat(key, 1));
        assert_eq!(pool.roster_len(1), 0);
        assert!(!pool.unseat(key, 1));
    }

    #[test]
    fn test_weakest_member() {
        let mut pool = two_circuit_pool();
        let k0 = pool
            .add_juggler(Juggler::new(0, SkillVector::default(), vec![]))
            .unwrap();
        let k1 = pool
            .add_juggler(Juggler::new(1, SkillVector::default(), vec![]))
            .unwrap();

        pool.seat(k0, 0, 800);
        pool.seat(k1, 0, 300);

        assert_eq!(pool.weakest_member(0), Some((k1, 300)));
        assert_eq!(pool.weakest_member(1), None);
    }

    #[test]
    fn test_roster_entries_order() {
        let mut pool = two_circuit_pool();
        let k0 = pool
            .add_juggler(Juggler::new(10, SkillVector::default(), vec![1]))
            .unwrap();
        let k1 = pool
            .add_juggler(Juggler::new(20, SkillVector::default(), vec![0]))
            .unwrap();

        pool.complete_preferences(k0).unwrap();
        pool.complete_preferences(k1).unwrap();

        pool.advance_cursor(k1).unwrap();
        pool.seat(k1, 0, 7);
        pool.advance_cursor(k0).unwrap();
        pool.seat(k0, 1, 9);

        let entries = pool.roster_entries();
        assert_eq!(entries.len(), 2);

        // Circuits ascending regardless of seating sequence
        assert_eq!(entries[0], RosterEntry::new(0, 20, 7, 0));
        assert_eq!(entries[1], RosterEntry::new(1, 10, 9, 0));
    }

    #[test]
    fn test_choice_scores() {
        let mut pool = two_circuit_pool();
        pool.add_juggler(Juggler::new(
            0,
            SkillVector::new(fx("9"), fx("2"), fx("5")),
            vec![1, 0],
        ))
        .unwrap();

        let scores = pool.choice_scores(0).unwrap();
        assert_eq!(scores, vec![(1, fx("39")), (0, fx("114"))]);

        assert!(pool.choice_scores(99).is_err());
    }

    #[test]
    fn test_state_root_determinism() {
        let build = || {
            let mut pool = two_circuit_pool();
            let k0 = pool
                .add_juggler(Juggler::new(0, SkillVector::default(), vec![0]))
                .unwrap();
            pool.complete_preferences(k0).unwrap();
            pool.advance_cursor(k0).unwrap();
            pool.seat(k0, 0, 42);
            pool.state_root()
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_state_root_sensitive_to_assignment() {
        let mut pool = two_circuit_pool();
        let k0 = pool
            .add_juggler(Juggler::new(0, SkillVector::default(), vec![0, 1]))
            .unwrap();
        pool.complete_preferences(k0).unwrap();

        pool.advance_cursor(k0).unwrap();
        pool.seat(k0, 0, 42);
        let root_at_c0 = pool.state_root();

        pool.unseat(k0, 0);
        pool.advance_cursor(k0).unwrap();
        pool.seat(k0, 1, 42);
        let root_at_c1 = pool.state_root();

        assert_ne!(root_at_c0, root_at_c1);
    }

    #[test]
    fn test_empty_pool_state_root() {
        let pool = MatchPool::new();
        // Hash of zero entries is still well-defined
        assert_eq!(pool.state_root(), AssignmentReceipt::compute_hash(&[]));
    }
}
