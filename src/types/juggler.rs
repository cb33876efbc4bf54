//! Juggler entity and preference-list completion.
//!
//! ## Preference Completion
//!
//! A juggler ranks only some circuits explicitly. Before the engine may
//! process it, the explicit list is extended into a total order over every
//! circuit id: the explicit prefix in its given order, then all unranked
//! circuit ids ascending. The ascending fill is the documented tie-break
//! for circuits the juggler did not rank, and makes the engine's outcome
//! reproducible across implementations.
//!
//! ## Cursor
//!
//! The cursor indexes the completed list. `None` means the juggler has not
//! proposed anywhere yet; it advances by exactly one per proposal and
//! never retreats. While seated, `full_prefs[cursor]` is the circuit the
//! juggler occupies.

use crate::types::error::AssignError;
use crate::types::score::SkillVector;

/// An agent seeking assignment to a circuit.
///
/// Identity and skills are immutable after construction; `full_prefs` is
/// computed once by [`Juggler::complete_preferences`]; `cursor` and
/// `match_score` mutate only inside the placement engine.
///
/// ## Example
///
/// ```
/// use jugglematch::types::{Juggler, SkillVector};
/// use jugglematch::types::score::to_fixed;
///
/// let mut juggler = Juggler::new(
///     0,
///     SkillVector::new(
///         to_fixed("9").unwrap(),
///         to_fixed("2").unwrap(),
///         to_fixed("5").unwrap(),
///     ),
///     vec![2, 0],
/// );
///
/// juggler.complete_preferences(4).unwrap();
/// assert_eq!(juggler.full_prefs(), &[2, 0, 1, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Juggler {
    /// Unique juggler identifier
    pub id: u64,

    /// Skill ratings (fixed-point, scaled by 10^8)
    pub skills: SkillVector,

    /// Explicit ranked circuit ids, most preferred first
    input_prefs: Vec<u64>,

    /// Completed total order over all circuit ids
    /// Empty until `complete_preferences` has run
    full_prefs: Vec<u64>,

    /// Index into `full_prefs` of the current proposal
    /// `None` = has not proposed anywhere yet
    pub cursor: Option<usize>,

    /// Score against the circuit at `cursor`
    /// Meaningful only while seated; stale otherwise
    pub match_score: u64,
}

impl Juggler {
    /// Create a new juggler with an explicit (possibly partial) preference list
    ///
    /// # Arguments
    ///
    /// * `id` - Unique juggler identifier
    /// * `skills` - Skill ratings (fixed-point)
    /// * `input_prefs` - Ranked circuit ids, most preferred first
    pub fn new(id: u64, skills: SkillVector, input_prefs: Vec<u64>) -> Self {
        Self {
            id,
            skills,
            input_prefs,
            full_prefs: Vec::new(),
            cursor: None,
            match_score: 0,
        }
    }

    /// The explicit ranked preferences, as given
    #[inline]
    pub fn input_prefs(&self) -> &[u64] {
        &self.input_prefs
    }

    /// The completed total preference order
    ///
    /// Empty until [`Juggler::complete_preferences`] has run.
    #[inline]
    pub fn full_prefs(&self) -> &[u64] {
        &self.full_prefs
    }

    /// Whether the preference list has been completed
    #[inline]
    pub fn is_completed(&self) -> bool {
        !self.full_prefs.is_empty()
    }

    /// The circuit this juggler currently occupies, if any
    #[inline]
    pub fn assigned_circuit(&self) -> Option<u64> {
        self.cursor.and_then(|k| self.full_prefs.get(k).copied())
    }

    /// Rank of the current seat in the completed list (0 = top choice)
    #[inline]
    pub fn preference_rank(&self) -> Option<usize> {
        self.cursor
    }

    /// Extend the explicit preference list into a total order over all
    /// `circuit_count` circuit ids.
    ///
    /// The explicit prefix is preserved in order; every unranked circuit id
    /// follows in ascending order. Pure in its inputs: invoking it twice
    /// with the same `circuit_count` produces the identical list.
    ///
    /// # Errors
    ///
    /// [`AssignError::MalformedInput`] if the explicit list references an
    /// id outside `[0, circuit_count)` or ranks the same circuit twice.
    pub fn complete_preferences(&mut self, circuit_count: usize) -> Result<(), AssignError> {
        let mut ranked = vec![false; circuit_count];

        for &pref in &self.input_prefs {
            let idx = usize::try_from(pref)
                .ok()
                .filter(|&i| i < circuit_count)
                .ok_or_else(|| {
                    AssignError::malformed_juggler(
                        self.id,
                        format!("preference id {} out of range (0..{})", pref, circuit_count),
                    )
                })?;
            if ranked[idx] {
                return Err(AssignError::malformed_juggler(
                    self.id,
                    format!("duplicate preference id {}", pref),
                ));
            }
            ranked[idx] = true;
        }

        let mut full = Vec::with_capacity(circuit_count);
        full.extend_from_slice(&self.input_prefs);
        for (idx, seen) in ranked.iter().enumerate() {
            if !seen {
                full.push(idx as u64);
            }
        }

        self.full_prefs = full;
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
