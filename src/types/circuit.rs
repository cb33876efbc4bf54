//! Circuit entity and the juggler-circuit match score.

use crate::types::score::{self, SkillVector};

/// A capacity-limited target group with its own skill emphasis.
///
/// Circuit ids are dense: the i-th circuit registered with the pool must
/// carry id `i`. Preference completion is defined over the contiguous id
/// range `0..circuit_count`, so a sparse id space could never be completed
/// into a total order.
///
/// The uniform team capacity lives on the pool, not here; a circuit is
/// only identity plus weights.
///
/// ## Example
///
/// ```
/// use jugglematch::types::{Circuit, SkillVector};
/// use jugglematch::types::score::to_fixed;
///
/// let circuit = Circuit::new(
///     0,
///     SkillVector::new(
///         to_fixed("7").unwrap(),
///         to_fixed("3").unwrap(),
///         to_fixed("9").unwrap(),
///     ),
/// );
///
/// let skills = SkillVector::new(
///     to_fixed("9").unwrap(),
///     to_fixed("2").unwrap(),
///     to_fixed("5").unwrap(),
/// );
///
/// // 7*9 + 3*2 + 9*5 = 114
/// assert_eq!(circuit.match_value(&skills), to_fixed("114"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    /// Dense circuit identifier
    pub id: u64,

    /// Skill emphasis weights (fixed-point, scaled by 10^8)
    pub weights: SkillVector,
}

impl Circuit {
    /// Create a new circuit
    pub fn new(id: u64, weights: SkillVector) -> Self {
        Self { id, weights }
    }

    /// Match score for a juggler-circuit pairing.
    ///
    /// The weighted sum of this circuit's emphasis against the given
    /// skills. Returns `None` if the sum overflows fixed-point range.
    #[inline]
    pub fn match_value(&self, skills: &SkillVector) -> Option<u64> {
        score::weighted_sum(&self.weights, skills)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
