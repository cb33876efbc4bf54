//! Fixed-point skill and score utilities.
//!
//! ## Overview
//!
//! All skill ratings, circuit weights, and match scores in jugglematch use
//! fixed-point representation to avoid floating-point errors. Values are
//! stored as u64 scaled by 10^8.
//!
//! ## Why Fixed-Point?
//!
//! Floating-point arithmetic can produce different results on different
//! hardware, breaking determinism. A stable assignment must be reproducible
//! bit-for-bit from the same input, so every score comparison the engine
//! makes runs on exact integers.
//!
//! ## Scale Factor
//!
//! We use a scale factor of 10^8 (100,000,000), providing 8 decimal places.
//! Skill ratings are small (single or double digits), so weighted sums stay
//! far below the representable maximum.
//!
//! ## Examples
//!
//! ```
//! use jugglematch::types::score::{SCALE, to_fixed, from_fixed};
//!
//! // Convert a decimal skill rating to fixed-point
//! let rating = to_fixed("9.5").unwrap();
//! assert_eq!(rating, 950_000_000);
//!
//! // Convert back to string
//! let s = from_fixed(rating);
//! assert_eq!(s, "9.50000000");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use ssz_rs::prelude::*;

/// Scaling factor for fixed-point arithmetic: 10^8
///
/// This provides 8 decimal places of precision.
pub const SCALE: u64 = 100_000_000;

/// Maximum value that can be safely represented
///
/// u64::MAX / SCALE ≈ 184,467,440,737 (184 billion)
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

/// Number of rated skill dimensions
pub const SKILL_DIMS: usize = 3;

// ============================================================================
// SkillVector
// ============================================================================

/// A juggler's skill ratings, or a circuit's emphasis weights.
///
/// The same three dimensions rate both sides of a pairing: a circuit's
/// weight vector expresses how much each dimension matters to it, and the
/// match score is the weighted sum of the two vectors.
///
/// All components are fixed-point (scaled by 10^8).
///
/// ## Example
///
/// ```
/// use jugglematch::types::score::{SkillVector, to_fixed};
///
/// let skills = SkillVector::new(
///     to_fixed("9").unwrap(),   // coordination
///     to_fixed("2").unwrap(),   // endurance
///     to_fixed("5").unwrap(),   // flair
/// );
/// assert_eq!(skills.coordination, 900_000_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, SimpleSerialize)]
pub struct SkillVector {
    /// Hand-eye coordination rating (fixed-point)
    pub coordination: u64,

    /// Endurance rating (fixed-point)
    pub endurance: u64,

    /// Flair rating (fixed-point)
    pub flair: u64,
}

impl SkillVector {
    /// Create a skill vector from raw fixed-point components
    pub fn new(coordination: u64, endurance: u64, flair: u64) -> Self {
        Self {
            coordination,
            endurance,
            flair,
        }
    }

    /// The components in dimension order
    #[inline]
    pub fn as_array(&self) -> [u64; SKILL_DIMS] {
        [self.coordination, self.endurance, self.flair]
    }
}

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// # Arguments
///
/// * `s` - Decimal string (e.g., "9.5")
///
/// # Returns
///
/// * `Some(u64)` - The fixed-point representation
/// * `None` - If parsing fails or value is negative/out of range
///
/// # Example
///
/// ```
/// use jugglematch::types::score::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("9.5"), Some(950_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Returns `None` if the value is negative or out of range.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    let rounded = scaled.round_dp(0);
    rounded.to_u64()
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// # Example
///
/// ```
/// use jugglematch::types::score::from_fixed;
///
/// assert_eq!(from_fixed(100_000_000), "1.00000000");
/// assert_eq!(from_fixed(6_300_000_000), "63.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{:.8}", decimal)
}

/// Convert fixed-point u64 to a human-readable string (trimmed trailing zeros)
///
/// # Example
///
/// ```
/// use jugglematch::types::score::from_fixed_trimmed;
///
/// assert_eq!(from_fixed_trimmed(100_000_000), "1");
/// assert_eq!(from_fixed_trimmed(950_000_000), "9.5");
/// ```
pub fn from_fixed_trimmed(value: u64) -> String {
    let decimal = fixed_to_decimal(value);
    format!("{}", decimal.normalize())
}

// ============================================================================
// Arithmetic Functions (using rust_decimal for safety)
// ============================================================================

/// Multiply two fixed-point values
///
/// This performs proper rescaling to avoid overflow.
///
/// # Returns
///
/// * `Some(u64)` - Result of a * b (properly scaled)
/// * `None` - If overflow occurs
///
/// # Example
///
/// ```
/// use jugglematch::types::score::checked_mul;
///
/// // 7.0 * 9.0 = 63.0
/// let a = 700_000_000u64;
/// let b = 900_000_000u64;
/// assert_eq!(checked_mul(a, b), Some(6_300_000_000));
/// ```
pub fn checked_mul(a: u64, b: u64) -> Option<u64> {
    let da = fixed_to_decimal(a);
    let db = fixed_to_decimal(b);
    let result = da.checked_mul(db)?;
    decimal_to_fixed(result)
}

/// Add two fixed-point values
///
/// Returns `None` on overflow.
pub fn checked_add(a: u64, b: u64) -> Option<u64> {
    a.checked_add(b)
}

/// Subtract two fixed-point values
///
/// Returns `None` on underflow.
pub fn checked_sub(a: u64, b: u64) -> Option<u64> {
    a.checked_sub(b)
}

// ============================================================================
// Scoring
// ============================================================================

/// Weighted sum of a circuit's weights against a juggler's skills.
///
/// This is the sole compatibility metric of the system: the dot product of
/// the two vectors over the shared dimensions, in fixed point. It is pure
/// and recomputed identically wherever it is needed; callers must not cache
/// it across roster changes.
///
/// # Returns
///
/// * `Some(u64)` - The match score (fixed-point)
/// * `None` - If any intermediate product or the sum overflows
///
/// # Example
///
/// ```
/// use jugglematch::types::score::{weighted_sum, SkillVector, to_fixed};
///
/// let weights = SkillVector::new(
///     to_fixed("7").unwrap(),
///     to_fixed("3").unwrap(),
///     to_fixed("9").unwrap(),
/// );
/// let skills = SkillVector::new(
///     to_fixed("9").unwrap(),
///     to_fixed("2").unwrap(),
///     to_fixed("5").unwrap(),
/// );
///
/// // 7*9 + 3*2 + 9*5 = 114
/// assert_eq!(weighted_sum(&weights, &skills), to_fixed("114"));
/// ```
pub fn weighted_sum(weights: &SkillVector, skills: &SkillVector) -> Option<u64> {
    let w = weights.as_array();
    let s = skills.as_array();

    let mut total = 0u64;
    for i in 0..SKILL_DIMS {
        let term = checked_mul(w[i], s[i])?;
        total = checked_add(total, term)?;
    }
    Some(total)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_constant() {
        assert_eq!(SCALE, 100_000_000);
    }

    #[test]
    fn test_to_fixed_basic() {
        assert_eq!(to_fixed("1.0"), Some(100_000_000));
        assert_eq!(to_fixed("1"), Some(100_000_000));
        assert_eq!(to_fixed("0.5"), Some(50_000_000));
        assert_eq!(to_fixed("0.00000001"), Some(1));
        assert_eq!(to_fixed("9.5"), Some(950_000_000));
    }

    #[test]
    fn test_to_fixed_edge_cases() {
        assert_eq!(to_fixed("0"), Some(0));
        assert_eq!(to_fixed("0.0"), Some(0));

        // Negative values should return None
        assert_eq!(to_fixed("-1.0"), None);

        // Invalid strings should return None
        assert_eq!(to_fixed("abc"), None);
        assert_eq!(to_fixed(""), None);
    }

    #[test]
    fn test_from_fixed() {
        assert_eq!(from_fixed(100_000_000), "1.00000000");
        assert_eq!(from_fixed(50_000_000), "0.50000000");
        assert_eq!(from_fixed(1), "0.00000001");
        assert_eq!(from_fixed(0), "0.00000000");
    }

    #[test]
    fn test_from_fixed_trimmed() {
        assert_eq!(from_fixed_trimmed(100_000_000), "1");
        assert_eq!(from_fixed_trimmed(950_000_000), "9.5");
        assert_eq!(from_fixed_trimmed(123_456_789), "1.23456789");
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.0", "0.5", "9.5", "0.00000001", "114"];

        for s in values {
            let fixed = to_fixed(s).unwrap();
            let back = from_fixed(fixed);
            // Parse both to compare (handles trailing zeros)
            let original = Decimal::from_str(s).unwrap();
            let converted = Decimal::from_str(&back).unwrap();
            assert_eq!(original, converted, "Roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_checked_mul() {
        // 7.0 * 9.0 = 63.0
        let a = to_fixed("7.0").unwrap();
        let b = to_fixed("9.0").unwrap();
        assert_eq!(checked_mul(a, b), to_fixed("63.0"));

        // 2.5 * 4.0 = 10.0
        let a = to_fixed("2.5").unwrap();
        let b = to_fixed("4.0").unwrap();
        assert_eq!(checked_mul(a, b), to_fixed("10.0"));
    }

    #[test]
    fn test_checked_add() {
        let a = to_fixed("100.0").unwrap();
        let b = to_fixed("50.5").unwrap();
        assert_eq!(checked_add(a, b), to_fixed("150.5"));

        // Overflow should return None
        assert_eq!(checked_add(u64::MAX, 1), None);
    }

    #[test]
    fn test_checked_sub() {
        let a = to_fixed("100.0").unwrap();
        let b = to_fixed("50.5").unwrap();
        assert_eq!(checked_sub(a, b), to_fixed("49.5"));

        // Underflow should return None
        assert_eq!(checked_sub(0, 1), None);
    }

    #[test]
    fn test_skill_vector_new() {
        let v = SkillVector::new(1, 2, 3);
        assert_eq!(v.coordination, 1);
        assert_eq!(v.endurance, 2);
        assert_eq!(v.flair, 3);
        assert_eq!(v.as_array(), [1, 2, 3]);
    }

    #[test]
    fn test_weighted_sum() {
        let weights = SkillVector::new(
            to_fixed("7").unwrap(),
            to_fixed("3").unwrap(),
            to_fixed("9").unwrap(),
        );
        let skills = SkillVector::new(
            to_fixed("9").unwrap(),
            to_fixed("2").unwrap(),
            to_fixed("5").unwrap(),
        );

        // 63 + 6 + 45 = 114
        assert_eq!(weighted_sum(&weights, &skills), to_fixed("114"));
    }

    #[test]
    fn test_weighted_sum_zero() {
        let zero = SkillVector::default();
        let skills = SkillVector::new(
            to_fixed("9").unwrap(),
            to_fixed("2").unwrap(),
            to_fixed("5").unwrap(),
        );

        assert_eq!(weighted_sum(&zero, &skills), Some(0));
        assert_eq!(weighted_sum(&skills, &zero), Some(0));
    }

    #[test]
    fn test_weighted_sum_is_symmetric_in_role() {
        // The dot product does not care which side is the weight vector
        let a = SkillVector::new(
            to_fixed("7").unwrap(),
            to_fixed("3").unwrap(),
            to_fixed("9").unwrap(),
        );
        let b = SkillVector::new(
            to_fixed("9").unwrap(),
            to_fixed("2").unwrap(),
            to_fixed("5").unwrap(),
        );

        assert_eq!(weighted_sum(&a, &b), weighted_sum(&b, &a));
    }

    #[test]
    fn test_weighted_sum_overflow() {
        let huge = SkillVector::new(u64::MAX, 0, 0);
        assert_eq!(weighted_sum(&huge, &huge), None);
    }

    #[test]
    fn test_skill_vector_ssz_roundtrip() {
        let v = SkillVector::new(900_000_000, 200_000_000, 500_000_000);

        let serialized = ssz_rs::serialize(&v).expect("Failed to serialize");
        let deserialized: SkillVector =
            ssz_rs::deserialize(&serialized).expect("Failed to deserialize");

        assert_eq!(v, deserialized);
        // 3 fields * 8 bytes = 24 bytes
        assert_eq!(serialized.len(), 24);
    }
}
