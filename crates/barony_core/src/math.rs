//! Exact fractional math for deterministic resolution.
//!
//! Battle shares and desertion are real-valued fractions in the rules, and
//! every result is truncated to a whole number of acres, coins or soldiers.
//! Keeping fractions as integer ratios ([`num_rational::Ratio`]) means
//! `fraction × amount` is truncated from the exact value: 0.4 of 40 castles
//! is 16 castles on every platform, never 15.

use num_rational::Ratio;
use serde::Serialize;

/// A non-negative fraction held as an exact integer ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction(Ratio<i64>);

impl Fraction {
    /// The fraction `numerator / denominator`.
    ///
    /// A zero denominator yields [`Fraction::ZERO`] rather than faulting;
    /// "part of an empty total" is no part at all.
    #[must_use]
    pub fn new(numerator: i64, denominator: i64) -> Self {
        if denominator == 0 {
            Self::ZERO
        } else {
            Self(Ratio::new(numerator, denominator))
        }
    }

    /// Nothing.
    pub const ZERO: Self = Self(Ratio::new_raw(0, 1));

    /// The whole.
    pub const ONE: Self = Self(Ratio::new_raw(1, 1));

    /// Apply the fraction to a whole quantity, truncating the result.
    #[must_use]
    pub fn of(self, amount: i32) -> i32 {
        (self.0 * i64::from(amount)).to_integer() as i32
    }

    /// `1 - self`.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(Ratio::from_integer(1) - self.0)
    }

    /// `self / 2`.
    #[must_use]
    pub fn halved(self) -> Self {
        Self(self.0 / 2)
    }

    /// Approximate value, for logging and display only.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        *self.0.numer() as f64 / *self.0.denom() as f64
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Fraction::new(5, 0), Fraction::ZERO);
        assert_eq!(Fraction::new(5, 0).of(1000), 0);
    }

    #[test]
    fn test_of_truncates() {
        // 2000/2040 of 4000 is 3921.57...
        assert_eq!(Fraction::new(2000, 2040).of(4000), 3921);
        assert_eq!(Fraction::new(1, 3).of(10), 3);
        assert_eq!(Fraction::ZERO.of(32000), 0);
    }

    #[test]
    fn test_exact_results_are_not_shaved() {
        // (1 - 100/500) / 2 = 0.4, and 0.4 of 40 is exactly 16.
        let desertion = Fraction::new(100, 500).complement().halved();
        assert_eq!(desertion.of(40), 16);
        assert_eq!(desertion.complement().of(40), 24);
        assert_eq!(Fraction::new(123, 123).of(4000), 4000);
    }

    #[test]
    fn test_complement_truncates_on_its_own() {
        let half = Fraction::new(1, 2);
        assert_eq!(half.of(5), 2);
        assert_eq!(half.complement().of(5), 2);
        assert_eq!(Fraction::new(3, 4).complement(), Fraction::new(1, 4));
    }

    #[test]
    fn test_same_inputs_same_outputs() {
        let a = Fraction::new(1, 3);
        let b = Fraction::new(1, 3);
        assert_eq!(a.of(7), b.of(7));
        assert_eq!(Fraction::ONE.of(7), 7);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::new(1, 4).to_string(), "0.2500");
    }
}
