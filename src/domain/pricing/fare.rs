use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing parameters for a fare quote.
///
/// All rates are per-ride currency amounts and expected to be non-negative;
/// the quote constructor re-establishes the tier ordering regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareSchedule {
    /// Flat amount charged on every ride.
    pub base_fare: Decimal,
    /// Metered amount per trip mile.
    pub rate_per_mile: Decimal,
    /// Surcharge per unit of predicted demand, applied to the private tier.
    pub demand_surcharge_rate: Decimal,
}

impl FareSchedule {
    pub fn new(base_fare: Decimal, rate_per_mile: Decimal, demand_surcharge_rate: Decimal) -> Self {
        Self {
            base_fare,
            rate_per_mile,
            demand_surcharge_rate,
        }
    }
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            base_fare: dec!(2.50),
            rate_per_mile: dec!(1.75),
            demand_surcharge_rate: dec!(0.35),
        }
    }
}

/// Two-tier fare estimate returned to the ride-publishing flow.
///
/// `shared` is the metered low tier, `private` the demand-surcharged high
/// tier. Invariant: both non-negative and `shared <= private`, enforced at
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub shared: Decimal,
    pub private: Decimal,
}

impl PriceQuote {
    /// Builds a quote from the two raw tier figures, rounding to cents,
    /// clamping at zero and swapping the pair if an inverted pricing
    /// function ever produced `shared > private`.
    pub fn new(shared: Decimal, private: Decimal) -> Self {
        let shared = shared.round_dp(2).max(Decimal::ZERO);
        let private = private.round_dp(2).max(Decimal::ZERO);

        if shared <= private {
            Self { shared, private }
        } else {
            Self {
                shared: private,
                private: shared,
            }
        }
    }

    /// Low tier, alias for `shared`.
    pub fn low(&self) -> Decimal {
        self.shared
    }

    /// High tier, alias for `private`.
    pub fn high(&self) -> Decimal {
        self.private
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (shared) / {} (private)", self.shared, self.private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_keeps_ordered_pair() {
        let quote = PriceQuote::new(dec!(10.00), dec!(14.50));
        assert_eq!(quote.low(), dec!(10.00));
        assert_eq!(quote.high(), dec!(14.50));
    }

    #[test]
    fn test_quote_swaps_inverted_pair() {
        let quote = PriceQuote::new(dec!(14.50), dec!(10.00));
        assert_eq!(quote.shared, dec!(10.00));
        assert_eq!(quote.private, dec!(14.50));
    }

    #[test]
    fn test_quote_rounds_to_cents() {
        let quote = PriceQuote::new(dec!(10.004), dec!(10.005));
        assert_eq!(quote.shared, dec!(10.00));
        // banker's rounding lands 10.005 on the even cent
        assert_eq!(quote.private, dec!(10.00));
    }

    #[test]
    fn test_quote_clamps_negative_figures_to_zero() {
        let quote = PriceQuote::new(dec!(-3.00), dec!(5.00));
        assert_eq!(quote.shared, Decimal::ZERO);
        assert_eq!(quote.private, dec!(5.00));
    }

    #[test]
    fn test_default_schedule_rates_are_non_negative() {
        let schedule = FareSchedule::default();
        assert!(schedule.base_fare >= Decimal::ZERO);
        assert!(schedule.rate_per_mile >= Decimal::ZERO);
        assert!(schedule.demand_surcharge_rate >= Decimal::ZERO);
    }

    #[test]
    fn test_quote_display_names_both_tiers() {
        let quote = PriceQuote::new(dec!(8.25), dec!(11.00));
        let rendered = quote.to_string();
        assert!(rendered.contains("shared"));
        assert!(rendered.contains("private"));
    }
}
