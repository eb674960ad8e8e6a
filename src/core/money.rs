use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional tax rate, e.g. `0.23` for 23 %.
///
/// Displays as a whole percentage, truncated: `0.235` → `"23%"`, `0.005` → `"0%"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(rate: Decimal) -> Self {
        Self(rate)
    }

    /// The fractional rate.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// `amount * (1 + rate)`, unrounded. `None` when the result does not fit
    /// in a [`Decimal`].
    pub fn apply(&self, amount: Decimal) -> Option<Decimal> {
        Decimal::ONE.checked_add(self.0)?.checked_mul(amount)
    }

    /// Whole percentage points, truncated toward zero. `None` when the rate
    /// is too large to scale by 100.
    pub fn percent(&self) -> Option<Decimal> {
        self.0
            .checked_mul(Decimal::ONE_HUNDRED)
            .map(|p| p.trunc().normalize())
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(percent) => write!(f, "{percent}%"),
            None => {
                // Whole part followed by the first two fractional digits.
                let whole = self.0.trunc().normalize();
                let cents = (self.0.fract() * Decimal::ONE_HUNDRED)
                    .trunc()
                    .abs()
                    .normalize()
                    .to_string();
                write!(f, "{whole}{cents:0>2}%")
            }
        }
    }
}

impl From<Decimal> for TaxRate {
    fn from(rate: Decimal) -> Self {
        Self(rate)
    }
}

/// An amount paired with a currency code.
///
/// Displays with exactly two decimals (half away from zero) followed by a
/// single space and the code: `"40000.00 PLN"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyAmount {
    pub amount: Decimal,
    pub currency: String,
}

impl CurrencyAmount {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// The amount rounded to cents.
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.rounded(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tax_display_truncates() {
        assert_eq!(TaxRate::new(dec!(0.23)).to_string(), "23%");
        assert_eq!(TaxRate::new(dec!(0.235)).to_string(), "23%");
        assert_eq!(TaxRate::new(dec!(0.999)).to_string(), "99%");
        assert_eq!(TaxRate::new(dec!(0.005)).to_string(), "0%");
        assert_eq!(TaxRate::ZERO.to_string(), "0%");
    }

    #[test]
    fn tax_apply() {
        assert_eq!(TaxRate::new(dec!(0.23)).apply(dec!(35000)), Some(dec!(43050)));
        assert_eq!(TaxRate::ZERO.apply(dec!(5000)), Some(dec!(5000)));
        assert_eq!(TaxRate::new(dec!(0.08)).apply(dec!(0)), Some(dec!(0)));
    }

    #[test]
    fn tax_apply_out_of_range_is_none() {
        let huge = TaxRate::new(dec!(1000000000000000000000000000));
        assert_eq!(huge.apply(dec!(1)), Some(dec!(1000000000000000000000000001)));
        assert_eq!(huge.apply(dec!(100)), None);
        assert_eq!(TaxRate::ZERO.apply(Decimal::MAX), Some(Decimal::MAX));
        assert_eq!(TaxRate::new(dec!(0.23)).apply(Decimal::MAX), None);
    }

    #[test]
    fn huge_rate_still_displays() {
        let huge = TaxRate::new(dec!(1000000000000000000000000000));
        assert_eq!(huge.percent(), None);
        assert_eq!(huge.to_string(), "100000000000000000000000000000%");

        let negative = TaxRate::new(dec!(-1000000000000000000000000000.5));
        assert_eq!(negative.to_string(), "-100000000000000000000000000050%");
    }

    #[test]
    fn currency_display_pads_to_two_decimals() {
        assert_eq!(
            CurrencyAmount::new(dec!(40000), "PLN").to_string(),
            "40000.00 PLN"
        );
        assert_eq!(CurrencyAmount::new(dec!(40), "PLN").to_string(), "40.00 PLN");
        assert_eq!(CurrencyAmount::new(dec!(0.5), "EUR").to_string(), "0.50 EUR");
    }

    #[test]
    fn currency_display_rounds_half_away_from_zero() {
        assert_eq!(CurrencyAmount::new(dec!(1.005), "EUR").to_string(), "1.01 EUR");
        assert_eq!(CurrencyAmount::new(dec!(1.004), "EUR").to_string(), "1.00 EUR");
        assert_eq!(
            CurrencyAmount::new(dec!(1849.6155), "USD").to_string(),
            "1849.62 USD"
        );
    }

    #[test]
    fn tax_rate_deserializes_from_yaml_number() {
        let rate: TaxRate = serde_yaml::from_str("0.23").unwrap();
        assert_eq!(rate.value(), dec!(0.23));
        assert_eq!(rate.to_string(), "23%");
    }
}
