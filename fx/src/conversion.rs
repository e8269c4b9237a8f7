//! Currency conversion types and operations.

use chrono::{DateTime, Utc};
use fastexchange_common::{CurrencyKind, CurrencyPair, CurrencyValue, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Convert `from` into `to` at `rate`.
///
/// Pure: the result depends only on the inputs.
pub fn exchange(from: &CurrencyValue, to: CurrencyKind, rate: Decimal) -> Result<CurrencyValue> {
    from.convert_to(to, rate)
}

/// Represents a completed currency conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    /// Unique conversion ID.
    pub id: Uuid,
    /// Input amount.
    pub input: CurrencyValue,
    /// Output amount.
    pub output: CurrencyValue,
    /// Rate applied.
    pub rate: Decimal,
    /// Name of the provider that quoted the rate.
    pub source: String,
    /// When the conversion was executed.
    pub executed_at: DateTime<Utc>,
}

impl Conversion {
    /// Create a new conversion record.
    pub fn new(
        input: CurrencyValue,
        output: CurrencyValue,
        rate: Decimal,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            input,
            output,
            rate,
            source: source.into(),
            executed_at: Utc::now(),
        }
    }

    /// Output per unit of input, or `None` when the input is zero or the
    /// quotient does not fit in a `Decimal`.
    pub fn effective_rate(&self) -> Option<Decimal> {
        self.output.amount().checked_div(self.input.amount())
    }

    /// Get the currency pair.
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.input.kind(), self.output.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exchange_scales_amount() {
        let eur = exchange(&CurrencyValue::usd(dec!(1)), CurrencyKind::Eur, dec!(0.92)).unwrap();

        assert_eq!(eur.kind(), CurrencyKind::Eur);
        assert_eq!(eur.amount(), dec!(0.92));
    }

    #[test]
    fn test_exchange_is_deterministic() {
        let usd = CurrencyValue::usd(dec!(250.40));
        let first = exchange(&usd, CurrencyKind::Eur, dec!(0.9)).unwrap();
        let second = exchange(&usd, CurrencyKind::Eur, dec!(0.9)).unwrap();

        assert_eq!(first, second);
        assert_eq!(usd, CurrencyValue::usd(dec!(250.40)));
    }

    #[test]
    fn test_conversion_effective_rate() {
        let input = CurrencyValue::usd(dec!(1000));
        let output = CurrencyValue::eur(dec!(920));

        let conversion = Conversion::new(input, output, dec!(0.92), "TEST");

        assert_eq!(conversion.effective_rate(), Some(dec!(0.92)));
        assert_eq!(conversion.pair(), CurrencyPair::new(CurrencyKind::Usd, CurrencyKind::Eur));
    }

    #[test]
    fn test_zero_input_effective_rate() {
        let conversion = Conversion::new(
            CurrencyValue::zero(CurrencyKind::Eur),
            CurrencyValue::zero(CurrencyKind::Usd),
            dec!(1.08),
            "TEST",
        );

        assert_eq!(conversion.effective_rate(), None);
    }

    #[test]
    fn test_effective_rate_overflow() {
        let conversion = Conversion::new(
            CurrencyValue::usd(dec!(0.0000000000000000000000000001)),
            CurrencyValue::eur(Decimal::MAX),
            dec!(1),
            "TEST",
        );

        assert_eq!(conversion.effective_rate(), None);
    }
}
