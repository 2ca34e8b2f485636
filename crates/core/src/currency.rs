//! Currency normalization
//!
//! Converts amounts in any supported currency into the single base currency.
//! The rate table is swapped atomically: readers load a consistent snapshot
//! and never observe a half-applied update.

use arc_swap::ArcSwap;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{CoreError, CoreResult};

/// Base-currency normalizer backed by a shared rate table
///
/// # Examples
/// ```
/// use serf_core::CurrencyNormalizer;
/// use rust_decimal_macros::dec;
///
/// let normalizer = CurrencyNormalizer::with_rates("EUR", [("CNY", dec!(0.13))]).unwrap();
/// assert_eq!(normalizer.convert(dec!(1200), "CNY").unwrap(), dec!(156.00));
/// ```
pub struct CurrencyNormalizer {
    base: String,
    rates: ArcSwap<HashMap<String, Decimal>>,
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl CurrencyNormalizer {
    /// Create a normalizer with an empty rate table
    pub fn new(base_currency: &str) -> Self {
        Self {
            base: normalize_code(base_currency),
            rates: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Create a normalizer seeded with rates
    pub fn with_rates<I, S>(base_currency: &str, rates: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let base = normalize_code(base_currency);
        let mut table = HashMap::new();
        for (code, rate) in rates {
            let code = normalize_code(code.as_ref());
            if rate <= Decimal::ZERO {
                return Err(CoreError::InvalidRate { code, rate });
            }
            if code == base {
                tracing::debug!(currency = %code, "Skipping rate for base currency");
                continue;
            }
            table.insert(code, rate);
        }

        Ok(Self {
            base,
            rates: ArcSwap::from_pointee(table),
        })
    }

    /// Create a normalizer from the engine configuration
    pub fn from_config(config: &EngineConfig) -> CoreResult<Self> {
        Self::with_rates(&config.base_currency, config.rates.clone())
    }

    /// Currency all amounts are converted to
    pub fn base_currency(&self) -> &str {
        &self.base
    }

    /// Convert `amount` of `from_currency` into the base currency
    ///
    /// The base currency converts to itself without touching the rate table.
    /// A product outside the `Decimal` range is an `Overflow` error.
    pub fn convert(&self, amount: Decimal, from_currency: &str) -> CoreResult<Decimal> {
        let code = normalize_code(from_currency);
        if code == self.base {
            return Ok(amount);
        }

        let rate = self
            .rates
            .load()
            .get(&code)
            .copied()
            .ok_or_else(|| CoreError::UnsupportedCurrency(code.clone()))?;

        amount
            .checked_mul(rate)
            .ok_or_else(|| CoreError::overflow(format!("{} {} x {}", amount, code, rate)))
    }

    /// Insert or replace a rate
    pub fn update_rate(&self, code: &str, rate: Decimal) -> CoreResult<()> {
        let code = normalize_code(code);
        if rate <= Decimal::ZERO {
            return Err(CoreError::InvalidRate { code, rate });
        }
        if code == self.base {
            return Err(CoreError::BaseCurrencyRate(code));
        }

        let previous = self.rates.rcu(|current| {
            let mut next = HashMap::clone(current);
            next.insert(code.clone(), rate);
            next
        });

        tracing::info!(
            currency = %code,
            rate = %rate,
            previous = ?previous.get(&code),
            "Exchange rate updated"
        );
        Ok(())
    }

    /// Current rate for a currency, if supported
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        let code = normalize_code(code);
        if code == self.base {
            return Some(Decimal::ONE);
        }
        self.rates.load().get(&code).copied()
    }

    /// Check if a currency can be converted
    pub fn supports(&self, code: &str) -> bool {
        self.rate(code).is_some()
    }

    /// Sorted snapshot of the rate table
    pub fn rates(&self) -> BTreeMap<String, Decimal> {
        let snapshot: Arc<HashMap<String, Decimal>> = self.rates.load_full();
        snapshot
            .iter()
            .map(|(code, rate)| (code.clone(), *rate))
            .collect()
    }
}

impl std::fmt::Debug for CurrencyNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyNormalizer")
            .field("base", &self.base)
            .field("rates", &self.rates())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn normalizer() -> CurrencyNormalizer {
        CurrencyNormalizer::with_rates(
            "EUR",
            [("PEN", dec!(0.24)), ("CNY", dec!(0.13)), ("USD", dec!(0.92))],
        )
        .unwrap()
    }

    #[test]
    fn test_base_currency_identity() {
        let n = normalizer();
        assert_eq!(n.convert(dec!(123.456), "EUR").unwrap(), dec!(123.456));
        assert_eq!(n.convert(dec!(10), "eur").unwrap(), dec!(10));
    }

    #[test]
    fn test_convert_scenarios() {
        let n = normalizer();
        assert_eq!(n.convert(dec!(1200), "CNY").unwrap(), dec!(156.00));
        assert_eq!(n.convert(dec!(800), "PEN").unwrap(), dec!(192.00));
        assert_eq!(n.convert(dec!(800), "PEN").unwrap() * dec!(100), dec!(19200.00));
    }

    #[test]
    fn test_unsupported_currency() {
        let n = normalizer();
        let err = n.convert(dec!(1), "XYZ").unwrap_err();
        assert_eq!(err, CoreError::UnsupportedCurrency("XYZ".to_string()));
    }

    #[test]
    fn test_update_rate() {
        let n = normalizer();
        assert!(!n.supports("MXN"));

        n.update_rate("mxn", dec!(0.050)).unwrap();
        assert_eq!(n.convert(dec!(100), "MXN").unwrap(), dec!(5.000));

        n.update_rate("PEN", dec!(0.25)).unwrap();
        assert_eq!(n.rate("PEN"), Some(dec!(0.25)));
    }

    #[test]
    fn test_update_rate_rejects_non_positive() {
        let n = normalizer();
        assert!(matches!(
            n.update_rate("PEN", dec!(0)),
            Err(CoreError::InvalidRate { .. })
        ));
        assert_eq!(n.rate("PEN"), Some(dec!(0.24)));
    }

    #[test]
    fn test_convert_overflow_is_error() {
        let n = normalizer();
        n.update_rate("GBP", dec!(1.17)).unwrap();

        let err = n.convert(Decimal::MAX, "GBP").unwrap_err();
        assert!(matches!(err, CoreError::Overflow(_)));
        assert_eq!(n.convert(Decimal::MAX, "EUR").unwrap(), Decimal::MAX);
        assert!(n.convert(Decimal::MAX, "USD").is_ok());
    }

    #[test]
    fn test_base_currency_has_no_rate_entry() {
        let n = CurrencyNormalizer::with_rates("usd", [("USD", dec!(0.92)), ("PEN", dec!(0.26))])
            .unwrap();
        assert_eq!(n.rates().len(), 1);
        assert!(!n.rates().contains_key("USD"));
        assert_eq!(n.convert(dec!(10), "USD").unwrap(), dec!(10));

        assert_eq!(
            n.update_rate("usd", dec!(1.1)),
            Err(CoreError::BaseCurrencyRate("USD".to_string()))
        );
        assert_eq!(n.rate("USD"), Some(Decimal::ONE));
    }

    #[test]
    fn test_from_config() {
        let n = CurrencyNormalizer::from_config(&EngineConfig::default()).unwrap();
        assert_eq!(n.base_currency(), "EUR");
        assert_eq!(n.rates().len(), 5);
        assert_eq!(n.rate("EUR"), Some(Decimal::ONE));
    }

    #[test]
    fn test_concurrent_reads_and_updates() {
        let n = normalizer();

        std::thread::scope(|scope| {
            for i in 1..=4 {
                let n = &n;
                scope.spawn(move || {
                    for step in 0..200 {
                        let rate = Decimal::new(20 + ((i * step) % 10) as i64, 2);
                        n.update_rate("PEN", rate).unwrap();
                    }
                });
            }
            for _ in 0..4 {
                let n = &n;
                scope.spawn(move || {
                    for _ in 0..500 {
                        let value = n.convert(dec!(100), "PEN").unwrap();
                        assert!(value >= dec!(20) && value <= dec!(29));
                        assert_eq!(n.convert(dec!(1200), "CNY").unwrap(), dec!(156.00));
                    }
                });
            }
        });
    }

    proptest! {
        #[test]
        fn prop_convert_is_exact_product(cents in 0i64..1_000_000_000, which in 0usize..3) {
            let n = normalizer();
            let (code, rate) = [("PEN", dec!(0.24)), ("CNY", dec!(0.13)), ("USD", dec!(0.92))][which];
            let amount = Decimal::new(cents, 2);
            prop_assert_eq!(n.convert(amount, code).unwrap(), amount * rate);
            prop_assert_eq!(n.convert(amount, "EUR").unwrap(), amount);
        }

        #[test]
        fn prop_convert_is_monotonic(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
            let n = normalizer();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            let low = n.convert(Decimal::new(low, 2), "USD").unwrap();
            let high = n.convert(Decimal::new(high, 2), "USD").unwrap();
            prop_assert!(low <= high);
        }
    }
}
