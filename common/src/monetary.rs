//! Fiat currency kinds and kind-checked currency values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{Error, KindMismatchError, Result};

/// Closed set of supported fiat currencies.
///
/// The serde tags are the ones used by the upstream rate service (`"usd"`,
/// `"euro"`); `"eur"` is accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CurrencyKind {
    /// United States dollar.
    #[serde(rename = "usd")]
    Usd,
    /// Euro.
    #[serde(rename = "euro", alias = "eur")]
    Eur,
}

impl CurrencyKind {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyKind::Usd => "USD",
            CurrencyKind::Eur => "EUR",
        }
    }

    /// Standard decimal places for display rounding.
    pub fn decimal_places(&self) -> u32 {
        match self {
            CurrencyKind::Usd | CurrencyKind::Eur => 2,
        }
    }

    /// Every supported kind.
    pub fn all() -> [CurrencyKind; 2] {
        [CurrencyKind::Usd, CurrencyKind::Eur]
    }
}

impl fmt::Display for CurrencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(CurrencyKind::Usd),
            "eur" | "euro" => Ok(CurrencyKind::Eur),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

/// An immutable amount of a single fiat currency.
///
/// Arithmetic and ordering are only defined between values of the same kind.
/// The structural `PartialEq`/`Hash` compare `(kind, amount)` so values can
/// live in sets and maps; [`CurrencyValue::try_eq`] is the checked comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyValue {
    kind: CurrencyKind,
    amount: Decimal,
}

impl CurrencyValue {
    /// Create a new value.
    pub fn new(kind: CurrencyKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }

    pub fn usd(amount: Decimal) -> Self {
        Self::new(CurrencyKind::Usd, amount)
    }

    pub fn eur(amount: Decimal) -> Self {
        Self::new(CurrencyKind::Eur, amount)
    }

    /// Create a zero amount of the given kind.
    pub fn zero(kind: CurrencyKind) -> Self {
        Self::new(kind, Decimal::ZERO)
    }

    /// Parse the amount from a decimal string.
    pub fn from_str_amount(amount: &str, kind: CurrencyKind) -> Result<Self> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|e| Error::InvalidAmount(format!("{amount:?}: {e}")))?;
        Ok(Self::new(kind, amount))
    }

    pub fn kind(&self) -> CurrencyKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    fn ensure_same_kind(&self, other: &Self) -> std::result::Result<(), KindMismatchError> {
        if self.kind != other.kind {
            return Err(KindMismatchError::new(self.kind, other.kind));
        }
        Ok(())
    }

    /// Sum of two values of the same kind.
    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_kind(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| Error::Overflow(format!("{self} + {other}")))?;
        Ok(Self::new(self.kind, amount))
    }

    /// Difference of two values of the same kind.
    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.ensure_same_kind(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| Error::Overflow(format!("{self} - {other}")))?;
        Ok(Self::new(self.kind, amount))
    }

    /// Compare two values of the same kind by amount.
    pub fn try_cmp(&self, other: &Self) -> std::result::Result<Ordering, KindMismatchError> {
        self.ensure_same_kind(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Amount equality. `1.0 USD` equals `1.00 USD`.
    pub fn try_eq(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }

    pub fn try_lt(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? == Ordering::Less)
    }

    pub fn try_le(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? != Ordering::Greater)
    }

    pub fn try_gt(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? == Ordering::Greater)
    }

    pub fn try_ge(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? != Ordering::Less)
    }

    /// Fold an iterator of values into one total of `kind`.
    ///
    /// An empty iterator yields zero. The first value of another kind, or the
    /// first overflowing addition, aborts the fold.
    pub fn try_sum<I>(kind: CurrencyKind, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = CurrencyValue>,
    {
        values
            .into_iter()
            .try_fold(Self::zero(kind), |total, value| total.checked_add(&value))
    }

    /// Scale into another kind: `amount * rate`, tagged with `target`.
    ///
    /// This is the only cross-kind operation and performs no kind check.
    pub fn convert_to(&self, target: CurrencyKind, rate: Decimal) -> Result<Self> {
        if rate.is_sign_negative() && !rate.is_zero() {
            return Err(Error::NegativeRate(rate));
        }
        let amount = self
            .amount
            .checked_mul(rate)
            .ok_or_else(|| Error::Overflow(format!("{self} * {rate}")))?;
        Ok(Self::new(target, amount))
    }

    /// Round to the kind's standard decimal places.
    pub fn round(&self) -> Self {
        Self::new(self.kind, self.amount.round_dp(self.kind.decimal_places()))
    }
}

impl fmt::Display for CurrencyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.kind)
    }
}

impl Add for CurrencyValue {
    type Output = Result<CurrencyValue>;

    fn add(self, other: CurrencyValue) -> Self::Output {
        self.checked_add(&other)
    }
}

impl Sub for CurrencyValue {
    type Output = Result<CurrencyValue>;

    fn sub(self, other: CurrencyValue) -> Self::Output {
        self.checked_sub(&other)
    }
}

/// A directed conversion between two currency kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Kind being converted from.
    pub from: CurrencyKind,
    /// Kind being converted to.
    pub to: CurrencyKind,
}

impl CurrencyPair {
    pub fn new(from: CurrencyKind, to: CurrencyKind) -> Self {
        Self { from, to }
    }

    /// The same pair in the opposite direction.
    pub fn inverse(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}
