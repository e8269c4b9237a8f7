//! Crypto-token kinds and kind-checked token values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, KindMismatchError, Result};
use crate::monetary::{CurrencyKind, CurrencyValue};

/// Largest scale a `Decimal` can carry.
const MAX_DECIMALS: u32 = 28;

/// A specific token deployed on a specific network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Tether on the TRON network (TRC-20).
    UsdtTrc20,
    /// Tether on Ethereum (ERC-20).
    UsdtEth,
}

impl TokenKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            TokenKind::UsdtTrc20 | TokenKind::UsdtEth => "USDT",
        }
    }

    pub fn network(&self) -> &'static str {
        match self {
            TokenKind::UsdtTrc20 => "trc20",
            TokenKind::UsdtEth => "erc20",
        }
    }

    /// On-chain decimals of the token contract.
    pub fn decimals(&self) -> u32 {
        match self {
            TokenKind::UsdtTrc20 | TokenKind::UsdtEth => 6,
        }
    }

    /// The fiat currency this token is assumed to track 1:1.
    ///
    /// This is a modeling assumption, not a measured rate. Callers that need
    /// an accurate fiat value must pass a real rate to
    /// [`TokenValue::to_currency`].
    pub fn pegged_to(&self) -> CurrencyKind {
        match self {
            TokenKind::UsdtTrc20 | TokenKind::UsdtEth => CurrencyKind::Usd,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.symbol(), self.network().to_uppercase())
    }
}

/// An immutable amount of a single token kind, already scaled by decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenValue {
    kind: TokenKind,
    amount: Decimal,
}

impl TokenValue {
    pub fn new(kind: TokenKind, amount: Decimal) -> Self {
        Self { kind, amount }
    }

    /// Scale a raw on-chain integer quantity: `raw / 10^decimals`.
    pub fn from_raw(kind: TokenKind, raw: Decimal, decimals: u32) -> Result<Self> {
        if !raw.fract().is_zero() {
            return Err(Error::InvalidAmount(format!(
                "raw quantity {raw} is not an integer"
            )));
        }
        if raw.is_sign_negative() && !raw.is_zero() {
            return Err(Error::InvalidAmount(format!(
                "raw quantity {raw} is negative"
            )));
        }
        if decimals > MAX_DECIMALS {
            return Err(Error::InvalidAmount(format!(
                "{decimals} decimals exceeds the supported maximum of {MAX_DECIMALS}"
            )));
        }

        let unit = Decimal::new(1, decimals);
        let amount = raw.checked_mul(unit).ok_or_else(|| {
            Error::InvalidAmount(format!("raw quantity {raw} overflows at {decimals} decimals"))
        })?;

        Ok(Self::new(kind, amount.normalize()))
    }

    /// Like [`TokenValue::from_raw`] for a raw quantity given as an integer string.
    pub fn from_raw_str(kind: TokenKind, raw: &str, decimals: u32) -> Result<Self> {
        let raw = Decimal::from_str(raw.trim())
            .map_err(|e| Error::InvalidAmount(format!("{raw:?}: {e}")))?;
        Self::from_raw(kind, raw, decimals)
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    fn ensure_same_kind(&self, other: &Self) -> std::result::Result<(), KindMismatchError> {
        if self.kind != other.kind {
            return Err(KindMismatchError::new(self.kind, other.kind));
        }
        Ok(())
    }

    pub fn checked_add(&self, other: &Self) -> Result<Self> {
        self.ensure_same_kind(other)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| Error::Overflow(format!("{self} + {other}")))?;
        Ok(Self::new(self.kind, amount))
    }

    pub fn checked_sub(&self, other: &Self) -> Result<Self> {
        self.ensure_same_kind(other)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| Error::Overflow(format!("{self} - {other}")))?;
        Ok(Self::new(self.kind, amount))
    }

    pub fn try_cmp(&self, other: &Self) -> std::result::Result<Ordering, KindMismatchError> {
        self.ensure_same_kind(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn try_eq(&self, other: &Self) -> std::result::Result<bool, KindMismatchError> {
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }

    /// Fiat value of this amount: `amount / rate` in the pegged currency.
    ///
    /// `None` applies the 1:1 peg assumption.
    pub fn to_currency(&self, rate: Option<Decimal>) -> Result<CurrencyValue> {
        let rate = rate.unwrap_or(Decimal::ONE);
        if rate.is_zero() {
            return Err(Error::ZeroRate);
        }
        if rate.is_sign_negative() {
            return Err(Error::NegativeRate(rate));
        }
        let amount = self
            .amount
            .checked_div(rate)
            .ok_or_else(|| Error::Overflow(format!("{self} / {rate}")))?;
        Ok(CurrencyValue::new(self.kind.pegged_to(), amount))
    }

    /// USD value under the 1:1 peg.
    pub fn to_usd(&self) -> Result<CurrencyValue> {
        self.to_currency(None)
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.kind)
    }
}
