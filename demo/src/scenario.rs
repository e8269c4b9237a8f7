//! Demo scenarios.

use anyhow::{anyhow, Context};
use fastexchange_chain::{TokenTransfer, Trc20Gateway};
use fastexchange_common::{CurrencyKind, CurrencyValue, Error, KindMismatchError, TokenValue};
use fastexchange_fx::ExchangeClient;
use rust_decimal::Decimal;
use tracing::info;

/// Outcome of the arithmetic walkthrough.
#[derive(Debug, Clone)]
pub struct ArithmeticReport {
    /// 1 USD added to itself.
    pub doubled: CurrencyValue,
    /// Comparing USD with EUR.
    pub compare_error: KindMismatchError,
    /// Adding EUR to USD.
    pub add_error: KindMismatchError,
}

/// Same-kind arithmetic succeeds, mixed-kind arithmetic is refused.
pub fn arithmetic() -> anyhow::Result<ArithmeticReport> {
    let usd = CurrencyValue::usd(Decimal::ONE);
    let eur = CurrencyValue::eur(Decimal::ONE);

    let doubled = (usd + usd)?;
    info!(value = %doubled, "Added USD to USD");

    let compare_error = match doubled.try_ge(&eur) {
        Ok(_) => return Err(anyhow!("comparing {doubled} with {eur} should fail")),
        Err(e) => e,
    };
    info!(error = %compare_error, "Comparison refused");

    let add_error = match CurrencyValue::usd(Decimal::ONE).checked_add(&eur) {
        Err(Error::KindMismatch(e)) => e,
        Err(other) => return Err(other.into()),
        Ok(_) => return Err(anyhow!("adding {eur} to USD should fail")),
    };
    info!(error = %add_error, "Addition refused");

    Ok(ArithmeticReport {
        doubled,
        compare_error,
        add_error,
    })
}

/// Convert `amount` of `from` into `to` at the live rate.
pub async fn exchange(
    client: &ExchangeClient,
    amount: Decimal,
    from: CurrencyKind,
    to: CurrencyKind,
) -> anyhow::Result<CurrencyValue> {
    let value = CurrencyValue::new(from, amount);
    let converted = client
        .exchange(&value, to)
        .await
        .with_context(|| format!("exchanging {value} to {to} via {}", client.name()))?;

    info!(from = %value, to = %converted, "Exchanged");
    Ok(converted)
}

/// One transfer traced from raw quantity to EUR.
#[derive(Debug, Clone)]
pub struct TransfersReport {
    pub transfer: TokenTransfer,
    pub token: TokenValue,
    pub usd: CurrencyValue,
    pub eur: CurrencyValue,
}

/// Fetch a wallet's transfers and follow the one at `index` through
/// token, USD and EUR.
pub async fn transfers(
    gateway: &Trc20Gateway,
    client: &ExchangeClient,
    wallet: &str,
    index: usize,
) -> anyhow::Result<TransfersReport> {
    let page = gateway
        .check_transactions(wallet)
        .await
        .with_context(|| format!("fetching transfers for {wallet}"))?;

    let transfer = page
        .token_transfers
        .get(index)
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "transfer {index} not found, wallet has {} in this page",
                page.token_transfers.len()
            )
        })?;

    let token = transfer.to_token()?;
    let usd = transfer.to_usd(None)?;
    let eur = client.exchange(&usd, CurrencyKind::Eur).await?;

    info!(
        transaction = %transfer.transaction_id,
        token = %token,
        usd = %usd,
        eur = %eur,
        "Traced transfer"
    );

    Ok(TransfersReport {
        transfer,
        token,
        usd,
        eur,
    })
}
