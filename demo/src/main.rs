//! fastexchange Demo
//!
//! Walks through kind-checked arithmetic, live currency exchange and TRC-20
//! transfer lookups from the command line.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use fastexchange_chain::Trc20Gateway;
use fastexchange_common::CurrencyKind;
use fastexchange_fx::ExchangeClient;
use fastexchange_transport::{PooledTransport, Transport, TransportConfig};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod scenario;

/// fastexchange demo CLI
#[derive(Parser, Debug)]
#[command(name = "fastexchange-demo")]
#[command(about = "Typed currency values, exchange rates and TRC-20 transfers")]
struct Args {
    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show same-kind arithmetic and refused mixed-kind arithmetic
    Arithmetic,

    /// Convert an amount between currencies at the current rate
    Exchange {
        /// Amount to convert
        #[arg(long, default_value = "1")]
        amount: Decimal,

        /// Source currency (usd, eur)
        #[arg(long, default_value = "usd")]
        from: CurrencyKind,

        /// Target currency (usd, eur)
        #[arg(long, default_value = "eur")]
        to: CurrencyKind,
    },

    /// Look up a wallet's USDT transfers and value one of them in EUR
    Transfers {
        /// TRON wallet address
        #[arg(long)]
        wallet: String,

        /// Position of the transfer in the returned page
        #[arg(long, default_value = "0")]
        index: usize,
    },
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn transport() -> anyhow::Result<Arc<dyn Transport>> {
    let config = TransportConfig::from_env();
    info!(
        timeout_secs = config.timeout.as_secs(),
        user_agent = %config.user_agent,
        "Building HTTP transport"
    );
    Ok(Arc::new(PooledTransport::new(config)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    match args.command {
        Command::Arithmetic => {
            let report = scenario::arithmetic()?;
            println!("{}", report.doubled);
            println!("{}", report.compare_error);
            println!("{}", report.add_error);
        }
        Command::Exchange { amount, from, to } => {
            let client = ExchangeClient::currency_me_uk(transport()?);
            let converted = scenario::exchange(&client, amount, from, to).await?;
            println!("{converted}");
        }
        Command::Transfers { wallet, index } => {
            let transport = transport()?;
            let gateway = Trc20Gateway::new(Arc::clone(&transport));
            let client = ExchangeClient::currency_me_uk(transport);

            let report = scenario::transfers(&gateway, &client, &wallet, index).await?;
            println!("{}", report.transfer);
            println!("{}", report.token);
            println!("{}", report.usd);
            println!("{}", report.eur);
        }
    }

    Ok(())
}
