//! fastexchange Chain
//!
//! Token transfer history from the TRONSCAN public API, and the bridge from
//! raw on-chain quantities to typed token and currency values.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fastexchange_chain::Trc20Gateway;
//! use fastexchange_transport::PooledTransport;
//!
//! let gateway = Trc20Gateway::new(Arc::new(PooledTransport::with_defaults()?));
//! let transfers = gateway.check_transactions("TXyz...").await?;
//!
//! for transfer in &transfers.token_transfers {
//!     println!("{} -> {}", transfer.to_token()?, transfer.to_usd(None)?);
//! }
//! ```

pub mod schema;
pub mod trc20;

pub use schema::{ContractType, EventType, ResultStatus, TokenInfo, TokenTransfer, Transfers};
pub use trc20::{Trc20Gateway, TransferQuery};
