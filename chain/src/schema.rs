//! TRONSCAN TRC-20 transfer records.

use std::fmt;

use chrono::{DateTime, Utc};
use fastexchange_common::{CurrencyValue, Error, Result, TokenKind, TokenValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw on-chain integers, kept as their decimal digits.
///
/// Quantities can exceed any fixed-width number (unlimited approvals are
/// 2^256 - 1), so they are parsed only when a value is asked for. Both JSON
/// strings and JSON integers are accepted.
mod raw_integer {
    use std::fmt;

    use serde::de::{self, Visitor};
    use serde::Deserializer;

    struct RawIntegerVisitor;

    impl<'de> Visitor<'de> for RawIntegerVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a string of digits")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u128<E: de::Error>(self, value: u128) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        deserializer.deserialize_any(RawIntegerVisitor)
    }
}

/// Event emitted by the token contract. Unknown events keep their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Transfer,
    Other(String),
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Transfer" => EventType::Transfer,
            _ => EventType::Other(value),
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Transfer => "Transfer".to_string(),
            EventType::Other(other) => other,
        }
    }
}

/// Execution result reported by the node. Unknown results keep their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultStatus {
    Success,
    Other(String),
}

impl From<String> for ResultStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUCCESS" => ResultStatus::Success,
            _ => ResultStatus::Other(value),
        }
    }
}

impl From<ResultStatus> for String {
    fn from(value: ResultStatus) -> Self {
        match value {
            ResultStatus::Success => "SUCCESS".to_string(),
            ResultStatus::Other(other) => other,
        }
    }
}

/// Token standard of the contract. Unknown standards keep their name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContractType {
    Trc20,
    Other(String),
}

impl From<String> for ContractType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "trc20" => ContractType::Trc20,
            _ => ContractType::Other(value),
        }
    }
}

impl From<ContractType> for String {
    fn from(value: ContractType) -> Self {
        match value {
            ContractType::Trc20 => "trc20".to_string(),
            ContractType::Other(other) => other,
        }
    }
}

/// Token metadata attached to each transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token_id: String,
    pub token_abbr: String,
    pub token_name: String,
    pub token_decimal: u32,
    pub token_can_show: i64,
    pub token_type: String,
    pub token_logo: String,
    pub token_level: String,
    pub issuer_addr: String,
    pub vip: bool,
}

/// A single TRC-20 token transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub transaction_id: String,
    pub status: i64,
    /// Block timestamp, sent as Unix milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub block_ts: DateTime<Utc>,
    pub from_address: String,
    pub to_address: String,
    pub block: u64,
    pub contract_address: String,
    /// Raw on-chain quantity, not yet scaled by the token's decimals.
    #[serde(deserialize_with = "raw_integer::deserialize")]
    pub quant: String,
    /// Raw approved allowance. Unlimited approvals do not fit in a `Decimal`.
    #[serde(deserialize_with = "raw_integer::deserialize")]
    pub approval_amount: String,
    pub confirmed: bool,
    pub revert: bool,
    #[serde(rename = "fromAddressIsContract")]
    pub from_address_is_contract: bool,
    #[serde(rename = "toAddressIsContract")]
    pub to_address_is_contract: bool,
    #[serde(rename = "riskTransaction")]
    pub risk_transaction: bool,
    pub event_type: EventType,
    pub contract_type: ContractType,
    #[serde(rename = "finalResult")]
    pub final_result: ResultStatus,
    #[serde(rename = "contractRet")]
    pub contract_ret: ResultStatus,
    #[serde(rename = "tokenInfo", default, skip_serializing_if = "Option::is_none")]
    pub token_info: Option<TokenInfo>,
}

impl TokenTransfer {
    /// Decimals used to scale `quant`: the token metadata when present,
    /// otherwise the USDT contract's six.
    pub fn decimals(&self) -> u32 {
        self.token_info
            .as_ref()
            .map(|info| info.token_decimal)
            .unwrap_or_else(|| TokenKind::UsdtTrc20.decimals())
    }

    /// The transferred amount as a typed token value.
    ///
    /// Only USDT transfers have a token kind; any other token named by
    /// `tokenInfo` is `UnknownKind`.
    pub fn to_token(&self) -> Result<TokenValue> {
        let kind = TokenKind::UsdtTrc20;
        if let Some(info) = &self.token_info {
            if !info.token_abbr.eq_ignore_ascii_case(kind.symbol()) {
                return Err(Error::UnknownKind(info.token_abbr.clone()));
            }
        }
        TokenValue::from_raw_str(kind, &self.quant, self.decimals())
    }

    /// The transferred amount in USD.
    ///
    /// `None` assumes USDT trades 1:1 with USD. Pass the current rate when
    /// that assumption is not good enough.
    pub fn to_usd(&self, rate: Option<Decimal>) -> Result<CurrencyValue> {
        self.to_token()?.to_currency(rate)
    }

    /// Confirmed, not reverted, and successful on both result fields.
    pub fn is_successful(&self) -> bool {
        self.confirmed
            && !self.revert
            && self.final_result == ResultStatus::Success
            && self.contract_ret == ResultStatus::Success
    }
}

impl fmt::Display for TokenTransfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} ({} raw)",
            self.transaction_id, self.from_address, self.to_address, self.quant
        )
    }
}

/// A page of transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfers {
    /// Total transfers matching the query.
    pub total: u64,
    /// Transfers inside the queried window.
    #[serde(rename = "rangeTotal")]
    pub range_total: u64,
    #[serde(alias = "transfers")]
    pub token_transfers: Vec<TokenTransfer>,
}

impl Transfers {
    /// Transfers that reached a successful final state.
    pub fn successful(&self) -> impl Iterator<Item = &TokenTransfer> {
        self.token_transfers.iter().filter(|t| t.is_successful())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// One successful 2 USDT transfer and one reverted 0.5 USDT transfer.
    pub const TRANSFERS_JSON: &str = r#"{
        "total": 2,
        "rangeTotal": 2,
        "token_transfers": [
            {
                "transaction_id": "9f1c0e6d",
                "status": 0,
                "block_ts": 1700000000000,
                "from_address": "TFromAddr",
                "to_address": "TToAddr",
                "block": 56789012,
                "contract_address": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
                "quant": "2000000",
                "approval_amount": "0",
                "event_type": "Transfer",
                "contract_type": "trc20",
                "confirmed": true,
                "contractRet": "SUCCESS",
                "finalResult": "SUCCESS",
                "tokenInfo": {
                    "tokenId": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
                    "tokenAbbr": "USDT",
                    "tokenName": "Tether USD",
                    "tokenDecimal": 6,
                    "tokenCanShow": 1,
                    "tokenType": "trc20",
                    "tokenLogo": "https://static.tronscan.org/usdt.png",
                    "tokenLevel": "2",
                    "issuerAddr": "THPvaUhoh2Qn2y9THCZML3H815hhFhn5YC",
                    "vip": true
                },
                "fromAddressIsContract": false,
                "toAddressIsContract": false,
                "revert": false,
                "riskTransaction": false
            },
            {
                "transaction_id": "4ab27d90",
                "status": 1,
                "block_ts": 1700000300000,
                "from_address": "TToAddr",
                "to_address": "TFromAddr",
                "block": 56789110,
                "contract_address": "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t",
                "quant": "500000",
                "approval_amount": "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                "event_type": "Approval",
                "contract_type": "trc20",
                "confirmed": true,
                "contractRet": "REVERT",
                "finalResult": "FAILED",
                "fromAddressIsContract": false,
                "toAddressIsContract": true,
                "revert": true,
                "riskTransaction": false
            }
        ]
    }"#;
}
