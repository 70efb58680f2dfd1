//! Request parameter types for the wallet RPC catalogue.
//!
//! Optional selectors left as `None` are omitted from the params object so
//! the server applies its own default.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Destination for a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub address: String,
    /// Amount in atomic units.
    pub amount: u64,
}

impl Destination {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Transfer priority levels.
pub mod priority {
    pub const DEFAULT: u32 = 0;
    pub const UNIMPORTANT: u32 = 1;
    pub const NORMAL: u32 = 2;
    pub const ELEVATED: u32 = 3;
}

/// Parameters for `transfer`.
///
/// `new_algorithm` is always sent as `true`; construct through
/// [`TransferRequest::new`] and adjust the public fields.
#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    pub destinations: Vec<Destination>,
    #[serde(rename = "account_index", skip_serializing_if = "Option::is_none")]
    pub account: Option<u32>,
    pub do_not_relay: bool,
    pub get_tx_hex: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_time: Option<u64>,
    new_algorithm: bool,
}

impl TransferRequest {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            account: None,
            do_not_relay: false,
            get_tx_hex: true,
            priority: None,
            unlock_time: None,
            new_algorithm: true,
        }
    }

    pub fn account(mut self, account: u32) -> Self {
        self.account = Some(account);
        self
    }

    pub fn do_not_relay(mut self, do_not_relay: bool) -> Self {
        self.do_not_relay = do_not_relay;
        self
    }

    pub fn get_tx_hex(mut self, get_tx_hex: bool) -> Self {
        self.get_tx_hex = get_tx_hex;
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn unlock_time(mut self, unlock_time: u64) -> Self {
        self.unlock_time = Some(unlock_time);
        self
    }
}

/// Parameters for `sweep_all`. Ring mixin is pinned to 4 and priority to 1.
#[derive(Debug, Clone, Serialize)]
pub struct SweepAllRequest {
    pub address: String,
    #[serde(rename = "account_index", skip_serializing_if = "Option::is_none")]
    pub account: Option<u32>,
    pub do_not_relay: bool,
    /// Only sweep outputs below this amount; 0 sweeps everything.
    pub below_amount: u64,
    mixin: u32,
    priority: u32,
}

impl SweepAllRequest {
    pub const MIXIN: u32 = 4;
    pub const PRIORITY: u32 = priority::UNIMPORTANT;

    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            account: None,
            do_not_relay: false,
            below_amount: 0,
            mixin: Self::MIXIN,
            priority: Self::PRIORITY,
        }
    }

    pub fn account(mut self, account: u32) -> Self {
        self.account = Some(account);
        self
    }

    pub fn do_not_relay(mut self, do_not_relay: bool) -> Self {
        self.do_not_relay = do_not_relay;
        self
    }

    pub fn below_amount(mut self, below_amount: u64) -> Self {
        self.below_amount = below_amount;
        self
    }
}

/// Filter for `get_transfers`.
///
/// The known keys are typed; anything else the server accepts goes in
/// `extra` and is sent alongside them. The default filter sends `{}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferFilter {
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub incoming: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by_height: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u64>,
    #[serde(rename = "account_index", skip_serializing_if = "Option::is_none")]
    pub account: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaddr_indices: Option<Vec<u32>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransferFilter {
    /// Every category: in, out, pending, failed and pool.
    pub fn all() -> Self {
        Self {
            incoming: Some(true),
            out: Some(true),
            pending: Some(true),
            failed: Some(true),
            pool: Some(true),
            ..Default::default()
        }
    }

    /// Restrict to blocks in `min_height..=max_height`.
    pub fn heights(mut self, min_height: u64, max_height: u64) -> Self {
        self.filter_by_height = Some(true);
        self.min_height = Some(min_height);
        self.max_height = Some(max_height);
        self
    }

    /// Add an arbitrary filter key.
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// Which outputs `incoming_transfers` reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    #[default]
    All,
    Available,
    Unavailable,
}

/// Key exported by `query_key`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyType {
    #[default]
    Mnemonic,
    ViewKey,
    SpendKey,
}

impl TransferType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mnemonic => "mnemonic",
            Self::ViewKey => "view_key",
            Self::SpendKey => "spend_key",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "available" => Ok(Self::Available),
            "unavailable" => Ok(Self::Unavailable),
            _ => Err(format!(
                "unknown transfer type: {} (use all, available, or unavailable)",
                s
            )),
        }
    }
}

impl FromStr for KeyType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "mnemonic" => Ok(Self::Mnemonic),
            "view_key" => Ok(Self::ViewKey),
            "spend_key" => Ok(Self::SpendKey),
            _ => Err(format!(
                "unknown key type: {} (use mnemonic, view_key, or spend_key)",
                s
            )),
        }
    }
}
