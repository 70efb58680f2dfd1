//! Wallet RPC client.
//!
//! Typed blocking methods for the Monero wallet RPC interface (the
//! `monero-wallet-rpc` server). Each method builds its params object, makes
//! one call through [`RpcClient`] and unwraps the reply the way that method
//! documents: some pass the whole `result` through, some extract a single
//! field, and a few treat an empty `{}` result as "nothing found".

use crate::client::{RpcClient, RpcConfig};
use crate::error::RpcError;
use crate::requests::{
    Destination, KeyType, SweepAllRequest, TransferFilter, TransferRequest, TransferType,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Response Types
// =============================================================================

/// Balance info from `getbalance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub balance: u64,
    pub unlocked_balance: u64,
    #[serde(default)]
    pub multisig_import_needed: bool,
    #[serde(default)]
    pub per_subaddress: Vec<SubaddressBalance>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-subaddress balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubaddressBalance {
    #[serde(default)]
    pub account_index: u32,
    #[serde(default)]
    pub address_index: u32,
    pub address: String,
    pub balance: u64,
    pub unlocked_balance: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub num_unspent_outputs: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Address info from `getaddress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressResult {
    pub address: String,
    #[serde(default)]
    pub addresses: Vec<AddressEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Single address entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressEntry {
    pub address: String,
    #[serde(default)]
    pub address_index: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub used: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transfer result from `transfer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferResult {
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub tx_key: Option<String>,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub tx_blob: Option<String>,
    #[serde(default)]
    pub tx_metadata: Option<String>,
    #[serde(default)]
    pub unsigned_txset: Option<String>,
    #[serde(default)]
    pub multisig_txset: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result from `sweep_all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepAllResult {
    #[serde(default)]
    pub tx_hash_list: Vec<String>,
    #[serde(default)]
    pub tx_key_list: Vec<String>,
    #[serde(default)]
    pub amount_list: Vec<u64>,
    #[serde(default)]
    pub fee_list: Vec<u64>,
    #[serde(default)]
    pub tx_blob_list: Vec<String>,
    #[serde(default)]
    pub unsigned_txset: Option<String>,
    #[serde(default)]
    pub multisig_txset: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// What `sweep_dust` produced.
///
/// A multisig wallet cannot sign alone, so the server hands back the
/// partially built set instead of transaction hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SweptDust {
    TxHashes(Vec<String>),
    MultisigTxSet(String),
}

/// Payment entry from `get_payments` / `get_bulk_payments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentEntry {
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub tx_hash: String,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub block_height: u64,
    #[serde(default)]
    pub unlock_time: u64,
    #[serde(default)]
    pub subaddr_index: SubaddrIndex,
    #[serde(default)]
    pub address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Subaddress index pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubaddrIndex {
    pub major: u32,
    pub minor: u32,
}

/// Transfer entry from `get_transfers` / `get_transfer_by_txid`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferEntry {
    pub txid: String,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub height: u64,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub fee: u64,
    #[serde(rename = "type")]
    #[serde(default)]
    pub transfer_type: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub unlock_time: u64,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub double_spend_seen: bool,
    #[serde(default)]
    pub subaddr_index: SubaddrIndex,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Transfer history grouped by direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransfersResult {
    #[serde(rename = "in")]
    #[serde(default)]
    pub incoming: Vec<TransferEntry>,
    #[serde(default)]
    pub out: Vec<TransferEntry>,
    #[serde(default)]
    pub pending: Vec<TransferEntry>,
    #[serde(default)]
    pub failed: Vec<TransferEntry>,
    #[serde(default)]
    pub pool: Vec<TransferEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Incoming transfer entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingTransfer {
    pub amount: u64,
    pub spent: bool,
    pub global_index: u64,
    pub tx_hash: String,
    #[serde(default)]
    pub subaddr_index: SubaddrIndex,
    #[serde(default)]
    pub key_image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result from `make_integrated_address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegratedAddressResult {
    pub integrated_address: String,
    pub payment_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result from `split_integrated_address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitIntegratedAddressResult {
    pub standard_address: String,
    pub payment_id: String,
    #[serde(default)]
    pub is_subaddress: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Account info from `get_accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResult {
    pub total_balance: u64,
    pub total_unlocked_balance: u64,
    pub subaddress_accounts: Vec<AccountEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Single account entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account_index: u32,
    pub base_address: String,
    pub balance: u64,
    pub unlocked_balance: u64,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub tag: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result from `create_account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountResult {
    pub account_index: u32,
    pub address: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result from `create_address`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAddressResult {
    pub address: String,
    pub address_index: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// =============================================================================
// Unwrap helpers
// =============================================================================

fn decode<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|e| RpcError::shape(method, e.to_string()))
}

fn into_object(method: &str, value: Value) -> Result<Map<String, Value>, RpcError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(RpcError::shape(
            method,
            format!("expected an object result, got {}", other),
        )),
    }
}

/// Pull one field out of `result`.
fn field<T: DeserializeOwned>(method: &str, result: Value, key: &str) -> Result<T, RpcError> {
    let mut map = into_object(method, result)?;
    match map.remove(key) {
        Some(value) => decode(method, value),
        None => Err(RpcError::shape(method, format!("missing `{}`", key))),
    }
}

/// `{}` means "nothing"; otherwise the list lives under `key`.
fn list_or_empty<T: DeserializeOwned>(
    method: &str,
    result: Value,
    key: &str,
) -> Result<Vec<T>, RpcError> {
    if is_empty_object(&result) {
        return Ok(Vec::new());
    }
    field(method, result, key)
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}

fn account_params(account: Option<u32>) -> Value {
    let mut params = Map::new();
    if let Some(index) = account {
        params.insert("account_index".into(), index.into());
    }
    Value::Object(params)
}

// =============================================================================
// WalletRpc
// =============================================================================

/// Blocking RPC client for a Monero wallet server.
pub struct WalletRpc {
    client: RpcClient,
}

impl WalletRpc {
    /// Client for the default endpoint, `http://127.0.0.1:18082/json_rpc`.
    pub fn new() -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::default())
    }

    /// Create with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::with_config(config)?,
        })
    }

    /// Get the underlying RPC client.
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Call any method through the standard envelope and return its raw `result`.
    pub fn call(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        self.client.call(method, params)
    }

    /// Send `params` as the entire request body, with no envelope.
    ///
    /// The caller supplies the full JSON-RPC object; `method` only labels the
    /// request in logs and errors.
    pub fn ping(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let label = if method.is_empty() { "ping" } else { method };
        self.client.post_raw(label, &params)
    }

    // =========================================================================
    // Balance & Addresses
    // =========================================================================

    /// Get the balance of an account (server default when `None`).
    pub fn getbalance(&self, account: Option<u32>) -> Result<BalanceInfo, RpcError> {
        let result = self.client.call("getbalance", account_params(account))?;
        decode("getbalance", result)
    }

    /// Get the address(es) of an account.
    pub fn getaddress(&self, account: Option<u32>) -> Result<AddressResult, RpcError> {
        let result = self.client.call("getaddress", account_params(account))?;
        decode("getaddress", result)
    }

    /// Current wallet height.
    pub fn getheight(&self) -> Result<u64, RpcError> {
        let result = self.client.call("getheight", serde_json::json!({}))?;
        field("getheight", result, "height")
    }

    // =========================================================================
    // Transfers
    // =========================================================================

    /// Send funds. The request always carries `new_algorithm: true`.
    pub fn transfer(&self, request: &TransferRequest) -> Result<TransferResult, RpcError> {
        let result = self
            .client
            .call("transfer", serde_json::to_value(request)?)?;
        decode("transfer", result)
    }

    /// Send funds, letting the wallet split them over several transactions.
    /// Returns the transaction hashes.
    pub fn transfer_split(&self, destinations: &[Destination]) -> Result<Vec<String>, RpcError> {
        let result = self.client.call(
            "transfer_split",
            serde_json::json!({ "destinations": destinations }),
        )?;
        field("transfer_split", result, "tx_hash_list")
    }

    /// Sweep unmixable dust outputs.
    pub fn sweep_dust(&self, account: Option<u32>) -> Result<SweptDust, RpcError> {
        let result = self.client.call("sweep_dust", account_params(account))?;
        if is_empty_object(&result) {
            return Ok(SweptDust::TxHashes(Vec::new()));
        }

        let mut map = into_object("sweep_dust", result)?;
        if let Some(hashes) = map.remove("tx_hash_list") {
            return Ok(SweptDust::TxHashes(decode("sweep_dust", hashes)?));
        }
        if let Some(txset) = map.remove("multisig_txset") {
            return Ok(SweptDust::MultisigTxSet(decode("sweep_dust", txset)?));
        }
        Err(RpcError::shape(
            "sweep_dust",
            "neither `tx_hash_list` nor `multisig_txset` present",
        ))
    }

    /// Send all unlocked balance to one address.
    pub fn sweep_all(&self, request: &SweepAllRequest) -> Result<SweepAllResult, RpcError> {
        let result = self
            .client
            .call("sweep_all", serde_json::to_value(request)?)?;
        decode("sweep_all", result)
    }

    // =========================================================================
    // Payments & History
    // =========================================================================

    /// Payments received with a given payment id.
    pub fn get_payments(&self, payment_id: &str) -> Result<Vec<PaymentEntry>, RpcError> {
        let result = self.client.call(
            "get_payments",
            serde_json::json!({ "payment_id": payment_id }),
        )?;
        list_or_empty("get_payments", result, "payments")
    }

    /// Payments for several payment ids, from `min_block_height` onwards.
    pub fn get_bulk_payments(
        &self,
        payment_ids: &[&str],
        min_block_height: u64,
    ) -> Result<Vec<PaymentEntry>, RpcError> {
        let result = self.client.call(
            "get_bulk_payments",
            serde_json::json!({
                "payment_ids": payment_ids,
                "min_block_height": min_block_height,
            }),
        )?;
        list_or_empty("get_bulk_payments", result, "payments")
    }

    /// Look up one transfer by transaction id.
    pub fn get_transfer_by_txid(
        &self,
        txid: &str,
        account: Option<u32>,
    ) -> Result<TransferEntry, RpcError> {
        let mut params = account_params(account);
        params["txid"] = Value::from(txid);
        let result = self.client.call("get_transfer_by_txid", params)?;
        field("get_transfer_by_txid", result, "transfer")
    }

    /// Transfer history matching `filter`.
    pub fn get_transfers(&self, filter: &TransferFilter) -> Result<TransfersResult, RpcError> {
        let result = self
            .client
            .call("get_transfers", serde_json::to_value(filter)?)?;
        decode("get_transfers", result)
    }

    /// Outputs received by the wallet.
    pub fn incoming_transfers(
        &self,
        transfer_type: TransferType,
        account: Option<u32>,
    ) -> Result<Vec<IncomingTransfer>, RpcError> {
        let mut params = account_params(account);
        params["transfer_type"] = Value::from(transfer_type.as_str());
        let result = self.client.call("incoming_transfers", params)?;
        field("incoming_transfers", result, "transfers")
    }

    // =========================================================================
    // Keys & Integrated Addresses
    // =========================================================================

    /// Export a secret: the mnemonic seed or a private key.
    pub fn query_key(&self, key_type: KeyType) -> Result<String, RpcError> {
        let result = self.client.call(
            "query_key",
            serde_json::json!({ "key_type": key_type.as_str() }),
        )?;
        field("query_key", result, "key")
    }

    /// Build an integrated address. An empty `payment_id` lets the server
    /// generate a random one.
    pub fn make_integrated_address(
        &self,
        payment_id: &str,
    ) -> Result<IntegratedAddressResult, RpcError> {
        let result = self.client.call(
            "make_integrated_address",
            serde_json::json!({ "payment_id": payment_id }),
        )?;
        decode("make_integrated_address", result)
    }

    /// Split an integrated address into its standard address and payment id.
    pub fn split_integrated_address(
        &self,
        integrated_address: &str,
    ) -> Result<SplitIntegratedAddressResult, RpcError> {
        let result = self.client.call(
            "split_integrated_address",
            serde_json::json!({ "integrated_address": integrated_address }),
        )?;
        decode("split_integrated_address", result)
    }

    // =========================================================================
    // Wallet Management
    // =========================================================================

    /// Persist the open wallet to disk.
    pub fn store(&self) -> Result<(), RpcError> {
        self.client.call("store", serde_json::json!({}))?;
        Ok(())
    }

    /// Create a wallet file. `language` defaults to English.
    pub fn create_wallet(
        &self,
        filename: &str,
        password: &str,
        language: Option<&str>,
    ) -> Result<(), RpcError> {
        self.client.call(
            "create_wallet",
            serde_json::json!({
                "filename": filename,
                "password": password,
                "language": language.unwrap_or("English"),
            }),
        )?;
        Ok(())
    }

    /// Open a wallet file.
    pub fn open_wallet(&self, filename: &str, password: &str) -> Result<(), RpcError> {
        self.client.call(
            "open_wallet",
            serde_json::json!({
                "filename": filename,
                "password": password,
            }),
        )?;
        Ok(())
    }

    /// Store the wallet and shut the server down.
    pub fn stop_wallet(&self) -> Result<(), RpcError> {
        self.client.call("stop_wallet", serde_json::json!({}))?;
        Ok(())
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// List accounts with their balances.
    pub fn get_accounts(&self) -> Result<AccountsResult, RpcError> {
        let result = self.client.call("get_accounts", serde_json::json!({}))?;
        decode("get_accounts", result)
    }

    /// Create a new account, optionally labelled.
    pub fn create_account(&self, label: Option<&str>) -> Result<CreateAccountResult, RpcError> {
        let mut params = Map::new();
        if let Some(label) = label {
            params.insert("label".into(), label.into());
        }
        let result = self.client.call("create_account", Value::Object(params))?;
        decode("create_account", result)
    }

    /// Create a subaddress in an account.
    pub fn create_address(
        &self,
        account: Option<u32>,
        label: Option<&str>,
    ) -> Result<CreateAddressResult, RpcError> {
        let mut params = account_params(account);
        if let Some(label) = label {
            params["label"] = Value::from(label);
        }
        let result = self.client.call("create_address", params)?;
        decode("create_address", result)
    }
}
