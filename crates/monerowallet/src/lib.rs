//! Monero wallet RPC client library.
//!
//! Provides a blocking HTTP client for the JSON-RPC interface served by
//! `monero-wallet-rpc`: balances, addresses, transfers, payment and
//! transfer history, keys, and wallet lifecycle (create, open, store, stop).
//!
//! # Example
//!
//! ```ignore
//! use monerowallet::WalletRpc;
//!
//! fn main() -> Result<(), monerowallet::RpcError> {
//!     let wallet = WalletRpc::new()?;
//!     let balance = wallet.getbalance(None)?;
//!     println!("Unlocked: {}", balance.unlocked_balance);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod client;
pub mod requests;
pub mod wallet_rpc;

pub use client::{RpcClient, RpcConfig};
pub use error::RpcError;
pub use requests::{Destination, KeyType, SweepAllRequest, TransferFilter, TransferRequest, TransferType};
pub use wallet_rpc::WalletRpc;

/// Default wallet RPC ports.
pub mod ports {
    pub const WALLET_MAINNET: u16 = 18082;
    pub const WALLET_TESTNET: u16 = 28082;
    pub const WALLET_STAGENET: u16 = 38082;
}
