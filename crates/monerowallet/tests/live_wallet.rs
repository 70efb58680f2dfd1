//! Live tests against a running wallet server.
//!
//! Run with: cargo test -p monerowallet --test live_wallet -- --ignored
//!
//! Requires `monero-wallet-rpc` with an open wallet at MONEROWALLET_HOST /
//! MONEROWALLET_PORT (default: 127.0.0.1:28082, testnet).

use monerowallet::requests::TransferType;
use monerowallet::{ports, RpcConfig, TransferFilter, WalletRpc};

fn wallet() -> WalletRpc {
    let host = std::env::var("MONEROWALLET_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("MONEROWALLET_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(ports::WALLET_TESTNET);
    WalletRpc::with_config(RpcConfig::default().with_host(&host).with_port(port))
        .expect("failed to build client")
}

#[test]
#[ignore]
fn test_height_and_balance() {
    let w = wallet();
    let height = w.getheight().expect("getheight failed");
    assert!(height > 0, "height should be positive");

    let balance = w.getbalance(None).expect("getbalance failed");
    assert!(balance.unlocked_balance <= balance.balance);
    println!("Height: {}, balance: {}", height, balance.balance);
}

#[test]
#[ignore]
fn test_primary_address_matches_accounts() {
    let w = wallet();
    let address = w.getaddress(Some(0)).expect("getaddress failed");
    let accounts = w.get_accounts().expect("get_accounts failed");
    assert_eq!(accounts.subaddress_accounts[0].base_address, address.address);
}

#[test]
#[ignore]
fn test_history_queries() {
    let w = wallet();
    let transfers = w.get_transfers(&TransferFilter::all()).expect("get_transfers failed");
    println!(
        "in: {}, out: {}, pool: {}",
        transfers.incoming.len(),
        transfers.out.len(),
        transfers.pool.len()
    );
    let payments = w.get_payments("0000000000000000").expect("get_payments failed");
    println!("payments with null id: {}", payments.len());
    let incoming = w
        .incoming_transfers(TransferType::All, None)
        .expect("incoming_transfers failed");
    println!("incoming outputs: {}", incoming.len());
}

#[test]
#[ignore]
fn test_unknown_method_is_reported_distinctly() {
    let err = wallet()
        .call("definitely_not_a_wallet_method", serde_json::json!({}))
        .unwrap_err();
    assert!(err.is_method_not_found(), "got {:?}", err);
}
