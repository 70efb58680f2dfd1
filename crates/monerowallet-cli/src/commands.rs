//! CLI command implementations.

use crate::AppContext;
use monerowallet::{
    Destination, KeyType, SweepAllRequest, TransferFilter, TransferRequest, TransferType,
    WalletRpc,
};
use serde::Serialize;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn connect(ctx: &AppContext) -> std::result::Result<WalletRpc, Box<dyn std::error::Error>> {
    Ok(WalletRpc::with_config(ctx.config.clone())?)
}

fn print_json<T: Serialize>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn prompt_password(prompt: &str) -> std::result::Result<String, Box<dyn std::error::Error>> {
    let pass = rpassword::prompt_password(prompt)?;
    if pass.is_empty() {
        return Err("password cannot be empty".into());
    }
    Ok(pass)
}

fn prompt_password_confirm() -> std::result::Result<String, Box<dyn std::error::Error>> {
    let pass = prompt_password("Wallet password: ")?;
    let confirm = prompt_password("Confirm password: ")?;
    if pass != confirm {
        return Err("passwords do not match".into());
    }
    Ok(pass)
}

// ─── Balance & addresses ────────────────────────────────────────────────────

pub fn show_balance(ctx: &AppContext, account: Option<u32>) -> Result {
    print_json(&connect(ctx)?.getbalance(account)?)
}

pub fn show_address(ctx: &AppContext, account: Option<u32>) -> Result {
    print_json(&connect(ctx)?.getaddress(account)?)
}

pub fn show_height(ctx: &AppContext) -> Result {
    println!("{}", connect(ctx)?.getheight()?);
    Ok(())
}

// ─── Transfers ──────────────────────────────────────────────────────────────

pub fn transfer(
    ctx: &AppContext,
    address: &str,
    amount: u64,
    account: Option<u32>,
    priority: Option<u32>,
    do_not_relay: bool,
) -> Result {
    let mut request = TransferRequest::new(vec![Destination::new(address, amount)])
        .do_not_relay(do_not_relay);
    request.account = account;
    request.priority = priority;

    log::info!("sending {} atomic units to {}", amount, address);
    print_json(&connect(ctx)?.transfer(&request)?)
}

pub fn sweep_dust(ctx: &AppContext, account: Option<u32>) -> Result {
    print_json(&connect(ctx)?.sweep_dust(account)?)
}

pub fn sweep_all(
    ctx: &AppContext,
    address: &str,
    account: Option<u32>,
    below_amount: u64,
    do_not_relay: bool,
) -> Result {
    let mut request = SweepAllRequest::new(address)
        .below_amount(below_amount)
        .do_not_relay(do_not_relay);
    request.account = account;
    print_json(&connect(ctx)?.sweep_all(&request)?)
}

// ─── Payments & history ─────────────────────────────────────────────────────

pub fn show_payments(ctx: &AppContext, payment_ids: &[String], min_block_height: u64) -> Result {
    let wallet = connect(ctx)?;
    let payments = match payment_ids {
        [single] if min_block_height == 0 => wallet.get_payments(single)?,
        ids => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            wallet.get_bulk_payments(&ids, min_block_height)?
        }
    };
    print_json(&payments)
}

pub fn show_transfer(ctx: &AppContext, txid: &str, account: Option<u32>) -> Result {
    print_json(&connect(ctx)?.get_transfer_by_txid(txid, account)?)
}

pub fn show_history(ctx: &AppContext, account: Option<u32>) -> Result {
    let mut filter = TransferFilter::all();
    filter.account = account;
    print_json(&connect(ctx)?.get_transfers(&filter)?)
}

pub fn show_incoming(ctx: &AppContext, transfer_type: TransferType, account: Option<u32>) -> Result {
    print_json(&connect(ctx)?.incoming_transfers(transfer_type, account)?)
}

// ─── Keys & integrated addresses ────────────────────────────────────────────

pub fn query_key(ctx: &AppContext, key_type: KeyType) -> Result {
    println!("{}", connect(ctx)?.query_key(key_type)?);
    Ok(())
}

pub fn make_integrated_address(ctx: &AppContext, payment_id: &str) -> Result {
    print_json(&connect(ctx)?.make_integrated_address(payment_id)?)
}

pub fn split_integrated_address(ctx: &AppContext, integrated_address: &str) -> Result {
    print_json(&connect(ctx)?.split_integrated_address(integrated_address)?)
}

// ─── Wallet management ──────────────────────────────────────────────────────

pub fn store(ctx: &AppContext) -> Result {
    connect(ctx)?.store()?;
    println!("Wallet saved.");
    Ok(())
}

pub fn create_wallet(ctx: &AppContext, filename: &str, language: &str) -> Result {
    let password = prompt_password_confirm()?;
    connect(ctx)?.create_wallet(filename, &password, Some(language))?;
    println!("Created wallet {}.", filename);
    Ok(())
}

pub fn open_wallet(ctx: &AppContext, filename: &str) -> Result {
    let password = prompt_password("Wallet password: ")?;
    connect(ctx)?.open_wallet(filename, &password)?;
    println!("Opened wallet {}.", filename);
    Ok(())
}

pub fn stop_wallet(ctx: &AppContext) -> Result {
    connect(ctx)?.stop_wallet()?;
    println!("Wallet server stopping.");
    Ok(())
}

// ─── Accounts ───────────────────────────────────────────────────────────────

pub fn show_accounts(ctx: &AppContext) -> Result {
    print_json(&connect(ctx)?.get_accounts()?)
}

pub fn create_account(ctx: &AppContext, label: Option<&str>) -> Result {
    print_json(&connect(ctx)?.create_account(label)?)
}

pub fn create_address(ctx: &AppContext, account: Option<u32>, label: Option<&str>) -> Result {
    print_json(&connect(ctx)?.create_address(account, label)?)
}

// ─── Raw ────────────────────────────────────────────────────────────────────

pub fn raw_call(ctx: &AppContext, method: &str, params: &str) -> Result {
    let params: serde_json::Value = serde_json::from_str(params)?;
    print_json(&connect(ctx)?.call(method, params)?)
}
