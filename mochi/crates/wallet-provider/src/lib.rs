//! Wallet provider abstraction.
//!
//! A wallet provider is whatever holds the user's keys and answers EIP-1193 style requests:
//! listing accounts, asking the user for access and signing/sending transactions. Mochi only
//! ever talks to it through [`WalletProvider::request`].

pub mod error;
pub mod http;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;

pub use error::WalletProviderError;
pub use http::HttpWalletProvider;

/// Interactive account request, may prompt the user.
pub const METHOD_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
/// Accounts already authorized for this client, never prompts.
pub const METHOD_ACCOUNTS: &str = "eth_accounts";
/// Sign and broadcast a transaction as one of the authorized accounts.
pub const METHOD_SEND_TRANSACTION: &str = "eth_sendTransaction";

/// Trait for every wallet backend to implement
#[automock]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Forward a single request to the wallet and return its raw result.
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletProviderError>;
}

/// Reads the account list out of an `eth_accounts` / `eth_requestAccounts` result.
///
/// Wallets answer `null` when nothing is authorized; that is treated as an empty list.
pub fn parse_accounts(method: &str, result: Value) -> Result<Vec<String>, WalletProviderError> {
    match result {
        Value::Null => Ok(vec![]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(account) => Ok(account),
                other => Err(WalletProviderError::UnexpectedResponse {
                    method: method.to_string(),
                    message: format!("account entry is not a string: {other}"),
                }),
            })
            .collect(),
        other => Err(WalletProviderError::UnexpectedResponse {
            method: method.to_string(),
            message: format!("expected an array of accounts, got {other}"),
        }),
    }
}
