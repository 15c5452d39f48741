use mochi_utils::JsonRpcError;
use mochi_wallet_provider::WalletProviderError;
use thiserror::Error;

use crate::types::TransactionHash;

#[derive(Error, Debug)]
pub enum ChainClientError {
    #[error("No account bound to the chain client, cannot sign {0}")]
    NoAccount(String),

    #[error("No wallet provider configured to sign transactions")]
    NoWallet,

    #[error("Node RPC error: {0}")]
    Rpc(#[from] JsonRpcError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletProviderError),

    #[error("Failed to encode calldata: {0}")]
    Encoding(String),

    #[error("Submission {hash} was not mined after {attempts} attempts")]
    SubmissionNotMined { hash: TransactionHash, attempts: usize },

    #[error("Submission {0} reverted")]
    SubmissionReverted(TransactionHash),

    #[error("Unexpected response to {method}: {message}")]
    InvalidResponse { method: String, message: String },

    #[error("Transaction {hash} did not reach {target} after {attempts} attempts")]
    FinalizationTimeout { hash: TransactionHash, target: String, attempts: usize },
}
