use mochi_chain_client_interface::{ChainClientError, TransactionHash};
use mochi_wallet_provider::WalletProviderError;
use thiserror::Error;

/// Result type for fact checking operations
pub type FactCheckResult<T> = Result<T, FactCheckError>;

/// Error types for fact checking
#[derive(Error, Debug)]
pub enum FactCheckError {
    /// No wallet provider is configured at all
    #[error("No wallet provider is configured")]
    ProviderMissing,

    #[error("The wallet provider returned no accounts")]
    NoAccounts,

    /// A submission was attempted without an identity
    #[error("No wallet is connected")]
    NotConnected,

    #[error("Contract target is misconfigured: {0}")]
    MisconfiguredTarget(String),

    #[error("Transaction {hash} was not finalized after {attempts} attempts")]
    FinalizationTimeout { hash: TransactionHash, attempts: usize },

    /// Validators disagreed by majority or the round was undetermined
    #[error("Consensus was not reached (status {status}, result {result})")]
    ConsensusNotReached { status: String, result: String },

    #[error("No readable result in the leader receipts of transaction {0}")]
    MissingLeaderReceipt(TransactionHash),

    #[error("Contract returned a malformed result: {0}")]
    MalformedPayload(String),

    #[error("Claim is empty")]
    EmptyClaim,

    #[error("Transaction {0} was canceled")]
    TransactionCanceled(TransactionHash),

    #[error("Wallet returned an invalid account: {0}")]
    InvalidAccount(String),

    #[error("Wallet provider error: {0}")]
    WalletProvider(#[from] WalletProviderError),

    #[error("Chain client error: {0}")]
    ChainClient(#[from] ChainClientError),

    #[error("Result store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
