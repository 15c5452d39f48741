use mochi_utils::JsonRpcError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletProviderError {
    #[error("Wallet transport error: {0}")]
    Transport(#[from] JsonRpcError),

    #[error("Unexpected wallet response to {method}: {message}")]
    UnexpectedResponse { method: String, message: String },
}

impl WalletProviderError {
    /// True when the user declined the request in the wallet UI.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, WalletProviderError::Transport(e) if e.is_user_rejection())
    }
}
