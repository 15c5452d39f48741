use async_trait::async_trait;
use mochi_utils::JsonRpcClient;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{WalletProvider, WalletProviderError};

/// Wallet reachable over HTTP JSON-RPC (a local signer, a node with unlocked accounts, or a
/// browser-wallet bridge).
#[derive(Debug, Clone)]
pub struct HttpWalletProvider {
    rpc: JsonRpcClient,
}

impl HttpWalletProvider {
    pub fn new(url: Url) -> Result<Self, WalletProviderError> {
        Ok(Self { rpc: JsonRpcClient::new(url)? })
    }

    pub fn url(&self) -> &Url {
        self.rpc.url()
    }
}

#[async_trait]
impl WalletProvider for HttpWalletProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value, WalletProviderError> {
        debug!(method, wallet_url = %self.rpc.url(), "Forwarding request to wallet provider");
        Ok(self.rpc.request_value(method, &params).await?)
    }
}
