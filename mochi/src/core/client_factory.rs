use std::sync::Arc;

use alloy_primitives::Address;
use mochi_chain_client_interface::{ChainClient, ChainClientError};
use mochi_genlayer_client::{GenLayerClient, GenLayerNetwork};
use mochi_utils::JsonRpcClient;
use mochi_wallet_provider::WalletProvider;
use mockall::automock;
use tracing::debug;

use crate::FactCheckResult;

/// Builds chain handles. A handle is built for every request and never cached.
#[automock]
pub trait ChainClientFactory: Send + Sync {
    /// Pure construction, no network traffic.
    fn build(&self, account: Option<Address>) -> FactCheckResult<Arc<dyn ChainClient>>;
}

pub struct GenLayerClientFactory {
    network: GenLayerNetwork,
    rpc: JsonRpcClient,
    wallet: Option<Arc<dyn WalletProvider>>,
}

impl GenLayerClientFactory {
    pub fn new(network: GenLayerNetwork, wallet: Option<Arc<dyn WalletProvider>>) -> FactCheckResult<Self> {
        let rpc = JsonRpcClient::new(network.rpc_url.clone()).map_err(ChainClientError::from)?;
        Ok(Self { network, rpc, wallet })
    }
}

impl ChainClientFactory for GenLayerClientFactory {
    fn build(&self, account: Option<Address>) -> FactCheckResult<Arc<dyn ChainClient>> {
        debug!(network = %self.network.name, account = ?account, "Building GenLayer client");
        let mut client = GenLayerClient::with_rpc(self.network.clone(), self.rpc.clone());
        if let Some(wallet) = &self.wallet {
            client = client.with_wallet(wallet.clone());
        }
        if let Some(account) = account {
            client = client.with_account(account);
        }
        Ok(Arc::new(client))
    }
}
