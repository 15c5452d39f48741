pub mod calldata;
pub mod consensus;
pub mod network;
#[cfg(test)]
mod tests;
pub mod types;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{hex, Address, B256};
use async_trait::async_trait;
use mochi_chain_client_interface::{
    ChainClient, ChainClientError, ConsensusReceipt, TransactionHash, WriteContractRequest,
};
use mochi_utils::JsonRpcClient;
use mochi_wallet_provider::{WalletProvider, METHOD_SEND_TRANSACTION};
use serde_json::{json, Value};
use tokio::time::sleep;
use tracing::{debug, info};

pub use network::GenLayerNetwork;

use crate::calldata::encode_call;
use crate::consensus::{add_transaction_input, SubmissionReceipt};
use crate::types::GenLayerTransaction;

pub const METHOD_GET_TRANSACTION_BY_HASH: &str = "eth_getTransactionByHash";
pub const METHOD_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";

pub const DEFAULT_SUBMISSION_RETRIES: usize = 30;
pub const DEFAULT_SUBMISSION_INTERVAL: Duration = Duration::from_secs(1);

/// Client for a GenLayer network.
///
/// Reads go straight to the node, writes are signed and broadcast by the wallet provider as the
/// bound account.
pub struct GenLayerClient {
    network: GenLayerNetwork,
    rpc: JsonRpcClient,
    wallet: Option<Arc<dyn WalletProvider>>,
    account: Option<Address>,
    submission_retries: usize,
    submission_interval: Duration,
}

impl GenLayerClient {
    pub fn new(network: GenLayerNetwork) -> Result<Self, ChainClientError> {
        let rpc = JsonRpcClient::new(network.rpc_url.clone())?;
        Ok(Self::with_rpc(network, rpc))
    }

    /// Reuses an existing transport, sharing its connection pool.
    pub fn with_rpc(network: GenLayerNetwork, rpc: JsonRpcClient) -> Self {
        Self {
            network,
            rpc,
            wallet: None,
            account: None,
            submission_retries: DEFAULT_SUBMISSION_RETRIES,
            submission_interval: DEFAULT_SUBMISSION_INTERVAL,
        }
    }

    pub fn with_wallet(mut self, wallet: Arc<dyn WalletProvider>) -> Self {
        self.wallet = Some(wallet);
        self
    }

    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    /// How long to wait for the `addTransaction` call to be mined.
    pub fn with_submission_polling(mut self, retries: usize, interval: Duration) -> Self {
        self.submission_retries = retries;
        self.submission_interval = interval;
        self
    }

    async fn wait_for_submission(&self, evm_hash: B256) -> Result<SubmissionReceipt, ChainClientError> {
        for attempt in 1..=self.submission_retries {
            let value = self.rpc.request_value(METHOD_GET_TRANSACTION_RECEIPT, &[json!(evm_hash.to_string())]).await?;
            if !value.is_null() {
                return serde_json::from_value(value)
                    .map_err(|e| invalid_response(METHOD_GET_TRANSACTION_RECEIPT, e.to_string()));
            }
            debug!(evm_tx_hash = %evm_hash, attempt, "Submission not mined yet");

            if attempt < self.submission_retries {
                sleep(self.submission_interval).await;
            }
        }
        Err(ChainClientError::SubmissionNotMined { hash: evm_hash, attempts: self.submission_retries })
    }
}

#[async_trait]
impl ChainClient for GenLayerClient {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn write_contract(&self, request: WriteContractRequest) -> Result<TransactionHash, ChainClientError> {
        let account = self.account.ok_or_else(|| ChainClientError::NoAccount(request.function_name.clone()))?;
        let wallet = self.wallet.as_ref().ok_or(ChainClientError::NoWallet)?;
        let consensus_main = self.network.consensus_main_contract;

        info!(
            log_type = "starting",
            category = "write_contract",
            network = %self.network.name,
            contract = %request.address,
            function = %request.function_name,
            "Submitting contract call."
        );

        let calldata = encode_call(&request.function_name, &request.args)
            .map_err(|e| ChainClientError::Encoding(e.to_string()))?;
        let tx = json!({
            "from": account.to_string(),
            "to": consensus_main.to_string(),
            "data": hex::encode_prefixed(add_transaction_input(account, request.address, &calldata)),
            "value": format!("{:#x}", request.value),
            "chainId": format!("{:#x}", self.network.chain_id),
        });

        let result = wallet.request(METHOD_SEND_TRANSACTION, vec![tx]).await?;
        let evm_hash = parse_transaction_hash(&result)?;
        debug!(evm_tx_hash = %evm_hash, "Submission broadcast by the wallet");

        let receipt = self.wait_for_submission(evm_hash).await?;
        if receipt.reverted() {
            return Err(ChainClientError::SubmissionReverted(evm_hash));
        }
        let tx_hash = receipt.genlayer_tx_id(consensus_main).ok_or_else(|| {
            invalid_response(METHOD_GET_TRANSACTION_RECEIPT, format!("no NewTransaction event from {consensus_main}"))
        })?;

        info!(
            log_type = "completed",
            category = "write_contract",
            function = %request.function_name,
            evm_tx_hash = %evm_hash,
            tx_hash = %tx_hash,
            "Contract call submitted."
        );
        Ok(tx_hash)
    }

    async fn get_transaction(&self, hash: TransactionHash) -> Result<Option<ConsensusReceipt>, ChainClientError> {
        let value = self.rpc.request_value(METHOD_GET_TRANSACTION_BY_HASH, &[json!(hash.to_string())]).await?;
        if value.is_null() {
            debug!(tx_hash = %hash, "Node does not know the transaction");
            return Ok(None);
        }

        let transaction: GenLayerTransaction = serde_json::from_value(value)
            .map_err(|e| invalid_response(METHOD_GET_TRANSACTION_BY_HASH, e.to_string()))?;
        let receipt = transaction
            .into_receipt(hash)
            .ok_or_else(|| invalid_response(METHOD_GET_TRANSACTION_BY_HASH, "transaction has no status"))?;
        Ok(Some(receipt))
    }
}

fn parse_transaction_hash(result: &Value) -> Result<TransactionHash, ChainClientError> {
    result
        .as_str()
        .and_then(|s| B256::from_str(s).ok())
        .ok_or_else(|| invalid_response(METHOD_SEND_TRANSACTION, format!("expected a transaction hash, got {result}")))
}

fn invalid_response(method: &str, message: impl Into<String>) -> ChainClientError {
    ChainClientError::InvalidResponse { method: method.to_string(), message: message.into() }
}
