pub mod payload;

use std::str::FromStr;
use std::sync::Arc;

use alloy_primitives::Address;
use mochi_chain_client_interface::{
    wait_for_transaction_receipt, ChainClientError, TransactionStatus, WaitForReceipt, WriteContractRequest,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::core::{ChainClientFactory, WalletSession};
use crate::types::constant::{CONTRACT_ADDRESS_ENV, VERIFY_FACT_METHOD};
use crate::types::params::FinalityParams;
use crate::types::VerdictResult;
use crate::{FactCheckError, FactCheckResult};

pub use payload::decode_verdict_payload;

/// Submits claims to the fact checking contract and turns the finalized outcome into a verdict.
pub struct FactVerifier {
    session: Arc<WalletSession>,
    factory: Arc<dyn ChainClientFactory>,
    contract_address: Option<String>,
    finality: FinalityParams,
}

impl FactVerifier {
    pub fn new(
        session: Arc<WalletSession>,
        factory: Arc<dyn ChainClientFactory>,
        contract_address: Option<String>,
        finality: FinalityParams,
    ) -> Self {
        Self { session, factory, contract_address, finality }
    }

    pub fn session(&self) -> &Arc<WalletSession> {
        &self.session
    }

    /// Runs one verification end to end.
    ///
    /// The returned future owns the whole request, dropping it abandons the finality poll.
    #[tracing::instrument(skip_all, fields(category = "verify_fact"))]
    pub async fn verify_fact(&self, claim: &str) -> FactCheckResult<VerdictResult> {
        if claim.trim().is_empty() {
            return Err(FactCheckError::EmptyClaim);
        }

        let account = self.session.current_address().await?.ok_or(FactCheckError::NotConnected)?;
        let client = self.factory.build(Some(account))?;
        let contract = self.contract_address()?;

        info!(log_type = "starting", account = %account, contract = %contract, "Submitting claim.");
        let tx_hash = client
            .write_contract(WriteContractRequest::new(contract, VERIFY_FACT_METHOD, vec![Value::String(claim.to_string())]))
            .await?;

        let wait = WaitForReceipt::finalized(tx_hash)
            .with_retries(self.finality.retries)
            .with_interval(self.finality.interval);
        let receipt = wait_for_transaction_receipt(client.as_ref(), &wait).await.map_err(|e| match e {
            ChainClientError::FinalizationTimeout { hash, attempts, .. } => {
                FactCheckError::FinalizationTimeout { hash, attempts }
            }
            other => FactCheckError::ChainClient(other),
        })?;

        if !receipt.consensus_reached() {
            warn!(tx_hash = %tx_hash, status = %receipt.status, result = ?receipt.result, "Validators did not reach consensus.");
            return Err(FactCheckError::ConsensusNotReached {
                status: receipt.status.to_string(),
                result: receipt.result.as_ref().map_or_else(|| "none".to_string(), ToString::to_string),
            });
        }
        if receipt.status == TransactionStatus::Canceled {
            return Err(FactCheckError::TransactionCanceled(tx_hash));
        }

        let payload = receipt.leader_payload().ok_or(FactCheckError::MissingLeaderReceipt(tx_hash))?;
        let verdict = decode_verdict_payload(payload)?;

        info!(
            log_type = "completed",
            tx_hash = %tx_hash,
            verdict = %verdict.verdict,
            confidence = verdict.confidence,
            "Claim verified."
        );
        Ok(verdict)
    }

    fn contract_address(&self) -> FactCheckResult<Address> {
        let raw = self
            .contract_address
            .as_deref()
            .ok_or_else(|| FactCheckError::MisconfiguredTarget(format!("{CONTRACT_ADDRESS_ENV} is not set")))?;
        Address::from_str(raw)
            .map_err(|e| FactCheckError::MisconfiguredTarget(format!("{CONTRACT_ADDRESS_ENV} is not an address: {e}")))
    }
}
