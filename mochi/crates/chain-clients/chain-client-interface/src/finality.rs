use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::error::ChainClientError;
use crate::types::{ConsensusReceipt, TransactionHash, TransactionStatus};
use crate::ChainClient;

pub const DEFAULT_FINALITY_RETRIES: usize = 100;
pub const DEFAULT_FINALITY_INTERVAL: Duration = Duration::from_millis(2000);

/// How long and for what to wait on a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitForReceipt {
    pub hash: TransactionHash,
    pub status: TransactionStatus,
    /// Number of lookups, not counting the sleeps between them.
    pub retries: usize,
    pub interval: Duration,
}

impl WaitForReceipt {
    pub fn finalized(hash: TransactionHash) -> Self {
        Self {
            hash,
            status: TransactionStatus::Finalized,
            retries: DEFAULT_FINALITY_RETRIES,
            interval: DEFAULT_FINALITY_INTERVAL,
        }
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Polls `client` until the transaction reaches the requested status.
///
/// Returns early with the receipt when the transaction lands in a state it cannot leave
/// (`UNDETERMINED`, `CANCELED`), the caller decides what that means. Lookup errors are returned
/// as is, only "not there yet" is retried.
pub async fn wait_for_transaction_receipt(
    client: &dyn ChainClient,
    request: &WaitForReceipt,
) -> Result<ConsensusReceipt, ChainClientError> {
    info!(
        log_type = "starting",
        category = "wait_for_receipt",
        tx_hash = %request.hash,
        target_status = %request.status,
        retries = request.retries,
        interval_ms = request.interval.as_millis() as u64,
        "Waiting for transaction receipt."
    );

    for attempt in 1..=request.retries {
        match client.get_transaction(request.hash).await? {
            Some(receipt) if receipt.status.satisfies(&request.status) => {
                info!(
                    log_type = "completed",
                    category = "wait_for_receipt",
                    tx_hash = %request.hash,
                    status = %receipt.status,
                    attempt,
                    "Transaction reached target status."
                );
                return Ok(receipt);
            }
            Some(receipt) if receipt.status.is_dead_end() => {
                warn!(
                    category = "wait_for_receipt",
                    tx_hash = %request.hash,
                    status = %receipt.status,
                    attempt,
                    "Transaction settled without reaching target status."
                );
                return Ok(receipt);
            }
            Some(receipt) => {
                debug!(tx_hash = %request.hash, status = %receipt.status, attempt, "Transaction still in progress");
            }
            None => {
                debug!(tx_hash = %request.hash, attempt, "Transaction not known to the node yet");
            }
        }

        if attempt < request.retries {
            sleep(request.interval).await;
        }
    }

    warn!(
        category = "wait_for_receipt",
        tx_hash = %request.hash,
        attempts = request.retries,
        "Transaction did not reach target status in time."
    );
    Err(ChainClientError::FinalizationTimeout {
        hash: request.hash,
        target: request.status.to_string(),
        attempts: request.retries,
    })
}
