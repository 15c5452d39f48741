pub mod error;
pub mod finality;
pub mod types;

use alloy_primitives::Address;
use async_trait::async_trait;
use mockall::automock;

pub use error::ChainClientError;
pub use finality::{wait_for_transaction_receipt, WaitForReceipt, DEFAULT_FINALITY_INTERVAL, DEFAULT_FINALITY_RETRIES};
pub use types::{
    ConsensusReceipt, ConsensusResult, LeaderReceipt, TransactionHash, TransactionStatus, WriteContractRequest,
};

/// Trait for every consensus network client to implement
#[automock]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Account writes are signed as, if the client was bound to one.
    fn account(&self) -> Option<Address>;

    /// Should submit a state-changing contract call and return its transaction hash.
    /// Returns as soon as the transaction is accepted by the node, long before it is decided.
    async fn write_contract(&self, request: WriteContractRequest) -> Result<TransactionHash, ChainClientError>;

    /// Should fetch the current consensus view of a transaction, `None` if the node does not know it yet.
    async fn get_transaction(&self, hash: TransactionHash) -> Result<Option<ConsensusReceipt>, ChainClientError>;
}
