use std::str::FromStr;

use alloy_primitives::{Address, B256};
use serde_json::Value;
use strum_macros::{Display, EnumString};

/// Hash returned by a contract write, used to track the transaction until it settles.
pub type TransactionHash = B256;

/// Lifecycle state of a transaction as reported by the consensus node.
///
/// Names the node sends that are not listed here are kept verbatim in [`TransactionStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Proposing,
    Committing,
    Revealing,
    Accepted,
    Undetermined,
    Finalized,
    Canceled,
    LeaderTimeout,
    ValidatorsTimeout,
    #[strum(default)]
    Other(String),
}

impl TransactionStatus {
    pub fn from_name(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Other(name.to_string()))
    }

    /// Whether a transaction in this state has reached `target`.
    /// A finalized transaction has necessarily been accepted before.
    pub fn satisfies(&self, target: &TransactionStatus) -> bool {
        match target {
            Self::Accepted => matches!(self, Self::Accepted | Self::Finalized),
            target => self == target,
        }
    }

    /// States the transaction never leaves, whatever the target was.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, Self::Undetermined | Self::Canceled)
    }
}

/// Aggregate validator agreement attached to a decided transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsensusResult {
    Idle,
    Agree,
    Disagree,
    Timeout,
    DeterministicViolation,
    NoMajority,
    MajorityAgree,
    MajorityDisagree,
    #[strum(default)]
    Other(String),
}

impl ConsensusResult {
    pub fn from_name(name: &str) -> Self {
        Self::from_str(name).unwrap_or_else(|_| Self::Other(name.to_string()))
    }
}

/// One validator's execution result as bundled by the leader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderReceipt {
    /// Human readable rendering of the value returned by the contract call.
    pub readable_payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusReceipt {
    pub hash: TransactionHash,
    pub status: TransactionStatus,
    pub result: Option<ConsensusResult>,
    pub leader_receipts: Vec<LeaderReceipt>,
}

impl ConsensusReceipt {
    /// False when validators disagreed by majority or the round ended undetermined.
    pub fn consensus_reached(&self) -> bool {
        self.result.as_ref() != Some(&ConsensusResult::MajorityDisagree)
            && self.status != TransactionStatus::Undetermined
    }

    /// Readable payload of the first leader receipt, or of the second when the first has none.
    /// Empty payloads count as missing.
    pub fn leader_payload(&self) -> Option<&str> {
        self.leader_receipts
            .iter()
            .take(2)
            .filter_map(|receipt| receipt.readable_payload.as_deref())
            .find(|payload| !payload.is_empty())
    }
}

/// A state-changing call on an intelligent contract.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteContractRequest {
    pub address: Address,
    pub function_name: String,
    pub args: Vec<Value>,
    /// Native value attached to the call, zero for non-payable methods.
    pub value: u128,
}

impl WriteContractRequest {
    pub fn new(address: Address, function_name: impl Into<String>, args: Vec<Value>) -> Self {
        Self { address, function_name: function_name.into(), args, value: 0 }
    }
}
