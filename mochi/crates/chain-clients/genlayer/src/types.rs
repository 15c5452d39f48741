use mochi_chain_client_interface::{
    ConsensusReceipt, ConsensusResult, LeaderReceipt, TransactionHash, TransactionStatus,
};
use serde::Deserialize;
use serde_json::Value;

/// Transaction as returned by `eth_getTransactionByHash` on a GenLayer node.
///
/// Only the fields needed to judge consensus are kept, everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GenLayerTransaction {
    #[serde(default)]
    pub status_name: Option<String>,
    /// Older nodes report the name here instead of `status_name`.
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub result_name: Option<String>,
    #[serde(default)]
    pub consensus_data: Option<ConsensusData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsensusData {
    #[serde(default)]
    pub leader_receipt: Option<OneOrMany<Value>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

impl GenLayerTransaction {
    pub fn status_name(&self) -> Option<&str> {
        self.status_name.as_deref().or_else(|| self.status.as_ref().and_then(Value::as_str))
    }

    pub fn into_receipt(self, hash: TransactionHash) -> Option<ConsensusReceipt> {
        let status = TransactionStatus::from_name(self.status_name()?);
        let result = self.result_name.as_deref().map(ConsensusResult::from_name);
        let leader_receipts = self
            .consensus_data
            .and_then(|data| data.leader_receipt)
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .iter()
            .map(|receipt| LeaderReceipt {
                readable_payload: receipt.pointer("/result/payload/readable").and_then(Value::as_str).map(str::to_string),
            })
            .collect();

        Some(ConsensusReceipt { hash, status, result, leader_receipts })
    }
}
