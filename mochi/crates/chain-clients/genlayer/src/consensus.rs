//! Envelope for writes to intelligent contracts.
//!
//! Writes are not sent to the intelligent contract itself. They go to the network's
//! `ConsensusMain` contract as `addTransaction(sender, recipient, validators, rotations, txData)`,
//! where `txData` is the RLP list `[calldata, leader_only]`. The GenLayer transaction id is
//! announced by the `NewTransaction` event of that call.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolEvent};
use serde::Deserialize;

pub const DEFAULT_NUM_OF_INITIAL_VALIDATORS: u64 = 5;
pub const DEFAULT_MAX_ROTATIONS: u64 = 3;

sol! {
    #[allow(missing_docs)]
    interface ConsensusMain {
        function addTransaction(address sender, address recipient, uint256 numOfInitialValidators, uint256 maxRotations, bytes txData) external;
        event NewTransaction(bytes32 indexed txId, address indexed recipient, address indexed activator);
    }
}

/// RLP `[calldata, leader_only]`, with the flag as a single `0x00`/`0x01` byte.
pub fn serialize_tx_data(calldata: &[u8], leader_only: bool) -> Vec<u8> {
    let leader_only = [u8::from(leader_only)];
    let fields: [&[u8]; 2] = [calldata, &leader_only];
    let mut out = Vec::new();
    alloy_rlp::encode_list::<&[u8], [u8]>(&fields, &mut out);
    out
}

/// ABI encoded `addTransaction` call carrying `calldata` for `recipient`.
pub fn add_transaction_input(sender: Address, recipient: Address, calldata: &[u8]) -> Vec<u8> {
    ConsensusMain::addTransactionCall {
        sender,
        recipient,
        numOfInitialValidators: U256::from(DEFAULT_NUM_OF_INITIAL_VALIDATORS),
        maxRotations: U256::from(DEFAULT_MAX_ROTATIONS),
        txData: Bytes::from(serialize_tx_data(calldata, false)),
    }
    .abi_encode()
}

/// EVM receipt of the `addTransaction` call, as returned by `eth_getTransactionReceipt`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub logs: Vec<SubmissionLog>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionLog {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
}

impl SubmissionReceipt {
    pub fn reverted(&self) -> bool {
        self.status.as_deref() == Some("0x0")
    }

    /// GenLayer transaction id from the first `NewTransaction` event emitted by `consensus_main`.
    pub fn genlayer_tx_id(&self, consensus_main: Address) -> Option<B256> {
        self.logs
            .iter()
            .filter(|log| log.address == consensus_main)
            .filter(|log| log.topics.first() == Some(&ConsensusMain::NewTransaction::SIGNATURE_HASH))
            .find_map(|log| {
                ConsensusMain::NewTransaction::decode_raw_log(log.topics.iter().copied(), &log.data, true).ok()
            })
            .map(|event| event.txId)
    }
}
