use alloy_primitives::{address, Address};
use url::Url;

pub const STUDIONET_NAME: &str = "studionet";
pub const STUDIONET_CHAIN_ID: u64 = 61999;
pub const STUDIONET_RPC_URL: &str = "https://studio.genlayer.com/api";
/// `ConsensusMain` deployment of the hosted studio.
pub const STUDIONET_CONSENSUS_MAIN_CONTRACT: Address = address!("b7278a61aa25c888815afc32ad3cc52ff24fe575");

/// Connection details of a GenLayer network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenLayerNetwork {
    pub name: String,
    pub chain_id: u64,
    pub rpc_url: Url,
    /// Contract every write is routed through.
    pub consensus_main_contract: Address,
}

impl GenLayerNetwork {
    pub fn new(name: impl Into<String>, chain_id: u64, rpc_url: Url, consensus_main_contract: Address) -> Self {
        Self { name: name.into(), chain_id, rpc_url, consensus_main_contract }
    }

    /// Studionet with a custom endpoint, everything else stays the hosted one.
    pub fn studionet(rpc_url: Url) -> Self {
        Self::new(STUDIONET_NAME, STUDIONET_CHAIN_ID, rpc_url, STUDIONET_CONSENSUS_MAIN_CONTRACT)
    }
}
