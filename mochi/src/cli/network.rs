use alloy_primitives::Address;
use clap::Args;
use mochi_genlayer_client::network::{
    STUDIONET_CHAIN_ID, STUDIONET_CONSENSUS_MAIN_CONTRACT, STUDIONET_NAME, STUDIONET_RPC_URL,
};
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct NetworkCliArgs {
    /// The URL of the GenLayer JSON-RPC endpoint.
    #[arg(env = "MOCHI_GENLAYER_RPC_URL", long, global = true, default_value = STUDIONET_RPC_URL)]
    pub rpc_url: Url,

    /// Chain id of the GenLayer network.
    #[arg(env = "MOCHI_GENLAYER_CHAIN_ID", long, global = true, default_value_t = STUDIONET_CHAIN_ID)]
    pub chain_id: u64,

    /// Display name of the network, only used in logs.
    #[arg(env = "MOCHI_GENLAYER_NETWORK_NAME", long, global = true, default_value = STUDIONET_NAME)]
    pub network_name: String,

    /// The address of the network's ConsensusMain contract, writes are routed through it.
    #[arg(
        env = "MOCHI_GENLAYER_CONSENSUS_CONTRACT",
        long,
        global = true,
        default_value_t = STUDIONET_CONSENSUS_MAIN_CONTRACT
    )]
    pub consensus_contract_address: Address,

    /// The address of the fact checking intelligent contract.
    /// Only needed to ask, checked when a claim is submitted.
    #[arg(env = "MOCHI_CONTRACT_ADDRESS", long, global = true)]
    pub contract_address: Option<String>,
}
