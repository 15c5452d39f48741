use std::path::PathBuf;
use std::time::Duration;

use mochi_genlayer_client::GenLayerNetwork;
use url::Url;

use crate::cli::network::NetworkCliArgs;
use crate::cli::poll::PollCliArgs;
use crate::cli::share::ShareCliArgs;
use crate::cli::storage::StorageCliArgs;
use crate::cli::wallet::WalletCliArgs;
use crate::cli::RunCmd;
use crate::FactCheckError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkParams {
    pub network: GenLayerNetwork,
    /// Kept raw, an unusable address only fails the commands that submit.
    pub contract_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletParams {
    pub provider_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalityParams {
    pub retries: usize,
    pub interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageParams {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareParams {
    pub base_url: Url,
}

/// Every validated option, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MochiParams {
    pub network: NetworkParams,
    pub wallet: WalletParams,
    pub finality: FinalityParams,
    pub storage: StorageParams,
    pub share: ShareParams,
}

impl TryFrom<NetworkCliArgs> for NetworkParams {
    type Error = FactCheckError;
    fn try_from(args: NetworkCliArgs) -> Result<Self, Self::Error> {
        if args.chain_id == 0 {
            return Err(FactCheckError::Config("Chain id must be positive".to_string()));
        }
        let contract_address =
            args.contract_address.map(|address| address.trim().to_string()).filter(|address| !address.is_empty());
        let network =
            GenLayerNetwork::new(args.network_name, args.chain_id, args.rpc_url, args.consensus_contract_address);
        Ok(Self { network, contract_address })
    }
}

impl From<WalletCliArgs> for WalletParams {
    fn from(args: WalletCliArgs) -> Self {
        Self { provider_url: args.wallet_provider_url }
    }
}

impl TryFrom<PollCliArgs> for FinalityParams {
    type Error = FactCheckError;
    fn try_from(args: PollCliArgs) -> Result<Self, Self::Error> {
        if args.finality_retries == 0 {
            return Err(FactCheckError::Config("Finality retries must be at least 1".to_string()));
        }
        Ok(Self { retries: args.finality_retries, interval: Duration::from_millis(args.finality_interval_ms) })
    }
}

impl TryFrom<StorageCliArgs> for StorageParams {
    type Error = FactCheckError;
    fn try_from(args: StorageCliArgs) -> Result<Self, Self::Error> {
        if args.data_dir.as_os_str().is_empty() {
            return Err(FactCheckError::Config("Data directory must not be empty".to_string()));
        }
        Ok(Self { data_dir: args.data_dir })
    }
}

impl TryFrom<ShareCliArgs> for ShareParams {
    type Error = FactCheckError;
    fn try_from(args: ShareCliArgs) -> Result<Self, Self::Error> {
        if args.share_base_url.cannot_be_a_base() {
            return Err(FactCheckError::Config(format!("Share base URL {} cannot carry a query", args.share_base_url)));
        }
        Ok(Self { base_url: args.share_base_url })
    }
}

impl TryFrom<RunCmd> for MochiParams {
    type Error = FactCheckError;
    fn try_from(run_cmd: RunCmd) -> Result<Self, Self::Error> {
        Ok(Self {
            network: NetworkParams::try_from(run_cmd.network_args)?,
            wallet: WalletParams::from(run_cmd.wallet_args),
            finality: FinalityParams::try_from(run_cmd.poll_args)?,
            storage: StorageParams::try_from(run_cmd.storage_args)?,
            share: ShareParams::try_from(run_cmd.share_args)?,
        })
    }
}
