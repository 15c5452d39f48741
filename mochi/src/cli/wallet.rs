use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct WalletCliArgs {
    /// JSON-RPC endpoint of the wallet that holds the account and signs transactions.
    #[arg(env = "MOCHI_WALLET_PROVIDER_URL", long, global = true)]
    pub wallet_provider_url: Option<Url>,
}
