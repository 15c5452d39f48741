use clap::Args;
use mochi_chain_client_interface::DEFAULT_FINALITY_RETRIES;

#[derive(Debug, Clone, Args)]
pub struct PollCliArgs {
    /// How many times the node is asked whether the transaction is finalized.
    #[arg(env = "MOCHI_FINALITY_RETRIES", long, global = true, default_value_t = DEFAULT_FINALITY_RETRIES)]
    pub finality_retries: usize,

    /// Milliseconds to wait between two finality lookups.
    #[arg(env = "MOCHI_FINALITY_INTERVAL_MS", long, global = true, default_value_t = 2000)]
    pub finality_interval_ms: u64,
}
