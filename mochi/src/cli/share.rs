use clap::Args;
use url::Url;

use crate::types::constant::DEFAULT_SHARE_BASE_URL;

#[derive(Debug, Clone, Args)]
pub struct ShareCliArgs {
    /// Page share links point to, the claim is added as a query parameter.
    #[arg(env = "MOCHI_SHARE_BASE_URL", long, global = true, default_value = DEFAULT_SHARE_BASE_URL)]
    pub share_base_url: Url,
}
