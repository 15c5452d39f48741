use std::path::PathBuf;

use clap::Args;

use crate::types::constant::DEFAULT_DATA_DIR;

#[derive(Debug, Clone, Args)]
pub struct StorageCliArgs {
    /// Directory the last verdict is kept in.
    #[arg(env = "MOCHI_DATA_DIR", long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,
}
