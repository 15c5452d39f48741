/// File holding the last verdict, inside the data directory
pub const LAST_RESULT_FILE_NAME: &str = "mochi_last_fact_result.json";

/// Query parameter carrying the claim in share links
pub const SHARE_QUERY_PARAM: &str = "fact";

pub const VERIFY_FACT_METHOD: &str = "verify_fact";

pub const CONTRACT_ADDRESS_ENV: &str = "MOCHI_CONTRACT_ADDRESS";

pub const FALLBACK_EXPLANATION: &str = "Failed to parse result.";

pub const DEFAULT_DATA_DIR: &str = ".mochi";
pub const DEFAULT_SHARE_BASE_URL: &str = "http://localhost:3000/";
