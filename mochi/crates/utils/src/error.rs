use jsonrpsee::core::ClientError;
use serde_json::Value;

/// Error code used by EIP-1193 wallets when the user rejects a request.
pub const USER_REJECTED_REQUEST_CODE: i64 = 4001;

#[derive(Debug, thiserror::Error)]
pub enum JsonRpcError {
    /// Transport errors (timeouts, refused connections, non-success HTTP status)
    #[error("Network error during {method}: {message}")]
    Network { method: String, message: String },

    /// The endpoint answered with a JSON-RPC error object
    #[error("RPC error during {method} (code {code}): {message}")]
    Rpc { method: String, code: i64, message: String, data: Option<Value> },

    /// The response body was not the JSON we expected
    #[error("Failed to parse response during {method}: {message}")]
    Parse { method: String, message: String },

    #[error("Failed to build JSON-RPC client: {0}")]
    ClientBuild(String),
}

impl JsonRpcError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, JsonRpcError::Rpc { code: USER_REJECTED_REQUEST_CODE, .. })
    }

    /// Classify a jsonrpsee client error
    pub fn from_client_error(method: impl Into<String>, source: ClientError) -> Self {
        let method = method.into();

        match source {
            ClientError::Call(object) => JsonRpcError::Rpc {
                method,
                code: i64::from(object.code()),
                message: object.message().to_string(),
                data: object.data().and_then(|raw| serde_json::from_str(raw.get()).ok()),
            },
            ClientError::ParseError(e) => JsonRpcError::Parse { method, message: e.to_string() },
            ClientError::RequestTimeout => JsonRpcError::Network { method, message: "request timed out".to_string() },
            other => JsonRpcError::Network { method, message: other.to_string() },
        }
    }
}
