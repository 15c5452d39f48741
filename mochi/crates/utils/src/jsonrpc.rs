use std::fmt;
use std::time::Duration;

use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use serde_json::value::RawValue;
use serde_json::Value;
use tracing::trace;
use url::Url;

use crate::error::JsonRpcError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Positional params, always sent as an array (wallets reject a missing `params`).
struct PositionalParams<'a>(&'a [Value]);

impl ToRpcParams for PositionalParams<'_> {
    fn to_rpc_params(self) -> Result<Option<Box<RawValue>>, serde_json::Error> {
        serde_json::value::to_raw_value(self.0).map(Some)
    }
}

/// JSON-RPC 2.0 client over HTTP.
///
/// Cloning is cheap; clones share the connection pool and the request id counter.
#[derive(Clone)]
pub struct JsonRpcClient {
    inner: HttpClient,
    url: Url,
}

impl fmt::Debug for JsonRpcClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRpcClient").field("url", &self.url.as_str()).finish_non_exhaustive()
    }
}

impl JsonRpcClient {
    pub fn new(url: Url) -> Result<Self, JsonRpcError> {
        let inner = HttpClientBuilder::default()
            .request_timeout(REQUEST_TIMEOUT)
            .build(url.as_str())
            .map_err(|e| JsonRpcError::ClientBuild(e.to_string()))?;
        Ok(Self { inner, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Sends `method` with positional `params` and returns the raw `result` value.
    ///
    /// `"result": null` yields [`Value::Null`].
    pub async fn request_value(&self, method: &str, params: &[Value]) -> Result<Value, JsonRpcError> {
        trace!(method, url = %self.url, "Sending JSON-RPC request");
        self.inner
            .request::<Value, _>(method, PositionalParams(params))
            .await
            .map_err(|e| JsonRpcError::from_client_error(method, e))
    }
}
