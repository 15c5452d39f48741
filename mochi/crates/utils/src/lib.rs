//! Shared plumbing for the Mochi crates.
//!
//! Both the wallet provider and the GenLayer node speak JSON-RPC 2.0 over HTTP, so the transport
//! lives here once and the client crates only deal with method names and payload shapes.

pub mod error;
pub mod jsonrpc;

pub use error::JsonRpcError;
pub use jsonrpc::JsonRpcClient;
