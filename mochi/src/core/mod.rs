pub mod client_factory;
pub mod session;

pub use client_factory::{ChainClientFactory, GenLayerClientFactory};
pub use session::WalletSession;
