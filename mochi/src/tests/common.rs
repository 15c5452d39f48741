use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use mochi_chain_client_interface::{
    ChainClient, ConsensusReceipt, ConsensusResult, LeaderReceipt, MockChainClient, TransactionHash, TransactionStatus,
};
use mochi_wallet_provider::{MockWalletProvider, WalletProvider, METHOD_ACCOUNTS};
use mockall::predicate::eq;
use serde_json::json;

use crate::core::client_factory::MockChainClientFactory;
use crate::core::WalletSession;
use crate::types::params::FinalityParams;
use crate::verifier::FactVerifier;

pub const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";
pub const CONTRACT: &str = "0x2222222222222222222222222222222222222222";

/// Payload as it comes out of a leader receipt: the contract's JSON, serialised once more.
pub const VERIFIED_PAYLOAD: &str = r#""{\"verdict\":\"true\",\"confidence\":92,\"explanation\":\"Verified\"}""#;

pub fn account() -> Address {
    Address::from_str(ACCOUNT).unwrap()
}

pub fn tx_hash() -> TransactionHash {
    B256::repeat_byte(0x42)
}

pub fn finality() -> FinalityParams {
    FinalityParams { retries: 100, interval: Duration::from_millis(2000) }
}

pub fn receipt(status: TransactionStatus, result: Option<ConsensusResult>, payloads: &[Option<&str>]) -> ConsensusReceipt {
    ConsensusReceipt {
        hash: tx_hash(),
        status,
        result,
        leader_receipts: payloads.iter().map(|p| LeaderReceipt { readable_payload: p.map(str::to_string) }).collect(),
    }
}

pub fn finalized(payloads: &[Option<&str>]) -> ConsensusReceipt {
    receipt(TransactionStatus::Finalized, Some(ConsensusResult::MajorityAgree), payloads)
}

/// Wallet that has already authorized `accounts`, answering any number of `eth_accounts`.
pub fn authorized_wallet(accounts: &'static [&'static str]) -> MockWalletProvider {
    let mut wallet = MockWalletProvider::new();
    wallet.expect_request().returning(move |method, _| {
        assert_eq!(method, METHOD_ACCOUNTS);
        Ok(json!(accounts))
    });
    wallet
}

pub fn session_with(wallet: MockWalletProvider) -> Arc<WalletSession> {
    let wallet: Arc<dyn WalletProvider> = Arc::new(wallet);
    Arc::new(WalletSession::new(Some(wallet)))
}

pub fn connected_session() -> Arc<WalletSession> {
    session_with(authorized_wallet(&[ACCOUNT]))
}

/// Factory handing out `client`, expected to be bound to the test account.
pub fn factory_for(client: MockChainClient) -> MockChainClientFactory {
    let client: Arc<dyn ChainClient> = Arc::new(client);
    let mut factory = MockChainClientFactory::new();
    factory.expect_build().with(eq(Some(account()))).returning(move |_| Ok(client.clone()));
    factory
}

/// Client accepting one `verify_fact` submission and answering every lookup with `receipt`.
pub fn client_settling_with(receipt: ConsensusReceipt) -> MockChainClient {
    let mut client = MockChainClient::new();
    client.expect_write_contract().times(1).returning(|_| Ok(tx_hash()));
    client.expect_get_transaction().with(eq(tx_hash())).returning(move |_| Ok(Some(receipt.clone())));
    client
}

pub fn verifier(session: Arc<WalletSession>, factory: MockChainClientFactory) -> FactVerifier {
    FactVerifier::new(session, Arc::new(factory), Some(CONTRACT.to_string()), finality())
}
