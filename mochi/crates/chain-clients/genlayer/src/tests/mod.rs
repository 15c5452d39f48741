use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{hex, Address, B256};
use alloy_sol_types::SolEvent;
use assert_matches::assert_matches;
use httpmock::prelude::*;
use httpmock::Mock;
use mochi_chain_client_interface::{
    ChainClient, ChainClientError, ConsensusResult, TransactionStatus, WriteContractRequest,
};
use mochi_utils::JsonRpcError;
use mochi_wallet_provider::{MockWalletProvider, METHOD_SEND_TRANSACTION};
use serde_json::{json, Value};
use url::Url;

use crate::calldata::encode_call;
use crate::consensus::{add_transaction_input, ConsensusMain};
use crate::network::STUDIONET_CONSENSUS_MAIN_CONTRACT;
use crate::{GenLayerClient, GenLayerNetwork, METHOD_GET_TRANSACTION_BY_HASH, METHOD_GET_TRANSACTION_RECEIPT};

const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";
const CONTRACT: &str = "0x2222222222222222222222222222222222222222";
const EVM_TX_HASH: &str = "0x4444444444444444444444444444444444444444444444444444444444444444";
const TX_HASH: &str = "0x3333333333333333333333333333333333333333333333333333333333333333";

fn network(server: &MockServer) -> GenLayerNetwork {
    GenLayerNetwork::studionet(Url::parse(&server.url("/api")).unwrap())
}

fn account() -> Address {
    Address::from_str(ACCOUNT).unwrap()
}

fn contract() -> Address {
    Address::from_str(CONTRACT).unwrap()
}

/// Node answer to the `id`-th request of a fresh client.
async fn reply<'a>(server: &'a MockServer, id: u64, method: &str, body: Value) -> Mock<'a> {
    let mut response = json!({ "jsonrpc": "2.0", "id": id });
    if let (Some(response), Value::Object(body)) = (response.as_object_mut(), body) {
        response.extend(body);
    }
    let matcher = json!({ "id": id, "method": method }).to_string();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api").json_body_partial(matcher);
            then.status(200).json_body(response);
        })
        .await
}

fn submission_receipt(status: &str, emitter: Address) -> Value {
    json!({
        "result": {
            "transactionHash": EVM_TX_HASH,
            "status": status,
            "logs": [{
                "address": emitter,
                "topics": [
                    ConsensusMain::NewTransaction::SIGNATURE_HASH,
                    TX_HASH,
                    contract().into_word(),
                    account().into_word()
                ],
                "data": "0x"
            }]
        }
    })
}

fn wallet_returning(hash: &'static str) -> MockWalletProvider {
    let mut wallet = MockWalletProvider::new();
    wallet.expect_request().times(1).returning(move |_, _| Ok(json!(hash)));
    wallet
}

fn writer(server: &MockServer, wallet: MockWalletProvider) -> GenLayerClient {
    GenLayerClient::new(network(server))
        .unwrap()
        .with_wallet(Arc::new(wallet))
        .with_account(account())
        .with_submission_polling(3, Duration::from_millis(10))
}

#[tokio::test]
async fn write_contract_routes_the_call_through_consensus_main() {
    let server = MockServer::start_async().await;
    let expected_data = hex::encode_prefixed(add_transaction_input(
        account(),
        contract(),
        &encode_call("verify_fact", &[json!("Cats purr")]).unwrap(),
    ));
    let receipt =
        reply(&server, 0, METHOD_GET_TRANSACTION_RECEIPT, submission_receipt("0x1", STUDIONET_CONSENSUS_MAIN_CONTRACT))
            .await;

    let mut wallet = MockWalletProvider::new();
    wallet.expect_request().times(1).returning(move |method, params| {
        assert_eq!(method, METHOD_SEND_TRANSACTION);
        assert_eq!(params.len(), 1);
        let tx = &params[0];
        assert_eq!(tx["from"].as_str().unwrap().to_lowercase(), ACCOUNT);
        assert_eq!(Address::from_str(tx["to"].as_str().unwrap()).unwrap(), STUDIONET_CONSENSUS_MAIN_CONTRACT);
        assert_eq!(tx["data"], json!(expected_data));
        assert_eq!(tx["value"], json!("0x0"));
        assert_eq!(tx["chainId"], json!("0xf22f"));
        Ok(json!(EVM_TX_HASH))
    });

    let hash = writer(&server, wallet)
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![json!("Cats purr")]))
        .await
        .unwrap();

    assert_eq!(hash, B256::from_str(TX_HASH).unwrap());
    receipt.assert_async().await;
}

#[tokio::test]
async fn write_contract_waits_for_the_submission_to_be_mined() {
    let server = MockServer::start_async().await;
    let pending = reply(&server, 0, METHOD_GET_TRANSACTION_RECEIPT, json!({ "result": null })).await;
    let mined =
        reply(&server, 1, METHOD_GET_TRANSACTION_RECEIPT, submission_receipt("0x1", STUDIONET_CONSENSUS_MAIN_CONTRACT))
            .await;

    let hash = writer(&server, wallet_returning(EVM_TX_HASH))
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![]))
        .await
        .unwrap();

    assert_eq!(hash, B256::from_str(TX_HASH).unwrap());
    pending.assert_async().await;
    mined.assert_async().await;
}

#[tokio::test]
async fn submission_that_is_never_mined_fails() {
    let server = MockServer::start_async().await;
    for id in 0..3 {
        reply(&server, id, METHOD_GET_TRANSACTION_RECEIPT, json!({ "result": null })).await;
    }

    let err = writer(&server, wallet_returning(EVM_TX_HASH))
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![]))
        .await
        .unwrap_err();

    assert_matches!(err, ChainClientError::SubmissionNotMined { attempts: 3, hash } if hash == B256::from_str(EVM_TX_HASH).unwrap());
}

#[tokio::test]
async fn reverted_submission_fails() {
    let server = MockServer::start_async().await;
    reply(&server, 0, METHOD_GET_TRANSACTION_RECEIPT, submission_receipt("0x0", STUDIONET_CONSENSUS_MAIN_CONTRACT)).await;

    let err = writer(&server, wallet_returning(EVM_TX_HASH))
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![]))
        .await
        .unwrap_err();

    assert_matches!(err, ChainClientError::SubmissionReverted(_));
}

#[tokio::test]
async fn submission_without_a_consensus_event_is_invalid() {
    let server = MockServer::start_async().await;
    reply(&server, 0, METHOD_GET_TRANSACTION_RECEIPT, submission_receipt("0x1", Address::repeat_byte(0x99))).await;

    let err = writer(&server, wallet_returning(EVM_TX_HASH))
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![]))
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ChainClientError::InvalidResponse { ref method, .. } if method == METHOD_GET_TRANSACTION_RECEIPT
    );
}

#[tokio::test]
async fn write_contract_requires_an_account() {
    let server = MockServer::start_async().await;
    let client = GenLayerClient::new(network(&server)).unwrap().with_wallet(Arc::new(MockWalletProvider::new()));

    let err = client.write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![])).await.unwrap_err();

    assert_matches!(err, ChainClientError::NoAccount(ref f) if f == "verify_fact");
}

#[tokio::test]
async fn write_contract_requires_a_wallet() {
    let server = MockServer::start_async().await;
    let client = GenLayerClient::new(network(&server)).unwrap().with_account(account());

    let err = client.write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![])).await.unwrap_err();

    assert_matches!(err, ChainClientError::NoWallet);
}

#[tokio::test]
async fn write_contract_rejects_a_malformed_hash() {
    let server = MockServer::start_async().await;
    let mut wallet = MockWalletProvider::new();
    wallet.expect_request().times(1).returning(|_, _| Ok(json!({ "hash": EVM_TX_HASH })));

    let err = writer(&server, wallet)
        .write_contract(WriteContractRequest::new(contract(), "verify_fact", vec![]))
        .await
        .unwrap_err();

    assert_matches!(err, ChainClientError::InvalidResponse { ref method, .. } if method == METHOD_SEND_TRANSACTION);
}

#[tokio::test]
async fn get_transaction_maps_the_consensus_view() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api")
                .json_body_partial(format!(r#"{{"method":"eth_getTransactionByHash","params":["{TX_HASH}"]}}"#));
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "id": 0,
                "result": {
                    "hash": TX_HASH,
                    "status_name": "FINALIZED",
                    "result_name": "MAJORITY_AGREE",
                    "consensus_data": {
                        "leader_receipt": [
                            { "result": { "payload": { "readable": "\"{\\\"verdict\\\":\\\"true\\\"}\"" } } }
                        ]
                    }
                }
            }));
        })
        .await;
    let client = GenLayerClient::new(network(&server)).unwrap();

    let receipt = client.get_transaction(B256::from_str(TX_HASH).unwrap()).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(receipt.status, TransactionStatus::Finalized);
    assert_eq!(receipt.result, Some(ConsensusResult::MajorityAgree));
    assert_eq!(receipt.leader_payload(), Some(r#""{\"verdict\":\"true\"}""#));
}

#[tokio::test]
async fn unknown_transaction_is_none() {
    let server = MockServer::start_async().await;
    reply(&server, 0, METHOD_GET_TRANSACTION_BY_HASH, json!({ "result": null })).await;
    let client = GenLayerClient::new(network(&server)).unwrap();

    assert!(client.get_transaction(B256::ZERO).await.unwrap().is_none());
}

#[tokio::test]
async fn node_errors_are_surfaced() {
    let server = MockServer::start_async().await;
    reply(
        &server,
        0,
        METHOD_GET_TRANSACTION_BY_HASH,
        json!({ "error": { "code": -32000, "message": "transaction lookup failed" } }),
    )
    .await;
    let client = GenLayerClient::new(network(&server)).unwrap();

    let err = client.get_transaction(B256::ZERO).await.unwrap_err();

    assert_matches!(err, ChainClientError::Rpc(JsonRpcError::Rpc { code: -32000, .. }));
}

#[tokio::test]
async fn receipt_without_status_is_invalid() {
    let server = MockServer::start_async().await;
    reply(&server, 0, METHOD_GET_TRANSACTION_BY_HASH, json!({ "result": { "hash": TX_HASH } })).await;
    let client = GenLayerClient::new(network(&server)).unwrap();

    let err = client.get_transaction(B256::ZERO).await.unwrap_err();

    assert_matches!(err, ChainClientError::InvalidResponse { .. });
}
