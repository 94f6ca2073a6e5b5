use icx_identity::{write_key_store, IcxSigner};
use icx_provider::jsonrpc::ClientError;
use icx_provider::transaction::fill_defaults;
use icx_provider::ApiError;
use serde_json::json;
use tempfile::tempdir;

use crate::setup::VerifyingNode;

mod setup;

const PASSWORD: &str = "qwer1234%";

#[tokio::test]
async fn send_transaction_signed_with_key_store() {
    let node = VerifyingNode::start();

    let dir = tempdir().unwrap();
    let path =
        write_key_store(dir.path(), &IcxSigner::random(), PASSWORD, Some("keystore")).unwrap();
    let signer = IcxSigner::from_key_store(&path, PASSWORD).unwrap();

    let mut params = json!({
        "to": "hx5bfdb090f43a808005ffc27c25b213145e80b7cd",
        "value": "0xde0b6b3a7640000",
        "nonce": "0x1"
    });
    fill_defaults(&mut params, "0x3", "0x12345").unwrap();

    let client = node.client();
    let hash = client.sign_and_send(&signer, params).await.unwrap();
    assert!(hash.starts_with("0x"));
    assert_eq!(hash.len(), 2 + 64);

    node.stop().await;
}

#[tokio::test]
async fn tampered_transaction_is_rejected_by_node() {
    let node = VerifyingNode::start();
    let signer = IcxSigner::random();

    let params = json!({"to": "hx5bfdb090f43a808005ffc27c25b213145e80b7cd", "value": "0x1"});
    let mut signed = icx_provider::transaction::sign_transaction(&signer, params).unwrap();
    signed["value"] = json!("0x2");

    match node.client().send_transaction(signed).await {
        Err(ApiError::Client(ClientError::Rpc { code, .. })) => assert_eq!(code, -32602),
        other => panic!("expected rpc error, got {other:?}"),
    }

    node.stop().await;
}

#[tokio::test]
async fn balance_of_new_wallet() {
    let node = VerifyingNode::start();

    let balance = node
        .client()
        .get_balance(&IcxSigner::random().address())
        .await
        .unwrap();
    assert_eq!(balance, "0x0");

    node.stop().await;
}
