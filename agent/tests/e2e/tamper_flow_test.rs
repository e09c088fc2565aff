//! E2E: 署名・検証・改ざん検知・復元フロー
//!
//! 実際のStoreをHTTPで起動し、Agentから操作する

use std::time::Duration;

use sealed_record_agent::{
    client::HttpStoreClient,
    storage::{FileStorage, LocalStorage},
    SigningAgent, VerifyOutcome,
};
use sealed_record_common::{
    config::{NoBackupPolicy, WritePolicy},
    error::AgentError,
    types::Record,
};
use serde_json::json;
use tempfile::tempdir;

use crate::support::{spawn_store, write_as_attacker};

fn client(base_url: &str) -> HttpStoreClient {
    HttpStoreClient::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn bootstrap_then_verify_is_valid() {
    let server = spawn_store(WritePolicy::AllowSignatureOnly).await;
    let dir = tempdir().unwrap();
    let mut agent =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();

    let receipt = agent.bootstrap().await.unwrap();
    assert_eq!(receipt.data, "Hello World");
    assert_eq!(
        server.store.get().await,
        Record {
            data: "Hello World".to_string(),
            signature: receipt.signature.clone(),
        }
    );

    assert_eq!(agent.verify().await.unwrap(), VerifyOutcome::Valid);
}

#[tokio::test]
async fn data_swap_is_detected_and_backup_restored_locally() {
    let server = spawn_store(WritePolicy::AllowSignatureOnly).await;
    let dir = tempdir().unwrap();
    let mut agent =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();

    let receipt = agent.push(Some("A")).await.unwrap();
    write_as_attacker(
        &server.base_url,
        json!({"data": "B", "signature": receipt.signature}),
    )
    .await;

    let outcome = agent.verify().await.unwrap();
    assert_eq!(
        outcome,
        VerifyOutcome::Tampered {
            restored: Some("A".to_string())
        }
    );
    assert_eq!(agent.data(), "A");
    // 復元はローカルのみ
    assert_eq!(server.store.get().await.data, "B");

    // 明示的に送信し直すと再び有効になる
    agent.push(None).await.unwrap();
    assert_eq!(server.store.get().await.data, "A");
    assert_eq!(agent.verify().await.unwrap(), VerifyOutcome::Valid);
}

#[tokio::test]
async fn signature_only_write_detaches_signature_and_is_detected() {
    let server = spawn_store(WritePolicy::AllowSignatureOnly).await;
    let dir = tempdir().unwrap();
    let mut agent =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();
    agent.push(Some("A")).await.unwrap();

    write_as_attacker(&server.base_url, json!({"signature": "00".repeat(32)})).await;
    assert_eq!(server.store.get().await.data, "A");

    assert!(matches!(
        agent.verify().await.unwrap(),
        VerifyOutcome::Tampered { .. }
    ));
}

#[tokio::test]
async fn mismatch_without_backup_reports_valid_by_default() {
    let server = spawn_store(WritePolicy::AllowSignatureOnly).await;
    write_as_attacker(
        &server.base_url,
        json!({"data": "forged", "signature": "ab".repeat(32)}),
    )
    .await;

    let dir = tempdir().unwrap();
    let mut agent =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();
    assert_eq!(agent.verify().await.unwrap(), VerifyOutcome::Valid);

    let strict_dir = tempdir().unwrap();
    let mut strict = SigningAgent::initialize(
        client(&server.base_url),
        FileStorage::open(strict_dir.path()).unwrap(),
    )
    .unwrap()
    .with_no_backup_policy(NoBackupPolicy::ReportUnverifiable);
    assert_eq!(strict.verify().await.unwrap(), VerifyOutcome::Unverifiable);
}

#[tokio::test]
async fn new_session_key_cannot_verify_previous_session_record() {
    let server = spawn_store(WritePolicy::AllowSignatureOnly).await;
    let dir = tempdir().unwrap();

    {
        let mut first = SigningAgent::initialize(
            client(&server.base_url),
            FileStorage::open(dir.path()).unwrap(),
        )
        .unwrap();
        first.push(Some("A")).await.unwrap();
    }

    // 鍵は永続化されないため、次のセッションでは改ざん扱いになりバックアップが使われる
    let mut second =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();
    assert_eq!(
        second.verify().await.unwrap(),
        VerifyOutcome::Tampered {
            restored: Some("A".to_string())
        }
    );
}

#[tokio::test]
async fn push_to_unreachable_store_fails_without_touching_backup() {
    let dir = tempdir().unwrap();
    let mut agent = SigningAgent::initialize(
        client("http://127.0.0.1:1"),
        FileStorage::open(dir.path()).unwrap(),
    )
    .unwrap();

    let result = agent.push(Some("A")).await;
    assert!(matches!(result, Err(AgentError::Http(_))));
    assert!(agent.storage().load_backup().unwrap().is_none());
}

#[tokio::test]
async fn push_works_against_store_requiring_data() {
    let server = spawn_store(WritePolicy::RequireData).await;
    let dir = tempdir().unwrap();
    let mut agent =
        SigningAgent::initialize(client(&server.base_url), FileStorage::open(dir.path()).unwrap())
            .unwrap();

    agent.push(Some("A")).await.unwrap();
    assert_eq!(agent.verify().await.unwrap(), VerifyOutcome::Valid);
}
