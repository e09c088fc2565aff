//! テスト用Store起動ヘルパー

use sealed_record_common::{config::WritePolicy, types::Record};
use sealed_record_store::{api, record::RecordStore, AppState};

/// テスト用に起動したStore
pub struct TestStore {
    /// ベースURL（例: "http://127.0.0.1:54321"）
    pub base_url: String,
    /// Storeの状態（直接参照用）
    pub store: RecordStore,
}

/// 空きポートでStoreを起動する
pub async fn spawn_store(write_policy: WritePolicy) -> TestStore {
    let store = RecordStore::with_record(Record::default(), write_policy);
    let app = api::create_router(AppState {
        store: store.clone(),
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test store crashed");
    });

    TestStore {
        base_url: format!("http://{}", addr),
        store,
    }
}

/// 鍵を持たない第三者としてStoreに書き込む
pub async fn write_as_attacker(base_url: &str, body: serde_json::Value) {
    let status = reqwest::Client::new()
        .post(base_url)
        .json(&body)
        .send()
        .await
        .expect("Attacker write failed")
        .status();
    assert!(status.is_success(), "attacker write rejected: {}", status);
}
