//! Record Store通信クライアント
//!
//! レコードの取得・書き込み。失敗時のリトライは行わない。

use async_trait::async_trait;
use reqwest::{header, Client};
use sealed_record_common::{
    config::AgentConfig,
    error::{AgentError, AgentResult},
    protocol::{ErrorResponse, WriteRecordRequest},
    types::Record,
};
use std::time::Duration;
use tracing::debug;

/// レコード転送層
#[async_trait]
pub trait RecordTransport: Send + Sync {
    /// 現在のレコードを取得
    async fn fetch(&self) -> AgentResult<Record>;

    /// レコードを書き込む（後勝ち）
    async fn submit(&self, req: &WriteRecordRequest) -> AgentResult<()>;
}

/// HTTP/JSONでRecord Storeに接続するクライアント
#[derive(Debug, Clone)]
pub struct HttpStoreClient {
    http_client: Client,
    base_url: String,
}

impl HttpStoreClient {
    /// 新しいクライアントを作成
    ///
    /// # Arguments
    /// * `base_url` - StoreのベースURL（例: "http://localhost:8080"）
    /// * `timeout` - リクエストタイムアウト
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AgentResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AgentError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    /// 設定から作成
    pub fn from_config(config: &AgentConfig) -> AgentResult<Self> {
        Self::new(
            config.store_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// StoreのベースURL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecordTransport for HttpStoreClient {
    async fn fetch(&self) -> AgentResult<Record> {
        debug!("Fetching record from store: {}", self.base_url);

        let response = self
            .http_client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| AgentError::Http(format!("Failed to fetch record: {}", e)))?;

        if !response.status().is_success() {
            return Err(AgentError::Http(format!(
                "Failed to fetch record: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<Record>()
            .await
            .map_err(|e| AgentError::Http(format!("Failed to parse record: {}", e)))
    }

    async fn submit(&self, req: &WriteRecordRequest) -> AgentResult<()> {
        debug!("Submitting record to store: {}", self.base_url);

        let response = self
            .http_client
            .post(&self.base_url)
            .header(header::ACCEPT, "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| AgentError::Http(format!("Failed to submit record: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response
            .json::<ErrorResponse>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| "no error body".to_string());
        Err(AgentError::Http(format!(
            "Store rejected record: HTTP {} ({})",
            status, detail
        )))
    }
}
