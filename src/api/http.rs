//! reqwest-backed implementation of [`PromptApi`]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use super::{envelope, wire, ApiError, Payload, PromptApi, Result};
use crate::config::ApiConfig;
use crate::model::{Id, NewNode, NewNote, NewPrompt, NodeRecord, NoteRecord, PromptMeta, TreeSummary};

#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Payload> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| ApiError::Malformed(format!("response is not JSON: {}", e)))?;
        envelope::extract_body(value)
    }

    async fn get(&self, path: &str) -> Result<Payload> {
        let url = self.endpoint(path);
        debug!(%url, "GET");
        self.send(self.client.get(url)).await
    }

    async fn post<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> Result<Payload> {
        let url = self.endpoint(path);
        debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await
    }
}

#[async_trait]
impl PromptApi for HttpApi {
    async fn fetch_tree(&self) -> Result<TreeSummary> {
        wire::tree_summary(self.get("/tree").await?)
    }

    async fn fetch_prompt(&self, id: &Id) -> Result<PromptMeta> {
        wire::prompt_meta(self.get(&format!("/prompts/{}", id)).await?)
    }

    async fn fetch_prompt_nodes(&self, id: &Id) -> Result<Vec<NodeRecord>> {
        wire::node_list(self.get(&format!("/prompts/{}/nodes", id)).await?)
    }

    async fn fetch_notes(&self, id: &Id) -> Result<Vec<NoteRecord>> {
        wire::note_list(self.get(&format!("/prompts/{}/notes", id)).await?)
    }

    async fn add_prompt(&self, parent_id: &Id, prompt: &NewPrompt) -> Result<Payload> {
        self.post(&format!("/prompts/{}", parent_id), prompt).await
    }

    async fn add_node(&self, id: &Id, node: &NewNode) -> Result<Payload> {
        self.post(&format!("/prompts/{}/nodes", id), node).await
    }

    async fn add_note(&self, id: &Id, note: &NewNote) -> Result<Payload> {
        self.post(&format!("/prompts/{}/notes", id), note).await
    }
}
