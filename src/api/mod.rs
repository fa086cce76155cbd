//! Prompt API client
//!
//! One async operation per endpoint. Every call goes through the envelope
//! check in [`envelope::extract_body`] and returns canonical records from
//! [`crate::model`].

pub mod envelope;
pub mod http;
pub mod wire;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;

use crate::model::{Id, NewNode, NewNote, NewPrompt, NodeRecord, NoteRecord, PromptMeta, TreeSummary};

pub use envelope::{extract_body, Payload, FALLBACK_MESSAGE};
pub use http::HttpApi;
pub use wire::created_id;

/// Error type for prompt API calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, connection reset, body read failure...
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP status
    #[error("request failed with status {status}")]
    Status { status: u16, body: String },

    /// Envelope carried a failure code
    #[error("{message}")]
    Api { code: Option<String>, message: String },

    /// Body was not the JSON shape we expect
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The prompt API as seen by the assembler and the UI controllers
#[async_trait]
pub trait PromptApi: Send + Sync {
    /// `GET /tree`
    async fn fetch_tree(&self) -> Result<TreeSummary>;

    /// `GET /prompts/{id}`
    async fn fetch_prompt(&self, id: &Id) -> Result<PromptMeta>;

    /// `GET /prompts/{id}/nodes`
    async fn fetch_prompt_nodes(&self, id: &Id) -> Result<Vec<NodeRecord>>;

    /// `GET /prompts/{id}/notes`
    async fn fetch_notes(&self, id: &Id) -> Result<Vec<NoteRecord>>;

    /// `POST /prompts/{parent_id}`
    async fn add_prompt(&self, parent_id: &Id, prompt: &NewPrompt) -> Result<Payload>;

    /// `POST /prompts/{id}/nodes`
    async fn add_node(&self, id: &Id, node: &NewNode) -> Result<Payload>;

    /// `POST /prompts/{id}/notes`
    async fn add_note(&self, id: &Id, note: &NewNote) -> Result<Payload>;
}
