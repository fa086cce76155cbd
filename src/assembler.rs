//! Tree assembly
//!
//! Turns the identifier list from `GET /tree` into hydrated prompt records.
//! Each prompt needs two calls (metadata and nodes); prompts are hydrated
//! concurrently, at most `limit` at a time, and results come back in
//! summary order no matter which finishes first. A prompt whose hydration
//! fails is logged and left out. Only a failing summary fetch fails the load.

use futures_util::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::api::{PromptApi, Result};
use crate::model::{Id, LoadedTree, PromptRecord};

/// Fetch metadata and nodes for one prompt and merge them
pub async fn hydrate_prompt<A>(api: &A, id: &Id) -> Result<PromptRecord>
where
    A: PromptApi + ?Sized,
{
    let (meta, nodes) = tokio::try_join!(api.fetch_prompt(id), api.fetch_prompt_nodes(id))?;
    Ok(PromptRecord::hydrate(id.clone(), meta, nodes))
}

/// Hydrate every identifier, dropping failures, preserving input order
pub async fn assemble_prompts<A>(api: &A, ids: &[Id], limit: usize) -> Vec<PromptRecord>
where
    A: PromptApi + ?Sized,
{
    stream::iter(ids)
        .map(|id| async move {
            match hydrate_prompt(api, id).await {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(prompt_id = %id, error = %e, "failed to load prompt, skipping");
                    None
                }
            }
        })
        .buffered(limit.max(1))
        .filter_map(|record| async move { record })
        .boxed()
        .collect()
        .await
}

/// Fetch the tree summary and assemble its prompts
pub async fn load_tree<A>(api: &A, limit: usize) -> Result<LoadedTree>
where
    A: PromptApi + ?Sized,
{
    let summary = api.fetch_tree().await?;
    let prompts = assemble_prompts(api, &summary.prompt_ids, limit).await;
    info!(
        requested = summary.prompt_ids.len(),
        loaded = prompts.len(),
        "tree assembled"
    );
    Ok(LoadedTree { summary, prompts })
}
