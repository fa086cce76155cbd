//! Wire formats and their normalization into canonical records
//!
//! The server is loose about field naming: ids arrive as `nodeId`/`noteId` or
//! plain `id`, timestamps as `createdAt` or `created_at`. Everything is
//! folded into one field per entity here so nothing downstream has to care.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, Payload};
use crate::model::{Id, NodeRecord, NoteRecord, PromptMeta, TreeSummary};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTree {
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    main_request: Option<String>,
    #[serde(default)]
    final_integration: Option<String>,
    #[serde(default)]
    prompts: Option<Vec<Id>>,
    #[serde(default)]
    prompt_ids: Option<Vec<Id>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPrompt {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "parent_prompt_id")]
    parent_prompt_id: Option<Id>,
    #[serde(default, alias = "project_id")]
    project_id: Option<Id>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNode {
    #[serde(default)]
    node_id: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    action: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNote {
    #[serde(default)]
    note_id: Option<Id>,
    #[serde(default)]
    id: Option<Id>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default, rename = "created_at")]
    created_at_snake: Option<String>,
}

fn decode<T: DeserializeOwned>(what: &str, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Malformed(format!("invalid {} payload: {}", what, e)))
}

/// Take a list field out of a payload, treating absent or null as empty
fn take_list(payload: &mut Payload, field: &str) -> Vec<Value> {
    match payload.remove(field) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

pub fn tree_summary(payload: Payload) -> Result<TreeSummary, ApiError> {
    let raw: RawTree = decode("tree", Value::Object(payload))?;
    Ok(TreeSummary {
        project: raw.project.unwrap_or_default(),
        main_request: raw.main_request.unwrap_or_default(),
        final_integration: raw.final_integration.unwrap_or_default(),
        prompt_ids: raw.prompt_ids.or(raw.prompts).unwrap_or_default(),
    })
}

pub fn prompt_meta(payload: Payload) -> Result<PromptMeta, ApiError> {
    let raw: RawPrompt = decode("prompt", Value::Object(payload))?;
    Ok(PromptMeta {
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        parent_prompt_id: raw.parent_prompt_id,
        project_id: raw.project_id,
    })
}

pub fn node_list(mut payload: Payload) -> Result<Vec<NodeRecord>, ApiError> {
    take_list(&mut payload, "nodes")
        .into_iter()
        .map(|item| {
            let raw: RawNode = decode("node", item)?;
            let id = raw
                .node_id
                .or(raw.id)
                .ok_or_else(|| ApiError::Malformed("node without nodeId or id".to_string()))?;
            Ok(NodeRecord {
                id,
                name: raw.name.unwrap_or_default(),
                action: raw.action.filter(|a| !a.is_empty()),
            })
        })
        .collect()
}

pub fn note_list(mut payload: Payload) -> Result<Vec<NoteRecord>, ApiError> {
    take_list(&mut payload, "notes")
        .into_iter()
        .map(|item| {
            let raw: RawNote = decode("note", item)?;
            let id = raw
                .note_id
                .or(raw.id)
                .ok_or_else(|| ApiError::Malformed("note without noteId or id".to_string()))?;
            Ok(NoteRecord {
                id,
                content: raw.content.unwrap_or_default(),
                created_at: raw.created_at.or(raw.created_at_snake).unwrap_or_default(),
            })
        })
        .collect()
}

/// Identifier of a freshly created entity, if the server returned one
pub fn created_id(payload: &Payload) -> Option<Id> {
    ["promptId", "nodeId", "noteId", "id"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| !value.is_null())
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
