//! Prompt tree records
//!
//! These are the canonical, already-normalized shapes the rest of the crate
//! works with. Wire quirks (numeric vs string ids, `noteId` vs `id`,
//! `createdAt` vs `created_at`) are folded away in `api::wire` before a value
//! ever reaches one of these types.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque identifier for prompts, nodes and notes
///
/// The server may send identifiers as JSON numbers or strings. The textual
/// form is what goes into URL paths and what equality looks at, so `7` and
/// `"7"` name the same entity. Whether the value arrived as a number is
/// remembered only so JSON output writes it back the way it came in.
#[derive(Debug, Clone)]
pub struct Id {
    text: String,
    numeric: bool,
}

impl Id {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            text: raw.into(),
            numeric: false,
        }
    }

    fn number(text: String) -> Self {
        Self {
            text,
            numeric: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for Id {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Id {}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for Id {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Id {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Id {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<i64> for Id {
    fn from(raw: i64) -> Self {
        Self::number(raw.to_string())
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.text.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
            if let Ok(n) = self.text.parse::<u64>() {
                return serializer.serialize_u64(n);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Uint(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Id::number(n.to_string()),
            RawId::Uint(n) => Id::number(n.to_string()),
            RawId::Text(s) => Id::new(s),
        })
    }
}

/// Project-level summary returned by `GET /tree`
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSummary {
    pub project: String,
    pub main_request: String,
    pub final_integration: String,
    /// Display order of the root list. Never re-sorted.
    pub prompt_ids: Vec<Id>,
}

/// Prompt metadata returned by `GET /prompts/{id}`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PromptMeta {
    pub title: String,
    pub description: String,
    pub parent_prompt_id: Option<Id>,
    pub project_id: Option<Id>,
}

/// A leaf item attached to a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRecord {
    pub id: Id,
    pub name: String,
    pub action: Option<String>,
}

/// A note attached to a prompt, created server-side
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: Id,
    pub content: String,
    /// Timestamp as sent by the server; see [`format_timestamp`]
    pub created_at: String,
}

/// A hydrated prompt: metadata plus its nodes
///
/// Replaced wholesale when re-fetched, never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptRecord {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub parent_prompt_id: Option<Id>,
    pub project_id: Option<Id>,
    pub nodes: Vec<NodeRecord>,
}

impl PromptRecord {
    /// Merge prompt metadata and its nodes into one record
    pub fn hydrate(id: Id, meta: PromptMeta, nodes: Vec<NodeRecord>) -> Self {
        Self {
            id,
            title: meta.title,
            description: meta.description,
            parent_prompt_id: meta.parent_prompt_id,
            project_id: meta.project_id,
            nodes,
        }
    }

    pub fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }
}

/// Summary plus the prompts that hydrated successfully, in summary order
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LoadedTree {
    pub summary: TreeSummary,
    pub prompts: Vec<PromptRecord>,
}

/// Body for `POST /prompts/{parentId}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrompt {
    pub title: String,
    pub description: String,
}

/// Body for `POST /prompts/{id}/nodes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// Body for `POST /prompts/{id}/notes`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub content: String,
}

/// Format a server timestamp as `Jan 5, 2024, 03:04 PM`
///
/// Accepts RFC 3339 and SQLite's `YYYY-MM-DD HH:MM:SS`. Anything else is
/// returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y, %I:%M %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return dt.format(DISPLAY).to_string();
        }
    }
    raw.to_string()
}
