//! In-memory [`PromptApi`] for tests
//!
//! Records every call, can be told to fail specific endpoints, and can delay
//! per-prompt fetches to shuffle completion order.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use super::{ApiError, Payload, PromptApi, Result};
use crate::model::{Id, NewNode, NewNote, NewPrompt, NodeRecord, NoteRecord, PromptMeta, TreeSummary};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Tree,
    Prompt(Id),
    Nodes(Id),
    Notes(Id),
    AddPrompt(Id),
    AddNode(Id),
    AddNote(Id, String),
}

#[derive(Default)]
struct FakeState {
    summary: TreeSummary,
    prompts: HashMap<Id, PromptMeta>,
    nodes: HashMap<Id, Vec<NodeRecord>>,
    notes: HashMap<Id, Vec<NoteRecord>>,
    fail_tree: bool,
    fail_prompt: HashSet<Id>,
    fail_nodes: HashSet<Id>,
    fail_notes: HashSet<Id>,
    fail_add_note: bool,
    delays: HashMap<Id, Duration>,
    calls: Vec<Call>,
    next_id: i64,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

fn failure(message: &str) -> ApiError {
    ApiError::Api {
        code: Some("500".to_string()),
        message: message.to_string(),
    }
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A project whose prompts are `titles`, ids 1..=n, each with one node
    pub fn with_prompts(titles: &[&str]) -> Self {
        let api = Self::new();
        {
            let mut state = api.state.lock().unwrap();
            state.summary = TreeSummary {
                project: "Demo".to_string(),
                main_request: "Build the demo".to_string(),
                final_integration: "Ship it".to_string(),
                prompt_ids: Vec::new(),
            };
            for (i, title) in titles.iter().enumerate() {
                let id = Id::from(i as i64 + 1);
                state.summary.prompt_ids.push(id.clone());
                state.prompts.insert(
                    id.clone(),
                    PromptMeta {
                        title: title.to_string(),
                        description: format!("{} description", title),
                        parent_prompt_id: None,
                        project_id: Some(Id::from(1)),
                    },
                );
                state.nodes.insert(
                    id.clone(),
                    vec![NodeRecord {
                        id: Id::from(100 + i as i64),
                        name: format!("{} node", title),
                        action: None,
                    }],
                );
            }
            state.next_id = 1000;
        }
        api
    }

    pub fn fail_tree(&self) {
        self.state.lock().unwrap().fail_tree = true;
    }

    pub fn fail_prompt(&self, id: Id) {
        self.state.lock().unwrap().fail_prompt.insert(id);
    }

    pub fn fail_nodes(&self, id: Id) {
        self.state.lock().unwrap().fail_nodes.insert(id);
    }

    pub fn fail_notes(&self, id: Id) {
        self.state.lock().unwrap().fail_notes.insert(id);
    }

    pub fn set_fail_add_note(&self, fail: bool) {
        self.state.lock().unwrap().fail_add_note = fail;
    }

    pub fn delay(&self, id: Id, delay: Duration) {
        self.state.lock().unwrap().delays.insert(id, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    async fn enter(&self, id: &Id) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        let delay = self.state.lock().unwrap().delays.get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PromptApi for FakeApi {
    async fn fetch_tree(&self) -> Result<TreeSummary> {
        self.record(Call::Tree);
        let state = self.state.lock().unwrap();
        if state.fail_tree {
            return Err(failure("tree unavailable"));
        }
        Ok(state.summary.clone())
    }

    async fn fetch_prompt(&self, id: &Id) -> Result<PromptMeta> {
        self.record(Call::Prompt(id.clone()));
        self.enter(id).await;
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_prompt.contains(id) {
                Err(failure("prompt unavailable"))
            } else {
                state
                    .prompts
                    .get(id)
                    .cloned()
                    .ok_or_else(|| failure("Prompt not found"))
            }
        };
        self.leave();
        result
    }

    async fn fetch_prompt_nodes(&self, id: &Id) -> Result<Vec<NodeRecord>> {
        self.record(Call::Nodes(id.clone()));
        self.enter(id).await;
        let result = {
            let state = self.state.lock().unwrap();
            if state.fail_nodes.contains(id) {
                Err(failure("nodes unavailable"))
            } else {
                Ok(state.nodes.get(id).cloned().unwrap_or_default())
            }
        };
        self.leave();
        result
    }

    async fn fetch_notes(&self, id: &Id) -> Result<Vec<NoteRecord>> {
        self.record(Call::Notes(id.clone()));
        let state = self.state.lock().unwrap();
        if state.fail_notes.contains(id) {
            return Err(failure("notes unavailable"));
        }
        Ok(state.notes.get(id).cloned().unwrap_or_default())
    }

    async fn add_prompt(&self, parent_id: &Id, prompt: &NewPrompt) -> Result<Payload> {
        self.record(Call::AddPrompt(parent_id.clone()));
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = Id::from(state.next_id);
        state.prompts.insert(
            id.clone(),
            PromptMeta {
                title: prompt.title.clone(),
                description: prompt.description.clone(),
                parent_prompt_id: Some(parent_id.clone()),
                project_id: Some(Id::from(1)),
            },
        );
        Ok(payload(json!({ "promptId": state.next_id })))
    }

    async fn add_node(&self, id: &Id, node: &NewNode) -> Result<Payload> {
        self.record(Call::AddNode(id.clone()));
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let node_id = Id::from(state.next_id);
        state.nodes.entry(id.clone()).or_default().push(NodeRecord {
            id: node_id,
            name: node.name.clone(),
            action: node.action.clone(),
        });
        Ok(payload(json!({ "nodeId": state.next_id })))
    }

    async fn add_note(&self, id: &Id, note: &NewNote) -> Result<Payload> {
        self.record(Call::AddNote(id.clone(), note.content.clone()));
        let mut state = self.state.lock().unwrap();
        if state.fail_add_note {
            return Err(failure("could not save note"));
        }
        state.next_id += 1;
        let note_id = Id::from(state.next_id);
        // Newest first, like the server
        state.notes.entry(id.clone()).or_default().insert(
            0,
            NoteRecord {
                id: note_id,
                content: note.content.clone(),
                created_at: "2024-01-05 15:04:00".to_string(),
            },
        );
        Ok(payload(json!({ "noteId": state.next_id })))
    }
}

fn payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        _ => Payload::new(),
    }
}
