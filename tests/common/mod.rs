//! Fake prompt API backend shared by the integration tests
//!
//! A tiny_http server on an ephemeral port. Every request is recorded and
//! answered by a handler closure, so each test decides what the "server"
//! says.

#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub body: String,
    pub content_type: Option<String>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct FakeServer {
    pub url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeServer {
    /// Start a server answering every request with `handler(method, path)`
    pub fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str) -> (u16, String) + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("bind fake server");
        let addr = server
            .server_addr()
            .to_ip()
            .expect("fake server has an IP address");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().as_str().to_string();
                let path = request.url().to_string();
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());

                let (status, reply) = handler(&method, &path);
                recorded.lock().unwrap().push(Recorded {
                    method,
                    path,
                    body,
                    content_type,
                });

                let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("static header");
                let response = Response::from_string(reply)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            url: format!("http://{}", addr),
            requests,
        }
    }

    /// Server backed by [`demo_backend`]
    pub fn demo() -> Self {
        Self::start(demo_backend)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

/// Wrap payload fields in a success envelope
pub fn ok(payload: Value) -> (u16, String) {
    let mut body = json!({ "errorCode": 200, "errorMessage": null });
    if let (Some(body), Value::Object(fields)) = (body.as_object_mut(), payload) {
        body.extend(fields);
    }
    (200, body.to_string())
}

/// An envelope failure with HTTP 200
pub fn api_error(code: u16, message: Value) -> (u16, String) {
    (200, json!({ "errorCode": code, "errorMessage": message }).to_string())
}

/// Three prompts; prompt 3's nodes endpoint fails so it never hydrates
pub fn demo_backend(method: &str, path: &str) -> (u16, String) {
    match (method, path) {
        ("GET", "/tree") => ok(json!({
            "project": "Demo",
            "mainRequest": "Build the demo",
            "finalIntegration": "Ship it",
            "prompts": [1, 2, 3]
        })),
        ("GET", "/prompts/1") => ok(json!({
            "title": "Alpha",
            "description": "First prompt",
            "parentPromptId": null,
            "projectId": 1
        })),
        ("GET", "/prompts/2") => ok(json!({
            "title": "Beta",
            "description": "Second prompt",
            "parent_prompt_id": 1,
            "project_id": 1
        })),
        ("GET", "/prompts/3") => ok(json!({ "title": "Gamma", "description": "" })),
        ("GET", "/prompts/1/nodes") => ok(json!({
            "nodes": [
                { "nodeId": 10, "name": "lexer", "action": "split tokens" },
                { "id": 11, "name": "parser", "action": null }
            ]
        })),
        ("GET", "/prompts/2/nodes") => ok(json!({ "nodes": [] })),
        ("GET", "/prompts/3/nodes") => api_error(500, json!("database unavailable")),
        ("GET", "/prompts/1/notes") => ok(json!({
            "notes": [
                { "noteId": 7, "content": "newest", "createdAt": "2024-01-05T15:04:00Z" },
                { "id": 6, "content": "older", "created_at": "2024-01-04 09:30:00" }
            ]
        })),
        ("GET", p) if p.ends_with("/notes") => ok(json!({})),
        ("POST", "/prompts/1/notes") => ok(json!({ "noteId": 77 })),
        ("POST", "/prompts/1/nodes") => ok(json!({ "nodeId": 12 })),
        ("POST", "/prompts/1") => ok(json!({ "promptId": 4 })),
        _ => api_error(404, json!("Not found")),
    }
}
