//! Scripted HTTP server and token helpers for quill-api integration tests.

#![allow(dead_code)]

use std::io::Read as _;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use quill_api::BlogClient;
use quill_auth::{Gateway, MemoryTokenStore, SessionManager};

pub fn make_jwt(sub: &str, id: i64, roles: &[&str]) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512"}"#);
    let roles = roles
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(",");
    let payload = format!(
        r#"{{"sub":"{sub}","id":{id},"roles":[{roles}],"exp":{}}}"#,
        chrono::Utc::now().timestamp() + 3600
    );
    format!("{header}.{}.sig", URL_SAFE_NO_PAD.encode(payload))
}

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Answers requests in order with the given `(status, body)` pairs.
pub struct ScriptedServer {
    pub base_url: String,
    seen: mpsc::Receiver<Seen>,
}

impl ScriptedServer {
    pub fn spawn<S: Into<String>>(script: Vec<(u16, S)>) -> Self {
        let script = script
            .into_iter()
            .map(|(status, body)| (status, body.into()))
            .collect::<Vec<(u16, String)>>();
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind scripted server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("ip listener");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for (status, body) in script {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let mut request_body = String::new();
                let _ = request.as_reader().read_to_string(&mut request_body);
                let _ = tx.send(Seen {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    body: request_body,
                });
                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"application/json"[..],
                )
                .expect("static header");
                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            seen: rx,
        }
    }

    pub fn next(&self) -> Seen {
        self.seen
            .recv_timeout(Duration::from_secs(5))
            .expect("request should reach scripted server")
    }

    /// Client with a fresh, initialized in-memory session.
    pub fn client(&self) -> BlogClient {
        let session = Arc::new(SessionManager::new(MemoryTokenStore::new()));
        session.initialize();
        let gateway =
            Gateway::new(&self.base_url, Duration::from_secs(5), session).expect("gateway");
        BlogClient::new(gateway)
    }
}

pub const POST_BY_ALICE: &str = r#"{
    "id": 1,
    "title": "Hello",
    "content": "World",
    "author": {"id": 1, "username": "alice"},
    "publicationDate": "2024-05-01T10:00:00",
    "commentCount": 0
}"#;
