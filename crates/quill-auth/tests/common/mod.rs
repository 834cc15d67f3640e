//! Shared helpers for quill-auth integration tests.

#![allow(dead_code)]

use std::io::Read as _;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Build an unsigned three-segment token around `payload`.
pub fn make_jwt(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS512","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload);
    let signature = URL_SAFE_NO_PAD.encode("not-a-real-signature");
    format!("{header}.{payload}.{signature}")
}

pub fn now_secs() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn valid_token(sub: &str, id: i64) -> String {
    make_jwt(&format!(
        r#"{{"sub":"{sub}","id":{id},"roles":["ROLE_USER"],"exp":{}}}"#,
        now_secs() + 3600
    ))
}

pub fn admin_token(sub: &str, id: i64) -> String {
    make_jwt(&format!(
        r#"{{"sub":"{sub}","id":{id},"roles":["ROLE_USER","ROLE_ADMIN"],"exp":{}}}"#,
        now_secs() + 3600
    ))
}

pub fn expired_token(sub: &str, id: i64) -> String {
    make_jwt(&format!(
        r#"{{"sub":"{sub}","id":{id},"exp":{}}}"#,
        now_secs() - 60
    ))
}

/// What the capture server saw for one request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

/// A local HTTP server that records requests and answers each with `200 {}`.
pub struct CaptureServer {
    pub base_url: String,
    seen: mpsc::Receiver<Captured>,
}

impl CaptureServer {
    pub fn spawn(expected_requests: usize) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("bind capture server");
        let port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .expect("ip listener");
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            for _ in 0..expected_requests {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv(name))
                        .map(|h| h.value.as_str().to_string())
                };
                let authorization = header("Authorization");
                let content_type = header("Content-Type");
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let captured = Captured {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    content_type,
                    body,
                };
                let _ = tx.send(captured);
                let _ = request.respond(tiny_http::Response::from_string("{}"));
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            seen: rx,
        }
    }

    pub fn next(&self) -> Captured {
        self.seen
            .recv_timeout(Duration::from_secs(5))
            .expect("request should reach capture server")
    }
}
