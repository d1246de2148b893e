// src/testing.rs
// =============================================================================
// Shared test helpers (compiled only for `cargo test`).
//
// HTTP tests must not depend on the public internet, so the responders
// below listen on 127.0.0.1 and answer every request with a fixed status
// line. Each one records the request lines it received, so tests can assert
// on the method and on how many requests were made.
// =============================================================================

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::checker::UrlChecker;

// A running loopback responder
pub struct TestServer {
    /// Base URL, "http://127.0.0.1:PORT/"
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    // Request lines seen so far, e.g. "HEAD / HTTP/1.1"
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

// Starts a responder that answers with `status_line` plus `headers`.
// It keeps answering until the test runtime shuts down.
pub async fn serve_response(
    status_line: &'static str,
    headers: &[(&str, &str)],
) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    let requests = Arc::new(Mutex::new(Vec::new()));

    let mut response = format!("HTTP/1.1 {}\r\n", status_line);
    for (name, value) in headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("content-length: 0\r\nconnection: close\r\n\r\n");

    let log = Arc::clone(&requests);
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let log = Arc::clone(&log);
            let response = response.clone();
            tokio::spawn(async move {
                let mut buf = [0u8; 2048];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                if let Some(line) = head.lines().next() {
                    log.lock().expect("request log poisoned").push(line.to_string());
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    TestServer {
        url: format!("http://{}/", addr),
        requests,
    }
}

// Shorthand for a responder with no extra headers; returns just its URL.
pub async fn serve_status(status_line: &'static str) -> String {
    serve_response(status_line, &[]).await.url
}

// Accepts connections and never answers, to exercise request timeouts.
pub async fn serve_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    format!("http://{}/", addr)
}

// UrlChecker built the production way, minus HTTP_PROXY & co, so loopback
// requests stay local.
pub fn url_checker_with(timeout: Duration, max_redirects: usize) -> UrlChecker {
    UrlChecker::from_builder(UrlChecker::client_builder(timeout, max_redirects).no_proxy())
        .expect("build test UrlChecker")
}

// UrlChecker with the default 5 s timeout and 5 redirects.
pub fn test_url_checker() -> UrlChecker {
    url_checker_with(Duration::from_secs(5), 5)
}

// Writes `contents` to root/relative, creating parent directories.
pub fn write_doc(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dirs");
    }
    std::fs::write(path, contents).expect("write document");
}
