//! Mock server helpers for download testing

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Archive URL pattern served by `server`
pub fn archive_url_pattern(server: &MockServer) -> String {
    format!("{}/{{template}}/archive/{{branch}}.tar.gz", server.uri())
}

/// Serve `body` at `/{template}/archive/{branch}.tar.gz`
pub async fn mock_archive(server: &MockServer, template: &str, branch: &str, body: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/archive/{}.tar.gz", template, branch)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-gzip")
                .set_body_bytes(body),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Answer every archive request with `status`
pub async fn mock_archive_status(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Fail the test if any request reaches `server`
pub async fn mock_no_requests(server: &MockServer) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// Start a one-shot HTTP server that announces `declared_len` body bytes,
/// sends only `partial`, then closes the connection
///
/// Returns the base URL.
pub async fn spawn_truncating_server(partial: Vec<u8>, declared_len: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;

            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/x-gzip\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                declared_len
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.write_all(&partial).await;
            let _ = socket.flush().await;
            // Let the client start reading the body before the connection drops
            tokio::time::sleep(Duration::from_millis(100)).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}
