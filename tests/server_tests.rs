// Server tests - real sockets against the in-memory backend

mod common;

use common::{bearer_for, create_test_config, ALLOWED_ORIGIN};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use topicd::application::config::models::Config;
use topicd::application::handler::{RequestHandler, TopicHandler};
use topicd::application::server::ServerManager;
use topicd::application::service;

/// Start a server on an ephemeral port; dropping the sender stops it
async fn start_test_server(mut config: Config) -> (SocketAddr, oneshot::Sender<()>) {
    config.server.port = 0;
    let store = service::connect(&config.database, &config.auth).await.unwrap();
    let handler: Arc<dyn RequestHandler> = Arc::new(TopicHandler::from_config(store, &config));
    let server = ServerManager::bind(&config, handler).await.unwrap();
    let addr = server.local_addr();

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(server.run_until(async {
        let _ = rx.await;
    }));

    (addr, tx)
}

async fn send_request(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn test_options_over_the_wire() {
    let (addr, _stop) = start_test_server(create_test_config()).await;

    let response = send_request(
        addr,
        &format!(
            "OPTIONS /topic HTTP/1.1\r\nHost: localhost\r\nOrigin: {}\r\nConnection: close\r\n\r\n",
            ALLOWED_ORIGIN
        ),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 204"), "{}", response);
    assert!(response.contains("Access-Control-Allow-Methods: POST,GET,OPTION,PUT,DELETE,OPTION"));
    assert!(response.contains(&format!("Access-Control-Allow-Origin: {}", ALLOWED_ORIGIN)));
}

#[tokio::test]
async fn test_create_then_fetch_on_one_connection() {
    let (addr, _stop) = start_test_server(create_test_config()).await;

    let body = r#"{"id":"t1","title":"Hello"}"#;
    let request = format!(
        "POST /topic HTTP/1.1\r\nHost: localhost\r\nAuthorization: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}\
         GET /topic/t1 HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        bearer_for("admin"),
        body.len(),
        body
    );
    let response = send_request(addr, &request).await;

    assert_eq!(response.matches("HTTP/1.1 ").count(), 2, "{}", response);
    assert!(response.starts_with("HTTP/1.1 201"));
    assert!(response.contains("HTTP/1.1 200"));
    assert!(response.contains("Content-Type: application/json"));
    assert!(response.contains(r#""title":"Hello""#));
}

#[tokio::test]
async fn test_too_deep_path_over_the_wire() {
    let (addr, _stop) = start_test_server(create_test_config()).await;

    let response = send_request(
        addr,
        "GET /a/b/c/d/e/f HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 404"));
    assert!(response.contains("Content-Type: text/plain"));
    assert!(response.ends_with("/a/b/c/d/e/f is not valid"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = create_test_config();
    config.client_max_body_size = 16;
    let (addr, _stop) = start_test_server(config).await;

    let response = send_request(
        addr,
        "POST /topic HTTP/1.1\r\nHost: localhost\r\nContent-Length: 1000\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 413"), "{}", response);
    assert!(response.contains("Connection: close"));
}

#[tokio::test]
async fn test_malformed_request_is_rejected() {
    let (addr, _stop) = start_test_server(create_test_config()).await;

    let response = send_request(addr, "GET topic HTTP/1.1\r\nHost: localhost\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.1 400"), "{}", response);
}

#[tokio::test]
async fn test_http10_closes_after_response() {
    let (addr, _stop) = start_test_server(create_test_config()).await;

    let response = send_request(addr, "GET /topic HTTP/1.0\r\n\r\n").await;

    assert!(response.starts_with("HTTP/1.0 200"), "{}", response);
    assert!(response.ends_with("[]"));
}
