//! Loopback hub servers shared by the REST and WebSocket tests.

#![allow(dead_code)]

use std::future::Future;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{accept_async, WebSocketStream};

pub const TOKEN: &str = "tok";

pub type ServerWs = WebSocketStream<TcpStream>;

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

/// Accept one HTTP request, answer with `status` and a JSON `body`.
///
/// The handle resolves to the request head as received.
pub async fn serve_http(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let (listener, base) = bind().await;

    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut chunk = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = sock.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.unwrap();

        String::from_utf8_lossy(&head).into_owned()
    });

    (base, handle)
}

/// Accept one WebSocket connection and hand it to `script`.
pub async fn serve_ws<F, Fut>(script: F) -> (String, JoinHandle<()>)
where
    F: FnOnce(ServerWs) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let (listener, base) = bind().await;

    let handle = tokio::spawn(async move {
        let (sock, _) = listener.accept().await.unwrap();
        let ws = accept_async(sock).await.unwrap();
        script(ws).await;
    });

    (base, handle)
}

pub async fn send_json(ws: &mut ServerWs, value: Value) {
    ws.send(Message::Text(value.to_string())).await.unwrap();
}

/// Next text frame from the client, parsed.
pub async fn recv_json(ws: &mut ServerWs) -> Value {
    loop {
        match ws.next().await.unwrap().unwrap() {
            Message::Text(text) => return serde_json::from_str(&text).unwrap(),
            Message::Close(_) => panic!("client closed before sending a command"),
            _ => {}
        }
    }
}

/// Run the auth exchange and accept the subscription.
pub async fn accept_client(ws: &mut ServerWs) {
    send_json(ws, serde_json::json!({"type": "auth_required", "ha_version": "2024.6.1"})).await;
    let auth = recv_json(ws).await;
    assert_eq!(auth, serde_json::json!({"type": "auth", "access_token": TOKEN}));
    send_json(ws, serde_json::json!({"type": "auth_ok", "ha_version": "2024.6.1"})).await;

    let subscribe = recv_json(ws).await;
    assert_eq!(
        subscribe,
        serde_json::json!({"type": "subscribe_events", "id": 1, "event_type": "state_changed"})
    );
    send_json(ws, serde_json::json!({"id": 1, "type": "result", "success": true, "result": null}))
        .await;
}

/// Hub close: send a close frame, then wait for the client's reply.
pub async fn close_from_hub(mut ws: ServerWs) {
    let _ = ws.close(None).await;
    drain(ws).await;
}

/// Read until the client closes or drops the connection.
pub async fn drain(mut ws: ServerWs) {
    while let Some(Ok(msg)) = ws.next().await {
        if msg.is_close() {
            break;
        }
    }
}

pub fn state_changed(entity_id: &str, new_state: Value) -> Value {
    serde_json::json!({
        "id": 1,
        "type": "event",
        "event": {
            "event_type": "state_changed",
            "data": {
                "entity_id": entity_id,
                "old_state": null,
                "new_state": new_state,
            },
            "origin": "LOCAL",
        },
    })
}
