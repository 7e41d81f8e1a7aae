#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use httpmock::MockServer;
use std::{fs, path::Path};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use url::Url;
use vinter_rs::{AssetCategory, Client};

pub const API_KEY: &str = "my_api_key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Wraps `data` in the API's success envelope.
pub fn envelope(data: serde_json::Value) -> String {
    serde_json::json!({
        "result": "success",
        "message": "Success",
        "data": data,
        "params": {},
    })
    .to_string()
}

pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.base_url()).unwrap()
}

pub fn client(server: &MockServer, asset_type: AssetCategory) -> Client {
    Client::builder()
        .api_key(API_KEY)
        .asset_type(asset_type)
        .api_base(base_url(server))
        .build()
        .unwrap()
}

pub fn blocking_client(server: &MockServer, asset_type: AssetCategory) -> vinter_rs::blocking::Client {
    Client::builder()
        .api_key(API_KEY)
        .asset_type(asset_type)
        .api_base(base_url(server))
        .build_blocking()
        .unwrap()
}

/// What the in-process WebSocket server does after the handshake.
pub enum ServerScript {
    /// Send the messages, then a normal close frame with reason "bye".
    SendThenClose(Vec<String>),
    /// Send the messages, then wait for the client to close.
    SendThenWait(Vec<String>),
}

/// Starts a one-shot WebSocket server on localhost.
///
/// Returns the `ws://` base to hand to the session and a receiver yielding the request
/// URI seen during the handshake.
pub async fn spawn_ws_server(script: ServerScript) -> (Url, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (uri_tx, uri_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            let _ = uri_tx.send(req.uri().to_string());
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        let (messages, close) = match script {
            ServerScript::SendThenClose(m) => (m, true),
            ServerScript::SendThenWait(m) => (m, false),
        };
        for m in messages {
            // the client may close before everything is sent
            if ws.send(Message::text(m)).await.is_err() {
                return;
            }
        }
        if close {
            let frame = CloseFrame {
                code: CloseCode::Normal,
                reason: "bye".to_string().into(),
            };
            let _ = ws.send(Message::Close(Some(frame))).await;
        }
        while let Some(Ok(msg)) = ws.next().await {
            if msg.is_close() {
                break;
            }
        }
    });

    (Url::parse(&format!("ws://{addr}")).unwrap(), uri_rx)
}
