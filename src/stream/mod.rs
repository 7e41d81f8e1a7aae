use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use futures_util::{SinkExt, StreamExt};
use tokio::sync::Notify;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::core::validate::{validate_category, validate_credential};
use crate::core::{ApiKey, AssetCategory, Catalog, Client, VinterError};

/* ---------------- Public API ---------------- */

/// Lifecycle of a [`WsSession`]: `Idle -> Open -> Closed`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Constructed, not connected.
    Idle,
    /// Connected; callbacks are being dispatched.
    Open,
    /// Connection ended. A new session is needed to reconnect.
    Closed,
}

/// Close frame sent by the server, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

/// Callbacks driven by [`WsSession::open`].
///
/// Every callback runs on the task executing `open`, in arrival order. Any
/// `FnMut(&str) + Send` closure is a handler that only cares about messages.
pub trait StreamHandler: Send {
    /// The connection is established.
    fn on_open(&mut self) {}

    /// One text message (binary frames are delivered if they are valid UTF-8).
    fn on_message(&mut self, text: &str);

    /// A receive error. The session closes right after.
    fn on_error(&mut self, _err: &VinterError) {}

    /// The session has ended; `frame` is the server's close frame if one was received.
    fn on_close(&mut self, _frame: Option<CloseInfo>) {}
}

impl<F> StreamHandler for F
where
    F: FnMut(&str) + Send,
{
    fn on_message(&mut self, text: &str) {
        self(text);
    }
}

struct Shared {
    state: Mutex<SessionState>,
    shutdown: Notify,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn is_open(&self) -> bool {
        *self.state() == SessionState::Open
    }

    /// `Open -> Closed`; a no-op in any other state.
    fn close(&self) {
        let mut state = self.state();
        if *state == SessionState::Open {
            *state = SessionState::Closed;
            self.shutdown.notify_one();
        }
    }
}

/// Cloneable handle that closes a session from a callback or another task.
#[derive(Clone)]
pub struct CloseHandle {
    shared: Arc<Shared>,
}

impl CloseHandle {
    pub fn close(&self) {
        self.shared.close();
    }
}

impl fmt::Debug for CloseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseHandle")
            .field("state", &*self.shared.state())
            .finish()
    }
}

/// A single streaming connection for one symbol.
///
/// The URL is resolved at construction (`<ws-base>/<category>/<symbol>?token=<key>`), so an
/// invalid asset type or symbol is rejected before anything connects. There is no
/// reconnection and no buffering beyond what the handler consumes.
pub struct WsSession {
    url: Url,
    symbol: String,
    shared: Arc<Shared>,
}

impl fmt::Debug for WsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsSession")
            .field("symbol", &self.symbol)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl WsSession {
    pub fn builder() -> WsSessionBuilder {
        WsSessionBuilder::default()
    }

    pub(crate) fn from_settings(
        api_key: &ApiKey,
        asset_type: AssetCategory,
        catalog: &Catalog,
        symbol: &str,
    ) -> Result<Self, VinterError> {
        let mut url = catalog.resolve_ws(asset_type, symbol)?;
        url.query_pairs_mut().append_pair("token", api_key.expose());
        Ok(Self {
            url,
            symbol: symbol.to_string(),
            shared: Arc::new(Shared {
                state: Mutex::new(SessionState::Idle),
                shutdown: Notify::new(),
            }),
        })
    }

    /// Full streaming URL, credential included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn state(&self) -> SessionState {
        *self.shared.state()
    }

    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// `Open -> Closed`. Closing an idle or already closed session does nothing.
    pub fn close(&self) {
        self.shared.close();
    }

    /// Connects and dispatches events to `handler` until the connection ends or the
    /// session is closed.
    ///
    /// Occupies the calling task for the lifetime of the connection; spawn it if the
    /// caller must keep doing other work.
    ///
    /// # Errors
    ///
    /// [`VinterError::Session`] if the session is not idle, or the transport error if the
    /// connection cannot be established (the session is then closed). Errors after the
    /// connection is up are reported through [`StreamHandler::on_error`].
    pub async fn open<H: StreamHandler>(&self, handler: &mut H) -> Result<(), VinterError> {
        self.begin()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(symbol = %self.symbol, "websocket connecting");

        let ws = match connect_async(self.url.as_str()).await {
            Ok((ws, _resp)) => ws,
            Err(e) => {
                *self.shared.state() = SessionState::Closed;
                return Err(e.into());
            }
        };
        handler.on_open();

        let (mut sink, mut source) = ws.split();
        let mut close_frame = None;

        loop {
            tokio::select! {
                biased;

                () = self.shared.shutdown.notified() => {
                    if let Err(_e) = sink.send(Message::Close(None)).await {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(error = %_e, "websocket close frame not sent");
                    }
                    break;
                }
                msg = source.next() => {
                    // a close from a callback must stop delivery of already buffered frames
                    if !self.shared.is_open() {
                        continue;
                    }
                    match msg {
                        Some(Ok(Message::Text(text))) => handler.on_message(text.as_str()),
                        Some(Ok(Message::Binary(bytes))) => match std::str::from_utf8(&bytes) {
                            Ok(text) => handler.on_message(text),
                            Err(e) => handler.on_error(&VinterError::Decode(format!(
                                "binary frame is not UTF-8: {e}"
                            ))),
                        },
                        Some(Ok(Message::Close(frame))) => {
                            close_frame = frame.map(|f| CloseInfo {
                                code: u16::from(f.code),
                                reason: f.reason.as_str().to_string(),
                            });
                            break;
                        }
                        // ping/pong are answered by the transport
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            let err = VinterError::from(e);
                            #[cfg(feature = "tracing")]
                            tracing::warn!(symbol = %self.symbol, error = %err, "websocket receive failed");
                            handler.on_error(&err);
                            break;
                        }
                        None => break,
                    }
                }
            }
        }

        *self.shared.state() = SessionState::Closed;
        #[cfg(feature = "tracing")]
        tracing::debug!(symbol = %self.symbol, "websocket closed");
        handler.on_close(close_frame);
        Ok(())
    }

    /// [`WsSession::open`] on a private current-thread runtime, blocking the calling thread.
    /// Must not be called from within an async runtime.
    pub fn open_blocking<H: StreamHandler>(&self, handler: &mut H) -> Result<(), VinterError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        rt.block_on(self.open(handler))
    }

    /// `Idle -> Open`, or the reason the transition is illegal.
    fn begin(&self) -> Result<(), VinterError> {
        let mut state = self.shared.state();
        match *state {
            SessionState::Idle => {
                *state = SessionState::Open;
                Ok(())
            }
            SessionState::Open => Err(VinterError::Session("session is already open".into())),
            SessionState::Closed => Err(VinterError::Session(
                "session is closed; create a new session to reconnect".into(),
            )),
        }
    }
}

/* ---------------- Builder ---------------- */

/// Builder for a standalone session. [`Client::stream`] is the shortcut when a client exists.
#[derive(Default)]
pub struct WsSessionBuilder {
    api_key: Option<String>,
    asset_type: Option<String>,
    symbol: Option<String>,
    ws_base: Option<Url>,
}

impl fmt::Debug for WsSessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WsSessionBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("asset_type", &self.asset_type)
            .field("symbol", &self.symbol)
            .field("ws_base", &self.ws_base)
            .finish()
    }
}

impl WsSessionBuilder {
    /// Token appended to the streaming URL.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn asset_type(mut self, asset_type: impl AsRef<str>) -> Self {
        self.asset_type = Some(asset_type.as_ref().to_string());
        self
    }

    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Use a non-default WebSocket base (handy for tests/mocks).
    pub fn ws_base(mut self, base: Url) -> Self {
        self.ws_base = Some(base);
        self
    }

    pub fn build(self) -> Result<WsSession, VinterError> {
        let api_key = validate_credential(self.api_key.as_deref())?;
        let asset_type = validate_category(self.asset_type.as_deref().ok_or_else(|| {
            VinterError::InvalidArgument(format!(
                "The asset type must be provided, one of {}",
                AssetCategory::allowed()
            ))
        })?)?;
        let symbol = self
            .symbol
            .ok_or_else(|| VinterError::InvalidArgument("The symbol must be provided.".into()))?;

        let defaults = Catalog::default();
        let catalog = match self.ws_base {
            Some(ws) => Catalog::new(defaults.api_base().clone(), ws)?,
            None => defaults,
        };
        WsSession::from_settings(&api_key, asset_type, &catalog, &symbol)
    }
}

impl Client {
    /// A WebSocket session for `symbol` sharing this client's credential, asset type and
    /// WebSocket base. Nothing connects until [`WsSession::open`].
    pub fn stream(&self, symbol: &str) -> Result<WsSession, VinterError> {
        WsSession::from_settings(self.api_key(), self.asset_type(), self.catalog(), symbol)
    }
}
