use std::sync::Arc;

use anyhow::{bail, Result};
use codee::string::FromToStringCodec;
use leptos::prelude::*;
use leptos_use::{
    core::ConnectionReadyState, use_websocket_with_options, ReconnectLimit, UseWebSocketOptions,
    UseWebSocketReturn,
};

#[derive(Debug, Clone)]
pub enum TransportEvent {
    Open,
    Message(String),
    Error(String),
    Close { code: u16, reason: String },
}

/// Handle to the game socket. It never connects or reconnects on its own;
/// the caller decides when [`Transport::open`] runs.
#[derive(Clone)]
pub struct Transport {
    ready_state: Signal<ConnectionReadyState>,
    open: Arc<dyn Fn() + Send + Sync>,
    send: Arc<dyn Fn(&String) + Send + Sync>,
}

impl Transport {
    pub fn new<F>(url: &str, handler: F) -> Self
    where
        F: Fn(TransportEvent) + Clone + Send + Sync + 'static,
    {
        log::debug!("Socket endpoint {url}");
        let on_open = handler.clone();
        let on_message = handler.clone();
        let on_error = handler.clone();
        let on_close = handler;
        let UseWebSocketReturn {
            ready_state,
            open,
            send,
            ..
        } = use_websocket_with_options::<String, String, FromToStringCodec, _, _>(
            url,
            UseWebSocketOptions::default()
                .immediate(false)
                .reconnect_limit(ReconnectLimit::Limited(0))
                .on_open(move |_| on_open(TransportEvent::Open))
                .on_message_raw(move |text: &str| on_message(TransportEvent::Message(text.to_string())))
                .on_error(move |e| on_error(TransportEvent::Error(format!("{e:?}"))))
                .on_close(move |ev| {
                    on_close(TransportEvent::Close {
                        code: ev.code(),
                        reason: ev.reason(),
                    })
                }),
        );
        Transport {
            ready_state,
            open: Arc::new(open),
            send: Arc::new(send),
        }
    }

    /// Opens a fresh socket, closing any previous one.
    pub fn open(&self) {
        (self.open)()
    }

    pub fn send(&self, text: &str) -> Result<()> {
        if self.ready_state.get_untracked() != ConnectionReadyState::Open {
            bail!("Socket not open, dropping {text}")
        }
        (self.send)(&text.to_string());
        Ok(())
    }
}

pub fn websocket_supported() -> bool {
    js_sys::Reflect::has(&window(), &"WebSocket".into()).unwrap_or(false)
}
