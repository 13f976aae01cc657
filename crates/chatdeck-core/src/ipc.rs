//! In-process bridge endpoint
//!
//! Carries bridge requests from a UI surface to the host over a channel and
//! answers them from a single host task, so requests are applied in the
//! order they arrive. Dialog requests are answered on their own task and do
//! not hold up store traffic while a modal is open.

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use chatdeck_bridge::{
    BridgeError, DialogBridge, HostSignal, MessageBoxOptions, MessageBoxResponse,
    NotificationBridge, StoreBridge, StoreKey,
};

use crate::permissions::NotificationPermissions;
use crate::service::StoreService;

type Reply<T> = oneshot::Sender<std::result::Result<T, String>>;

enum BridgeRequest {
    GetStore {
        key: StoreKey,
        reply: Reply<Option<Value>>,
    },
    Set {
        key: StoreKey,
        value: Value,
        reply: Reply<()>,
    },
    ShowMessageBox {
        options: MessageBoxOptions,
        reply: Reply<MessageBoxResponse>,
    },
    ToggleNotifications {
        enabled: bool,
        partition: String,
        reply: Reply<()>,
    },
}

/// Host side of one UI surface connection
pub struct HostEndpoint {
    requests: mpsc::UnboundedSender<BridgeRequest>,
    signals: SignalSender,
    task: JoinHandle<()>,
}

impl HostEndpoint {
    /// Start answering requests against `service`.
    ///
    /// Returns the endpoint and the receiver the UI surface pumps host
    /// signals from. Must be called inside a tokio runtime.
    pub fn spawn(
        service: StoreService,
        dialogs: Option<Arc<dyn DialogBridge>>,
    ) -> (Self, mpsc::UnboundedReceiver<HostSignal>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        let task = tokio::spawn(serve(service, dialogs, request_rx));

        tracing::debug!("Host endpoint started");

        (
            Self {
                requests: request_tx,
                signals: SignalSender { tx: signal_tx },
                task,
            },
            signal_rx,
        )
    }

    /// Client handle for the UI surface
    pub fn bridge(&self) -> ChannelBridge {
        ChannelBridge {
            requests: self.requests.clone(),
        }
    }

    pub fn signals(&self) -> SignalSender {
        self.signals.clone()
    }

    /// Stop answering; outstanding and future requests fail as unavailable
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
        tracing::debug!("Host endpoint stopped");
    }
}

async fn serve(
    service: StoreService,
    dialogs: Option<Arc<dyn DialogBridge>>,
    mut requests: mpsc::UnboundedReceiver<BridgeRequest>,
) {
    let permissions = NotificationPermissions::new(service.clone());

    while let Some(request) = requests.recv().await {
        match request {
            BridgeRequest::GetStore { key, reply } => {
                let result = service.get_store(key.as_str()).map_err(|e| e.to_string());
                let _ = reply.send(result);
            }
            BridgeRequest::Set { key, value, reply } => {
                let result = service.set(key.as_str(), value).map_err(|e| {
                    tracing::error!(key = %key, error = %e, "Store write failed");
                    e.to_string()
                });
                let _ = reply.send(result);
            }
            BridgeRequest::ShowMessageBox { options, reply } => match dialogs.clone() {
                Some(dialogs) => {
                    tokio::spawn(async move {
                        let result = dialogs
                            .show_message_box(options)
                            .await
                            .map_err(|e| e.to_string());
                        let _ = reply.send(result);
                    });
                }
                None => {
                    let _ = reply.send(Err("dialogs are not available".to_string()));
                }
            },
            BridgeRequest::ToggleNotifications {
                enabled,
                partition,
                reply,
            } => {
                let result = permissions
                    .set_enabled(&partition, enabled)
                    .map_err(|e| e.to_string());
                let _ = reply.send(result);
            }
        }
    }
}

/// UI-side handle implementing the bridge over the endpoint channel
#[derive(Clone)]
pub struct ChannelBridge {
    requests: mpsc::UnboundedSender<BridgeRequest>,
}

impl ChannelBridge {
    async fn call<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> BridgeRequest,
    ) -> chatdeck_bridge::Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(build(reply))
            .map_err(|_| BridgeError::Unavailable)?;

        match response.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(message)) => Err(BridgeError::Rejected(message)),
            Err(_) => Err(BridgeError::Unavailable),
        }
    }
}

impl StoreBridge for ChannelBridge {
    fn get_store(&self, key: StoreKey) -> BoxFuture<'_, chatdeck_bridge::Result<Option<Value>>> {
        self.call(move |reply| BridgeRequest::GetStore { key, reply })
            .boxed()
    }

    fn set(&self, key: StoreKey, value: Value) -> BoxFuture<'_, chatdeck_bridge::Result<()>> {
        self.call(move |reply| BridgeRequest::Set { key, value, reply })
            .boxed()
    }
}

impl DialogBridge for ChannelBridge {
    fn show_message_box(
        &self,
        options: MessageBoxOptions,
    ) -> BoxFuture<'_, chatdeck_bridge::Result<MessageBoxResponse>> {
        self.call(move |reply| BridgeRequest::ShowMessageBox { options, reply })
            .boxed()
    }
}

impl NotificationBridge for ChannelBridge {
    fn toggle_notifications(
        &self,
        enabled: bool,
        partition: String,
    ) -> BoxFuture<'_, chatdeck_bridge::Result<()>> {
        self.call(move |reply| BridgeRequest::ToggleNotifications {
            enabled,
            partition,
            reply,
        })
        .boxed()
    }
}

/// Host-side sender for signals to one UI surface
#[derive(Clone)]
pub struct SignalSender {
    tx: mpsc::UnboundedSender<HostSignal>,
}

impl SignalSender {
    /// Returns false once the UI surface stopped listening
    pub fn emit(&self, signal: impl Into<HostSignal>) -> bool {
        let signal = signal.into();
        tracing::debug!(signal = %signal.kind, "Emitting host signal");
        self.tx.send(signal).is_ok()
    }
}
