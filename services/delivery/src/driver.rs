//! Async driver for the subscription multiplexer
//!
//! Owns the multiplexer on a single task and drives it from injected
//! channels: inbound feed messages, listener control requests, and a
//! periodic flush tick. Queued transport commands are relayed to the
//! upstream connection through the outbound command channel. All IO
//! stays at this edge; the multiplexer itself remains synchronous.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use types::ids::FixtureId;

use crate::multiplex::{ListenerId, SubscriptionMultiplexer, TransportCommand};

/// Driver timing configuration.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Coalescing flush cadence, roughly one display frame.
    pub flush_interval: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            flush_interval: Duration::from_millis(16),
        }
    }
}

/// Control requests from listener-side code into the driver task.
pub enum RouterControl<M> {
    Subscribe {
        fixture: FixtureId,
        callback: Box<dyn FnMut(&M) + Send>,
        reply: oneshot::Sender<ListenerId>,
    },
    Unsubscribe(ListenerId),
    /// The upstream transport reconnected and lost its server-side
    /// subscription state.
    Reconnected,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    #[error("delivery driver is not running")]
    Closed,
}

/// Cloneable handle for registering listeners with a running driver.
#[derive(Clone)]
pub struct FeedRouter<M> {
    control: mpsc::Sender<RouterControl<M>>,
}

impl<M: Send + 'static> FeedRouter<M> {
    pub fn new(control: mpsc::Sender<RouterControl<M>>) -> Self {
        Self { control }
    }

    pub async fn subscribe(
        &self,
        fixture: FixtureId,
        callback: impl FnMut(&M) + Send + 'static,
    ) -> Result<ListenerId, RouterError> {
        let (reply, response) = oneshot::channel();
        self.control
            .send(RouterControl::Subscribe {
                fixture,
                callback: Box::new(callback),
                reply,
            })
            .await
            .map_err(|_| RouterError::Closed)?;
        response.await.map_err(|_| RouterError::Closed)
    }

    pub async fn unsubscribe(&self, listener: ListenerId) -> Result<(), RouterError> {
        self.control
            .send(RouterControl::Unsubscribe(listener))
            .await
            .map_err(|_| RouterError::Closed)
    }

    pub async fn notify_reconnected(&self) -> Result<(), RouterError> {
        self.control
            .send(RouterControl::Reconnected)
            .await
            .map_err(|_| RouterError::Closed)
    }
}

/// Drive a multiplexer until shutdown is signalled or every input
/// channel closes. Transport commands queued by the multiplexer are
/// forwarded after each state change.
pub async fn run<M: Send + 'static>(
    mut mux: SubscriptionMultiplexer<M>,
    config: DriverConfig,
    mut inbound: mpsc::Receiver<(FixtureId, M)>,
    mut control: mpsc::Receiver<RouterControl<M>>,
    commands: mpsc::Sender<TransportCommand>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(config.flush_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(flush_interval_ms = config.flush_interval.as_millis() as u64, "Delivery driver started");

    loop {
        tokio::select! {
            message = inbound.recv() => match message {
                Some((fixture, payload)) => mux.on_message(&fixture, payload),
                None => {
                    info!("Inbound feed channel closed, stopping driver");
                    break;
                }
            },
            request = control.recv() => match request {
                Some(RouterControl::Subscribe { fixture, callback, reply }) => {
                    let id = mux.subscribe(fixture, callback);
                    if reply.send(id).is_err() {
                        // Caller went away before the reply; roll back
                        mux.unsubscribe(id);
                    }
                }
                Some(RouterControl::Unsubscribe(listener)) => mux.unsubscribe(listener),
                Some(RouterControl::Reconnected) => mux.on_reconnect(),
                None => {
                    info!("Control channel closed, stopping driver");
                    break;
                }
            },
            _ = ticker.tick() => mux.on_tick(),
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    debug!("Shutdown signalled, stopping driver");
                    break;
                }
            }
        }

        for command in mux.take_commands() {
            if commands.send(command).await.is_err() {
                warn!("Transport command channel closed, stopping driver");
                return;
            }
        }
    }
    // Buffered state dies with the driver; teardown never delivers
}
