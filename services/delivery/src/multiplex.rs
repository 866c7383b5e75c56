//! Subscription multiplexer with coalescing message buffers
//!
//! One upstream transport connection fans out to any number of local
//! listeners, keyed by fixture. Messages buffer per fixture and flush
//! coalesced: listeners see only the latest buffered message, since a
//! newer snapshot always supersedes an older one. A full buffer
//! flushes immediately, otherwise flushing waits for the next tick.
//!
//! Sans-IO: the multiplexer never touches a socket or a clock. The
//! driver delivers inbound messages and ticks, and drains the queued
//! transport commands it must relay upstream.

use std::collections::BTreeMap;

use tracing::{debug, warn};
use types::ids::FixtureId;

/// Configuration for per-fixture message buffering.
#[derive(Debug, Clone)]
pub struct MultiplexerConfig {
    /// Buffered messages per fixture before an immediate flush.
    pub buffer_capacity: usize,
}

impl Default for MultiplexerConfig {
    fn default() -> Self {
        Self { buffer_capacity: 10 }
    }
}

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Commands the multiplexer needs relayed to the upstream transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCommand {
    Subscribe(FixtureId),
    Unsubscribe(FixtureId),
}

type Callback<M> = Box<dyn FnMut(&M) + Send>;

struct FixtureChannel<M> {
    listeners: BTreeMap<u64, Callback<M>>,
    buffer: Vec<M>,
}

impl<M> FixtureChannel<M> {
    fn new() -> Self {
        Self {
            listeners: BTreeMap::new(),
            buffer: Vec::new(),
        }
    }
}

/// Fans one upstream feed out to per-fixture listener sets.
///
/// Uses BTreeMap throughout so iteration order (and therefore delivery
/// and command order) is deterministic.
pub struct SubscriptionMultiplexer<M> {
    config: MultiplexerConfig,
    channels: BTreeMap<FixtureId, FixtureChannel<M>>,
    listener_fixture: BTreeMap<u64, FixtureId>,
    next_listener: u64,
    pending: Vec<TransportCommand>,
}

impl<M> SubscriptionMultiplexer<M> {
    pub fn new(config: MultiplexerConfig) -> Self {
        Self {
            config,
            channels: BTreeMap::new(),
            listener_fixture: BTreeMap::new(),
            next_listener: 1,
            pending: Vec::new(),
        }
    }

    /// Register a listener for a fixture. The first listener for a
    /// fixture queues an upstream `Subscribe`; later listeners share
    /// the existing channel.
    pub fn subscribe(
        &mut self,
        fixture: FixtureId,
        callback: impl FnMut(&M) + Send + 'static,
    ) -> ListenerId {
        let id = self.next_listener;
        self.next_listener += 1;

        if !self.channels.contains_key(&fixture) {
            self.pending.push(TransportCommand::Subscribe(fixture.clone()));
            debug!(fixture = %fixture, "Opening upstream subscription");
        }
        let channel = self
            .channels
            .entry(fixture.clone())
            .or_insert_with(FixtureChannel::new);
        channel.listeners.insert(id, Box::new(callback));
        self.listener_fixture.insert(id, fixture);

        ListenerId(id)
    }

    /// Drop a listener. Removing the last listener for a fixture tears
    /// the channel down: buffered messages are discarded and an
    /// upstream `Unsubscribe` is queued.
    pub fn unsubscribe(&mut self, listener: ListenerId) {
        let Some(fixture) = self.listener_fixture.remove(&listener.0) else {
            warn!(listener = listener.0, "Unsubscribe for unknown listener");
            return;
        };

        let remove_channel = match self.channels.get_mut(&fixture) {
            Some(channel) => {
                channel.listeners.remove(&listener.0);
                channel.listeners.is_empty()
            }
            None => false,
        };

        if remove_channel {
            self.channels.remove(&fixture);
            self.pending.push(TransportCommand::Unsubscribe(fixture.clone()));
            debug!(fixture = %fixture, "Closing upstream subscription");
        }
    }

    /// Buffer an inbound message. Flushes the fixture immediately when
    /// its buffer reaches capacity; otherwise delivery waits for the
    /// next tick. Messages for unsubscribed fixtures are dropped.
    pub fn on_message(&mut self, fixture: &FixtureId, message: M) {
        let Some(channel) = self.channels.get_mut(fixture) else {
            debug!(fixture = %fixture, "Dropping message for unsubscribed fixture");
            return;
        };

        channel.buffer.push(message);
        if channel.buffer.len() >= self.config.buffer_capacity {
            flush_channel(channel);
        }
    }

    /// Flush every fixture with buffered messages, delivering only the
    /// latest buffered message to each listener.
    pub fn on_tick(&mut self) {
        for channel in self.channels.values_mut() {
            flush_channel(channel);
        }
    }

    /// Queue re-subscription of every live fixture, for a transport
    /// that just reconnected and lost its server-side subscriptions.
    pub fn on_reconnect(&mut self) {
        for fixture in self.channels.keys() {
            self.pending.push(TransportCommand::Subscribe(fixture.clone()));
        }
        debug!(fixtures = self.channels.len(), "Queued resubscription of live fixtures");
    }

    /// Drain the transport commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<TransportCommand> {
        std::mem::take(&mut self.pending)
    }

    pub fn listener_count(&self) -> usize {
        self.listener_fixture.len()
    }

    pub fn is_subscribed(&self, fixture: &FixtureId) -> bool {
        self.channels.contains_key(fixture)
    }
}

fn flush_channel<M>(channel: &mut FixtureChannel<M>) {
    let Some(latest) = channel.buffer.pop() else {
        return;
    };
    channel.buffer.clear();

    for callback in channel.listeners.values_mut() {
        callback(&latest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<i64>>>, impl FnMut(&i64) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |m: &i64| sink.lock().unwrap().push(*m))
    }

    fn fixture(id: &str) -> FixtureId {
        FixtureId::new(id)
    }

    #[test]
    fn test_first_subscribe_queues_upstream_command() {
        let mut mux = SubscriptionMultiplexer::<i64>::new(MultiplexerConfig::default());
        let (_, cb_a) = recorder();
        let (_, cb_b) = recorder();

        mux.subscribe(fixture("f1"), cb_a);
        mux.subscribe(fixture("f1"), cb_b);

        assert_eq!(
            mux.take_commands(),
            vec![TransportCommand::Subscribe(fixture("f1"))]
        );
        assert!(mux.take_commands().is_empty());
    }

    #[test]
    fn test_tick_delivers_latest_only() {
        let mut mux = SubscriptionMultiplexer::new(MultiplexerConfig::default());
        let (seen, cb) = recorder();
        mux.subscribe(fixture("f1"), cb);

        for n in 1..=5 {
            mux.on_message(&fixture("f1"), n);
        }
        assert!(seen.lock().unwrap().is_empty());

        mux.on_tick();
        assert_eq!(*seen.lock().unwrap(), vec![5]);

        // Buffer cleared, an empty tick delivers nothing
        mux.on_tick();
        assert_eq!(*seen.lock().unwrap(), vec![5]);
    }

    #[test]
    fn test_full_buffer_flushes_immediately() {
        let mut mux = SubscriptionMultiplexer::new(MultiplexerConfig { buffer_capacity: 3 });
        let (seen, cb) = recorder();
        mux.subscribe(fixture("f1"), cb);

        mux.on_message(&fixture("f1"), 1);
        mux.on_message(&fixture("f1"), 2);
        assert!(seen.lock().unwrap().is_empty());

        mux.on_message(&fixture("f1"), 3);
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_fanout_to_all_listeners() {
        let mut mux = SubscriptionMultiplexer::new(MultiplexerConfig::default());
        let (seen_a, cb_a) = recorder();
        let (seen_b, cb_b) = recorder();
        mux.subscribe(fixture("f1"), cb_a);
        mux.subscribe(fixture("f1"), cb_b);

        mux.on_message(&fixture("f1"), 7);
        mux.on_tick();

        assert_eq!(*seen_a.lock().unwrap(), vec![7]);
        assert_eq!(*seen_b.lock().unwrap(), vec![7]);
    }

    #[test]
    fn test_last_unsubscribe_tears_down_channel() {
        let mut mux = SubscriptionMultiplexer::new(MultiplexerConfig::default());
        let (seen, cb) = recorder();
        let (_, cb_b) = recorder();
        let a = mux.subscribe(fixture("f1"), cb);
        let b = mux.subscribe(fixture("f1"), cb_b);
        mux.take_commands();

        mux.unsubscribe(b);
        assert!(mux.is_subscribed(&fixture("f1")));
        assert!(mux.take_commands().is_empty());

        mux.unsubscribe(a);
        assert!(!mux.is_subscribed(&fixture("f1")));
        assert_eq!(
            mux.take_commands(),
            vec![TransportCommand::Unsubscribe(fixture("f1"))]
        );

        // Messages after teardown never reach the old listener
        mux.on_message(&fixture("f1"), 9);
        mux.on_tick();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_reconnect_resubscribes_live_fixtures() {
        let mut mux = SubscriptionMultiplexer::<i64>::new(MultiplexerConfig::default());
        let (_, cb_a) = recorder();
        let (_, cb_b) = recorder();
        mux.subscribe(fixture("f1"), cb_a);
        mux.subscribe(fixture("f2"), cb_b);
        mux.take_commands();

        mux.on_reconnect();
        assert_eq!(
            mux.take_commands(),
            vec![
                TransportCommand::Subscribe(fixture("f1")),
                TransportCommand::Subscribe(fixture("f2")),
            ]
        );
    }

    #[test]
    fn test_unknown_listener_unsubscribe_is_noop() {
        let mut mux = SubscriptionMultiplexer::<i64>::new(MultiplexerConfig::default());
        mux.unsubscribe(ListenerId(99));
        assert_eq!(mux.listener_count(), 0);
    }
}
