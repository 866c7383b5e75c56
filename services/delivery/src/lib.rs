//! Realtime Delivery
//!
//! Moves ordered feed data to consumers over two complementary paths:
//! - Push: a subscription multiplexer fans one upstream transport out
//!   to per-fixture listeners, coalescing bursts so each flush frame
//!   delivers at most the latest message
//! - Pull: an adaptive poller for sources without push support, tuning
//!   its interval to the observed data change rate with exponential
//!   retry backoff
//!
//! # Architecture
//!
//! ```text
//!  Upstream transport          Poll source
//!        │                          │
//!   ┌────▼─────┐              ┌─────▼────┐
//!   │  Driver  │              │ run_poll │
//!   └────┬─────┘              └─────┬────┘
//!        │ messages / ticks         │ changed data
//!   ┌────▼──────────────┐           │
//!   │ Subscription      │           │
//!   │ Multiplexer       │           │
//!   └────┬──────────────┘           │
//!        │ coalesced flush          │
//!     Listener callbacks       Consumer callback
//! ```
//!
//! The multiplexer and the poll schedule are synchronous state
//! machines; `driver::run` and `poller::run_poll` are the only places
//! that touch sockets or the clock.

pub mod driver;
pub mod multiplex;
pub mod poller;

pub use driver::{DriverConfig, FeedRouter, RouterControl, RouterError};
pub use multiplex::{ListenerId, MultiplexerConfig, SubscriptionMultiplexer, TransportCommand};
pub use poller::{PollConfig, PollError, PollSchedule};
