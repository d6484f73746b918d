//! `auris-bridge` – The Conversion Layer
//!
//! Turns inbound acoustic source events into geometric records and routes
//! both over an internal topic bus.
//!
//! # Modules
//!
//! - [`bus`] – topic-based publish/subscribe event bus built on Tokio
//!   broadcast channels.
//! - [`codec`] – JSON text-frame decoding for the socket transport.
//! - [`ssl`] – [`SslAdapter`]: localization detections → point cloud.
//! - [`sst`] – [`SstAdapter`]: tracked source → oriented pose.

pub mod bus;
pub mod codec;
pub mod ssl;
pub mod sst;

pub use bus::{EventBus, Topic, TopicReceiver};
pub use ssl::SslAdapter;
pub use sst::SstAdapter;
