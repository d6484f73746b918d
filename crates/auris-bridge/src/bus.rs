//! Headless, typed, topic-based publish/subscribe event bus.
//!
//! Uses [`tokio::sync::broadcast`] channels under the hood so that every
//! subscriber receives every message without any single subscriber blocking
//! the others.
//!
//! # Topics
//!
//! Traffic is partitioned into four [`Topic`] lanes, one per stream
//! direction:
//!
//! | Topic | Typical traffic |
//! |---|---|
//! | [`Topic::SslFrames`] | Inbound localization cycles from the acoustic engine |
//! | [`Topic::SstFrames`] | Inbound tracking cycles from the acoustic engine |
//! | [`Topic::PointClouds`] | Outbound point-set records |
//! | [`Topic::TrackedPoses`] | Outbound oriented-pose records |

use auris_types::Event;
use tokio::sync::broadcast;

/// Default channel capacity (number of buffered events before old ones are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// Enumeration of all routing topics on the event bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Inbound localization (SSL) cycles.
    SslFrames,
    /// Inbound tracking (SST) cycles.
    SstFrames,
    /// Outbound point-set records built from localization cycles.
    PointClouds,
    /// Outbound oriented-pose records built from tracking cycles.
    TrackedPoses,
}

/// Shared event bus. Clone it cheaply – all clones share the same underlying
/// broadcast channels.
#[derive(Clone, Debug)]
pub struct EventBus {
    ssl_frames: broadcast::Sender<Event>,
    sst_frames: broadcast::Sender<Event>,
    point_clouds: broadcast::Sender<Event>,
    tracked_poses: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity.
    ///
    /// The `capacity` is applied to every topic channel independently.
    pub fn new(capacity: usize) -> Self {
        let (ssl_frames, _) = broadcast::channel(capacity);
        let (sst_frames, _) = broadcast::channel(capacity);
        let (point_clouds, _) = broadcast::channel(capacity);
        let (tracked_poses, _) = broadcast::channel(capacity);
        Self {
            ssl_frames,
            sst_frames,
            point_clouds,
            tracked_poses,
        }
    }

    /// Publish `event` to the given [`Topic`] channel.
    ///
    /// Returns the number of active receivers that were handed the event.
    /// Zero means no subscriber is currently listening on the topic; an
    /// enabled stream with no downstream consumer is a normal condition for
    /// this bridge, not an error.
    pub fn publish_to(&self, topic: Topic, event: Event) -> usize {
        match self.topic_sender(topic).send(event) {
            Ok(n) => n,
            Err(broadcast::error::SendError(_)) => 0,
        }
    }

    /// Subscribe to a specific [`Topic`] channel.
    ///
    /// The returned [`TopicReceiver`] yields only events published to that
    /// topic.
    pub fn subscribe_to(&self, topic: Topic) -> TopicReceiver {
        TopicReceiver {
            topic,
            receiver: self.topic_sender(topic).subscribe(),
        }
    }

    fn topic_sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::SslFrames => &self.ssl_frames,
            Topic::SstFrames => &self.sst_frames,
            Topic::PointClouds => &self.point_clouds,
            Topic::TrackedPoses => &self.tracked_poses,
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// An async receiver bound to a single [`Topic`] channel.
///
/// Obtained via [`EventBus::subscribe_to`].
pub struct TopicReceiver {
    topic: Topic,
    receiver: broadcast::Receiver<Event>,
}

impl TopicReceiver {
    /// Wait for the next event on this topic.
    ///
    /// Returns:
    /// * `Ok(event)` – a successfully received event.
    /// * `Err(broadcast::error::RecvError::Lagged(n))` – the subscriber fell
    ///   behind and `n` messages were dropped.  The caller decides whether to
    ///   continue or abort.
    /// * `Err(broadcast::error::RecvError::Closed)` – the bus has shut down.
    pub async fn recv(&mut self) -> Result<Event, broadcast::error::RecvError> {
        self.receiver.recv().await
    }

    /// The [`Topic`] this receiver is bound to.
    pub fn topic(&self) -> Topic {
        self.topic
    }
}
