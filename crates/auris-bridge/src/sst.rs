//! Tracking adapter: SST cycles → oriented-pose records.
//!
//! The adapter owns the single live [`PoseStamped`] for the whole process
//! lifetime and mutates it in place: direction-only sensing cannot recover
//! range, so the position stays pinned at the origin and only the
//! orientation and header change per event.  In-place mutation states that
//! invariant directly.
//!
//! The upstream tracker contract is 0 or 1 sources per cycle.  A cycle with
//! 2+ sources is an anomaly: it is reported at error level and dropped,
//! never escalated into a fault.

use auris_geometry::direction_to_quaternion;
use auris_types::{Event, EventPayload, PoseStamped, SstFrame};
use chrono::Utc;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::bus::{EventBus, Topic};

/// Converts tracking cycles into oriented poses and publishes them on
/// [`Topic::TrackedPoses`].
pub struct SstAdapter {
    bus: Arc<EventBus>,
    /// The single reused pose record.  Position is written once, here at
    /// construction, and never again.
    pose: PoseStamped,
}

impl SstAdapter {
    /// Create a new [`SstAdapter`] backed by the given [`EventBus`], with
    /// the pose at the origin and identity orientation.
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            pose: PoseStamped::origin(),
        }
    }

    /// The current stored pose.
    pub fn pose(&self) -> &PoseStamped {
        &self.pose
    }

    /// Handle one tracking cycle.
    ///
    /// * 0 sources → `None`; the stored pose is untouched.
    /// * 2+ sources → the upstream tracker violated its single-track
    ///   contract; the anomaly is logged and the cycle dropped, `None`.
    /// * exactly 1 source → the stored pose's orientation is recomputed from
    ///   the track direction, its header overwritten (frame id from the
    ///   cycle, stamp = current publish time), and a copy published and
    ///   returned.
    pub fn on_frame(&mut self, frame: &SstFrame) -> Option<PoseStamped> {
        if frame.sources.is_empty() {
            return None;
        }

        if frame.sources.len() > 1 {
            error!(
                sources = frame.sources.len(),
                frame_id = %frame.header.frame_id,
                "invalid sst cycle: expected at most one tracked source"
            );
            return None;
        }

        let track = frame.sources[0];
        self.pose.orientation = direction_to_quaternion(track.x, track.y, track.z);
        self.pose.header.frame_id = frame.header.frame_id.clone();
        self.pose.header.stamp = Utc::now();

        self.bus.publish_to(
            Topic::TrackedPoses,
            Event {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                source: "auris-bridge::sst".to_string(),
                payload: EventPayload::TrackedPose(self.pose.clone()),
            },
        );

        Some(self.pose.clone())
    }
}
