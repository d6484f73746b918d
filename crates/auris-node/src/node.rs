//! [`BridgeNode`] – wires the enabled adapters to the bus.
//!
//! One Tokio task per enabled stream, each owning its adapter and driving
//! it to completion per inbound event.  The two tasks share no mutable
//! state; the tracking adapter's single pose record is owned by its task,
//! so no two tracking cycles can ever interleave field writes.

use auris_bridge::{EventBus, SslAdapter, SstAdapter, Topic};
use auris_types::EventPayload;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::gate::StreamGate;

/// The assembled bridge: a bus plus the gate decision of which adapters
/// are attached to it.
pub struct BridgeNode {
    bus: Arc<EventBus>,
    gate: StreamGate,
}

impl BridgeNode {
    /// Assemble a node from an already-evaluated [`StreamGate`].
    pub fn new(bus: Arc<EventBus>, gate: StreamGate) -> Self {
        Self { bus, gate }
    }

    /// Spawn one handling task per enabled stream and return their handles.
    ///
    /// A disabled stream gets no task, permanently: the gate decision holds
    /// for the process lifetime.  Subscriptions are taken before the tasks
    /// start so no event published after `spawn` returns can be missed.
    /// Each task ends when the bus shuts down.
    pub fn spawn(&self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::new();

        if self.gate.localization_enabled {
            info!("localization stream enabled; wiring SSL adapter");
            let adapter = SslAdapter::new(Arc::clone(&self.bus));
            let mut rx = self.bus.subscribe_to(Topic::SslFrames);
            handles.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => {
                            if let EventPayload::SslFrame(frame) = event.payload {
                                let _ = adapter.on_frame(&frame);
                            }
                        }
                        Err(RecvError::Lagged(n)) => {
                            warn!(dropped = n, "ssl handler lagged behind the bus");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        if self.gate.tracking_enabled {
            info!("tracking stream enabled; wiring SST adapter");
            let mut adapter = SstAdapter::new(Arc::clone(&self.bus));
            let mut rx = self.bus.subscribe_to(Topic::SstFrames);
            handles.push(tokio::spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => {
                            if let EventPayload::SstFrame(frame) = event.payload {
                                let _ = adapter.on_frame(&frame);
                            }
                        }
                        Err(RecvError::Lagged(n)) => {
                            warn!(dropped = n, "sst handler lagged behind the bus");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        handles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auris_types::{Event, Header, SslFrame, SslSource, SstFrame, SstSource, Vec3};
    use chrono::Utc;
    use uuid::Uuid;

    fn make_node(localization: bool, tracking: bool) -> (Arc<EventBus>, Vec<JoinHandle<()>>) {
        let bus = Arc::new(EventBus::default());
        let node = BridgeNode::new(
            Arc::clone(&bus),
            StreamGate {
                localization_enabled: localization,
                tracking_enabled: tracking,
            },
        );
        let handles = node.spawn();
        (bus, handles)
    }

    fn ssl_event(sources: Vec<SslSource>) -> Event {
        Event {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: "test::socket".to_string(),
            payload: EventPayload::SslFrame(SslFrame {
                header: Header::now("odas"),
                sources,
            }),
        }
    }

    fn sst_event(sources: Vec<SstSource>) -> Event {
        Event {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: "test::socket".to_string(),
            payload: EventPayload::SstFrame(SstFrame {
                header: Header::now("odas"),
                sources,
            }),
        }
    }

    #[tokio::test]
    async fn enabled_localization_stream_yields_point_clouds() {
        let (bus, handles) = make_node(true, false);
        assert_eq!(handles.len(), 1);
        let mut rx = bus.subscribe_to(Topic::PointClouds);

        bus.publish_to(
            Topic::SslFrames,
            ssl_event(vec![SslSource {
                x: 1.0,
                y: 0.0,
                z: 0.0,
                energy: 0.7,
            }]),
        );

        let event = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("point cloud within deadline")
            .unwrap();
        match event.payload {
            EventPayload::PointCloud(cloud) => {
                assert_eq!(cloud.points.len(), 1);
                assert_eq!(cloud.points[0].intensity, 0.7);
            }
            other => panic!("expected PointCloud payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn enabled_tracking_stream_yields_poses() {
        let (bus, handles) = make_node(false, true);
        assert_eq!(handles.len(), 1);
        let mut rx = bus.subscribe_to(Topic::TrackedPoses);

        bus.publish_to(
            Topic::SstFrames,
            sst_event(vec![SstSource {
                x: 0.0,
                y: 0.0,
                z: 1.0,
            }]),
        );

        let event = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("pose within deadline")
            .unwrap();
        match event.payload {
            EventPayload::TrackedPose(pose) => {
                assert_eq!(pose.position, Vec3::zero());
                assert!((pose.orientation.norm() - 1.0).abs() < 1e-5);
            }
            other => panic!("expected TrackedPose payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn disabled_stream_is_not_wired() {
        let (bus, handles) = make_node(false, false);
        assert!(handles.is_empty());
        let mut rx = bus.subscribe_to(Topic::PointClouds);

        // Nothing consumes SslFrames; no cloud can appear.
        bus.publish_to(
            Topic::SslFrames,
            ssl_event(vec![SslSource {
                x: 1.0,
                y: 0.0,
                z: 0.0,
                energy: 0.5,
            }]),
        );

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            rx.recv(),
        )
        .await;
        assert!(result.is_err(), "disabled stream must produce nothing");
    }

    #[tokio::test]
    async fn empty_ssl_cycle_produces_no_cloud() {
        let (bus, _handles) = make_node(true, false);
        let mut rx = bus.subscribe_to(Topic::PointClouds);

        bus.publish_to(Topic::SslFrames, ssl_event(vec![]));

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            rx.recv(),
        )
        .await;
        assert!(result.is_err(), "empty cycle must produce nothing");
    }

    #[tokio::test]
    async fn tracking_task_processes_cycles_in_order() {
        let (bus, _handles) = make_node(false, true);
        let mut rx = bus.subscribe_to(Topic::TrackedPoses);

        bus.publish_to(
            Topic::SstFrames,
            sst_event(vec![SstSource { x: 1.0, y: 0.0, z: 0.0 }]),
        );
        bus.publish_to(
            Topic::SstFrames,
            sst_event(vec![SstSource { x: 0.0, y: 1.0, z: 0.0 }]),
        );

        let first = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("first pose")
            .unwrap();
        let second = tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("second pose")
            .unwrap();

        // First cycle points forward (identity), second points left.
        match (first.payload, second.payload) {
            (EventPayload::TrackedPose(a), EventPayload::TrackedPose(b)) => {
                assert!((a.orientation.w - 1.0).abs() < 1e-5);
                assert!((b.orientation.z - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-5);
            }
            other => panic!("expected two TrackedPose payloads, got {other:?}"),
        }
    }
}
