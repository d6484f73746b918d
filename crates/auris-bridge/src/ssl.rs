//! Localization adapter: SSL cycles → point-set records.
//!
//! Each localization cycle carries zero or more candidate source directions
//! on the unit sphere, each with a detection energy.  The adapter turns a
//! non-empty cycle into one [`PointCloud`] with a point per detection, in
//! detection order, the energy carried as the intensity channel.
//!
//! The adapter is stateless; every invocation is independent.

use auris_types::{Event, EventPayload, Header, PointCloud, PointXyzi, SslFrame};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::bus::{EventBus, Topic};

/// Converts localization cycles into point clouds and publishes them on
/// [`Topic::PointClouds`].
pub struct SslAdapter {
    bus: Arc<EventBus>,
}

impl SslAdapter {
    /// Create a new [`SslAdapter`] backed by the given [`EventBus`].
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }

    /// Handle one localization cycle.
    ///
    /// An empty cycle yields `None` and publishes nothing: silence is a
    /// normal outcome of zero detections, not an error.  A non-empty cycle
    /// yields a [`PointCloud`] with exactly one point per detection, in
    /// input order.  The record's frame id is copied from the cycle; its
    /// stamp is the current publish time, not the source capture time.
    pub fn on_frame(&self, frame: &SslFrame) -> Option<PointCloud> {
        if frame.sources.is_empty() {
            return None;
        }

        let points = frame
            .sources
            .iter()
            .map(|s| PointXyzi {
                x: s.x,
                y: s.y,
                z: s.z,
                intensity: s.energy,
            })
            .collect();

        let cloud = PointCloud::new(
            Header {
                frame_id: frame.header.frame_id.clone(),
                stamp: Utc::now(),
            },
            points,
        );

        self.bus.publish_to(
            Topic::PointClouds,
            Event {
                id: Uuid::new_v4(),
                timestamp: Utc::now(),
                source: "auris-bridge::ssl".to_string(),
                payload: EventPayload::PointCloud(cloud.clone()),
            },
        );

        Some(cloud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auris_types::SslSource;

    fn make_adapter() -> (Arc<EventBus>, SslAdapter) {
        let bus = Arc::new(EventBus::default());
        let adapter = SslAdapter::new(Arc::clone(&bus));
        (bus, adapter)
    }

    fn source(x: f32, y: f32, z: f32, energy: f32) -> SslSource {
        SslSource { x, y, z, energy }
    }

    #[test]
    fn empty_cycle_emits_nothing() {
        let (_, adapter) = make_adapter();
        let frame = SslFrame {
            header: Header::now("odas"),
            sources: vec![],
        };
        let result = adapter.on_frame(&frame);
        assert!(result.is_none());
    }

    #[test]
    fn one_point_per_detection_in_input_order() {
        let (_, adapter) = make_adapter();
        let frame = SslFrame {
            header: Header::now("odas"),
            sources: vec![
                source(1.0, 0.0, 0.0, 0.9),
                source(0.0, 1.0, 0.0, 0.5),
                source(0.0, 0.0, 1.0, 0.1),
            ],
        };

        let cloud = adapter.on_frame(&frame).expect("cloud");
        assert_eq!(cloud.points.len(), 3);
        for (point, src) in cloud.points.iter().zip(&frame.sources) {
            assert_eq!(point.x, src.x);
            assert_eq!(point.y, src.y);
            assert_eq!(point.z, src.z);
            assert_eq!(point.intensity, src.energy);
        }
    }

    #[test]
    fn frame_id_copied_and_stamp_renewed() {
        let (_, adapter) = make_adapter();
        let old_stamp = Utc::now() - chrono::Duration::hours(1);
        let frame = SslFrame {
            header: Header {
                frame_id: "mic_array".to_string(),
                stamp: old_stamp,
            },
            sources: vec![source(1.0, 0.0, 0.0, 1.0)],
        };

        let cloud = adapter.on_frame(&frame).expect("cloud");
        assert_eq!(cloud.header.frame_id, "mic_array");
        // Re-stamping policy: the record carries the publish time.
        assert!(cloud.header.stamp > old_stamp);
    }

    #[test]
    fn cloud_uses_xyzi_layout() {
        let (_, adapter) = make_adapter();
        let frame = SslFrame {
            header: Header::now("odas"),
            sources: vec![source(0.5, 0.5, 0.707, 0.3)],
        };

        let cloud = adapter.on_frame(&frame).expect("cloud");
        assert_eq!(cloud.fields, PointCloud::xyzi_fields());
        assert_eq!(cloud.point_step(), 16);
    }

    #[tokio::test]
    async fn cloud_is_published_on_point_clouds_topic() {
        let (bus, adapter) = make_adapter();
        let mut rx = bus.subscribe_to(Topic::PointClouds);

        let frame = SslFrame {
            header: Header::now("odas"),
            sources: vec![source(1.0, 0.0, 0.0, 0.8)],
        };
        let _ = adapter.on_frame(&frame);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.source, "auris-bridge::ssl");
        match event.payload {
            EventPayload::PointCloud(cloud) => assert_eq!(cloud.points.len(), 1),
            other => panic!("expected PointCloud payload, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_cycle_publishes_nothing() {
        let (bus, adapter) = make_adapter();
        let mut rx = bus.subscribe_to(Topic::PointClouds);

        let frame = SslFrame {
            header: Header::now("odas"),
            sources: vec![],
        };
        let _ = adapter.on_frame(&frame);

        let result = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            rx.recv(),
        )
        .await;
        assert!(result.is_err(), "no event expected for an empty cycle");
    }
}
