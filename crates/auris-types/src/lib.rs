use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Message header naming the spatial reference frame a record is expressed
/// in and the time it was stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Label of the coordinate frame (e.g., "odas", "mic_array").
    pub frame_id: String,
    pub stamp: DateTime<Utc>,
}

impl Header {
    /// Header for `frame_id` stamped with the current wall-clock time.
    pub fn now(frame_id: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp: Utc::now(),
        }
    }
}

/// A 3-D vector (metres, or a unit bearing when used as a direction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// The zero vector (also the fixed pose position of the tracking stream).
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The +X unit vector, the reference bearing for orientation conversion.
    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn norm(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A rotation quaternion in the (x, y, z, w) wire convention used by pose
/// consumers.  Identity is (0, 0, 0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Create a quaternion.  The caller is responsible for providing a unit
    /// quaternion (|q| = 1) when it represents a rotation.
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// The identity rotation (no rotation).
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn norm(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Hamilton product: compose two rotations.
    pub fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }

    /// Conjugate (== inverse for a unit quaternion).
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotate a vector by this quaternion: p' = q * p * q*.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // Express v as a pure quaternion.
        let p = Self::new(v.x, v.y, v.z, 0.0);
        let rotated = self.mul(p).mul(self.conjugate());
        Vec3::new(rotated.x, rotated.y, rotated.z)
    }
}

/// One candidate sound-source direction from a localization (SSL) cycle.
///
/// The direction is a point on (or near) the unit sphere; upstream does not
/// guarantee exact normalization.  `energy` is the detection confidence and
/// is serialized as `E`, matching the upstream JSON schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SslSource {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(rename = "E")]
    pub energy: f32,
}

/// One localization cycle: zero or more simultaneous directional detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SslFrame {
    pub header: Header,
    pub sources: Vec<SslSource>,
}

/// The persistent tracked sound-source direction from a tracking (SST) cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SstSource {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// One tracking cycle.  The upstream tracker contract is 0 or 1 sources;
/// 2+ is an anomaly the tracking adapter reports and drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SstFrame {
    pub header: Header,
    pub sources: Vec<SstSource>,
}

/// Scalar type of a [`PointField`] channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Float32,
}

impl FieldType {
    /// Size of one scalar of this type in bytes.
    pub fn size(self) -> u32 {
        match self {
            FieldType::Float32 => 4,
        }
    }
}

/// Describes one channel of a dense point layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointField {
    pub name: String,
    /// Byte offset of this channel within one packed point.
    pub offset: u32,
    pub datatype: FieldType,
    pub count: u32,
}

/// One point of a localization point cloud: unit-sphere position plus the
/// detection energy as intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointXyzi {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub intensity: f32,
}

/// A point-set record: one point per localization detection, in detection
/// order, with the fixed x/y/z/intensity channel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    pub header: Header,
    pub fields: Vec<PointField>,
    pub points: Vec<PointXyzi>,
}

impl PointCloud {
    /// Build a cloud from already-ordered points with the standard
    /// [`PointCloud::xyzi_fields`] layout.
    pub fn new(header: Header, points: Vec<PointXyzi>) -> Self {
        Self {
            header,
            fields: Self::xyzi_fields(),
            points,
        }
    }

    /// The fixed four-channel layout: x@0, y@4, z@8, intensity@12, all
    /// FLOAT32 with count 1.
    pub fn xyzi_fields() -> Vec<PointField> {
        ["x", "y", "z", "intensity"]
            .iter()
            .enumerate()
            .map(|(i, name)| PointField {
                name: (*name).to_string(),
                offset: i as u32 * FieldType::Float32.size(),
                datatype: FieldType::Float32,
                count: 1,
            })
            .collect()
    }

    /// Bytes of one packed point.
    pub fn point_step(&self) -> u32 {
        self.fields
            .iter()
            .map(|f| f.datatype.size() * f.count)
            .sum()
    }

    /// Densely packed little-endian point data, for consumers that want the
    /// serialized form rather than the typed point list.
    pub fn data(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.points.len() * self.point_step() as usize);
        for p in &self.points {
            out.extend_from_slice(&p.x.to_le_bytes());
            out.extend_from_slice(&p.y.to_le_bytes());
            out.extend_from_slice(&p.z.to_le_bytes());
            out.extend_from_slice(&p.intensity.to_le_bytes());
        }
        out
    }
}

/// An oriented-pose record for the tracked sound source.
///
/// The position is permanently the origin: direction-only sensing cannot
/// recover range, so only the orientation and header change across events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseStamped {
    pub header: Header,
    pub position: Vec3,
    pub orientation: Quaternion,
}

impl PoseStamped {
    /// The startup pose: unnamed frame, origin position, identity rotation.
    pub fn origin() -> Self {
        Self {
            header: Header {
                frame_id: String::new(),
                stamp: Utc::now(),
            },
            position: Vec3::zero(),
            orientation: Quaternion::identity(),
        }
    }
}

/// Unified event wrapper for the internal topic bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// e.g., "auris-bridge::ssl"
    pub source: String,
    pub payload: EventPayload,
}

/// Variants of data routed over the internal bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventPayload {
    SslFrame(SslFrame),
    SstFrame(SstFrame),
    PointCloud(PointCloud),
    TrackedPose(PoseStamped),
}

/// Global error type spanning startup misconfiguration and per-event
/// decode failures.
#[derive(Error, Debug)]
pub enum AurisError {
    /// An enabled stream declared an unsupported encoding.  Fatal at startup.
    #[error("invalid {stream} configuration: {message}")]
    Configuration { stream: String, message: String },

    /// The configuration document could not be read or parsed.  Fatal at
    /// startup.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(String),

    /// An inbound frame could not be decoded.  Recoverable: the event is
    /// dropped and processing continues.
    #[error("frame decode error: {0}")]
    Parsing(String),
}
