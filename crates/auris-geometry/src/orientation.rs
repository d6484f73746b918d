//! Bearing-to-rotation conversion.
//!
//! A single direction vector under-determines a full 3-D rotation: it pins
//! down yaw and pitch but says nothing about roll.  The conversion therefore
//! fixes roll at 0 and derives:
//!
//! ```text
//! yaw   = atan2(y, x)
//! pitch = -atan2(z, sqrt(x² + y²))
//! roll  = 0
//! ```
//!
//! The (roll, pitch, yaw) triple is then converted to a quaternion with the
//! standard right-handed roll→pitch→yaw formula.  Rotating the +X axis by
//! the result reproduces the input bearing (up to normalization).
//!
//! # Example
//!
//! ```rust
//! use auris_geometry::direction_to_quaternion;
//! use auris_types::Vec3;
//!
//! // A source dead ahead needs no rotation.
//! let q = direction_to_quaternion(1.0, 0.0, 0.0);
//! assert!((q.norm() - 1.0).abs() < 1e-5);
//! assert!((q.w - 1.0).abs() < 1e-5);
//!
//! // Rotating +X by the result points at the source again.
//! let q = direction_to_quaternion(0.0, 1.0, 0.0);
//! let v = q.rotate(Vec3::unit_x());
//! assert!((v.y - 1.0).abs() < 1e-5);
//! ```

use auris_types::Quaternion;

/// Extract the (roll, pitch, yaw) Euler triple pointing along `(x, y, z)`.
///
/// Roll is always 0.  At the poles (x = y = 0) pitch saturates to ±π/2
/// through atan2's own domain handling; with x = y = z = 0 the result
/// follows the platform's `atan2(0, 0)` convention (0).  NaN and infinity
/// propagate; no finite input panics.
pub fn direction_to_euler(x: f32, y: f32, z: f32) -> (f32, f32, f32) {
    let yaw = y.atan2(x);
    let pitch = -z.atan2((x * x + y * y).sqrt());
    (0.0, pitch, yaw)
}

/// Convert a (roll, pitch, yaw) Euler triple (radians, right-handed,
/// applied roll→pitch→yaw about the fixed axes) to a unit quaternion.
pub fn from_euler(roll: f32, pitch: f32, yaw: f32) -> Quaternion {
    let (sr, cr) = (roll * 0.5).sin_cos();
    let (sp, cp) = (pitch * 0.5).sin_cos();
    let (sy, cy) = (yaw * 0.5).sin_cos();

    Quaternion::new(
        sr * cp * cy - cr * sp * sy,
        cr * sp * cy + sr * cp * sy,
        cr * cp * sy - sr * sp * cy,
        cr * cp * cy + sr * sp * sy,
    )
}

/// Map a unit direction vector to the rotation that points +X at it.
///
/// Pure and deterministic: identical inputs produce bit-identical outputs.
pub fn direction_to_quaternion(x: f32, y: f32, z: f32) -> Quaternion {
    let (roll, pitch, yaw) = direction_to_euler(x, y, z);
    from_euler(roll, pitch, yaw)
}
