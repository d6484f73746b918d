//! `auris-geometry` – Direction-to-Orientation Math
//!
//! Pure functions that turn a sound-source bearing (a point on the unit
//! sphere) into a rotation, used by the tracking adapter to orient its pose
//! at the tracked source.
//!
//! # Modules
//!
//! - [`orientation`] – Euler extraction from a direction vector and the
//!   standard Euler-to-quaternion conversion.

pub mod orientation;

pub use orientation::{direction_to_euler, direction_to_quaternion, from_euler};
