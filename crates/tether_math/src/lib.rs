//! 3D Mathematics Library
//!
//! This crate provides the small set of math types the Tether engine needs to
//! position scene nodes and describe colours.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quaternion`] - Unit quaternion for 3D orientation
//! - [`Degree`] / [`Radian`] - Typed angles
//! - [`ColourValue`] - RGBA colour with components in 0.0-1.0

mod vec3;
mod quaternion;
mod angle;
mod colour;

pub use vec3::Vec3;
pub use quaternion::Quaternion;
pub use angle::{Degree, Radian};
pub use colour::ColourValue;
