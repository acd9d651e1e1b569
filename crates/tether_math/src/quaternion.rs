//! Quaternion for representing orientations in 3D space
//!
//! Stored as `w + xi + yj + zk`. Orientations handed to scene nodes are kept
//! at unit length.

use crate::{Radian, Vec3};

/// Unit quaternion describing a 3D orientation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` around `axis`
    ///
    /// The axis does not need to be unit length; it is normalized here. A zero
    /// axis yields the identity.
    pub fn from_angle_axis(angle: impl Into<Radian>, axis: Vec3) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle.into().value() * 0.5;
        let (sin, cos) = half.sin_cos();
        Self::new(cos, axis.x * sin, axis.y * sin, axis.z * sin)
    }

    /// Dot product of the four components
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn norm(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length; a zero quaternion becomes the identity
    pub fn normalized(self) -> Self {
        let n = self.norm();
        if n > 0.0 {
            let inv = 1.0 / n;
            Self::new(self.w * inv, self.x * inv, self.y * inv, self.z * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Inverse of a unit quaternion
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2(q x (q x v))
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Same orientation within `epsilon` (q and -q are equivalent)
    pub fn approx_eq(self, other: Self, epsilon: f32) -> bool {
        (self.dot(other).abs() - 1.0).abs() <= epsilon
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Quaternion {
    type Output = Self;
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.w * o.w - self.x * o.x - self.y * o.y - self.z * o.z,
            self.w * o.x + self.x * o.w + self.y * o.z - self.z * o.y,
            self.w * o.y - self.x * o.z + self.y * o.w + self.z * o.x,
            self.w * o.z + self.x * o.y - self.y * o.x + self.z * o.w,
        )
    }
}

impl std::ops::Mul<Vec3> for Quaternion {
    type Output = Vec3;
    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.rotate(v)
    }
}
