//! Quaternion representation for 3D rotations

use super::Vector3D;
use std::ops::Mul;

/// A quaternion for representing 3D rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a new quaternion
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion from axis-angle representation
    pub fn from_axis_angle(axis: Vector3D, angle_radians: f32) -> Self {
        let half_angle = angle_radians / 2.0;
        let sin_half = half_angle.sin();
        let normalized = axis.normalize();

        Self {
            x: normalized.x * sin_half,
            y: normalized.y * sin_half,
            z: normalized.z * sin_half,
            w: half_angle.cos(),
        }
    }

    /// Create a quaternion from Euler angles (in radians) applied in
    /// intrinsic Y, X, Z order: `q = qY(y) * qX(x) * qZ(z)`.
    ///
    /// `x` tilts the view up/down, `y` turns it left/right and `z` rolls it
    /// around the line of sight.
    pub fn from_euler_yxz(x: f32, y: f32, z: f32) -> Self {
        let qx = Self::from_axis_angle(Vector3D::RIGHT, x);
        let qy = Self::from_axis_angle(Vector3D::UP, y);
        let qz = Self::from_axis_angle(Vector3D::BACK, z);
        qy * qx * qz
    }

    /// Get the magnitude of the quaternion
    pub fn magnitude(&self) -> f32 {
        self.dot(self).sqrt()
    }

    fn dot(&self, other: &Quaternion) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Normalize the quaternion
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self::new(self.x / mag, self.y / mag, self.z / mag, self.w / mag)
        } else {
            Self::IDENTITY
        }
    }

    /// Get the inverse of the quaternion
    pub fn inverse(&self) -> Self {
        let mag_sq = self.dot(self);
        if mag_sq > 0.0 {
            let inv_mag_sq = 1.0 / mag_sq;
            Self::new(
                -self.x * inv_mag_sq,
                -self.y * inv_mag_sq,
                -self.z * inv_mag_sq,
                self.w * inv_mag_sq,
            )
        } else {
            Self::IDENTITY
        }
    }

    /// Angle in radians of the rotation taking `self` onto `other`.
    ///
    /// `q` and `-q` describe the same rotation and compare as 0.
    pub fn angle_to(&self, other: &Quaternion) -> f32 {
        let dot = self.normalize().dot(&other.normalize()).abs().min(1.0);
        2.0 * dot.acos()
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vector(&self, v: Vector3D) -> Vector3D {
        let q_vec = Vector3D::new(self.x, self.y, self.z);
        let uv = q_vec.cross(&v);
        let uuv = q_vec.cross(&uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Get the forward vector (where this rotation points)
    pub fn forward(&self) -> Vector3D {
        self.rotate_vector(Vector3D::FORWARD)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, rhs: Self) -> Self::Output {
        Quaternion::new(
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        )
    }
}
