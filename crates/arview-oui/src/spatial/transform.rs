//! Rigid transform (position + rotation), used for the viewer camera

use super::{Point3D, Quaternion, Vector3D};

/// A rigid 3D transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3D,
    pub rotation: Quaternion,
}

impl Transform {
    /// Identity transform (origin, no rotation)
    pub fn identity() -> Self {
        Self {
            position: Point3D::ORIGIN,
            rotation: Quaternion::IDENTITY,
        }
    }

    /// Transform at the origin with the given rotation
    pub fn from_rotation(rotation: Quaternion) -> Self {
        Self {
            position: Point3D::ORIGIN,
            rotation,
        }
    }

    /// Get the forward direction of this transform
    pub fn forward(&self) -> Vector3D {
        self.rotation.forward()
    }

    /// Inverse transform a point from world space to local space
    pub fn inverse_transform_point(&self, world: Point3D) -> Point3D {
        let relative = world - self.position;
        self.rotation.inverse().rotate_vector(relative).to_point()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Point3D::ORIGIN);
        assert_eq!(t.rotation, Quaternion::IDENTITY);
        assert_eq!(t.forward(), Vector3D::FORWARD);
    }

    #[test]
    fn test_local_world_roundtrip() {
        let t = Transform {
            position: Point3D::new(1.0, 2.0, 3.0),
            rotation: Quaternion::from_euler_yxz(0.3, 1.2, -0.4),
        };
        let local = Point3D::new(-2.0, 0.5, -6.0);
        let world = t.position + t.rotation.rotate_vector(local.to_vector());
        let back = t.inverse_transform_point(world);
        assert!((back - local).magnitude() < 0.0001);
    }

    #[test]
    fn test_turned_camera_sees_point_ahead() {
        // Camera turned 90 degrees left; a point on -X lies straight ahead
        let t = Transform::from_rotation(Quaternion::from_axis_angle(Vector3D::UP, PI / 2.0));
        let local = t.inverse_transform_point(Point3D::new(-5.0, 0.0, 0.0));
        assert!(local.x.abs() < 0.0001);
        assert!((local.z + 5.0).abs() < 0.0001);
    }
}
