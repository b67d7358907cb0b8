//! Spatial primitives for positioning markers around the viewer
//!
//! Uses a right-handed coordinate system:
//! - X: Right (+) / Left (-)
//! - Y: Up (+) / Down (-)
//! - Z: Backward (+) / Forward (-), the viewer looks down -Z

mod point3d;
mod vector3d;
mod quaternion;
mod transform;

pub use point3d::Point3D;
pub use vector3d::Vector3D;
pub use quaternion::Quaternion;
pub use transform::Transform;
