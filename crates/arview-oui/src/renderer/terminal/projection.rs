//! 3D to 2D perspective projection for terminal rendering

use crate::spatial::{Point3D, Transform};

/// Projection settings for 3D to 2D conversion
#[derive(Debug, Clone)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height) of the visible area
    pub aspect: f32,
}

impl Projection {
    /// Create a perspective projection
    pub fn perspective(fov_degrees: f32, aspect: f32) -> Self {
        Self {
            fov: fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect,
        }
    }

    /// Project a point to normalized device coordinates (-1 to 1) plus a
    /// 0-1 depth value. The camera looks down its local -Z axis.
    pub fn project(&self, point: Point3D, camera: &Transform) -> Option<(f32, f32, f32)> {
        let local = camera.inverse_transform_point(point);
        let distance = -local.z;

        if distance <= self.near || distance >= self.far {
            return None;
        }

        let tan_half_fov = (self.fov / 2.0).tan();
        let x_ndc = local.x / (distance * tan_half_fov * self.aspect);
        let y_ndc = local.y / (distance * tan_half_fov);

        if x_ndc.abs() > 1.0 || y_ndc.abs() > 1.0 {
            return None;
        }

        let depth = (distance - self.near) / (self.far - self.near);
        Some((x_ndc, y_ndc, depth))
    }

    /// Convert normalized device coordinates to cell coordinates
    pub fn ndc_to_screen(&self, x_ndc: f32, y_ndc: f32, width: u32, height: u32) -> (u16, u16) {
        let x = ((x_ndc + 1.0) / 2.0 * width as f32).round() as u16;
        let y = ((1.0 - y_ndc) / 2.0 * height as f32).round() as u16;

        let x = x.min(width.saturating_sub(1) as u16);
        let y = y.min(height.saturating_sub(1) as u16);

        (x, y)
    }

    /// Project a point directly to cell coordinates
    pub fn project_to_screen(
        &self,
        point: Point3D,
        camera: &Transform,
        width: u32,
        height: u32,
    ) -> Option<(u16, u16, f32)> {
        let (x_ndc, y_ndc, depth) = self.project(point, camera)?;
        let (x, y) = self.ndc_to_screen(x_ndc, y_ndc, width, height);
        Some((x, y, depth))
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{Quaternion, Vector3D};
    use std::f32::consts::PI;

    #[test]
    fn test_point_ahead_projects_to_center() {
        let proj = Projection::perspective(90.0, 1.0);
        let camera = Transform::identity();

        let (x, y, depth) = proj.project(Point3D::new(0.0, 0.0, -5.0), &camera).unwrap();
        assert!(x.abs() < 0.001);
        assert!(y.abs() < 0.001);
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_behind_camera() {
        let proj = Projection::default();
        let camera = Transform::identity();
        assert!(proj.project(Point3D::new(0.0, 0.0, 5.0), &camera).is_none());
    }

    #[test]
    fn test_right_of_center() {
        let proj = Projection::perspective(90.0, 1.0);
        let camera = Transform::identity();
        let (x, _, _) = proj.project(Point3D::new(1.0, 0.0, -5.0), &camera).unwrap();
        assert!(x > 0.0);
    }

    #[test]
    fn test_rotated_camera() {
        let proj = Projection::perspective(60.0, 1.0);
        let camera = Transform::from_rotation(Quaternion::from_axis_angle(Vector3D::UP, -PI / 2.0));
        // Turned right: a point on +X is centered, a point ahead is out of view
        let (x, _, _) = proj.project(Point3D::new(10.0, 0.0, 0.0), &camera).unwrap();
        assert!(x.abs() < 0.001);
        assert!(proj.project(Point3D::new(0.0, 0.0, -10.0), &camera).is_none());
    }

    #[test]
    fn test_screen_coordinates() {
        let proj = Projection::default();

        let (x, y) = proj.ndc_to_screen(0.0, 0.0, 100, 50);
        assert_eq!((x, y), (50, 25));

        let (x, y) = proj.ndc_to_screen(-1.0, 1.0, 100, 50);
        assert_eq!((x, y), (0, 0));

        let (x, y) = proj.ndc_to_screen(1.0, -1.0, 100, 50);
        assert_eq!((x, y), (99, 49));
    }
}
