//! Position projection
//!
//! Two pure conversions keep markers and the camera in the same frame:
//! device-orientation angles become a camera rotation, and polar marker
//! offsets (distance + compass bearing) become render-space vectors.
//!
//! Render space is right-handed with the viewer at the origin looking down
//! -Z. A marker at bearing 0 therefore sits on -Z, which is exactly where an
//! upright device (beta = 90) with alpha = 0 points.

use arview_oui::spatial::{Quaternion, Vector3D};

/// Meters-to-render-units factor applied uniformly to every marker
pub const MARKER_SCALE: f32 = 0.5;

/// Beta reported by a device held upright; subtracted so upright means level
pub const UPRIGHT_BETA: f32 = 90.0;

/// Convert device-orientation angles (degrees) into a camera rotation.
///
/// The Euler triple is `(beta - 90, alpha, gamma)` around X, Y and Z,
/// composed in YXZ order. The result replaces the camera orientation
/// outright; successive samples are not blended.
pub fn orientation_to_camera_rotation(alpha: f32, beta: f32, gamma: f32) -> Quaternion {
    Quaternion::from_euler_yxz(
        (beta - UPRIGHT_BETA).to_radians(),
        alpha.to_radians(),
        gamma.to_radians(),
    )
}

/// Convert a polar offset into a render-space vector on the eye-level plane.
///
/// `x = sin(bearing) * distance * scale`, `y = 0`,
/// `z = -cos(bearing) * distance * scale`. Any bearing is accepted, and a
/// zero distance yields the origin.
pub fn polar_to_offset(distance_meters: f32, bearing_degrees: f32, scale: f32) -> Vector3D {
    let bearing = bearing_degrees.to_radians();
    let reach = distance_meters * scale;
    Vector3D::new(bearing.sin() * reach, 0.0, -bearing.cos() * reach)
}

/// Clockwise compass heading in [0, 360) for a platform alpha, which runs
/// counter-clockwise.
pub fn compass_heading(alpha: f32) -> f32 {
    (360.0 - alpha).rem_euclid(360.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(actual: Vector3D, expected: (f32, f32, f32)) {
        assert!(
            (actual.x - expected.0).abs() < 1e-2
                && (actual.y - expected.1).abs() < 1e-2
                && (actual.z - expected.2).abs() < 1e-2,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_bearing_north_is_ahead() {
        let v = polar_to_offset(8.0, 0.0, MARKER_SCALE);
        assert!(v.x.abs() < EPS);
        assert_eq!(v.y, 0.0);
        assert!((v.z + 4.0).abs() < EPS);
    }

    #[test]
    fn test_bearing_east_is_right() {
        let v = polar_to_offset(8.0, 90.0, MARKER_SCALE);
        assert!((v.x - 4.0).abs() < EPS);
        assert!(v.z.abs() < EPS);
    }

    #[test]
    fn test_bearing_south_is_behind() {
        let v = polar_to_offset(8.0, 180.0, MARKER_SCALE);
        assert!(v.x.abs() < EPS);
        assert!((v.z - 4.0).abs() < EPS);
    }

    #[test]
    fn test_reference_offsets() {
        assert_close(polar_to_offset(1.0, 0.0, 0.5), (0.0, 0.0, -0.5));
        assert_close(polar_to_offset(10.0, 225.0, 0.5), (-3.54, 0.0, 3.54));
    }

    #[test]
    fn test_bearing_is_periodic() {
        for bearing in [-90.0_f32, 0.0, 37.5, 225.0, 359.0] {
            let a = polar_to_offset(12.0, bearing, MARKER_SCALE);
            let b = polar_to_offset(12.0, bearing + 360.0, MARKER_SCALE);
            assert!((a - b).magnitude() < 1e-3, "bearing {}", bearing);
        }
    }

    #[test]
    fn test_zero_distance_collapses_to_origin() {
        let v = polar_to_offset(0.0, 123.0, MARKER_SCALE);
        assert!(v.magnitude() < EPS);
    }

    #[test]
    fn test_upright_device_is_identity() {
        let q = orientation_to_camera_rotation(0.0, 90.0, 0.0);
        assert!(q.angle_to(&Quaternion::IDENTITY) < 1e-3);
        assert!((q.forward() - Vector3D::FORWARD).magnitude() < EPS);
    }

    #[test]
    fn test_tilting_forward_looks_down() {
        // beta below 90 means the top of the device tips away from the viewer
        let q = orientation_to_camera_rotation(0.0, 45.0, 0.0);
        assert!(q.forward().y < -0.7);
    }

    #[test]
    fn test_marker_ahead_when_heading_matches_bearing() {
        for bearing in [0.0_f32, 30.0, 90.0, 200.0, 315.0] {
            let alpha = (360.0 - bearing).rem_euclid(360.0);
            let forward = orientation_to_camera_rotation(alpha, 90.0, 0.0).forward();
            let toward = polar_to_offset(10.0, bearing, MARKER_SCALE).normalize();
            assert!(forward.angle(&toward) < 5e-3, "bearing {}", bearing);
            assert!((compass_heading(alpha) - bearing).abs() < 1e-3);
        }
    }

    #[test]
    fn test_compass_heading_wraps() {
        assert_eq!(compass_heading(0.0), 0.0);
        assert_eq!(compass_heading(90.0), 270.0);
        assert_eq!(compass_heading(-90.0), 90.0);
        assert_eq!(compass_heading(360.0), 0.0);
    }

    #[test]
    fn test_rotation_replaces_rather_than_accumulates() {
        let first = orientation_to_camera_rotation(10.0, 90.0, 0.0);
        let again = orientation_to_camera_rotation(10.0, 90.0, 0.0);
        assert_eq!(first, again);
    }
}
