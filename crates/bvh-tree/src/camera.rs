//! The camera defining the visibility half-space.

use nalgebra::{Point3, Vector3};

/// Slack applied to the half-space test so points numerically on the camera
/// plane count as visible.
pub const VISIBILITY_EPSILON: f32 = 1e-6;

/// A point camera with an orientation frame.
///
/// Visibility is decided by the plane through `position` with normal
/// `normal`: everything on the side the normal points away from is visible.
/// `right` and `up` complete the frame for callers that render the camera,
/// they play no part in the visibility test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub right: Vector3<f32>,
    pub up: Vector3<f32>,
}

impl Camera {
    pub fn new(
        position: Point3<f32>,
        normal: Vector3<f32>,
        right: Vector3<f32>,
        up: Vector3<f32>,
    ) -> Self {
        Self {
            position,
            normal,
            right,
            up,
        }
    }

    /// Returns whether `point` lies in the visible half-space.
    ///
    /// The test is `normal · (position - point) <= ε`: a point directly in
    /// front of the camera yields a vector opposing the normal, so the dot
    /// product goes negative. Points on the plane itself pass thanks to the
    /// epsilon.
    pub fn sees_point(&self, point: Point3<f32>) -> bool {
        let to_camera = self.position - point;
        self.normal.dot(&to_camera) <= VISIBILITY_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_negative_z() -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn point_in_front_is_seen() {
        let camera = looking_down_negative_z();
        assert!(camera.sees_point(Point3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn point_behind_is_not_seen() {
        let camera = looking_down_negative_z();
        assert!(!camera.sees_point(Point3::new(0.0, 0.0, 7.0)));
    }

    #[test]
    fn point_on_camera_plane_is_seen() {
        // Zero dot product: the epsilon keeps plane points visible.
        let camera = looking_down_negative_z();
        assert!(camera.sees_point(Point3::new(3.0, -2.0, 5.0)));
    }

    #[test]
    fn epsilon_bounds_the_plane_test() {
        let camera = looking_down_negative_z();
        // Just inside the slack.
        assert!(camera.sees_point(Point3::new(0.0, 0.0, 5.0 - 0.5 * VISIBILITY_EPSILON)));
        // Clearly past it.
        assert!(!camera.sees_point(Point3::new(0.0, 0.0, 5.001)));
    }

    #[test]
    fn offset_along_plane_does_not_change_the_verdict() {
        // Only the normal component of position - point matters.
        let camera = looking_down_negative_z();
        assert!(camera.sees_point(Point3::new(100.0, -50.0, 4.9)));
        assert!(!camera.sees_point(Point3::new(100.0, -50.0, 5.1)));
    }

    #[test]
    fn unnormalized_normal_keeps_the_sign_convention() {
        let camera = Camera::new(
            Point3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, -10.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        );
        assert!(camera.sees_point(Point3::new(0.0, 0.0, 0.0)));
        assert!(!camera.sees_point(Point3::new(0.0, 0.0, 7.0)));
    }
}
