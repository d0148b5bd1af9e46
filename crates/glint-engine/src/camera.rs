//! Fly camera.
//!
//! Owns position and orientation; view and projection matrices are derived
//! on every query, so there is no cached matrix state to invalidate.

use glam::{Mat4, Vec3};

const WORLD_UP: Vec3 = Vec3::Y;

/// Near/far planes are fixed; the scene is a single quad a few units away.
const NEAR_PLANE: f32 = 0.01;
const FAR_PLANE: f32 = 100.0;

/// Pitch stays strictly inside ±90° to prevent gimbal flip at the poles.
const PITCH_LIMIT_DEG: f32 = 89.0;

const MIN_FOV_DEG: f32 = 1.0;
const MAX_FOV_DEG: f32 = 90.0;

/// First-person camera controlled by yaw/pitch angles in degrees.
///
/// The derived `front`/`right`/`up` vectors always form a right-handed
/// orthonormal basis for the current orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    yaw_deg: f32,
    pitch_deg: f32,
    fov_deg: f32,
    aspect: f32,
}

impl Camera {
    /// A camera at `position` facing down −Z (yaw −90°, pitch 0°, fov 45°).
    pub fn new(position: Vec3, aspect: f32) -> Self {
        Self {
            position,
            yaw_deg: -90.0,
            pitch_deg: 0.0,
            fov_deg: 45.0,
            aspect,
        }
    }

    /// Applies a pointer delta scaled by `sensitivity`.
    ///
    /// `dy` is subtracted because screen Y grows downward while pitch grows
    /// upward. Pitch is clamped to ±89°.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw_deg += dx * sensitivity;
        self.pitch_deg =
            (self.pitch_deg - dy * sensitivity).clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);
    }

    /// Unit look direction from yaw/pitch (spherical to Cartesian).
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw_deg.to_radians(), self.pitch_deg.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(WORLD_UP).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalize()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_deg.to_radians(),
            self.aspect,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }

    pub fn fov_deg(&self) -> f32 {
        self.fov_deg
    }

    /// Sets the vertical field of view, clamped to (1°, 90°) to avoid a
    /// degenerate projection.
    pub fn set_fov_deg(&mut self, fov_deg: f32) {
        self.fov_deg = fov_deg.clamp(MIN_FOV_DEG, MAX_FOV_DEG);
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Updates the aspect ratio; non-finite or non-positive values (e.g. from
    /// a zero-height resize) are ignored.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        } else {
            log::debug!("ignoring degenerate aspect ratio {aspect}");
        }
    }

    pub fn pitch_deg(&self) -> f32 {
        self.pitch_deg
    }

    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 3.0), 800.0 / 600.0)
    }

    #[test]
    fn default_orientation_faces_negative_z() {
        let c = camera();
        let front = c.front();
        assert!((front - Vec3::NEG_Z).length() < 1e-5);
        assert!((c.right() - Vec3::X).length() < 1e-5);
        assert!((c.up() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped_at_both_poles() {
        let mut c = camera();
        c.apply_mouse_delta(0.0, -95.0, 1.0);
        assert!(c.pitch_deg() <= 89.0);
        assert_eq!(c.pitch_deg(), 89.0);

        let mut c = camera();
        c.apply_mouse_delta(0.0, 95.0, 1.0);
        assert_eq!(c.pitch_deg(), -89.0);
    }

    #[test]
    fn mouse_delta_turns_yaw_and_inverts_pitch() {
        let mut c = camera();
        c.apply_mouse_delta(10.0, 4.0, 0.5);
        assert_eq!(c.yaw_deg(), -85.0);
        assert_eq!(c.pitch_deg(), -2.0);
    }

    #[test]
    fn basis_is_orthonormal_across_orientations() {
        let mut c = camera();
        for (dx, dy) in [(0.0, 0.0), (37.0, -20.0), (180.0, 44.0), (-400.0, 80.0)] {
            c.apply_mouse_delta(dx, dy, 1.0);
            let (f, r, u) = (c.front(), c.right(), c.up());
            assert!((f.length() - 1.0).abs() < 1e-5);
            assert!((r.length() - 1.0).abs() < 1e-5);
            assert!((u.length() - 1.0).abs() < 1e-5);
            assert!(f.dot(r).abs() < 1e-5);
            assert!(f.dot(u).abs() < 1e-5);
            assert!(r.dot(u).abs() < 1e-5);
        }
    }

    #[test]
    fn projection_reflects_aspect_ratio() {
        let mut c = camera();
        c.set_aspect(1024.0 / 768.0);
        let m = c.projection_matrix();
        // For a perspective matrix, m11 / m00 == aspect.
        let ratio = m.col(1).y / m.col(0).x;
        assert!((ratio - 1024.0 / 768.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_aspect_is_ignored() {
        let mut c = camera();
        let before = c.aspect();
        c.set_aspect(0.0);
        c.set_aspect(f32::NAN);
        c.set_aspect(-2.0);
        assert_eq!(c.aspect(), before);
    }

    #[test]
    fn fov_is_clamped_into_valid_range() {
        let mut c = camera();
        c.set_fov_deg(120.0);
        assert_eq!(c.fov_deg(), 90.0);
        c.set_fov_deg(0.0);
        assert_eq!(c.fov_deg(), 1.0);
    }

    #[test]
    fn view_matrix_maps_the_eye_to_the_origin() {
        let mut c = camera();
        c.position = Vec3::new(1.0, 2.0, 3.0);
        c.apply_mouse_delta(25.0, -10.0, 1.0);
        let eye = c.view_matrix().transform_point3(c.position);
        assert!(eye.length() < 1e-4);
    }
}
