use std::f32::consts::FRAC_PI_2;

use crate::config::CameraConfig;
use crate::error::{Error, Result};
use crate::math::{Mat4, Vec3};

/// Pitch stops this far short of straight up or down so the orbit axis never
/// lines up with `up`.
pub const PITCH_MARGIN: f32 = 0.1;
pub const MAX_PITCH: f32 = FRAC_PI_2 - PITCH_MARGIN;

/// Camera orbiting a target on a sphere of radius `distance`.
///
/// Position and both matrices are derived and recomputed on every mutation,
/// so the getters never return stale values.
#[derive(Clone, Debug)]
pub struct Camera {
    target: Vec3,
    up: Vec3,
    distance: f32,
    yaw: f32,
    pitch: f32,
    fov_degrees: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
    min_distance: f32,
    max_distance: f32,
    position: Vec3,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(aspect_ratio: f32, config: &CameraConfig) -> Result<Self> {
        config.validate()?;
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(Error::InvalidProjection(format!(
                "aspect ratio {} must be positive",
                aspect_ratio
            )));
        }
        let mut camera = Self {
            target: Vec3::ZERO,
            up: Vec3::UP,
            distance: config.distance.clamp(config.min_distance, config.max_distance),
            yaw: config.yaw,
            pitch: config.pitch.clamp(-MAX_PITCH, MAX_PITCH),
            fov_degrees: config.fov_degrees,
            aspect_ratio,
            near: config.near,
            far: config.far,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            position: Vec3::ZERO,
            view: Mat4::identity(),
            projection: Mat4::identity(),
        };
        camera.update();
        Ok(camera)
    }

    fn update_position(&mut self) {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.position = self.target
            + Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance;
    }

    fn update_matrices(&mut self) {
        self.view = Mat4::look_at(self.position, self.target, self.up);
        self.projection = Mat4::perspective(self.fov_degrees, self.aspect_ratio, self.near, self.far);
    }

    fn update(&mut self) {
        self.update_position();
        self.update_matrices();
    }

    /// Adds to yaw and pitch (radians), clamping pitch to `±MAX_PITCH`.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-MAX_PITCH, MAX_PITCH);
        self.update();
    }

    /// Moves along the view axis; positive deltas move away from the target.
    pub fn zoom(&mut self, delta: f32) {
        self.set_distance(self.distance + delta);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(self.min_distance, self.max_distance);
        self.update();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update();
    }

    /// Ignores non-finite or non-positive ratios, such as the one produced
    /// by a minimized window.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            log::debug!("ignoring aspect ratio {}", aspect_ratio);
            return;
        }
        self.aspect_ratio = aspect_ratio;
        self.update_matrices();
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn camera() -> Camera {
        Camera::new(16.0 / 9.0, &CameraConfig::default()).unwrap()
    }

    #[test]
    fn pitch_saturates_short_of_the_pole() {
        let mut cam = camera();
        for _ in 0..10 {
            cam.rotate(0.0, 10.0);
            assert!(cam.pitch() <= MAX_PITCH);
        }
        assert_eq!(cam.pitch(), MAX_PITCH);
        cam.rotate(0.0, -100.0);
        assert_eq!(cam.pitch(), -MAX_PITCH);
    }

    #[test]
    fn zoom_saturates_at_range_limits() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.zoom(CameraConfig::default().zoom_speed);
        }
        assert_eq!(cam.distance(), CameraConfig::default().max_distance);
        for _ in 0..100 {
            cam.zoom(-37.0);
        }
        assert_eq!(cam.distance(), CameraConfig::default().min_distance);
    }

    #[test]
    fn position_follows_spherical_coordinates() {
        let config = CameraConfig {
            pitch: 0.0,
            ..CameraConfig::default()
        };
        let mut cam = Camera::new(1.0, &config).unwrap();
        assert_abs_diff_eq!(cam.position().z, 300.0, epsilon = 1e-3);

        cam.rotate(FRAC_PI_2, 0.0);
        assert_abs_diff_eq!(cam.position().x, 300.0, epsilon = 1e-3);
        assert_abs_diff_eq!(cam.position().z, 0.0, epsilon = 1e-3);

        cam.set_target(Vec3::new(0.0, 10.0, 0.0));
        assert_abs_diff_eq!(cam.position().y, 10.0, epsilon = 1e-3);
        assert_abs_diff_eq!(cam.position().distance(cam.target()), 300.0, epsilon = 1e-2);
    }

    #[test]
    fn matrices_are_refreshed_on_every_mutation() {
        let mut cam = camera();
        let before = cam.view_matrix();
        cam.rotate(0.2, 0.0);
        assert_ne!(cam.view_matrix(), before);
        assert_abs_diff_eq!(
            cam.view_matrix().transform_point(cam.position()).length(),
            0.0,
            epsilon = 1e-3
        );

        let proj = cam.projection_matrix();
        cam.set_aspect_ratio(1.0);
        assert_ne!(cam.projection_matrix(), proj);
        cam.set_aspect_ratio(f32::INFINITY);
        assert_eq!(cam.aspect_ratio(), 1.0);
        assert_eq!(cam.view_projection(), cam.projection_matrix() * cam.view_matrix());
    }

    #[test]
    fn yaw_accumulates_without_clamping() {
        let mut cam = camera();
        assert_eq!(cam.yaw(), 0.0);
        for _ in 0..4 {
            cam.rotate(1.0, 0.0);
        }
        assert_abs_diff_eq!(cam.yaw(), 4.0, epsilon = 1e-6);
        cam.rotate(-6.0, 0.0);
        assert_abs_diff_eq!(cam.yaw(), -2.0, epsilon = 1e-6);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let ndc = cam.view_projection().transform_point(cam.target());
        assert_abs_diff_eq!(ndc.x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(ndc.y, 0.0, epsilon = 1e-4);
        assert!(ndc.z > -1.0 && ndc.z < 1.0);
    }

    #[test]
    fn rejects_invalid_setup() {
        assert!(Camera::new(0.0, &CameraConfig::default()).is_err());
        let inverted = CameraConfig {
            min_distance: 10.0,
            max_distance: 5.0,
            ..CameraConfig::default()
        };
        assert!(matches!(Camera::new(1.0, &inverted), Err(Error::InvalidZoomRange { .. })));
    }
}
