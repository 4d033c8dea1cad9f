//! Tunables for the renderer, camera and simulation clock.
//!
//! Every group has a `Default` built from the constants below and a
//! `validate` that rejects values the pipeline cannot work with.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::rasterizer::Lighting;
use crate::sphere::MIN_SUBDIVISIONS;

pub const WINDOW_WIDTH: usize = 1280;
pub const WINDOW_HEIGHT: usize = 720;
pub const WINDOW_TITLE: &str = "Solar System Simulator 3D";
pub const TARGET_FPS: u32 = 60;

pub const CAMERA_FOV: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 300.0;
pub const CAMERA_MIN_DISTANCE: f32 = 100.0;
pub const CAMERA_MAX_DISTANCE: f32 = 600.0;
pub const CAMERA_PITCH: f32 = 0.3;
/// Radians of yaw/pitch per pixel of pointer drag.
pub const CAMERA_ROTATION_SPEED: f32 = 0.005;
/// Distance units per scroll step.
pub const CAMERA_ZOOM_SPEED: f32 = 10.0;

pub const SPHERE_SECTORS: u32 = 18;
pub const SPHERE_STACKS: u32 = 12;
pub const SUN_SECTORS: u32 = 24;
pub const SUN_STACKS: u32 = 16;

pub const AMBIENT_STRENGTH: f32 = 0.2;
pub const DIFFUSE_STRENGTH: f32 = 0.8;
pub const LIGHT_DIRECTION: Vec3 = Vec3::new(0.3, -0.5, 1.0);

pub const MAX_STARS: usize = 500;
pub const STAR_SEED: u64 = 42;

pub const BACKGROUND_COLOR: Color = Color::rgb(0, 0, 0);
pub const ORBIT_COLOR: Color = Color::new(100, 100, 100, 80);

pub const DEFAULT_SIMULATION_SPEED: f32 = 1.0;
pub const MIN_SIMULATION_SPEED: f32 = 0.1;
pub const MAX_SIMULATION_SPEED: f32 = 5.0;
pub const SIMULATION_SPEED_STEP: f32 = 0.2;

#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    pub light_direction: Vec3,
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub planet_sectors: u32,
    pub planet_stacks: u32,
    pub sun_sectors: u32,
    pub sun_stacks: u32,
    pub star_count: usize,
    pub star_seed: u64,
    pub background: Color,
    pub orbit_color: Color,
    pub target_fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            light_direction: LIGHT_DIRECTION,
            ambient_strength: AMBIENT_STRENGTH,
            diffuse_strength: DIFFUSE_STRENGTH,
            planet_sectors: SPHERE_SECTORS,
            planet_stacks: SPHERE_STACKS,
            sun_sectors: SUN_SECTORS,
            sun_stacks: SUN_STACKS,
            star_count: MAX_STARS,
            star_seed: STAR_SEED,
            background: BACKGROUND_COLOR,
            orbit_color: ORBIT_COLOR,
            target_fps: TARGET_FPS,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        for (sectors, stacks) in [
            (self.planet_sectors, self.planet_stacks),
            (self.sun_sectors, self.sun_stacks),
        ] {
            if sectors < MIN_SUBDIVISIONS || stacks < MIN_SUBDIVISIONS {
                return Err(Error::InvalidTessellation { sectors, stacks });
            }
        }
        self.lighting().map(|_| ())
    }

    pub fn lighting(&self) -> Result<Lighting> {
        Lighting::new(self.light_direction, self.ambient_strength, self.diffuse_strength)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Delay between frames for the configured refresh cap.
    pub fn frame_delay(&self) -> std::time::Duration {
        std::time::Duration::from_micros(1_000_000 / u64::from(self.target_fps.max(1)))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub rotation_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            distance: CAMERA_DISTANCE,
            min_distance: CAMERA_MIN_DISTANCE,
            max_distance: CAMERA_MAX_DISTANCE,
            yaw: 0.0,
            pitch: CAMERA_PITCH,
            rotation_speed: CAMERA_ROTATION_SPEED,
            zoom_speed: CAMERA_ZOOM_SPEED,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_distance > self.max_distance {
            return Err(Error::InvalidZoomRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(Error::InvalidProjection(format!(
                "field of view {} must lie in (0, 180) degrees",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(Error::InvalidProjection(format!(
                "clip planes need 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        Ok(())
    }
}

/// Pause state and speed multiplier applied to the frame delta.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SIMULATION_SPEED,
            min_speed: MIN_SIMULATION_SPEED,
            max_speed: MAX_SIMULATION_SPEED,
            speed_step: SIMULATION_SPEED_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        RenderConfig::default().validate().unwrap();
        CameraConfig::default().validate().unwrap();
        let lighting = RenderConfig::default().lighting().unwrap();
        approx::assert_abs_diff_eq!(lighting.direction().length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_bad_render_settings() {
        let bad = RenderConfig {
            planet_sectors: 2,
            ..RenderConfig::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidTessellation { sectors: 2, .. })));

        let bad = RenderConfig {
            ambient_strength: 1.2,
            ..RenderConfig::default()
        };
        assert!(matches!(bad.validate(), Err(Error::StrengthOutOfRange { .. })));

        let bad = RenderConfig {
            height: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidViewport { .. })));
    }

    #[test]
    fn rejects_bad_camera_settings() {
        let bad = CameraConfig {
            min_distance: 700.0,
            ..CameraConfig::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidZoomRange { .. })));

        let bad = CameraConfig {
            near: 0.0,
            ..CameraConfig::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidProjection(_))));
    }

    #[test]
    fn frame_delay_tracks_fps() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.frame_delay().as_micros(), 16_666);
    }
}
