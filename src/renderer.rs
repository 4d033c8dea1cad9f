//! Frame composition: background, stars, orbit rings, bodies, then the HUD.

use crate::camera::Camera;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::rasterizer::{DrawStats, Rasterizer};
use crate::starfield::Starfield;
use crate::surface::{Framebuffer, Surface};
use crate::system::SolarSystem;

const HUD_X: i32 = 10;
const HUD_Y: i32 = 10;
const HUD_WIDTH: i32 = 200;
const HUD_HEIGHT: i32 = 90;
const HUD_BAR_WIDTH: i32 = 180;
const HUD_BAR_HEIGHT: i32 = 12;
/// Triangle count that fills the triangle bar.
const HUD_TRIANGLE_SCALE: f32 = 3000.0;

const HUD_PANEL: Color = Color::rgb(20, 20, 30);
const HUD_BORDER: Color = Color::rgb(0, 255, 0);
const HUD_TRACK: Color = Color::rgb(50, 50, 50);
const HUD_FPS_BAR: Color = Color::rgb(0, 200, 0);
const HUD_TRIANGLE_BAR: Color = Color::rgb(100, 149, 237);
const HUD_SPEED_BAR: Color = Color::rgb(255, 165, 0);

/// Numbers shown by the info overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HudInfo {
    pub fps: f32,
    pub target_fps: u32,
    pub triangles: usize,
    pub speed: f32,
    pub max_speed: f32,
}

pub struct Renderer {
    rasterizer: Rasterizer<Framebuffer>,
    starfield: Starfield,
    background: Color,
    orbit_color: Color,
    show_orbits: bool,
    show_stars: bool,
    show_info: bool,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        let rasterizer = Rasterizer::new(Framebuffer::new(config.width, config.height), config.lighting()?);
        Ok(Self {
            rasterizer,
            starfield: Starfield::new(config.star_count, config.star_seed),
            background: config.background,
            orbit_color: config.orbit_color,
            show_orbits: true,
            show_stars: false,
            show_info: true,
        })
    }

    /// Draws one frame of `system` seen through `camera` and returns the
    /// body triangle counters.
    pub fn render(&mut self, system: &SolarSystem, camera: &Camera) -> DrawStats {
        self.rasterizer.clear(self.background);
        if self.show_stars {
            self.starfield.draw(&mut self.rasterizer, &camera.view_projection());
        }
        if self.show_orbits {
            system.draw_orbits(&mut self.rasterizer, camera, self.orbit_color);
        }
        system.draw(&mut self.rasterizer, camera)
    }

    /// Paints the info panel over the finished frame. Does nothing while the
    /// panel is hidden.
    pub fn render_info(&mut self, info: &HudInfo) {
        if !self.show_info {
            return;
        }
        let fps_ratio = if info.target_fps == 0 {
            0.0
        } else {
            info.fps / info.target_fps as f32
        };
        let speed_ratio = if info.max_speed > 0.0 { info.speed / info.max_speed } else { 0.0 };

        let target = self.rasterizer.target_mut();
        target.fill_rect(HUD_X, HUD_Y, HUD_WIDTH, HUD_HEIGHT, HUD_PANEL);
        target.stroke_rect(HUD_X, HUD_Y, HUD_WIDTH, HUD_HEIGHT, HUD_BORDER);

        let bars = [
            (fps_ratio, HUD_FPS_BAR),
            (info.triangles as f32 / HUD_TRIANGLE_SCALE, HUD_TRIANGLE_BAR),
            (speed_ratio, HUD_SPEED_BAR),
        ];
        for (row, (ratio, color)) in bars.into_iter().enumerate() {
            draw_bar(target, HUD_Y + 15 + row as i32 * 25, ratio, color);
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if width == 0 || height == 0 {
            log::debug!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.rasterizer.resize(width, height);
    }

    pub fn toggle_orbits(&mut self) -> bool {
        self.show_orbits = !self.show_orbits;
        self.show_orbits
    }

    pub fn toggle_stars(&mut self) -> bool {
        self.show_stars = !self.show_stars;
        self.show_stars
    }

    pub fn toggle_info(&mut self) -> bool {
        self.show_info = !self.show_info;
        self.show_info
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.rasterizer.toggle_wireframe()
    }

    pub fn rasterizer(&self) -> &Rasterizer<Framebuffer> {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut Rasterizer<Framebuffer> {
        &mut self.rasterizer
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        self.rasterizer.target()
    }
}

fn draw_bar<S: Surface>(target: &mut S, y: i32, ratio: f32, color: Color) {
    let x = HUD_X + (HUD_WIDTH - HUD_BAR_WIDTH) / 2;
    target.fill_rect(x, y, HUD_BAR_WIDTH, HUD_BAR_HEIGHT, HUD_TRACK);
    let filled = (ratio.clamp(0.0, 1.0) * HUD_BAR_WIDTH as f32) as i32;
    target.fill_rect(x, y, filled, HUD_BAR_HEIGHT, color);
}
