use crate::color::Color;
use crate::math::{Mat4, Vec3};
use crate::rasterizer::Rasterizer;
use crate::surface::Surface;

/// Half-extent of the cube the stars are scattered in.
const STAR_EXTENT: f32 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub brightness: f32,
    pub size: f32,
}

/// Background stars at fixed world positions, drawn as an overlay.
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Same seed, same sky.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Lcg::new(seed);
        let stars = (0..count)
            .map(|_| Star {
                position: Vec3::new(
                    rng.range(-STAR_EXTENT, STAR_EXTENT),
                    rng.range(-STAR_EXTENT, STAR_EXTENT),
                    rng.range(-STAR_EXTENT, STAR_EXTENT),
                ),
                brightness: rng.range(0.3, 1.0),
                size: rng.range(0.5, 2.0),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Plots every star in front of the camera as a grey point, or a small
    /// square when its size exceeds 1.5 px. Depth is ignored.
    pub fn draw<S: Surface>(&self, rasterizer: &mut Rasterizer<S>, view_projection: &Mat4) {
        let width = rasterizer.width() as f32;
        let height = rasterizer.height() as f32;
        for star in &self.stars {
            let ndc = view_projection.transform_point(star.position);
            if !(-1.0..=1.0).contains(&ndc.z) {
                continue;
            }
            let (x, y) = rasterizer.ndc_to_screen(ndc);
            if x < 0.0 || x >= width || y < 0.0 || y >= height {
                continue;
            }
            let level = (255.0 * star.brightness) as u8;
            let color = Color::rgb(level, level, level);
            let target = rasterizer.target_mut();
            if star.size > 1.5 {
                let half = star.size / 2.0;
                let side = star.size.ceil() as i32;
                target.fill_rect((x - half) as i32, (y - half) as i32, side, side, color);
            } else {
                target.set_pixel(x as i32, y as i32, color);
            }
        }
    }
}

struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_f32(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 32) as f32) / (u32::MAX as f32)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
