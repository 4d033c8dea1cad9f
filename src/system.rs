use std::f32::consts::TAU;

use crate::body::{BodyDescriptor, CelestialBody, PLANETS, SUN};
use crate::camera::Camera;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::math::Vec3;
use crate::rasterizer::{DrawStats, Rasterizer};
use crate::surface::Surface;

/// Line segments per orbit ring.
pub const ORBIT_SEGMENTS: usize = 128;

/// Ordered bodies around a single central star.
#[derive(Clone, Debug)]
pub struct SolarSystem {
    bodies: Vec<CelestialBody>,
    central: Option<usize>,
}

impl SolarSystem {
    pub fn new(bodies: Vec<CelestialBody>) -> Self {
        let central = bodies.iter().position(CelestialBody::is_central);
        Self { bodies, central }
    }

    /// Tessellates one sphere per descriptor; the central body uses the finer
    /// sun tessellation.
    pub fn from_descriptors(descriptors: &[BodyDescriptor], config: &RenderConfig) -> Result<Self> {
        let bodies = descriptors
            .iter()
            .map(|desc| {
                let (sectors, stacks) = if desc.is_central {
                    (config.sun_sectors, config.sun_stacks)
                } else {
                    (config.planet_sectors, config.planet_stacks)
                };
                CelestialBody::with_sphere(desc, sectors, stacks)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(bodies))
    }

    /// The Sun and the four inner planets.
    pub fn inner_planets(config: &RenderConfig) -> Result<Self> {
        let mut descriptors = Vec::with_capacity(PLANETS.len() + 1);
        descriptors.push(SUN);
        descriptors.extend_from_slice(&PLANETS);
        let system = Self::from_descriptors(&descriptors, config)?;
        log::info!(
            "solar system ready: {} bodies, {} triangles",
            system.bodies.len(),
            system.total_triangle_count()
        );
        Ok(system)
    }

    /// Steps every body by `dt` seconds. Negative deltas are treated as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        for body in &mut self.bodies {
            body.update(dt);
        }
    }

    /// Rasterizes every body and returns the stats summed over all of them.
    pub fn draw<S: Surface>(&self, rasterizer: &mut Rasterizer<S>, camera: &Camera) -> DrawStats {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        let mut total = DrawStats::default();
        for body in &self.bodies {
            total += rasterizer.draw_mesh(body.mesh(), &body.model_matrix(), &view, &projection, body.color());
        }
        total
    }

    /// Draws each orbit as a polyline overlay. Segments are kept only when
    /// both ends land inside the viewport; the depth buffer is not touched.
    pub fn draw_orbits<S: Surface>(&self, rasterizer: &mut Rasterizer<S>, camera: &Camera, color: Color) {
        let view_projection = camera.view_projection();
        let width = rasterizer.width() as f32;
        let height = rasterizer.height() as f32;
        let inside = |(x, y): (f32, f32)| x >= 0.0 && x < width && y >= 0.0 && y < height;

        for body in self.bodies.iter().filter(|b| !b.is_central()) {
            let radius = body.orbital_radius();
            for segment in 0..ORBIT_SEGMENTS {
                let a1 = segment as f32 * TAU / ORBIT_SEGMENTS as f32;
                let a2 = (segment + 1) as f32 * TAU / ORBIT_SEGMENTS as f32;
                let p1 = Vec3::new(a1.cos() * radius, 0.0, a1.sin() * radius);
                let p2 = Vec3::new(a2.cos() * radius, 0.0, a2.sin() * radius);
                let s1 = rasterizer.ndc_to_screen(view_projection.transform_point(p1));
                let s2 = rasterizer.ndc_to_screen(view_projection.transform_point(p2));
                if inside(s1) && inside(s2) {
                    rasterizer.draw_line(s1.0 as i32, s1.1 as i32, s2.0 as i32, s2.1 as i32, color);
                }
            }
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn sun(&self) -> Option<&CelestialBody> {
        self.central.and_then(|i| self.bodies.get(i))
    }

    pub fn total_triangle_count(&self) -> usize {
        self.bodies.iter().map(|b| b.mesh().triangle_count()).sum()
    }
}
