//! Scanline triangle rasterizer with a depth buffer and flat directional lighting.
//!
//! Per draw call every vertex is projected once, each triangle is culled by
//! its screen-space winding, and survivors are either filled (depth tested,
//! one shade per triangle) or outlined in wireframe mode.

use std::mem;

use crate::color::Color;
use crate::depth::DepthBuffer;
use crate::error::{Error, Result};
use crate::math::{Mat4, Vec3};
use crate::mesh::{Mesh, Vertex};
use crate::surface::{Framebuffer, Surface};

/// How far outside the viewport (in pixels) a vertex may land and still
/// count as visible for wireframe edges.
pub const VISIBILITY_MARGIN: f32 = 100.0;

/// Spans shorter than this interpolate with a ratio of zero.
const SPAN_EPSILON: f32 = 0.001;

/// A single directional light plus an ambient floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Unit vector pointing from the light toward the scene.
    direction: Vec3,
    ambient_strength: f32,
    diffuse_strength: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient_strength: 0.2,
            diffuse_strength: 0.8,
        }
    }
}

impl Lighting {
    pub fn new(direction: Vec3, ambient_strength: f32, diffuse_strength: f32) -> Result<Self> {
        check_strength("ambient", ambient_strength)?;
        check_strength("diffuse", diffuse_strength)?;
        let direction = direction.normalized();
        if direction == Vec3::ZERO {
            return Err(Error::DegenerateLightDirection);
        }
        Ok(Self {
            direction,
            ambient_strength,
            diffuse_strength,
        })
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn ambient_strength(&self) -> f32 {
        self.ambient_strength
    }

    pub fn diffuse_strength(&self) -> f32 {
        self.diffuse_strength
    }

    /// `ambient + max(0, -n·L) * diffuse`, clamped to [0, 1].
    ///
    /// Surfaces facing away from the light get the ambient term only; a zero
    /// normal behaves the same way.
    pub fn brightness(&self, normal: Vec3) -> f32 {
        let diffuse = (-normal.dot(self.direction)).max(0.0);
        (self.ambient_strength + diffuse * self.diffuse_strength).clamp(0.0, 1.0)
    }

    pub fn shade(&self, normal: Vec3, base: Color) -> Color {
        base.scaled(self.brightness(normal))
    }
}

fn check_strength(name: &'static str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::StrengthOutOfRange { name, value })
    }
}

/// Triangle counters for one `draw_mesh` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub triangles_drawn: usize,
    pub triangles_culled: usize,
    /// Triangles whose indices named a missing vertex.
    pub triangles_skipped: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangles_drawn += rhs.triangles_drawn;
        self.triangles_culled += rhs.triangles_culled;
        self.triangles_skipped += rhs.triangles_skipped;
    }
}

/// A vertex after projection: pixel position, NDC depth, world-space normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectedVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub normal: Vec3,
    pub u: f32,
    pub v: f32,
    pub visible: bool,
}

/// Twice the signed area of a screen-space triangle.
///
/// Screen Y grows downward, so a positive value means the vertices run
/// clockwise as seen on screen and a negative value counter-clockwise.
pub fn signed_area(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32)) -> f32 {
    (p1.0 - p0.0) * (p2.1 - p0.1) - (p1.1 - p0.1) * (p2.0 - p0.0)
}

/// Meshes wind counter-clockwise seen from outside, and the Y flip of the
/// screen mapping keeps that counter-clockwise on screen. Anything with a
/// positive [`signed_area`] therefore faces away from the camera.
pub fn is_back_facing(area: f32) -> bool {
    area > 0.0
}

/// Software rasterizer owning a depth buffer and the surface it draws into.
pub struct Rasterizer<S = Framebuffer> {
    target: S,
    depth: DepthBuffer,
    lighting: Lighting,
    wireframe: bool,
    stats: DrawStats,
    projected: Vec<ProjectedVertex>,
}

impl<S: Surface> Rasterizer<S> {
    pub fn new(target: S, lighting: Lighting) -> Self {
        let depth = DepthBuffer::new(target.width(), target.height());
        Self {
            target,
            depth,
            lighting,
            wireframe: false,
            stats: DrawStats::default(),
            projected: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.target.width()
    }

    pub fn height(&self) -> usize {
        self.target.height()
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut S {
        &mut self.target
    }

    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    pub fn clear_depth(&mut self) {
        self.depth.clear();
    }

    /// Starts a frame: resets every depth cell and fills the surface.
    pub fn clear(&mut self, background: Color) {
        self.depth.clear();
        self.target.clear(background);
    }

    /// Reallocates the depth buffer and the surface. Whatever was drawn
    /// before is gone; treat the next draw as a fresh frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.target.resize(width, height);
        self.depth.resize(width, height);
        log::info!("rasterizer resized to {}x{}", width, height);
    }

    pub fn lighting(&self) -> &Lighting {
        &self.lighting
    }

    pub fn set_lighting(&mut self, lighting: Lighting) {
        self.lighting = lighting;
    }

    /// Points the light along `direction`; a zero vector is ignored.
    pub fn set_light_direction(&mut self, direction: Vec3) {
        let direction = direction.normalized();
        if direction == Vec3::ZERO {
            log::debug!("ignoring zero light direction");
            return;
        }
        self.lighting.direction = direction;
    }

    pub fn set_wireframe(&mut self, enabled: bool) {
        self.wireframe = enabled;
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        self.wireframe
    }

    pub fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    /// Counters from the most recent `draw_mesh` call.
    pub fn stats(&self) -> DrawStats {
        self.stats
    }

    /// Maps NDC x/y in [-1, 1] to pixel coordinates, flipping Y.
    pub fn ndc_to_screen(&self, ndc: Vec3) -> (f32, f32) {
        let width = self.width() as f32;
        let height = self.height() as f32;
        ((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
    }

    /// Projects `vertex` through `mvp`. `normal` is carried through as given;
    /// the caller has already moved it into world space.
    pub fn project_vertex(&self, vertex: &Vertex, normal: Vec3, mvp: &Mat4) -> ProjectedVertex {
        let ndc = mvp.transform_point(vertex.position);
        let (x, y) = self.ndc_to_screen(ndc);
        let width = self.width() as f32;
        let height = self.height() as f32;
        let visible = x >= -VISIBILITY_MARGIN
            && x <= width + VISIBILITY_MARGIN
            && y >= -VISIBILITY_MARGIN
            && y <= height + VISIBILITY_MARGIN;
        ProjectedVertex {
            x,
            y,
            z: ndc.z,
            normal,
            u: vertex.u,
            v: vertex.v,
            visible,
        }
    }

    /// Draws `mesh` in a flat `color`, lit in world space.
    ///
    /// Counters are reset at the start of every call; callers drawing several
    /// meshes per frame sum the returned stats themselves.
    pub fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        model: &Mat4,
        view: &Mat4,
        projection: &Mat4,
        color: Color,
    ) -> DrawStats {
        let mvp = *projection * *view * *model;

        let mut projected = mem::take(&mut self.projected);
        projected.clear();
        projected.extend(mesh.vertices().iter().map(|vertex| {
            let normal = model.transform_vector(vertex.normal).normalized();
            self.project_vertex(vertex, normal, &mvp)
        }));

        self.stats = DrawStats::default();
        for [i0, i1, i2] in mesh.triangles() {
            let (Some(p0), Some(p1), Some(p2)) = (
                projected.get(i0 as usize),
                projected.get(i1 as usize),
                projected.get(i2 as usize),
            ) else {
                log::debug!("skipping triangle [{}, {}, {}]: index out of range", i0, i1, i2);
                self.stats.triangles_skipped += 1;
                continue;
            };

            let area = signed_area((p0.x, p0.y), (p1.x, p1.y), (p2.x, p2.y));
            if is_back_facing(area) {
                self.stats.triangles_culled += 1;
                continue;
            }

            if self.wireframe {
                self.draw_wire_triangle(p0, p1, p2);
            } else {
                self.fill_triangle(p0, p1, p2, color);
            }
            self.stats.triangles_drawn += 1;
        }

        self.projected = projected;
        self.stats
    }

    fn draw_wire_triangle(&mut self, p0: &ProjectedVertex, p1: &ProjectedVertex, p2: &ProjectedVertex) {
        for (a, b) in [(p0, p1), (p1, p2), (p2, p0)] {
            if a.visible && b.visible {
                self.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, Color::WIREFRAME);
            }
        }
    }

    /// Bresenham line straight onto the surface, without depth testing.
    pub fn draw_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        // endpoints far off screen would otherwise walk millions of pixels
        let max_steps = self.width().max(self.height()) * 2;
        for _ in 0..=max_steps {
            self.target.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Depth-tests one pixel and writes `color` when it is the nearest so far.
    pub fn plot(&mut self, x: i32, y: i32, depth: f32, color: Color) -> bool {
        if self.depth.test_and_set(x, y, depth) {
            self.target.set_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    /// Fills a triangle with one flat shade derived from its averaged normal,
    /// walking scanlines between the long edge and the two short ones.
    pub fn fill_triangle(
        &mut self,
        v0: &ProjectedVertex,
        v1: &ProjectedVertex,
        v2: &ProjectedVertex,
        base: Color,
    ) {
        let mut verts = [*v0, *v1, *v2];
        verts.sort_by(|a, b| a.y.total_cmp(&b.y));
        let [top, mid, bottom] = verts;

        let normal = ((v0.normal + v1.normal + v2.normal) * (1.0 / 3.0)).normalized();
        let lit = self.lighting.shade(normal, base);

        let min_y = (top.y as i32).max(0);
        let max_y = (bottom.y as i32).min(self.height() as i32 - 1);
        let max_x = self.width() as i32 - 1;

        for y in min_y..=max_y {
            let yf = y as f32;

            let t_long = span_ratio(yf - top.y, bottom.y - top.y);
            let mut x_a = top.x + t_long * (bottom.x - top.x);
            let mut z_a = top.z + t_long * (bottom.z - top.z);

            let (mut x_b, mut z_b) = if yf < mid.y {
                let t = span_ratio(yf - top.y, mid.y - top.y);
                (top.x + t * (mid.x - top.x), top.z + t * (mid.z - top.z))
            } else {
                let t = span_ratio(yf - mid.y, bottom.y - mid.y);
                (mid.x + t * (bottom.x - mid.x), mid.z + t * (bottom.z - mid.z))
            };

            if x_a > x_b {
                mem::swap(&mut x_a, &mut x_b);
                mem::swap(&mut z_a, &mut z_b);
            }

            let start_x = (x_a as i32).max(0);
            let end_x = (x_b as i32).min(max_x);
            for x in start_x..=end_x {
                let t = span_ratio(x as f32 - x_a, x_b - x_a);
                let z = z_a + t * (z_b - z_a);
                self.plot(x, y, z, lit);
            }
        }
    }
}

fn span_ratio(offset: f32, span: f32) -> f32 {
    if span > SPAN_EPSILON {
        offset / span
    } else {
        0.0
    }
}
