//! Latitude/longitude sphere tessellation.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::error::{Error, Result};
use crate::math::Vec3;
use crate::mesh::{Mesh, Vertex};

pub const MIN_SUBDIVISIONS: u32 = 3;

/// Builds a sphere centered at the origin with its poles on the Z axis.
///
/// Produces `(stacks + 1) * (sectors + 1)` vertices (the seam column is
/// duplicated so UVs stay continuous) and `2 * sectors * stacks - 2 * sectors`
/// triangles: the pole rows emit a single triangle per quad. Triangles wind
/// counter-clockwise seen from outside.
pub fn build_sphere(radius: f32, sectors: u32, stacks: u32) -> Result<Mesh> {
    if sectors < MIN_SUBDIVISIONS || stacks < MIN_SUBDIVISIONS {
        return Err(Error::InvalidTessellation { sectors, stacks });
    }

    // every vertex has to stay addressable by a u32 index
    let vertex_count = u64::from(stacks)
        .checked_add(1)
        .zip(u64::from(sectors).checked_add(1))
        .and_then(|(rows, columns)| rows.checked_mul(columns))
        .filter(|&count| count <= u64::from(u32::MAX))
        .ok_or(Error::InvalidTessellation { sectors, stacks })?;

    let sector_step = TAU / sectors as f32;
    let stack_step = PI / stacks as f32;

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for i in 0..=stacks {
        let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
        let ring = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();
        for j in 0..=sectors {
            let sector_angle = j as f32 * sector_step;
            let position = Vec3::new(ring * sector_angle.cos(), ring * sector_angle.sin(), z);
            vertices.push(Vertex::new(
                position,
                position.normalized(),
                j as f32 / sectors as f32,
                i as f32 / stacks as f32,
            ));
        }
    }

    let triangle_count = (sectors as usize).saturating_mul(stacks as usize - 1).saturating_mul(2);
    let mut indices = Vec::with_capacity(triangle_count.saturating_mul(3));
    for i in 0..stacks {
        let row = i * (sectors + 1);
        for j in 0..sectors {
            let k1 = row + j;
            let k2 = k1 + sectors + 1;
            if i != 0 {
                indices.extend_from_slice(&[k1, k2, k1 + 1]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[k1 + 1, k2, k2 + 1]);
            }
        }
    }

    Mesh::new(vertices, indices)
}
