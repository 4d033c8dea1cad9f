use crate::error::{Error, Result};
use crate::math::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, u: f32, v: f32) -> Self {
        Self {
            position,
            normal,
            u,
            v,
        }
    }
}

/// Indexed triangle list. Every index triple names one triangle.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh, rejecting index lists that are not whole triangles or
    /// that reference missing vertices.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Result<Self> {
        if !indices.len().is_multiple_of(3) {
            return Err(Error::IndexCountNotTriangles(indices.len()));
        }
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &i)| i as usize >= vertices.len())
        {
            return Err(Error::IndexOutOfRange {
                index,
                position,
                vertex_count: vertices.len(),
            });
        }
        Ok(Self { vertices, indices })
    }

    /// Skips validation so the draw path's own index checks can be exercised.
    #[cfg(test)]
    pub(crate) fn from_raw(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Replaces every vertex normal with the normalized sum of the face
    /// normals `(v1 - v0) x (v2 - v0)` of the triangles that use it.
    ///
    /// Faces are weighted by area. Vertices touched only by degenerate
    /// faces, or by none, end up with a zero normal.
    pub fn calculate_normals(&mut self) {
        for vertex in &mut self.vertices {
            vertex.normal = Vec3::ZERO;
        }

        let count = self.vertices.len();
        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if i0 >= count || i1 >= count || i2 >= count {
                continue;
            }
            let v0 = self.vertices[i0].position;
            let v1 = self.vertices[i1].position;
            let v2 = self.vertices[i2].position;
            let face = (v1 - v0).cross(v2 - v0);
            self.vertices[i0].normal += face;
            self.vertices[i1].normal += face;
            self.vertices[i2].normal += face;
        }

        for vertex in &mut self.vertices {
            vertex.normal.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), Vec3::ZERO, 0.0, 0.0)
    }

    #[test]
    fn rejects_partial_triangles() {
        let err = Mesh::new(vec![vertex(0.0, 0.0, 0.0); 3], vec![0, 1]).unwrap_err();
        assert_eq!(err, Error::IndexCountNotTriangles(2));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = Mesh::new(vec![vertex(0.0, 0.0, 0.0); 3], vec![0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            Error::IndexOutOfRange {
                index: 3,
                position: 2,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn single_triangle_normals_match_face_normal() {
        let mut mesh = Mesh::new(
            vec![vertex(0.0, 0.0, 0.0), vertex(2.0, 0.0, 0.0), vertex(0.0, 3.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        mesh.calculate_normals();
        for v in mesh.vertices() {
            assert_abs_diff_eq!(v.normal.x, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(v.normal.y, 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(v.normal.z, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn shared_vertices_average_adjacent_faces() {
        // two unit right triangles folded 90 degrees along the shared edge
        let mut mesh = Mesh::new(
            vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(0.0, 1.0, 0.0),
                vertex(0.0, 0.0, 1.0),
            ],
            vec![0, 1, 2, 0, 3, 1],
        )
        .unwrap();
        mesh.calculate_normals();
        let shared = mesh.vertices()[0].normal;
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert_abs_diff_eq!(shared.y, h, epsilon = 1e-5);
        assert_abs_diff_eq!(shared.z, h, epsilon = 1e-5);
        assert_abs_diff_eq!(mesh.vertices()[2].normal.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn degenerate_and_unused_vertices_get_zero_normals() {
        let mut mesh = Mesh::new(
            vec![
                vertex(0.0, 0.0, 0.0),
                vertex(1.0, 0.0, 0.0),
                vertex(2.0, 0.0, 0.0),
                vertex(5.0, 5.0, 5.0),
            ],
            vec![0, 1, 2],
        )
        .unwrap();
        mesh.calculate_normals();
        assert!(mesh.vertices().iter().all(|v| v.normal == Vec3::ZERO));
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().next(), Some([0, 1, 2]));
    }
}
