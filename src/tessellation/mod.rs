mod surface_cache;
mod tessellate_chord_surface;
mod tessellate_curve;

pub use surface_cache::SurfaceCache;
pub use tessellate_chord_surface::{ChordSurface, SurfaceParams, TessellateChordSurface};
pub use tessellate_curve::TessellateCurve;

use crate::math::{Point2, Point3, Vector3};

/// Minimum grid resolution along either parameter axis.
pub const MIN_RESOLUTION: usize = 2;

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Flattens vertex positions into `[x0, y0, z0, x1, ...]` for upload.
    #[must_use]
    pub fn position_buffer(&self) -> Vec<f32> {
        flatten(self.vertices.iter().map(|p| [p.x, p.y, p.z]))
    }

    /// Flattens vertex normals into `[x0, y0, z0, x1, ...]` for upload.
    #[must_use]
    pub fn normal_buffer(&self) -> Vec<f32> {
        flatten(self.normals.iter().map(|n| [n.x, n.y, n.z]))
    }

    /// Flattens triangle indices into a single index list.
    #[must_use]
    pub fn index_buffer(&self) -> Vec<u32> {
        self.indices.iter().flatten().copied().collect()
    }

    /// Recomputes vertex normals as the normalized, area-weighted sum of the
    /// face normals around each vertex. Isolated or degenerate vertices get `fallback`.
    pub fn compute_vertex_normals(&mut self, fallback: Vector3) {
        let mut acc = vec![Vector3::zeros(); self.vertices.len()];
        for tri in &self.indices {
            let [i0, i1, i2] = tri.map(|i| i as usize);
            let v0 = self.vertices[i0];
            let face = (self.vertices[i1] - v0).cross(&(self.vertices[i2] - v0));
            acc[i0] += face;
            acc[i1] += face;
            acc[i2] += face;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.try_normalize(crate::math::TOLERANCE).unwrap_or(fallback))
            .collect();
    }
}

#[allow(clippy::cast_possible_truncation)]
fn flatten(items: impl Iterator<Item = [f64; 3]>) -> Vec<f32> {
    items.flat_map(|c| c.map(|x| x as f32)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> TriangleMesh {
        TriangleMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            indices: vec![[0, 1, 2], [0, 2, 3]],
            ..TriangleMesh::default()
        }
    }

    #[test]
    fn flat_quad_normals_face_up() {
        let mut mesh = unit_quad();
        mesh.compute_vertex_normals(Vector3::y());
        assert_eq!(mesh.normals.len(), 4);
        for n in &mesh.normals {
            assert!((n - Vector3::z()).norm() < 1e-12);
        }
    }

    #[test]
    fn unreferenced_vertex_gets_fallback() {
        let mut mesh = unit_quad();
        mesh.vertices.push(Point3::new(5.0, 5.0, 5.0));
        mesh.compute_vertex_normals(Vector3::y());
        assert!((mesh.normals[4] - Vector3::y()).norm() < 1e-12);
    }

    #[test]
    fn flat_buffers_have_stride_three() {
        let mut mesh = unit_quad();
        mesh.compute_vertex_normals(Vector3::y());
        assert_eq!(mesh.position_buffer().len(), 12);
        assert_eq!(mesh.normal_buffer().len(), 12);
        assert_eq!(mesh.index_buffer(), vec![0, 1, 2, 0, 2, 3]);
    }
}
