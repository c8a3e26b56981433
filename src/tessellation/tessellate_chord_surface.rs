use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::Curve;
use crate::math::{Point2, HEIGHT_AXIS};
use crate::operations::query::ChordLift;

use super::{TriangleMesh, MIN_RESOLUTION};

/// Build parameters for the chord-lift surface.
///
/// Every field takes part in the cache key of
/// [`SurfaceCache`](super::SurfaceCache).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceParams {
    /// Number of grid cells along the `a` axis.
    pub res_a: usize,
    /// Number of grid cells along the `b` axis.
    pub res_b: usize,
    /// Surface opacity in `[0, 1]`.
    pub opacity: f64,
    /// Whether to emit wireframe edges alongside the triangles.
    pub wireframe: bool,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            res_a: 96,
            res_b: 96,
            opacity: 0.55,
            wireframe: false,
        }
    }
}

/// A tessellated chord-lift surface, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct ChordSurface {
    /// Grid vertices, normals, `(a, b)` UVs and triangles.
    pub mesh: TriangleMesh,
    /// Unique grid edges as index pairs; empty unless wireframe was requested.
    pub edges: Vec<[u32; 2]>,
    /// Opacity the surface was built for.
    pub opacity: f64,
    /// Whether the surface was built for wireframe display.
    pub wireframe: bool,
}

/// Samples the chord-lift map over the periodic parameter square.
///
/// Vertex `(i, j)` sits at `lifted(i / res_a, j / res_b)` and has index
/// `j * (res_a + 1) + i`. The last row and column repeat the first in value
/// so that the grid stays rectangular.
pub struct TessellateChordSurface {
    params: SurfaceParams,
}

impl TessellateChordSurface {
    /// Creates a new `TessellateChordSurface` operation.
    #[must_use]
    pub fn new(params: SurfaceParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation, returning a fresh surface.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidResolution`] if either resolution is
    /// below 2 or the grid has more vertices than a `u32` index can address, or [`TessellationError::InvalidParameter`] if the opacity is
    /// outside `[0, 1]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn execute<C: Curve + ?Sized>(&self, curve: &C) -> Result<ChordSurface> {
        let SurfaceParams {
            res_a,
            res_b,
            opacity,
            wireframe,
        } = self.params;
        if res_a < MIN_RESOLUTION {
            return Err(TessellationError::InvalidResolution {
                axis: "res_a",
                value: res_a,
            }
            .into());
        }
        if res_b < MIN_RESOLUTION {
            return Err(TessellationError::InvalidResolution {
                axis: "res_b",
                value: res_b,
            }
            .into());
        }
        let vertex_count = res_a
            .checked_add(1)
            .zip(res_b.checked_add(1))
            .and_then(|(cols, rows)| cols.checked_mul(rows));
        if vertex_count.is_none_or(|count| u32::try_from(count).is_err()) {
            let (axis, value) = if res_a >= res_b {
                ("res_a", res_a)
            } else {
                ("res_b", res_b)
            };
            return Err(TessellationError::InvalidResolution { axis, value }.into());
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(TessellationError::InvalidParameter(format!(
                "opacity must lie in [0, 1], got {opacity}"
            ))
            .into());
        }

        let mut mesh = TriangleMesh::default();
        let rows = res_b + 1;
        let cols = res_a + 1;
        mesh.vertices.reserve(rows * cols);
        mesh.uvs.reserve(rows * cols);
        mesh.indices.reserve(res_a * res_b * 2);

        for j in 0..rows {
            let b = j as f64 / res_b as f64;
            for i in 0..cols {
                let a = i as f64 / res_a as f64;
                let sample = ChordLift::new(a, b).execute(curve);
                mesh.vertices.push(sample.lifted_point);
                mesh.uvs.push(Point2::new(a, b));
            }
        }

        // Two triangles per grid cell; the vertex count was checked to fit u32
        for j in 0..res_b {
            for i in 0..res_a {
                let i00 = (j * cols + i) as u32;
                let i10 = (j * cols + i + 1) as u32;
                let i01 = ((j + 1) * cols + i) as u32;
                let i11 = ((j + 1) * cols + i + 1) as u32;
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            }
        }

        mesh.compute_vertex_normals(HEIGHT_AXIS);

        let edges = if wireframe {
            grid_edges(res_a, res_b)
        } else {
            Vec::new()
        };

        debug!(res_a, res_b, wireframe, "tessellated chord surface");
        Ok(ChordSurface {
            mesh,
            edges,
            opacity,
            wireframe,
        })
    }
}

/// Collects each grid edge once: rows, columns, then cell diagonals.
#[allow(clippy::cast_possible_truncation)]
fn grid_edges(res_a: usize, res_b: usize) -> Vec<[u32; 2]> {
    let cols = res_a + 1;
    let idx = |i: usize, j: usize| (j * cols + i) as u32;
    let mut edges = Vec::with_capacity(res_a * (res_b + 1) + res_b * cols + res_a * res_b);
    for j in 0..=res_b {
        for i in 0..res_a {
            edges.push([idx(i, j), idx(i + 1, j)]);
        }
    }
    for j in 0..res_b {
        for i in 0..cols {
            edges.push([idx(i, j), idx(i, j + 1)]);
        }
    }
    for j in 0..res_b {
        for i in 0..res_a {
            edges.push([idx(i, j), idx(i + 1, j + 1)]);
        }
    }
    edges
}
