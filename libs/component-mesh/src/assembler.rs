//! # Mesh Assembler
//!
//! Concatenates segment meshes and welds them into one mesh.
//!
//! ## Weld
//!
//! 1. Every vertex is mapped to the first earlier vertex within tolerance,
//!    found through a hash grid with one tolerance-sized cell per key
//! 2. Triangles are remapped; any triangle that now repeats a vertex is
//!    dropped
//! 3. Pairs of triangles over the same three vertices with opposite winding
//!    are removed (the back-to-back cap discs where two segments abut)
//! 4. Vertices no longer referenced are compacted away
//!
//! Output vertex order is the order of first occurrence, so identical input
//! always yields an identical mesh.

use crate::mesh::Mesh;
use config::constants::VERTEX_MERGE_EPSILON;
use glam::DVec3;
use std::collections::HashMap;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
    z: i64,
}

impl CellCoord {
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }

    fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

/// Counters describing what a weld changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeldStats {
    /// Input vertices folded into an earlier vertex.
    pub merged_vertices: usize,
    /// Triangles dropped because two of their corners merged.
    pub dropped_degenerate: usize,
    /// Triangles removed as back-to-back internal pairs.
    pub culled_internal: usize,
}

/// Accumulates segment meshes in order and welds them on [`finish`].
///
/// [`finish`]: MeshAssembler::finish
///
/// # Example
///
/// ```rust
/// use component_mesh::primitives::{build_cylinder, build_frustum, SegmentFrame};
/// use component_mesh::{AxisBasis, MeshAssembler};
/// use glam::DVec3;
///
/// let basis = AxisBasis::from_direction(DVec3::Z, 1e-6).unwrap();
/// let frame = SegmentFrame::new(DVec3::ZERO, basis, 0.0);
///
/// let mut assembler = MeshAssembler::new(1e-6);
/// assembler.push(&build_frustum(0.6, 0.5, 1.0, 16, &frame).unwrap());
/// assembler.push(&build_cylinder(0.5, 2.0, 16, &frame.at(1.0)).unwrap());
/// let (mesh, stats) = assembler.finish();
///
/// // The shared ring and cap centre collapse, the two seam discs cancel
/// assert_eq!(stats.merged_vertices, 17);
/// assert_eq!(stats.culled_internal, 32);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone)]
pub struct MeshAssembler {
    mesh: Mesh,
    tolerance: f64,
}

impl MeshAssembler {
    /// Creates an empty assembler welding within `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        Self {
            mesh: Mesh::new(),
            tolerance,
        }
    }

    /// Appends a segment, offsetting its indices by the vertices already
    /// pushed.
    pub fn push(&mut self, part: &Mesh) -> &mut Self {
        self.mesh.merge(part);
        self
    }

    /// Vertices pushed so far, before welding.
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Welds the concatenated segments.
    pub fn finish(self) -> (Mesh, WeldStats) {
        weld(&self.mesh, self.tolerance)
    }
}

impl Default for MeshAssembler {
    fn default() -> Self {
        Self::new(VERTEX_MERGE_EPSILON)
    }
}

/// Welds coincident vertices of `mesh` and cleans up the triangles that
/// the merge makes redundant.
///
/// A non-positive or NaN `tolerance` merges only bit-identical positions.
pub fn weld(mesh: &Mesh, tolerance: f64) -> (Mesh, WeldStats) {
    let mut stats = WeldStats::default();

    let (positions, remap) = merge_vertices(mesh.vertices(), tolerance, &mut stats);

    let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(mesh.triangle_count());
    for tri in mesh.triangles() {
        let t = [
            remap[tri[0] as usize],
            remap[tri[1] as usize],
            remap[tri[2] as usize],
        ];
        if t[0] == t[1] || t[1] == t[2] || t[0] == t[2] {
            stats.dropped_degenerate += 1;
        } else {
            triangles.push(t);
        }
    }

    let triangles = cull_opposed_pairs(triangles, &mut stats);
    let (positions, triangles) = compact(positions, triangles);

    (Mesh::from_parts(positions, triangles), stats)
}

/// Maps every input vertex to an output vertex, reusing the first earlier
/// output vertex within `tolerance`.
fn merge_vertices(
    vertices: &[DVec3],
    tolerance: f64,
    stats: &mut WeldStats,
) -> (Vec<DVec3>, Vec<u32>) {
    let mut positions: Vec<DVec3> = Vec::with_capacity(vertices.len());
    let mut remap: Vec<u32> = Vec::with_capacity(vertices.len());

    if tolerance.is_nan() || tolerance <= 0.0 {
        let mut exact: HashMap<[u64; 3], u32> = HashMap::new();
        for v in vertices {
            let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
            let next = positions.len() as u32;
            let id = *exact.entry(key).or_insert(next);
            if id == next {
                positions.push(*v);
            } else {
                stats.merged_vertices += 1;
            }
            remap.push(id);
        }
        return (positions, remap);
    }

    let tolerance_sq = tolerance * tolerance;
    let mut grid: HashMap<CellCoord, Vec<u32>> = HashMap::new();

    for v in vertices {
        let cell = CellCoord::from_position(*v, tolerance);

        let mut found: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(bucket) = grid.get(&cell.offset(dx, dy, dz)) else {
                        continue;
                    };
                    for &candidate in bucket {
                        let close = (positions[candidate as usize] - *v).length_squared()
                            <= tolerance_sq;
                        if close && found.map_or(true, |best| candidate < best) {
                            found = Some(candidate);
                        }
                    }
                }
            }
        }

        match found {
            Some(id) => {
                stats.merged_vertices += 1;
                remap.push(id);
            }
            None => {
                let id = positions.len() as u32;
                positions.push(*v);
                grid.entry(cell).or_default().push(id);
                remap.push(id);
            }
        }
    }

    (positions, remap)
}

/// Rotates a triangle so its smallest index comes first, preserving
/// winding.
fn canonical(t: [u32; 3]) -> [u32; 3] {
    if t[0] <= t[1] && t[0] <= t[2] {
        t
    } else if t[1] <= t[2] {
        [t[1], t[2], t[0]]
    } else {
        [t[2], t[0], t[1]]
    }
}

/// Removes triangles that are matched by a triangle over the same vertices
/// with the opposite winding. Each triangle cancels at most one partner.
fn cull_opposed_pairs(triangles: Vec<[u32; 3]>, stats: &mut WeldStats) -> Vec<[u32; 3]> {
    let mut open: HashMap<[u32; 3], Vec<usize>> = HashMap::new();
    let mut keep = vec![true; triangles.len()];

    for (i, tri) in triangles.iter().enumerate() {
        let key = canonical(*tri);
        let reversed = [key[0], key[2], key[1]];

        let partner = open.get_mut(&reversed).and_then(|pending| pending.pop());
        match partner {
            Some(j) => {
                keep[i] = false;
                keep[j] = false;
                stats.culled_internal += 2;
            }
            None => open.entry(key).or_default().push(i),
        }
    }

    triangles
        .into_iter()
        .zip(keep)
        .filter_map(|(tri, kept)| kept.then_some(tri))
        .collect()
}

/// Drops vertices that no triangle references, keeping the relative order
/// of the rest.
fn compact(positions: Vec<DVec3>, mut triangles: Vec<[u32; 3]>) -> (Vec<DVec3>, Vec<[u32; 3]>) {
    let mut used = vec![false; positions.len()];
    for tri in &triangles {
        for &i in tri {
            used[i as usize] = true;
        }
    }

    let mut new_index = vec![u32::MAX; positions.len()];
    let mut kept = Vec::with_capacity(positions.len());
    for (i, position) in positions.into_iter().enumerate() {
        if used[i] {
            new_index[i] = kept.len() as u32;
            kept.push(position);
        }
    }

    for tri in &mut triangles {
        for i in tri.iter_mut() {
            *i = new_index[*i as usize];
        }
    }

    (kept, triangles)
}
