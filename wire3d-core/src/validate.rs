/// Load-time validation of mesh assets
///
/// The per-frame classifier trusts its input completely. This pass is the
/// correctness boundary: it runs once per asset (at startup or from tests)
/// and rejects anything that would make backface culling lie.
use std::fmt;

use hashbrown::HashMap;
use nalgebra::Vector3;

use crate::error::{MeshError, MeshResult};
use crate::geometry::{Face, Mesh, VertexIndex};

/// Summary of a mesh that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of faces (triangles and quads).
    pub face_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,
    /// Edges owned by a single face (holes in the surface).
    pub boundary_edge_count: usize,
    /// Number of disconnected sub-solids.
    pub component_count: usize,
}

impl MeshReport {
    /// Whether every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.boundary_edge_count == 0
    }
}

impl fmt::Display for MeshReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} faces, {} edges, {} component(s), {}",
            self.vertex_count,
            self.face_count,
            self.edge_count,
            self.component_count,
            if self.is_closed() {
                "closed".to_string()
            } else {
                format!("{} boundary edges", self.boundary_edge_count)
            }
        )
    }
}

/// Validate a mesh against its asset contract.
///
/// Checks, in order: the mesh is non-empty, every index is in range, no
/// face is degenerate, every quad is planar, shared edges are walked in
/// opposite directions, and every connected sub-solid encloses a positive
/// volume (its faces wind counter-clockwise from outside).
///
/// # Errors
///
/// Returns the first [`MeshError`] found.
pub fn validate_mesh(mesh: &Mesh<'_>) -> MeshResult<MeshReport> {
    if mesh.vertex_count() == 0 || mesh.face_count() == 0 {
        return Err(MeshError::EmptyMesh {
            name: mesh.name().to_string(),
        });
    }

    check_indices(mesh)?;
    check_shapes(mesh)?;
    let directed = check_winding_consistency(mesh)?;
    let components = Components::build(mesh);
    check_outward(mesh, &components)?;

    let boundary_edge_count = directed
        .keys()
        .filter(|&&(from, to)| !directed.contains_key(&(to, from)))
        .count();
    let edge_count = (directed.len() + boundary_edge_count) / 2;

    Ok(MeshReport {
        vertex_count: mesh.vertex_count(),
        face_count: mesh.face_count(),
        edge_count,
        boundary_edge_count,
        component_count: components.count(),
    })
}

fn check_indices(mesh: &Mesh<'_>) -> MeshResult<()> {
    let vertex_count = mesh.vertex_count();
    for (face, polygon) in mesh.faces().enumerate() {
        if let Some(&index) = polygon
            .indices()
            .iter()
            .find(|&&index| usize::from(index) >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                face,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

fn check_shapes(mesh: &Mesh<'_>) -> MeshResult<()> {
    for (face, polygon) in mesh.faces().enumerate() {
        let normal = wide_normal(mesh, &polygon);
        if normal == Vector3::zeros() {
            return Err(MeshError::DegenerateFace { face });
        }
        if let Face::Quad([a, _, _, d]) = polygon {
            let offset = wide_point(mesh, d) - wide_point(mesh, a);
            if normal.dot(&offset) != 0 {
                return Err(MeshError::NonPlanarQuad { face });
            }
        }
    }
    Ok(())
}

/// Map every directed edge to the face that walks it.
fn check_winding_consistency(
    mesh: &Mesh<'_>,
) -> MeshResult<HashMap<(VertexIndex, VertexIndex), usize>> {
    let mut directed = HashMap::new();
    for (face, polygon) in mesh.faces().enumerate() {
        for (from, to) in polygon.edges() {
            if let Some(&first) = directed.get(&(from, to)) {
                return Err(MeshError::InconsistentWinding {
                    from,
                    to,
                    first,
                    second: face,
                });
            }
            directed.insert((from, to), face);
        }
    }
    Ok(directed)
}

/// Signed volume per component, by the divergence theorem.
///
/// Winding is already consistent across shared edges, so a single sign per
/// component decides orientation. Concave solids are fine.
fn check_outward(mesh: &Mesh<'_>, components: &Components) -> MeshResult<()> {
    // root -> (first face, six times the enclosed volume)
    let mut volumes: HashMap<usize, (usize, i64)> = HashMap::new();

    for (face, polygon) in mesh.faces().enumerate() {
        let indices = polygon.indices();
        let root = components.root(indices[0]);
        let (sum, len) = components.totals(root);

        // measured from the component centroid, scaled by its vertex count,
        // so open surfaces get a stable sign too
        let local = |index: VertexIndex| wide_point(mesh, index) * len - sum;
        let apex = local(indices[0]);
        let volume: i64 = indices[1..]
            .windows(2)
            .map(|pair| apex.dot(&local(pair[0]).cross(&local(pair[1]))))
            .sum();

        volumes.entry(root).or_insert((face, 0)).1 += volume;
    }

    let inward = volumes
        .values()
        .filter(|&&(_, volume)| volume <= 0)
        .map(|&(face, _)| face)
        .min();
    match inward {
        Some(face) => Err(MeshError::InwardFace { face }),
        None => Ok(()),
    }
}

fn wide_point(mesh: &Mesh<'_>, index: VertexIndex) -> Vector3<i64> {
    mesh.vertex(usize::from(index)).to_point().coords.map(i64::from)
}

fn wide_normal(mesh: &Mesh<'_>, face: &Face) -> Vector3<i64> {
    let [a, b, c] = face.corners().map(|i| wide_point(mesh, i));
    (b - a).cross(&(c - a))
}

/// Vertices grouped into connected sub-solids through shared faces.
struct Components {
    parent: Vec<usize>,
    sums: HashMap<usize, (Vector3<i64>, i64)>,
}

impl Components {
    fn build(mesh: &Mesh<'_>) -> Self {
        let mut parent: Vec<usize> = (0..mesh.vertex_count()).collect();
        let mut used = vec![false; mesh.vertex_count()];

        for polygon in mesh.faces() {
            let indices = polygon.indices();
            let root = find(&mut parent, usize::from(indices[0]));
            for &index in indices {
                used[usize::from(index)] = true;
                let other = find(&mut parent, usize::from(index));
                parent[other] = root;
            }
        }

        let mut sums: HashMap<usize, (Vector3<i64>, i64)> = HashMap::new();
        for vertex in (0..mesh.vertex_count()).filter(|&v| used[v]) {
            let root = find(&mut parent, vertex);
            let entry = sums.entry(root).or_insert((Vector3::zeros(), 0));
            entry.0 += mesh.vertex(vertex).to_point().coords.map(i64::from);
            entry.1 += 1;
        }

        Self { parent, sums }
    }

    fn count(&self) -> usize {
        self.sums.len()
    }

    fn root(&self, index: VertexIndex) -> usize {
        let mut root = usize::from(index);
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Coordinate sum and vertex count of the component rooted at `root`.
    fn totals(&self, root: usize) -> (Vector3<i64>, i64) {
        self.sums.get(&root).copied().unwrap_or((Vector3::zeros(), 0))
    }
}

fn find(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}
