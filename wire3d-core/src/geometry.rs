/// Geometry primitives for index-based wireframe meshes
use nalgebra::{Point3, Vector3};

/// Index of a vertex inside its owning mesh
pub type VertexIndex = u8;

/// A vertex in the small device world (every axis is -128..=127)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl Vertex {
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }

    pub fn coords(&self) -> [i8; 3] {
        [self.x, self.y, self.z]
    }

    /// Widen to the integer point type used for all arithmetic
    pub fn to_point(&self) -> Point3<i32> {
        Point3::new(i32::from(self.x), i32::from(self.y), i32::from(self.z))
    }
}

/// A polygon referencing vertices counter-clockwise as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Triangle([VertexIndex; 3]),
    Quad([VertexIndex; 4]),
}

impl Face {
    pub fn indices(&self) -> &[VertexIndex] {
        match self {
            Face::Triangle(indices) => &indices[..],
            Face::Quad(indices) => &indices[..],
        }
    }

    /// The three vertices the facing test is taken from
    pub fn corners(&self) -> [VertexIndex; 3] {
        let indices = self.indices();
        [indices[0], indices[1], indices[2]]
    }

    /// Directed edges in winding order, including the wrap-around edge
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex)> + '_ {
        let indices = self.indices();
        indices
            .iter()
            .zip(indices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }
}

/// An unordered vertex pair, stored with the smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub a: VertexIndex,
    pub b: VertexIndex,
}

impl Edge {
    pub fn new(a: VertexIndex, b: VertexIndex) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

impl From<(VertexIndex, VertexIndex)> for Edge {
    fn from((a, b): (VertexIndex, VertexIndex)) -> Self {
        Self::new(a, b)
    }
}

/// A named, immutable mesh made of triangles and quads over shared vertices
#[derive(Debug, Clone, Copy)]
pub struct Mesh<'a> {
    name: &'a str,
    vertices: &'a [Vertex],
    triangles: &'a [[VertexIndex; 3]],
    quads: &'a [[VertexIndex; 4]],
    lines_only: bool,
}

impl<'a> Mesh<'a> {
    pub const fn new(
        name: &'a str,
        vertices: &'a [Vertex],
        triangles: &'a [[VertexIndex; 3]],
        quads: &'a [[VertexIndex; 4]],
    ) -> Self {
        Self {
            name,
            vertices,
            triangles,
            quads,
            lines_only: false,
        }
    }

    /// Mark the mesh as wireframe-transparent: every edge is drawn, nothing is culled
    pub const fn with_lines_only(mut self, lines_only: bool) -> Self {
        self.lines_only = lines_only;
        self
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn lines_only(&self) -> bool {
        self.lines_only
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex(&self, index: usize) -> Vertex {
        self.vertices[index]
    }

    pub fn vertices(&self) -> &'a [Vertex] {
        self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangle(&self, index: usize) -> [VertexIndex; 3] {
        self.triangles[index]
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn quad(&self, index: usize) -> [VertexIndex; 4] {
        self.quads[index]
    }

    pub fn face_count(&self) -> usize {
        self.triangles.len() + self.quads.len()
    }

    /// All faces, triangles first; this order numbers faces everywhere else
    pub fn faces(&self) -> impl Iterator<Item = Face> + 'a {
        let triangles = self.triangles.iter().copied().map(Face::Triangle);
        let quads = self.quads.iter().copied().map(Face::Quad);
        triangles.chain(quads)
    }

    /// Untransformed positions, i.e. the identity view transform
    pub fn points(&self) -> Vec<Point3<i32>> {
        self.vertices.iter().map(Vertex::to_point).collect()
    }
}

static CUBE_VERTICES: [Vertex; 8] = [
    Vertex::new(-32, 32, 32),
    Vertex::new(32, 32, 32),
    Vertex::new(32, -32, 32),
    Vertex::new(-32, -32, 32),
    Vertex::new(-32, 32, -32),
    Vertex::new(32, 32, -32),
    Vertex::new(32, -32, -32),
    Vertex::new(-32, -32, -32),
];

static CUBE_QUADS: [[VertexIndex; 4]; 6] = [
    [3, 2, 1, 0], // front  (+z)
    [4, 5, 6, 7], // back   (-z)
    [0, 1, 5, 4], // top    (+y)
    [7, 6, 2, 3], // bottom (-y)
    [2, 6, 5, 1], // right  (+x)
    [3, 0, 4, 7], // left   (-x)
];

impl Mesh<'static> {
    /// A 64-unit cube centred on the origin, used for testing
    pub fn cube() -> Self {
        Mesh::new("cube", &CUBE_VERTICES, &[], &CUBE_QUADS)
    }
}

/// Face normal from the winding of `a`, `b`, `c` (not normalized).
/// Products are taken in i64; coordinates below `2^30` in magnitude cannot overflow.
pub fn face_normal(a: &Point3<i32>, b: &Point3<i32>, c: &Point3<i32>) -> Vector3<i64> {
    let [a, b, c] = [a, b, c].map(|p| p.coords.map(i64::from));
    (b - a).cross(&(c - a))
}

/// Twice the signed area of triangle `a`, `b`, `c` projected onto the XY plane.
/// Positive when the points run counter-clockwise with Y pointing up.
pub fn signed_area2(a: &Point3<i32>, b: &Point3<i32>, c: &Point3<i32>) -> i64 {
    let [a, b, c] = [a, b, c].map(|p| p.coords.map(i64::from));
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
