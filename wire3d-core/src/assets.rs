/// Built-in mesh assets
///
/// Coordinates live in the device world, -128..=127 on every axis. Every
/// polygon is listed counter-clockwise as seen from outside its solid;
/// hidden-line removal depends on it.
use crate::catalog::MeshId;
use crate::geometry::{Mesh, Vertex, VertexIndex};

// Cube with a pyramid on top and bottom
static DEFAULT_VERTICES: [Vertex; 10] = [
    Vertex::new(-32, 32, 32),
    Vertex::new(32, 32, 32),
    Vertex::new(32, -32, 32),
    Vertex::new(-32, -32, 32),
    Vertex::new(-32, 32, -32),
    Vertex::new(32, 32, -32),
    Vertex::new(32, -32, -32),
    Vertex::new(-32, -32, -32),
    Vertex::new(0, 96, 0),
    Vertex::new(0, -96, 0),
];

static DEFAULT_TRIANGLES: [[VertexIndex; 3]; 8] = [
    [0, 1, 8],
    [5, 4, 8],
    [1, 5, 8],
    [4, 0, 8],
    [2, 3, 9],
    [3, 7, 9],
    [7, 6, 9],
    [6, 2, 9],
];

static DEFAULT_QUADS: [[VertexIndex; 4]; 4] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [1, 2, 6, 5],
    [3, 0, 4, 7],
];

// Two disjoint cubes
static TWO_CUBES_VERTICES: [Vertex; 16] = [
    Vertex::new(8, 48, 30),
    Vertex::new(48, 48, 30),
    Vertex::new(48, 8, 30),
    Vertex::new(8, 8, 30),
    Vertex::new(8, 48, -10),
    Vertex::new(48, 48, -10),
    Vertex::new(48, 8, -10),
    Vertex::new(8, 8, -10),
    Vertex::new(-48, -8, 10),
    Vertex::new(-8, -8, 10),
    Vertex::new(-8, -48, 10),
    Vertex::new(-48, -48, 10),
    Vertex::new(-48, -8, -30),
    Vertex::new(-8, -8, -30),
    Vertex::new(-8, -48, -30),
    Vertex::new(-48, -48, -30),
];

static TWO_CUBES_QUADS: [[VertexIndex; 4]; 12] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [7, 6, 2, 3],
    [2, 6, 5, 1],
    [3, 0, 4, 7],
    [11, 10, 9, 8],
    [12, 13, 14, 15],
    [8, 9, 13, 12],
    [15, 14, 10, 11],
    [10, 14, 13, 9],
    [11, 8, 12, 15],
];

// Body with a nose, an engine block and two fins
static SPACESHIP_VERTICES: [Vertex; 18] = [
    Vertex::new(-16, 32, 32),
    Vertex::new(16, 32, 32),
    Vertex::new(16, -32, 32),
    Vertex::new(-16, -32, 32),
    Vertex::new(-16, 32, -32),
    Vertex::new(16, 32, -32),
    Vertex::new(16, -32, -32),
    Vertex::new(-16, -32, -32),
    Vertex::new(0, 90, -32),
    Vertex::new(0, -90, -32),
    Vertex::new(-4, 4, 64),
    Vertex::new(4, 4, 64),
    Vertex::new(4, -4, 64),
    Vertex::new(-4, -4, 64),
    Vertex::new(-8, 8, -40),
    Vertex::new(8, 8, -40),
    Vertex::new(8, -8, -40),
    Vertex::new(-8, -8, -40),
];

static SPACESHIP_TRIANGLES: [[VertexIndex; 3]; 8] = [
    [0, 1, 8],
    [5, 4, 8],
    [1, 5, 8],
    [4, 0, 8],
    [2, 3, 9],
    [3, 7, 9],
    [7, 6, 9],
    [6, 2, 9],
];

static SPACESHIP_QUADS: [[VertexIndex; 4]; 12] = [
    [13, 12, 11, 10],
    [13, 3, 2, 12],
    [12, 2, 1, 11],
    [11, 1, 0, 10],
    [10, 0, 3, 13],
    [14, 15, 16, 17],
    [17, 16, 6, 7],
    [16, 15, 5, 6],
    [15, 14, 4, 5],
    [14, 17, 7, 4],
    [1, 2, 6, 5],
    [3, 0, 4, 7],
];

// Middle block with a double cone on each side
static COMPLEX_VERTICES: [Vertex; 24] = [
    // Middle
    Vertex::new(-44, 0, 16),
    Vertex::new(0, 16, 16),
    Vertex::new(44, 0, 16),
    Vertex::new(0, -16, 16),
    Vertex::new(-44, 0, -16),
    Vertex::new(0, 16, -16),
    Vertex::new(44, 0, -16),
    Vertex::new(0, -16, -16),
    // Left
    Vertex::new(-48, 0, 64),
    Vertex::new(-48, 48, 48),
    Vertex::new(-48, 48, -48),
    Vertex::new(-48, 0, -64),
    Vertex::new(-48, -48, -48),
    Vertex::new(-48, -48, 48),
    Vertex::new(-58, 0, 0),
    Vertex::new(-44, 0, 0),
    // Right
    Vertex::new(48, 0, 64),
    Vertex::new(48, 48, 48),
    Vertex::new(48, 48, -48),
    Vertex::new(48, 0, -64),
    Vertex::new(48, -48, -48),
    Vertex::new(48, -48, 48),
    Vertex::new(44, 0, 0),
    Vertex::new(58, 0, 0),
];

static COMPLEX_TRIANGLES: [[VertexIndex; 3]; 24] = [
    [8, 9, 14],
    [9, 10, 14],
    [10, 11, 14],
    [11, 12, 14],
    [12, 13, 14],
    [13, 8, 14],
    [15, 9, 8],
    [15, 10, 9],
    [15, 11, 10],
    [15, 12, 11],
    [15, 13, 12],
    [15, 8, 13],
    [16, 17, 22],
    [17, 18, 22],
    [18, 19, 22],
    [19, 20, 22],
    [20, 21, 22],
    [21, 16, 22],
    [23, 17, 16],
    [23, 18, 17],
    [23, 19, 18],
    [23, 20, 19],
    [23, 21, 20],
    [23, 16, 21],
];

static COMPLEX_QUADS: [[VertexIndex; 4]; 6] = [
    [3, 2, 1, 0],
    [4, 5, 6, 7],
    [0, 1, 5, 4],
    [7, 6, 2, 3],
    [2, 6, 5, 1],
    [3, 0, 4, 7],
];

// Icosahedron
static BALL_VERTICES: [Vertex; 12] = [
    Vertex::new(-64, 0, 32),
    Vertex::new(64, 0, 32),
    Vertex::new(64, 0, -32),
    Vertex::new(-64, 0, -32),
    Vertex::new(0, 32, 64),
    Vertex::new(0, 32, -64),
    Vertex::new(0, -32, -64),
    Vertex::new(0, -32, 64),
    Vertex::new(-32, 64, 0),
    Vertex::new(32, 64, 0),
    Vertex::new(32, -64, 0),
    Vertex::new(-32, -64, 0),
];

static BALL_TRIANGLES: [[VertexIndex; 3]; 20] = [
    [0, 8, 3],
    [8, 5, 3],
    [0, 4, 8],
    [4, 1, 9],
    [7, 4, 0],
    [7, 0, 11],
    [4, 9, 8],
    [11, 0, 3],
    [6, 3, 5],
    [6, 5, 2],
    [6, 11, 3],
    [6, 10, 11],
    [6, 2, 10],
    [2, 9, 1],
    [10, 1, 7],
    [10, 7, 11],
    [2, 1, 10],
    [2, 5, 9],
    [1, 4, 7],
    [5, 8, 9],
];

pub(crate) static BUILTIN: [(MeshId, Mesh<'static>); 5] = [
    (
        MeshId::Default,
        Mesh::new("default", &DEFAULT_VERTICES, &DEFAULT_TRIANGLES, &DEFAULT_QUADS),
    ),
    (
        MeshId::TwoCubes,
        Mesh::new("two-cubes", &TWO_CUBES_VERTICES, &[], &TWO_CUBES_QUADS),
    ),
    (
        MeshId::Spaceship,
        Mesh::new("spaceship", &SPACESHIP_VERTICES, &SPACESHIP_TRIANGLES, &SPACESHIP_QUADS),
    ),
    (
        MeshId::Complex,
        Mesh::new("complex", &COMPLEX_VERTICES, &COMPLEX_TRIANGLES, &COMPLEX_QUADS)
            .with_lines_only(false),
    ),
    (MeshId::Ball, Mesh::new("ball", &BALL_VERTICES, &BALL_TRIANGLES, &[])),
];
