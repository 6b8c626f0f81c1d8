/// Per-frame backface classification and visible-edge extraction
///
/// Each face gets a facing sign from the winding of its first three
/// transformed vertices. Front-facing faces contribute their edges; an edge
/// shared by several contributing faces is emitted once, and an edge whose
/// faces all point away is never emitted. That is the whole hidden-line
/// removal for convex sub-solids.
use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, MeshResult};
use crate::geometry::{face_normal, signed_area2, Edge, Face, Mesh};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewKind {
    Direction,
    Eye,
}

/// Where the viewer sits relative to the transformed mesh: a fixed direction
/// for orthographic views, or an eye position for perspective views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    x: i32,
    y: i32,
    z: i32,
    kind: ViewKind,
}

impl View {
    /// Viewer on the +Z axis looking at the origin.
    pub const FRONT: View = View {
        x: 0,
        y: 0,
        z: 1,
        kind: ViewKind::Direction,
    };

    /// # Errors
    ///
    /// Returns [`MeshError::ZeroView`] for the zero vector.
    pub fn new(x: i8, y: i8, z: i8) -> MeshResult<Self> {
        if x == 0 && y == 0 && z == 0 {
            return Err(MeshError::ZeroView);
        }
        Ok(Self {
            x: i32::from(x),
            y: i32::from(y),
            z: i32::from(z),
            kind: ViewKind::Direction,
        })
    }

    /// Viewer at a point, looking at the origin. Faces are judged against
    /// the ray from the eye, as a perspective projection sees them.
    pub const fn eye(x: i32, y: i32, z: i32) -> Self {
        Self {
            x,
            y,
            z,
            kind: ViewKind::Eye,
        }
    }

    /// Vector from `point` toward the viewer.
    pub fn toward(&self, point: &Point3<i32>) -> Vector3<i64> {
        let view = Vector3::new(self.x, self.y, self.z).map(i64::from);
        match self.kind {
            ViewKind::Direction => view,
            ViewKind::Eye => view - point.coords.map(i64::from),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::FRONT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Front,
    Back,
}

/// Whether hidden edges are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CullMode {
    /// Draw only edges of front-facing faces.
    #[default]
    Backface,
    /// Draw every edge of every face.
    LinesOnly,
}

/// Signed facing value of the triangle `a`, `b`, `c`: positive when it is
/// counter-clockwise as seen from `view`.
///
/// For [`View::FRONT`] this is the 2D cross product of the points projected
/// onto the XY plane.
pub fn facing_value(a: &Point3<i32>, b: &Point3<i32>, c: &Point3<i32>, view: View) -> i64 {
    if view == View::FRONT {
        signed_area2(a, b, c)
    } else {
        face_normal(a, b, c).dot(&view.toward(a))
    }
}

/// Classify one face. Zero area counts as back-facing.
///
/// Indices are trusted; an index past the end of `positions` panics.
pub fn face_facing(face: &Face, positions: &[Point3<i32>], view: View) -> Facing {
    let [a, b, c] = face.corners().map(|index| &positions[usize::from(index)]);
    if facing_value(a, b, c, view) > 0 {
        Facing::Front
    } else {
        Facing::Back
    }
}

/// Reusable per-frame classifier. Its buffers are overwritten on every call.
#[derive(Debug, Default)]
pub struct Classifier {
    facing: Vec<Facing>,
    edges: Vec<Edge>,
    seen: HashSet<Edge>,
}

impl Classifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify `mesh` with backface culling, unless the mesh is lines-only.
    ///
    /// `positions` are the mesh's vertices after the current frame's
    /// transform, indexed like the mesh. Facing is computed in i64, which is
    /// exact while positions and an eye view stay within `±2^16` per axis.
    pub fn classify(&mut self, mesh: &Mesh<'_>, positions: &[Point3<i32>], view: View) -> Frame<'_> {
        self.classify_with(mesh, positions, view, CullMode::Backface)
    }

    pub fn classify_with(
        &mut self,
        mesh: &Mesh<'_>,
        positions: &[Point3<i32>],
        view: View,
        mode: CullMode,
    ) -> Frame<'_> {
        let mode = if mesh.lines_only() {
            CullMode::LinesOnly
        } else {
            mode
        };

        self.facing.clear();
        self.edges.clear();
        self.seen.clear();

        for face in mesh.faces() {
            let facing = face_facing(&face, positions, view);
            self.facing.push(facing);

            if mode == CullMode::LinesOnly || facing == Facing::Front {
                for (a, b) in face.edges() {
                    let edge = Edge::new(a, b);
                    if self.seen.insert(edge) {
                        self.edges.push(edge);
                    }
                }
            }
        }

        Frame {
            facing: &self.facing,
            edges: &self.edges,
            mode,
        }
    }
}

/// Result of classifying one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'s> {
    facing: &'s [Facing],
    edges: &'s [Edge],
    mode: CullMode,
}

impl<'s> Frame<'s> {
    /// Facing per face, in [`Mesh::faces`] order.
    pub fn facing(&self) -> &'s [Facing] {
        self.facing
    }

    pub fn front_count(&self) -> usize {
        self.facing.iter().filter(|&&f| f == Facing::Front).count()
    }

    /// Edges to draw, each once, in order of first appearance.
    pub fn edges(&self) -> &'s [Edge] {
        self.edges
    }

    /// The mode actually applied (lines-only meshes override the request).
    pub fn mode(&self) -> CullMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MeshId};
    use crate::geometry::{Vertex, VertexIndex};
    use crate::transform::{RotationState, Transform};

    fn edge_set(edges: &[Edge]) -> HashSet<Edge> {
        edges.iter().copied().collect()
    }

    fn all_edges(mesh: &Mesh<'_>) -> HashSet<Edge> {
        mesh.faces()
            .flat_map(|face| face.edges().map(Edge::from).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn cube_from_front_shows_one_face() {
        let cube = Mesh::cube();
        let mut classifier = Classifier::new();
        let frame = classifier.classify(&cube, &cube.points(), View::FRONT);

        assert_eq!(frame.front_count(), 1);
        assert_eq!(frame.facing()[0], Facing::Front);
        // the back face is hidden and the four sides are edge-on
        assert!(frame.facing()[1..].iter().all(|&f| f == Facing::Back));
        assert_eq!(
            edge_set(frame.edges()),
            edge_set(&[Edge::new(3, 2), Edge::new(2, 1), Edge::new(1, 0), Edge::new(0, 3)])
        );
    }

    #[test]
    fn cube_from_corner_shows_three_faces_and_nine_edges() {
        let cube = Mesh::cube();
        let view = View::new(1, 1, 1).unwrap();
        let mut classifier = Classifier::new();
        let frame = classifier.classify(&cube, &cube.points(), view);

        // front, top, right
        assert_eq!(
            frame.facing(),
            &[
                Facing::Front,
                Facing::Back,
                Facing::Front,
                Facing::Back,
                Facing::Front,
                Facing::Back
            ]
        );
        assert_eq!(frame.edges().len(), 9);
        // vertex 7 is the hidden corner; all its edges sit between back faces
        assert!(frame.edges().iter().all(|e| e.a != 7 && e.b != 7));
    }

    #[test]
    fn rotated_cube_viewed_along_z_shows_three_faces() {
        let cube = Mesh::cube();
        let mut positions = Vec::new();
        Transform::rotate_mesh(&cube, &RotationState::new(32, 224, 0), &mut positions);

        let mut classifier = Classifier::new();
        let frame = classifier.classify(&cube, &positions, View::FRONT);

        assert_eq!(frame.front_count(), 3);
        assert_eq!(frame.edges().len(), 9);
        let hidden = [Edge::new(7, 4), Edge::new(7, 6), Edge::new(7, 3)];
        for edge in hidden {
            assert!(!frame.edges().contains(&edge));
        }
    }

    #[test]
    fn eye_view_follows_perspective() {
        let cube = Mesh::cube();
        let mut positions = Vec::new();
        Transform::rotate_mesh(&cube, &RotationState::new(0, 252, 0), &mut positions);
        let mut classifier = Classifier::new();

        // from infinitely far away the right face is barely visible
        let frame = classifier.classify(&cube, &positions, View::FRONT);
        assert_eq!(frame.facing()[4], Facing::Front);
        assert_eq!((frame.front_count(), frame.edges().len()), (2, 7));

        // a nearby eye looks past the right face's plane
        let frame = classifier.classify(&cube, &positions, View::eye(0, 0, 256));
        assert_eq!(frame.facing()[4], Facing::Back);
        assert_eq!((frame.front_count(), frame.edges().len()), (1, 4));
        assert!(!frame.edges().contains(&Edge::new(5, 6)));
    }

    #[test]
    fn eye_direction_depends_on_the_point() {
        let eye = View::eye(0, 0, 10);
        assert_eq!(eye.toward(&Point3::new(1, 2, 3)), Vector3::new(-1, -2, 7));
        assert_eq!(View::FRONT.toward(&Point3::new(1, 2, 3)), Vector3::new(0, 0, 1));
        assert_ne!(View::eye(0, 0, 1), View::FRONT);
    }

    #[test]
    fn shared_front_edge_is_emitted_once() {
        let vertices = [
            Vertex::new(0, 0, 0),
            Vertex::new(20, 0, 0),
            Vertex::new(20, 20, 0),
            Vertex::new(0, 20, 0),
        ];
        let triangles: [[VertexIndex; 3]; 2] = [[0, 1, 2], [0, 2, 3]];
        let mesh = Mesh::new("square", &vertices, &triangles, &[]);
        let mut classifier = Classifier::new();
        let frame = classifier.classify(&mesh, &mesh.points(), View::FRONT);

        assert_eq!(frame.front_count(), 2);
        assert_eq!(frame.edges().len(), 5);
        let diagonal = frame
            .edges()
            .iter()
            .filter(|&&e| e == Edge::new(2, 0))
            .count();
        assert_eq!(diagonal, 1);
    }

    #[test]
    fn silhouette_edge_is_drawn_once() {
        // a front triangle and a back triangle folded along edge 0-1
        let vertices = [
            Vertex::new(0, 0, 0),
            Vertex::new(20, 0, 0),
            Vertex::new(10, 20, 0),
            Vertex::new(10, -20, 0),
        ];
        let triangles: [[VertexIndex; 3]; 2] = [[0, 1, 2], [0, 3, 1]];
        let mesh = Mesh::new("fold", &vertices, &triangles, &[]);
        let positions = vec![
            Point3::new(0, 0, 0),
            Point3::new(20, 0, 0),
            Point3::new(10, 20, 0),
            Point3::new(10, 20, -10),
        ];
        let mut classifier = Classifier::new();
        let frame = classifier.classify(&mesh, &positions, View::FRONT);

        assert_eq!(frame.facing(), &[Facing::Front, Facing::Back]);
        assert_eq!(frame.edges().len(), 3);
        assert!(frame.edges().contains(&Edge::new(0, 1)));
        assert!(!frame.edges().contains(&Edge::new(0, 3)));
    }

    #[test]
    fn collinear_projection_is_back_facing() {
        let face = Face::Triangle([0, 1, 2]);
        let positions = [
            Point3::new(0, 0, 0),
            Point3::new(10, 10, 5),
            Point3::new(20, 20, -5),
        ];
        assert_eq!(face_facing(&face, &positions, View::FRONT), Facing::Back);
    }

    #[test]
    fn lines_only_draws_every_edge() {
        let catalog = Catalog::builtin();
        let mut classifier = Classifier::new();
        for (_, mesh) in catalog.iter() {
            let points = mesh.points();
            let frame = classifier.classify_with(mesh, &points, View::FRONT, CullMode::LinesOnly);
            assert_eq!(frame.mode(), CullMode::LinesOnly);
            assert_eq!(frame.edges().len(), all_edges(mesh).len(), "{}", mesh.name());
            assert_eq!(edge_set(frame.edges()), all_edges(mesh));
        }
    }

    #[test]
    fn lines_only_mesh_overrides_requested_mode() {
        let cube = Mesh::cube().with_lines_only(true);
        let mut classifier = Classifier::new();
        let frame = classifier.classify(&cube, &cube.points(), View::FRONT);
        assert_eq!(frame.mode(), CullMode::LinesOnly);
        assert_eq!(frame.front_count(), 1);
        assert_eq!(frame.edges().len(), 12);
    }

    #[test]
    fn builtin_meshes_from_front() {
        let catalog = Catalog::builtin();
        let mut classifier = Classifier::new();
        let expected = [
            (MeshId::Default, 3, 8),
            (MeshId::TwoCubes, 2, 8),
            (MeshId::Spaceship, 7, 16),
            (MeshId::Complex, 9, 20),
            (MeshId::Ball, 8, 15),
        ];
        for (id, faces, edges) in expected {
            let mesh = catalog.get(id).unwrap();
            let frame = classifier.classify(mesh, &mesh.points(), View::FRONT);
            assert_eq!((frame.front_count(), frame.edges().len()), (faces, edges), "{id}");
        }
    }

    #[test]
    fn opposite_views_split_the_faces() {
        let catalog = Catalog::builtin();
        let mut classifier = Classifier::new();
        let views = [
            (View::new(1, 1, 1).unwrap(), View::new(-1, -1, -1).unwrap()),
            (View::new(3, -2, 1).unwrap(), View::new(-3, 2, -1).unwrap()),
        ];
        for (_, mesh) in catalog.iter() {
            let points = mesh.points();
            for (view, opposite) in views {
                let front: Vec<_> = classifier.classify(mesh, &points, view).facing().to_vec();
                let back: Vec<_> = classifier.classify(mesh, &points, opposite).facing().to_vec();
                for (face, (a, b)) in mesh.faces().zip(front.iter().zip(&back)) {
                    let [p, q, r] = face.corners().map(|i| &points[usize::from(i)]);
                    if facing_value(p, q, r, view) != 0 {
                        assert_ne!(a, b, "{}", mesh.name());
                    }
                }
            }
        }
    }

    #[test]
    fn edges_come_only_from_front_faces() {
        let catalog = Catalog::builtin();
        let mut classifier = Classifier::new();
        let mut positions = Vec::new();
        let rotations = [
            RotationState::new(20, 40, 0),
            RotationState::new(100, 7, 33),
            RotationState::new(200, 150, 90),
        ];
        for (_, mesh) in catalog.iter() {
            for rotation in &rotations {
                Transform::rotate_mesh(mesh, rotation, &mut positions);
                let frame = classifier.classify(mesh, &positions, View::FRONT);

                let mut expected = HashSet::new();
                for (face, facing) in mesh.faces().zip(frame.facing()) {
                    if *facing == Facing::Front {
                        expected.extend(face.edges().map(Edge::from));
                    }
                }
                assert_eq!(frame.edges().len(), expected.len());
                assert_eq!(edge_set(frame.edges()), expected);
            }
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let mesh = Catalog::builtin().get(MeshId::Spaceship).unwrap();
        let mut positions = Vec::new();
        Transform::rotate_mesh(mesh, &RotationState::new(12, 200, 5), &mut positions);

        let mut classifier = Classifier::new();
        let first = classifier.classify(mesh, &positions, View::FRONT).edges().to_vec();
        let second = classifier.classify(mesh, &positions, View::FRONT).edges().to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_view_is_rejected() {
        assert_eq!(View::new(0, 0, 0), Err(MeshError::ZeroView));
        assert_eq!(View::new(0, 0, 1).unwrap(), View::FRONT);
        assert_eq!(View::default(), View::FRONT);
    }

    #[test]
    fn front_view_matches_normal_z() {
        let a = Point3::new(3, -7, 12);
        let b = Point3::new(40, 5, -9);
        let c = Point3::new(-11, 30, 4);
        assert_eq!(facing_value(&a, &b, &c, View::FRONT), face_normal(&a, &b, &c).z);
    }
}
