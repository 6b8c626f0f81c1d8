/// Error types for mesh assets and the catalog
use thiserror::Error;

/// Result type for mesh validation.
pub type MeshResult<T> = Result<T, MeshError>;

/// Result type for catalog lookups and construction.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A mesh asset that breaks its construction-time contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Mesh has no vertices or no faces.
    #[error("mesh `{name}` is empty")]
    EmptyMesh { name: String },

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} but mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u8,
        vertex_count: usize,
    },

    /// The first three vertices of a face are collinear.
    #[error("face {face} has zero area")]
    DegenerateFace { face: usize },

    /// The fourth vertex of a quad is off the plane of the first three.
    #[error("quad {face} is not planar")]
    NonPlanarQuad { face: usize },

    /// Two faces walk the shared edge in the same direction.
    #[error("edge {from} -> {to} is used by faces {first} and {second} in the same direction")]
    InconsistentWinding {
        from: u8,
        to: u8,
        first: usize,
        second: usize,
    },

    /// A connected sub-solid is inside out (clockwise from outside).
    /// `face` is the first face of that sub-solid.
    #[error("sub-solid starting at face {face} is wound clockwise as seen from outside")]
    InwardFace { face: usize },

    /// A view direction must not be the zero vector.
    #[error("view direction must be non-zero")]
    ZeroView,
}

/// Errors from looking up or assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// No mesh is registered under the name.
    #[error("unknown mesh `{0}`")]
    UnknownMesh(String),

    /// Two entries claim the same identifier or name.
    #[error("mesh `{0}` is defined more than once")]
    DuplicateMesh(String),

    /// A catalog entry failed validation.
    #[error("mesh `{name}` is malformed: {source}")]
    Malformed {
        name: String,
        #[source]
        source: MeshError,
    },
}
