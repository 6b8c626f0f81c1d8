/// Wire3D Core Library - Mesh catalog and hidden-line classification
///
/// This library provides integer-only building blocks for a wireframe
/// renderer: a catalog of compiled-in meshes, a load-time mesh validator,
/// the per-frame backface classifier that picks the edges to draw, and the
/// fixed-point rotation and projection that feed it.

mod assets;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod transform;
pub mod validate;
pub mod visibility;

// Re-export commonly used types
pub use catalog::{Catalog, MeshId, Selection};
pub use error::{CatalogError, MeshError};
pub use geometry::{Edge, Face, Mesh, Vertex, VertexIndex};
pub use projection::{Camera, ProjectionMode, ScreenPoint};
pub use transform::{Angle, RotationState, Transform};
pub use validate::{validate_mesh, MeshReport};
pub use visibility::{Classifier, CullMode, Facing, Frame, View};
