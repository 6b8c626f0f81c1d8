/// Named registry of immutable mesh assets and the active-mesh selection
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use hashbrown::HashSet;
use tracing::{debug, info, warn};

use crate::assets;
use crate::error::{CatalogError, CatalogResult};
use crate::geometry::Mesh;
use crate::validate::{validate_mesh, MeshReport};

/// Identifier of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Default,
    TwoCubes,
    Spaceship,
    Complex,
    Ball,
}

impl MeshId {
    pub const ALL: [MeshId; 5] = [
        MeshId::Default,
        MeshId::TwoCubes,
        MeshId::Spaceship,
        MeshId::Complex,
        MeshId::Ball,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeshId::Default => "default",
            MeshId::TwoCubes => "two-cubes",
            MeshId::Spaceship => "spaceship",
            MeshId::Complex => "complex",
            MeshId::Ball => "ball",
        }
    }

    /// The next identifier in catalog order, wrapping around
    pub fn next(self) -> MeshId {
        let position = MeshId::ALL.iter().position(|&id| id == self).unwrap_or(0);
        MeshId::ALL[(position + 1) % MeshId::ALL.len()]
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MeshId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        MeshId::ALL
            .into_iter()
            .find(|id| id.name() == normalized)
            .ok_or_else(|| CatalogError::UnknownMesh(s.to_string()))
    }
}

/// A read-only collection of uniquely named meshes
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(MeshId, Mesh<'static>)>,
}

impl Catalog {
    /// The compiled-in catalog, built once per process
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: OnceLock<Catalog> = OnceLock::new();
        BUILTIN.get_or_init(|| Catalog {
            entries: assets::BUILTIN.to_vec(),
        })
    }

    /// Build a catalog, refusing entries that reuse an identifier or a name
    pub fn from_entries(
        entries: impl IntoIterator<Item = (MeshId, Mesh<'static>)>,
    ) -> CatalogResult<Self> {
        let mut ids = HashSet::new();
        let mut names = HashSet::new();
        let mut collected = Vec::new();

        for (id, mesh) in entries {
            if !ids.insert(id) {
                return Err(CatalogError::DuplicateMesh(id.to_string()));
            }
            if !names.insert(mesh.name()) {
                return Err(CatalogError::DuplicateMesh(mesh.name().to_string()));
            }
            collected.push((id, mesh));
        }

        Ok(Self { entries: collected })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: MeshId) -> Option<&Mesh<'static>> {
        self.position(id).map(|index| &self.entries[index].1)
    }

    /// Look up a mesh by its registered name
    pub fn by_name(&self, name: &str) -> CatalogResult<&Mesh<'static>> {
        self.entries
            .iter()
            .find(|(_, mesh)| mesh.name() == name)
            .map(|(_, mesh)| mesh)
            .ok_or_else(|| CatalogError::UnknownMesh(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &Mesh<'static>)> {
        self.entries.iter().map(|(id, mesh)| (*id, mesh))
    }

    /// Run the validator over every entry, stopping at the first malformed mesh
    pub fn validate_all(&self) -> CatalogResult<Vec<(MeshId, MeshReport)>> {
        let mut reports = Vec::with_capacity(self.entries.len());
        for (id, mesh) in &self.entries {
            match validate_mesh(mesh) {
                Ok(report) => {
                    debug!(mesh = mesh.name(), faces = report.face_count, "mesh validated");
                    reports.push((*id, report));
                }
                Err(source) => {
                    warn!(mesh = mesh.name(), %source, "rejecting malformed mesh");
                    return Err(CatalogError::Malformed {
                        name: mesh.name().to_string(),
                        source,
                    });
                }
            }
        }
        info!("validated {} meshes", reports.len());
        Ok(reports)
    }

    fn position(&self, id: MeshId) -> Option<usize> {
        self.entries.iter().position(|(entry, _)| *entry == id)
    }
}

/// The single mesh currently being rendered
#[derive(Debug, Clone)]
pub struct Selection<'c> {
    catalog: &'c Catalog,
    active: usize,
}

impl<'c> Selection<'c> {
    pub fn new(catalog: &'c Catalog, id: MeshId) -> CatalogResult<Self> {
        let active = catalog
            .position(id)
            .ok_or_else(|| CatalogError::UnknownMesh(id.to_string()))?;
        Ok(Self { catalog, active })
    }

    /// Switch the active mesh; on error the previous selection stays active
    pub fn select(&mut self, id: MeshId) -> CatalogResult<()> {
        let active = self
            .catalog
            .position(id)
            .ok_or_else(|| CatalogError::UnknownMesh(id.to_string()))?;
        self.active = active;
        debug!(mesh = %id, "selected mesh");
        Ok(())
    }

    pub fn id(&self) -> MeshId {
        self.catalog.entries[self.active].0
    }

    pub fn active(&self) -> &'c Mesh<'static> {
        &self.catalog.entries[self.active].1
    }
}
