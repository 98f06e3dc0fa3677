//! Variant dispatch.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::appearance::{decorate, Appearance};
use crate::error::{PlacementError, Result};
use crate::geometry::Solid;
use crate::import::{AssemblyHandle, AssemblySource, JsonAssemblyReader};
use crate::material::MaterialCatalog;
use crate::math::Vector3;
use crate::operations::query::DEFAULT_RESOLUTION;
use crate::placement::{BuildOutput, DetectorQuery, PlacementParameters, PlacementResolver, VolumeId};
use crate::variant::{place_scintillators, Variant};

/// An assembly file and the name of its root volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRef {
    pub path: PathBuf,
    pub root: String,
}

impl AssetRef {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, root: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root: root.into(),
        }
    }
}

/// Assemblies used by the variants that embed authored geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// Aluminium telescope-plane holder (variant 1).
    pub eudet_holder: AssetRef,
    /// Device-under-test box placed next to the telescope (variant 2).
    pub dut_box: AssetRef,
    /// Reference copy of the device-under-test box (variant 7).
    pub dut_box_reference: AssetRef,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            eudet_holder: AssetRef::new("share/eudet_al_holder.json", "Structure_105681480"),
            dut_box: AssetRef::new("models/clicpix_box.json", "Structure_144055344"),
            dut_box_reference: AssetRef::new("models/clicpix_box.json", "Structure_11624736"),
        }
    }
}

/// Options that apply to every variant.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOptions {
    /// Cells per axis for sampled volume estimates.
    pub resolution: usize,
    /// Trigger scintillator positions. `Some` enables the planes.
    pub scintillators: Option<Vec<Vector3>>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            scintillators: None,
        }
    }
}

/// Shared state handed to a recipe for the duration of one build.
pub(crate) struct BuildContext<'a> {
    pub resolver: PlacementResolver<'a>,
    pub materials: &'a mut MaterialCatalog,
    pub assemblies: &'a dyn AssemblySource,
    pub assets: &'a AssetPaths,
    pub options: &'a BuildOptions,
}

impl BuildContext<'_> {
    /// Resolves the material, decorates the solid and stores the volume.
    pub fn volume(
        &mut self,
        out: &mut BuildOutput,
        name: &str,
        solid: Solid,
        material: &str,
        appearance: Appearance,
    ) -> Result<VolumeId> {
        let material = self.materials.resolve(material)?;
        Ok(out.add_volume(decorate(name, solid, material, appearance)))
    }

    pub fn import(&self, asset: &AssetRef) -> Result<AssemblyHandle> {
        let handle = self.assemblies.load(&asset.path, &asset.root)?;
        info!(
            root = %asset.root,
            children = handle.children.len(),
            "imported assembly"
        );
        Ok(handle)
    }
}

static JSON_READER: JsonAssemblyReader = JsonAssemblyReader;

/// Builds structure variants against a scene.
///
/// The builder holds only read-only inputs; each call to
/// [`StructureBuilder::build`] returns a fresh [`BuildOutput`].
pub struct StructureBuilder<'a> {
    parameters: &'a PlacementParameters,
    detectors: &'a dyn DetectorQuery,
    assemblies: &'a dyn AssemblySource,
    assets: AssetPaths,
    options: BuildOptions,
}

impl<'a> StructureBuilder<'a> {
    /// Creates a builder reading assemblies from JSON files.
    #[must_use]
    pub fn new(parameters: &'a PlacementParameters, detectors: &'a dyn DetectorQuery) -> Self {
        Self {
            parameters,
            detectors,
            assemblies: &JSON_READER,
            assets: AssetPaths::default(),
            options: BuildOptions::default(),
        }
    }

    #[must_use]
    pub fn with_assemblies(mut self, assemblies: &'a dyn AssemblySource) -> Self {
        self.assemblies = assemblies;
        self
    }

    #[must_use]
    pub fn with_assets(mut self, assets: AssetPaths) -> Self {
        self.assets = assets;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds the variant with the given identifier.
    ///
    /// An unknown identifier logs a warning and yields an empty output.
    ///
    /// # Errors
    ///
    /// Returns the first geometry, material, import or placement error of
    /// the recipe. Nothing is returned for a failed build, so no partial
    /// output can reach the caller's scene.
    #[instrument(skip(self, materials), fields(entries = self.parameters.positions.len()))]
    pub fn build(&self, variant_id: i32, materials: &mut MaterialCatalog) -> Result<BuildOutput> {
        let variant = match Variant::try_from(variant_id) {
            Ok(variant) => variant,
            Err(err) => {
                warn!(%err, "no structure built");
                return Ok(BuildOutput::new());
            }
        };
        self.build_variant(variant, materials)
    }

    /// Builds an already decoded variant.
    ///
    /// # Errors
    ///
    /// See [`StructureBuilder::build`].
    pub fn build_variant(
        &self,
        variant: Variant,
        materials: &mut MaterialCatalog,
    ) -> Result<BuildOutput> {
        info!(variant = variant.name(), id = ?variant.id(), "building structure");

        let mut ctx = BuildContext {
            resolver: PlacementResolver::new(self.parameters, self.detectors),
            materials,
            assemblies: self.assemblies,
            assets: &self.assets,
            options: &self.options,
        };
        let mut out = BuildOutput::new();
        variant.build(&mut ctx, &mut out)?;

        if let Some(positions) = &self.options.scintillators {
            if positions.is_empty() {
                return Err(PlacementError::NoScintillators.into());
            }
            place_scintillators(&mut ctx, &mut out, positions)?;
        }

        info!(
            placements = out.len(),
            volumes = out.volumes().count(),
            "structure built"
        );
        Ok(out)
    }
}
