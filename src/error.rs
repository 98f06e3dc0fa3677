use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for structure builds.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Variant(#[from] VariantError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while constructing solids.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid dimension for solid `{solid}`: {parameter} = {value} ({reason})")]
    InvalidDimension {
        solid: String,
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors raised by the material catalog.
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("unknown element `{element}` in material `{material}`")]
    UnknownElement { material: String, element: String },

    #[error("mass fractions of material `{material}` sum to {total}, expected 1")]
    InvalidComposition { material: String, total: f64 },

    #[error("material `{0}` is already in the standard table")]
    DuplicateMaterial(String),
}

/// Errors raised while resolving placements.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("no {map} entry for structure {id}")]
    MissingParameterEntry { map: &'static str, id: i32 },

    #[error("variant {variant} expects a single {map} entry, found {count}")]
    MultipleEntriesUnsupported {
        variant: &'static str,
        map: &'static str,
        count: usize,
    },

    #[error("label `{0}` is already used in this parent scope")]
    DuplicateLabel(String),

    #[error("placement `{0}` refers to a volume its output does not hold")]
    DanglingVolume(String),

    #[error("scintillator planes requested but no positions configured")]
    NoScintillators,
}

/// Errors raised while importing externally authored assemblies.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("assembly file not found: {}", .0.display())]
    AssetNotFound(PathBuf),

    #[error("volume `{volume}` not found in {}", .path.display())]
    AssetVolumeNotFound { path: PathBuf, volume: String },

    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
}

/// Errors related to variant selection.
#[derive(Debug, Error)]
pub enum VariantError {
    #[error("unknown structure variant: {0}")]
    UnknownVariant(i32),
}

/// Errors related to loading build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(String),
}

/// Convenience type alias for results using [`StructureError`].
pub type Result<T> = std::result::Result<T, StructureError>;
