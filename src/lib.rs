//! Variant-driven composition of test-beam support structures.
//!
//! A [`StructureBuilder`] turns a variant identifier plus identity-keyed
//! [`PlacementParameters`] into a [`BuildOutput`]: constructive solids,
//! materials from a shared [`MaterialCatalog`], and labelled placements
//! ready to be inserted into a [`Scene`].

pub mod appearance;
pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod import;
pub mod material;
pub mod math;
pub mod operations;
pub mod placement;
pub mod scene;
pub mod variant;

pub use builder::{AssetPaths, AssetRef, BuildOptions, StructureBuilder};
pub use config::BuildConfig;
pub use error::{Result, StructureError};
pub use material::{MaterialCatalog, MaterialId};
pub use placement::{BuildOutput, DetectorQuery, FinishedPlacement, PlacementParameters};
pub use scene::Scene;
pub use variant::Variant;
