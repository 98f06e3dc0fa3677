//! Material catalog.
//!
//! Materials live in a [`SlotMap`] arena and are handed out as [`MaterialId`]
//! keys, so two resolutions of the same name share identity. Names are
//! resolved from the cache, then from the standard table in [`nist`], then
//! from registered composition recipes.

pub mod nist;
pub mod recipes;

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::error::MaterialError;
use crate::math::units::{ATMOSPHERE, CM3, STP_TEMPERATURE};

pub use recipes::MaterialRecipe;

/// Allowed deviation of a composition's mass fractions from 1.
pub const FRACTION_TOLERANCE: f64 = 1e-4;

slotmap::new_key_type! {
    /// Shared reference to a material in a [`MaterialCatalog`].
    pub struct MaterialId;
}

/// A chemical element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub symbol: &'static str,
    pub name: &'static str,
    pub z: u32,
    /// Molar mass in g/mol.
    pub molar_mass: f64,
}

impl Element {
    #[must_use]
    pub const fn new(symbol: &'static str, name: &'static str, z: u32, molar_mass: f64) -> Self {
        Self {
            symbol,
            name,
            z,
            molar_mass,
        }
    }

    /// Looks up an element by its chemical symbol.
    #[must_use]
    pub fn find(symbol: &str) -> Option<&'static Element> {
        nist::ELEMENTS.iter().find(|e| e.symbol == symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialState {
    Solid,
    Liquid,
    Gas,
}

/// One element of a material's composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub element: &'static Element,
    pub mass_fraction: f64,
}

/// A resolved material record.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Density in g/cm³.
    pub density: f64,
    pub state: MaterialState,
    /// Temperature in kelvin.
    pub temperature: f64,
    /// Pressure in pascal.
    pub pressure: f64,
    pub components: Vec<Component>,
}

impl Material {
    /// Mass in grams of `volume` mm³ of this material.
    #[must_use]
    pub fn mass(&self, volume: f64) -> f64 {
        self.density * volume / CM3
    }
}

/// Resolves material names to shared [`MaterialId`]s.
#[derive(Debug)]
pub struct MaterialCatalog {
    materials: SlotMap<MaterialId, Material>,
    by_name: HashMap<String, MaterialId>,
    recipes: HashMap<String, MaterialRecipe>,
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        for recipe in recipes::builtin() {
            catalog.recipes.insert(recipe.name.clone(), recipe);
        }
        catalog
    }
}

impl MaterialCatalog {
    /// Creates a catalog with the standard table and the built-in recipes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog with the standard table only.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            materials: SlotMap::with_key(),
            by_name: HashMap::new(),
            recipes: HashMap::new(),
        }
    }

    /// Number of materials built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Returns the material behind an id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this catalog.
    pub fn get(&self, id: MaterialId) -> Result<&Material, MaterialError> {
        self.materials
            .get(id)
            .ok_or_else(|| MaterialError::UnknownMaterial(format!("{id:?}")))
    }

    /// Resolves a material name, building and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownMaterial`] if the name is neither a
    /// standard entry nor a registered recipe.
    pub fn resolve(&mut self, name: &str) -> Result<MaterialId, MaterialError> {
        if let Some(&id) = self.by_name.get(name) {
            return Ok(id);
        }

        let material = if let Some(entry) = nist::STANDARD_MATERIALS.iter().find(|m| m.name == name)
        {
            build_standard(entry)?
        } else if let Some(recipe) = self.recipes.get(name) {
            recipe.build()?
        } else {
            return Err(MaterialError::UnknownMaterial(name.to_owned()));
        };

        debug!(material = name, density = material.density, "built material");
        let id = self.materials.insert(material);
        self.by_name.insert(name.to_owned(), id);
        Ok(id)
    }

    /// Registers a composition recipe without building it.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::DuplicateMaterial`] if the name belongs to a
    /// standard entry, or an error if the recipe's composition is invalid.
    pub fn register(&mut self, recipe: MaterialRecipe) -> Result<(), MaterialError> {
        if is_standard(&recipe.name) {
            return Err(MaterialError::DuplicateMaterial(recipe.name));
        }
        recipe.build()?;
        self.recipes.insert(recipe.name.clone(), recipe);
        Ok(())
    }

    /// Registers a recipe and resolves it immediately. Defining a recipe
    /// name that is already built returns the existing id.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::DuplicateMaterial`] for a standard name, or
    /// an error if the recipe's composition is invalid.
    pub fn define(&mut self, recipe: MaterialRecipe) -> Result<MaterialId, MaterialError> {
        if is_standard(&recipe.name) {
            return Err(MaterialError::DuplicateMaterial(recipe.name));
        }
        if let Some(&id) = self.by_name.get(&recipe.name) {
            return Ok(id);
        }
        let name = recipe.name.clone();
        self.register(recipe)?;
        self.resolve(&name)
    }
}

fn is_standard(name: &str) -> bool {
    nist::STANDARD_MATERIALS.iter().any(|m| m.name == name)
}

fn build_standard(entry: &nist::StandardMaterial) -> Result<Material, MaterialError> {
    let mut recipe = MaterialRecipe::new(entry.name, entry.density)
        .state(entry.state)
        .conditions(STP_TEMPERATURE, ATMOSPHERE);
    for &(symbol, fraction) in entry.fractions {
        recipe = recipe.element(symbol, fraction);
    }
    recipe.build()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn repeated_resolution_shares_identity() {
        let mut catalog = MaterialCatalog::new();
        let a = catalog.resolve("G4_Al").unwrap();
        let b = catalog.resolve("G4_Al").unwrap();
        assert_eq!(a, b);
        assert_eq!(catalog.len(), 1);
        assert_relative_eq!(catalog.get(a).unwrap().density, 2.699);
    }

    #[test]
    fn unknown_name_fails() {
        let mut catalog = MaterialCatalog::new();
        let err = catalog.resolve("Unobtainium").unwrap_err();
        assert!(matches!(err, MaterialError::UnknownMaterial(name) if name == "Unobtainium"));
        assert!(catalog.is_empty());
    }

    #[test]
    fn builtin_recipe_resolves_lazily() {
        let mut catalog = MaterialCatalog::new();
        let steel = catalog.resolve(recipes::STAINLESS_STEEL).unwrap();
        let steel = catalog.get(steel).unwrap();
        assert_eq!(steel.components.len(), 6);
        assert_relative_eq!(steel.density, 8.06);
    }

    #[test]
    fn empty_catalog_has_no_recipes() {
        let mut catalog = MaterialCatalog::empty();
        assert!(catalog.resolve(recipes::BRASS).is_err());
        assert!(catalog.resolve("G4_Pb").is_ok());
    }

    #[test]
    fn every_standard_entry_builds() {
        let mut catalog = MaterialCatalog::empty();
        for entry in nist::STANDARD_MATERIALS {
            catalog.resolve(entry.name).unwrap();
        }
        assert_eq!(catalog.len(), nist::STANDARD_MATERIALS.len());
    }

    #[test]
    fn define_rejects_bad_fractions() {
        let mut catalog = MaterialCatalog::new();
        let recipe = MaterialRecipe::new("Bronze", 8.8)
            .element("Cu", 0.8)
            .element("Zn", 0.1);
        let err = catalog.define(recipe).unwrap_err();
        assert!(matches!(err, MaterialError::InvalidComposition { .. }));
        assert!(catalog.resolve("Bronze").is_err());
    }

    #[test]
    fn define_returns_existing_id() {
        let mut catalog = MaterialCatalog::new();
        let first = catalog
            .define(MaterialRecipe::new("Foil", 2.7).element("Al", 1.0))
            .unwrap();
        let second = catalog
            .define(MaterialRecipe::new("Foil", 9.9).element("Pb", 1.0))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn standard_names_cannot_be_redefined() {
        let mut catalog = MaterialCatalog::new();
        let err = catalog
            .define(MaterialRecipe::new("G4_Al", 9.9).element("Pb", 1.0))
            .unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateMaterial(name) if name == "G4_Al"));
        assert!(catalog.is_empty());

        let al = catalog.resolve("G4_Al").unwrap();
        assert_relative_eq!(catalog.get(al).unwrap().density, 2.699);
        let err = catalog
            .register(MaterialRecipe::new("G4_Al", 9.9).element("Pb", 1.0))
            .unwrap_err();
        assert!(matches!(err, MaterialError::DuplicateMaterial(_)));
    }

    #[test]
    fn mass_of_one_cubic_centimetre_of_lead() {
        let mut catalog = MaterialCatalog::new();
        let lead = catalog.resolve("G4_Pb").unwrap();
        assert_relative_eq!(catalog.get(lead).unwrap().mass(1000.0), 11.35);
    }
}
