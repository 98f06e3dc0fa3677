//! Composition recipes for materials outside the standard table.

use crate::error::MaterialError;
use crate::math::units::{ATMOSPHERE, BAR, KELVIN, KG_PER_M3, PASCAL, STP_TEMPERATURE};

use super::{Component, Element, Material, MaterialState, FRACTION_TOLERANCE};

pub const STAINLESS_STEEL: &str = "StainlessSteel";
pub const BRASS: &str = "Brass";
pub const BEAM_GAS: &str = "Beam";

/// Residual gas pressure inside the beam pipe.
pub const BEAM_GAS_PRESSURE: f64 = 1e-6 * BAR;

/// Specific gas constant of air in J/(kg K).
const AIR_GAS_CONSTANT: f64 = 286.9;

/// A named composition by mass fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecipe {
    pub name: String,
    pub density: f64,
    pub state: MaterialState,
    pub temperature: f64,
    pub pressure: f64,
    pub fractions: Vec<(String, f64)>,
}

impl MaterialRecipe {
    /// Starts a solid recipe at standard conditions. `density` is in g/cm³.
    #[must_use]
    pub fn new(name: impl Into<String>, density: f64) -> Self {
        Self {
            name: name.into(),
            density,
            state: MaterialState::Solid,
            temperature: STP_TEMPERATURE,
            pressure: ATMOSPHERE,
            fractions: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(mut self, state: MaterialState) -> Self {
        self.state = state;
        self
    }

    /// Sets temperature (kelvin) and pressure (pascal).
    #[must_use]
    pub fn conditions(mut self, temperature: f64, pressure: f64) -> Self {
        self.temperature = temperature;
        self.pressure = pressure;
        self
    }

    /// Adds an element by chemical symbol with its mass fraction.
    #[must_use]
    pub fn element(mut self, symbol: impl Into<String>, fraction: f64) -> Self {
        self.fractions.push((symbol.into(), fraction));
        self
    }

    /// Builds the material record.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownElement`] for an unknown symbol and
    /// [`MaterialError::InvalidComposition`] if the fractions do not sum to 1.
    pub fn build(&self) -> Result<Material, MaterialError> {
        let components = self
            .fractions
            .iter()
            .map(|(symbol, fraction)| {
                Element::find(symbol)
                    .map(|element| Component {
                        element,
                        mass_fraction: *fraction,
                    })
                    .ok_or_else(|| MaterialError::UnknownElement {
                        material: self.name.clone(),
                        element: symbol.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total: f64 = components.iter().map(|c| c.mass_fraction).sum();
        let negative = components.iter().any(|c| c.mass_fraction < 0.0);
        if negative || (total - 1.0).abs() > FRACTION_TOLERANCE {
            return Err(MaterialError::InvalidComposition {
                material: self.name.clone(),
                total,
            });
        }

        Ok(Material {
            name: self.name.clone(),
            density: self.density,
            state: self.state,
            temperature: self.temperature,
            pressure: self.pressure,
            components,
        })
    }
}

/// Ideal-gas density of air-like gas at the given conditions, in g/cm³.
#[must_use]
pub fn air_density(pressure: f64, temperature: f64) -> f64 {
    (pressure / PASCAL) / (AIR_GAS_CONSTANT * temperature / KELVIN) * KG_PER_M3
}

/// Recipes preloaded into every [`super::MaterialCatalog::new`] catalog.
#[must_use]
pub fn builtin() -> Vec<MaterialRecipe> {
    vec![
        MaterialRecipe::new(STAINLESS_STEEL, 8.06)
            .element("C", 0.001)
            .element("Si", 0.007)
            .element("Cr", 0.18)
            .element("Mn", 0.01)
            .element("Fe", 0.712)
            .element("Ni", 0.09),
        MaterialRecipe::new(BRASS, 8.5)
            .element("Cu", 0.7)
            .element("Zn", 0.3),
        MaterialRecipe::new(
            BEAM_GAS,
            air_density(BEAM_GAS_PRESSURE, STP_TEMPERATURE),
        )
        .state(MaterialState::Gas)
        .conditions(STP_TEMPERATURE, BEAM_GAS_PRESSURE)
        .element("N", 0.7)
        .element("O", 0.3),
    ]
}
