//! Reference data: elements and the standard material table.
//!
//! Densities and mass fractions follow the NIST compositions used by common
//! particle-physics toolkits; names use the `G4_` convention.

use super::{Element, MaterialState};

pub static ELEMENTS: &[Element] = &[
    Element::new("H", "Hydrogen", 1, 1.008),
    Element::new("Be", "Beryllium", 4, 9.0122),
    Element::new("C", "Carbon", 6, 12.011),
    Element::new("N", "Nitrogen", 7, 14.007),
    Element::new("O", "Oxygen", 8, 15.999),
    Element::new("Al", "Aluminium", 13, 26.982),
    Element::new("Si", "Silicon", 14, 28.085),
    Element::new("Ar", "Argon", 18, 39.948),
    Element::new("Ca", "Calcium", 20, 40.078),
    Element::new("Ti", "Titanium", 22, 47.867),
    Element::new("Cr", "Chromium", 24, 51.996),
    Element::new("Mn", "Manganese", 25, 54.938),
    Element::new("Fe", "Iron", 26, 55.845),
    Element::new("Ni", "Nickel", 28, 58.693),
    Element::new("Cu", "Copper", 29, 63.546),
    Element::new("Zn", "Zinc", 30, 65.38),
    Element::new("W", "Tungsten", 74, 183.84),
    Element::new("Au", "Gold", 79, 196.967),
    Element::new("Pb", "Lead", 82, 207.2),
];

/// A standard table entry: name, density (g/cm³), state, mass fractions.
pub struct StandardMaterial {
    pub name: &'static str,
    pub density: f64,
    pub state: MaterialState,
    pub fractions: &'static [(&'static str, f64)],
}

macro_rules! pure {
    ($name:literal, $density:literal, $symbol:literal) => {
        StandardMaterial {
            name: $name,
            density: $density,
            state: MaterialState::Solid,
            fractions: &[($symbol, 1.0)],
        }
    };
}

pub static STANDARD_MATERIALS: &[StandardMaterial] = &[
    pure!("G4_Be", 1.848, "Be"),
    pure!("G4_Al", 2.699, "Al"),
    pure!("G4_Si", 2.33, "Si"),
    pure!("G4_Ca", 1.55, "Ca"),
    pure!("G4_Ti", 4.54, "Ti"),
    pure!("G4_Ni", 8.902, "Ni"),
    pure!("G4_Cu", 8.96, "Cu"),
    pure!("G4_W", 19.3, "W"),
    pure!("G4_Au", 19.32, "Au"),
    pure!("G4_Pb", 11.35, "Pb"),
    StandardMaterial {
        name: "G4_WATER",
        density: 1.0,
        state: MaterialState::Liquid,
        fractions: &[("H", 0.111_894), ("O", 0.888_106)],
    },
    StandardMaterial {
        name: "G4_PLEXIGLASS",
        density: 1.19,
        state: MaterialState::Solid,
        fractions: &[("H", 0.080_538), ("C", 0.599_848), ("O", 0.319_614)],
    },
    StandardMaterial {
        name: "G4_MYLAR",
        density: 1.4,
        state: MaterialState::Solid,
        fractions: &[("H", 0.041_959), ("C", 0.625_017), ("O", 0.333_025)],
    },
    StandardMaterial {
        name: "G4_POLYSTYRENE",
        density: 1.06,
        state: MaterialState::Solid,
        fractions: &[("H", 0.077_418), ("C", 0.922_582)],
    },
    StandardMaterial {
        name: "G4_KAPTON",
        density: 1.42,
        state: MaterialState::Solid,
        fractions: &[
            ("H", 0.026_362),
            ("C", 0.691_133),
            ("N", 0.073_270),
            ("O", 0.209_235),
        ],
    },
    StandardMaterial {
        name: "G4_AIR",
        density: 0.001_204_79,
        state: MaterialState::Gas,
        fractions: &[
            ("C", 0.000_124),
            ("N", 0.755_268),
            ("O", 0.231_781),
            ("Ar", 0.012_827),
        ],
    },
];
