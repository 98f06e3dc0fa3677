//! The catalog of structure variants.
//!
//! Each variant is one fixed recipe of solids, materials and placements. The
//! numeric identifiers are those used by existing run configurations.

mod assembly;
mod beam;
mod calibration;
mod scintillator;
mod windows;
mod x0;
mod xray;

use crate::builder::BuildContext;
use crate::error::{Result, VariantError};
use crate::placement::BuildOutput;

pub(crate) use scintillator::place_scintillators;

/// Absorber material of the radiation-length fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absorber {
    Aluminium,
    Nickel,
    Lead,
}

impl Absorber {
    #[must_use]
    pub fn material(self) -> &'static str {
        match self {
            Self::Aluminium => "G4_Al",
            Self::Nickel => "G4_Ni",
            Self::Lead => "G4_Pb",
        }
    }
}

/// Cut-outs applied to the 6 mm radiation-length cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolePattern {
    /// Plain cube.
    Solid,
    /// Corner block removed.
    Cutout,
    /// Cut-out plus four spherical voids.
    Spheres,
    /// Cut-out plus four cylindrical channels and two slots.
    Channels,
}

/// Calibration source fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationSource {
    Am241Gamma,
    Fe55,
    Cd109,
    Am241Alpha,
}

/// A structure variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    BeamPipe,
    EudetHolder,
    TelescopeBox,
    Calibration(CalibrationSource),
    ImportedAssembly,
    MylarWindows,
    XRayBox,
    XRayCabinet,
    X0Cube {
        absorber: Absorber,
        pattern: HolePattern,
    },
    Plate,
    DoublePlate(Absorber),
}

impl TryFrom<i32> for Variant {
    type Error = VariantError;

    fn try_from(id: i32) -> std::result::Result<Self, Self::Error> {
        use Absorber::{Aluminium, Lead, Nickel};
        use HolePattern::{Channels, Cutout, Solid, Spheres};

        let cube = |absorber, pattern| Self::X0Cube { absorber, pattern };
        Ok(match id {
            0 => Self::BeamPipe,
            1 => Self::EudetHolder,
            2 => Self::TelescopeBox,
            3 => Self::Calibration(CalibrationSource::Am241Gamma),
            4 => Self::Calibration(CalibrationSource::Fe55),
            5 => Self::Calibration(CalibrationSource::Cd109),
            6 => Self::Calibration(CalibrationSource::Am241Alpha),
            7 => Self::ImportedAssembly,
            8 => Self::MylarWindows,
            9 => Self::XRayBox,
            10 => Self::XRayCabinet,
            101 => cube(Aluminium, Cutout),
            102 => cube(Aluminium, Spheres),
            103 => cube(Aluminium, Channels),
            104 => Self::Plate,
            105 => Self::DoublePlate(Aluminium),
            106 => Self::DoublePlate(Lead),
            107 => cube(Nickel, Channels),
            108 => cube(Lead, Channels),
            110 => cube(Aluminium, Solid),
            111 => cube(Nickel, Solid),
            112 => cube(Lead, Solid),
            other => return Err(VariantError::UnknownVariant(other)),
        })
    }
}

impl Variant {
    /// Numeric identifier of the variant. Payload combinations without a
    /// catalog entry (e.g. a nickel double plate) have none.
    #[must_use]
    pub fn id(self) -> Option<i32> {
        use Absorber::{Aluminium, Lead, Nickel};
        use HolePattern::{Channels, Cutout, Solid, Spheres};

        Some(match self {
            Self::BeamPipe => 0,
            Self::EudetHolder => 1,
            Self::TelescopeBox => 2,
            Self::Calibration(CalibrationSource::Am241Gamma) => 3,
            Self::Calibration(CalibrationSource::Fe55) => 4,
            Self::Calibration(CalibrationSource::Cd109) => 5,
            Self::Calibration(CalibrationSource::Am241Alpha) => 6,
            Self::ImportedAssembly => 7,
            Self::MylarWindows => 8,
            Self::XRayBox => 9,
            Self::XRayCabinet => 10,
            Self::Plate => 104,
            Self::DoublePlate(Aluminium) => 105,
            Self::DoublePlate(Lead) => 106,
            Self::X0Cube { absorber, pattern } => match (absorber, pattern) {
                (Aluminium, Cutout) => 101,
                (Aluminium, Spheres) => 102,
                (Aluminium, Channels) => 103,
                (Nickel, Channels) => 107,
                (Lead, Channels) => 108,
                (Aluminium, Solid) => 110,
                (Nickel, Solid) => 111,
                (Lead, Solid) => 112,
                (Nickel | Lead, Cutout | Spheres) => return None,
            },
            Self::DoublePlate(Nickel) => return None,
        })
    }

    /// Short name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BeamPipe => "BeamPipe",
            Self::EudetHolder => "EudetHolder",
            Self::TelescopeBox => "TelescopeBox",
            Self::Calibration(_) => "CalibrationSource",
            Self::ImportedAssembly => "ImportedAssembly",
            Self::MylarWindows => "MylarWindows",
            Self::XRayBox => "XRayBox",
            Self::XRayCabinet => "XRayCabinet",
            Self::X0Cube { .. } => "X0Cube",
            Self::Plate => "Plate",
            Self::DoublePlate(_) => "DoublePlate",
        }
    }

    /// Runs the variant's recipe, appending to `out`.
    pub(crate) fn build(self, ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
        match self {
            Self::BeamPipe => beam::build(ctx, out),
            Self::EudetHolder => assembly::build_holder(ctx, out),
            Self::TelescopeBox => assembly::build_telescope_box(ctx, out),
            Self::Calibration(source) => calibration::build(source, ctx, out),
            Self::ImportedAssembly => assembly::build_reference(ctx, out),
            Self::MylarWindows => windows::build(ctx, out),
            Self::XRayBox => xray::build_box(ctx, out),
            Self::XRayCabinet => xray::build_cabinet(ctx, out),
            Self::X0Cube { absorber, pattern } => x0::build_cube(absorber, pattern, ctx, out),
            Self::Plate => x0::build_plate(ctx, out),
            Self::DoublePlate(absorber) => x0::build_double_plate(absorber, ctx, out),
        }
    }
}
