//! Radiation-length fixtures: cut cubes, plates and stepped double plates.

use std::f64::consts::FRAC_PI_2;

use tracing::{info, warn};

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::{Solid, Transform};
use crate::math::{rotate_y, Vector3};
use crate::operations::boolean::{Subtract, Union};
use crate::operations::creation::{MakeBox, MakeSphere, MakeTube};
use crate::placement::{BuildOutput, FinishedPlacement};

use super::{Absorber, HolePattern};

const CUBE_HALF: f64 = 3.0;

/// Hole radii and their (y, z) centres, subtracted in this order.
const HOLES: [(f64, f64, f64); 4] = [
    (0.5, 1.5, -1.5),
    (0.2, -1.5, -1.5),
    (0.1, 0.0, 0.0),
    (0.05, -1.5, 0.0),
];

/// A 6 mm cube, optionally with cut-outs, at the single structure entry.
pub(super) fn build_cube(
    absorber: Absorber,
    pattern: HolePattern,
    ctx: &mut BuildContext<'_>,
    out: &mut BuildOutput,
) -> Result<()> {
    info!(?absorber, ?pattern, "building cube for X0 measurements");
    let placement = ctx.resolver.single_placement("X0Cube")?;

    let solid = cube(pattern)?;
    let name = solid.name().to_owned();
    let volume = ctx.volume(out, &name, solid, absorber.material(), blue())?;
    out.place(FinishedPlacement::new(volume, "Box1", placement))?;
    Ok(())
}

fn cube(pattern: HolePattern) -> Result<Solid> {
    let block = MakeBox::cube("Box1", CUBE_HALF).execute()?;
    if pattern == HolePattern::Solid {
        return Ok(block);
    }

    let corner = MakeBox::cube("Box2", CUBE_HALF / 2.0).execute()?;
    let mut solid = Subtract::new("cutBox", block, corner)
        .at(Vector3::new(0.0, 0.0, CUBE_HALF))
        .execute();

    match pattern {
        HolePattern::Solid | HolePattern::Cutout => {}
        HolePattern::Spheres => {
            for (i, (radius, y, z)) in HOLES.into_iter().enumerate() {
                let n = i + 1;
                let sphere = MakeSphere::new(format!("Sphere{n}"), 0.0, radius).execute()?;
                solid = Subtract::new(format!("cutBoxS{n}"), solid, sphere)
                    .at(Vector3::new(0.0, y, z))
                    .execute();
            }
        }
        HolePattern::Channels => {
            let channel_half = CUBE_HALF * 1.2;
            for (i, (radius, y, z)) in HOLES.into_iter().enumerate() {
                let n = i + 1;
                let tube = MakeTube::new(format!("Tub{n}"), 0.0, radius, channel_half).execute()?;
                solid = Subtract::new(format!("cutBoxS{n}"), solid, tube)
                    .with_placement(rotate_y(FRAC_PI_2), Vector3::new(0.0, y, z))
                    .execute();
            }
            let wide = MakeBox::new("Box3", channel_half, 0.2, 0.2).execute()?;
            solid = Subtract::new("cutBoxS5", solid, wide)
                .at(Vector3::new(0.0, 0.0, -1.5))
                .execute();
            let narrow = MakeBox::new("Box4", channel_half, 0.1, 0.1).execute()?;
            solid = Subtract::new("cutBoxS6", solid, narrow)
                .at(Vector3::new(0.0, 1.5, 0.0))
                .execute();
        }
    }
    Ok(solid)
}

/// Square aluminium plate whose thickness is the first free parameter
/// (1 mm when unset or zero), resting on the structure entry.
pub(super) fn build_plate(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    let thickness = match ctx.resolver.single_parameter("Plate")? {
        Some(p) if p.x != 0.0 => p.x,
        _ => {
            warn!("no plate thickness given, using 1 mm");
            1.0
        }
    };
    info!(thickness, "building aluminium plate for X0 measurements");

    let half = thickness / 2.0;
    let plate = MakeBox::new("Box1", 20.0, 20.0, half).execute()?;
    let volume = ctx.volume(out, "Box1", plate, "G4_Al", blue())?;

    let mut placement = ctx.resolver.single_placement("Plate")?;
    placement.translation.z += half;
    out.place(FinishedPlacement::new(volume, "Box1", placement))?;
    Ok(())
}

/// Two plates of different thickness side by side, for contrast tests.
pub(super) fn build_double_plate(
    absorber: Absorber,
    ctx: &mut BuildContext<'_>,
    out: &mut BuildOutput,
) -> Result<()> {
    info!(?absorber, "building double plate for contrast tests");
    let placement = ctx.resolver.single_placement("DoublePlate")?;

    let thick = MakeBox::new("Box0", 20.0, 10.0, 2.5).execute()?;
    let thin = MakeBox::new("Box1", 20.0, 10.0, 1.25).execute()?;
    let both = Union::new("bothBox", thick, thin)
        .with_transform(Transform::from_translation(Vector3::new(0.0, 20.0, 0.0)))
        .execute();

    let volume = ctx.volume(out, "bothBox", both, absorber.material(), blue())?;
    out.place(FinishedPlacement::new(volume, "bothBox", placement))?;
    Ok(())
}

fn blue() -> Appearance {
    Appearance::solid(Color::BLUE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::boolean::{classify_point_in_solid, PointClassification};
    use crate::operations::query::Volume;

    #[test]
    fn cutout_names_and_volume() {
        let solid = cube(HolePattern::Cutout).unwrap();
        assert_eq!(solid.name(), "cutBox");
        // Corner block straddles the top face, so half of it is removed.
        let expected = 216.0 - 27.0 / 2.0;
        let v = Volume::new(&solid).execute();
        assert!((v - expected).abs() < 1e-6, "got {v}");
    }

    #[test]
    fn spheres_are_subtracted_in_order() {
        let solid = cube(HolePattern::Spheres).unwrap();
        assert_eq!(solid.name(), "cutBoxS4");
        assert_eq!(
            solid.leaf_names(),
            vec!["Box1", "Box2", "Sphere1", "Sphere2", "Sphere3", "Sphere4"]
        );
        assert_eq!(
            classify_point_in_solid(&Point3::new(0.0, 1.5, -1.5), &solid),
            PointClassification::Outside
        );
        assert_eq!(
            classify_point_in_solid(&Point3::new(1.0, 1.5, -1.5), &solid),
            PointClassification::Inside
        );
    }

    #[test]
    fn channels_run_along_x() {
        let solid = cube(HolePattern::Channels).unwrap();
        assert_eq!(solid.name(), "cutBoxS6");
        assert_eq!(solid.leaf_count(), 8);
        // The largest channel crosses the whole cube.
        for x in [-2.9, 0.0, 2.9] {
            assert_eq!(
                classify_point_in_solid(&Point3::new(x, 1.5, -1.5), &solid),
                PointClassification::Outside
            );
        }
    }

    #[test]
    fn plain_cube_is_a_primitive() {
        let solid = cube(HolePattern::Solid).unwrap();
        assert!(solid.as_primitive().is_some());
        assert_eq!(solid.name(), "Box1");
    }
}
