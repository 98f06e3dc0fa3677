//! X-ray test stand: shielded sample box and lead cabinet.

use std::f64::consts::{PI, TAU};

use tracing::{info, warn};

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::{Solid, Transform};
use crate::math::units::{CM, CM3};
use crate::math::{rotate_x, Vector3};
use crate::operations::boolean::Subtract;
use crate::operations::creation::{MakeBox, MakeTube};
use crate::operations::query::Volume;
use crate::placement::{BuildOutput, FinishedPlacement};

const WALL: f64 = 3.0;

/// Collimator, lead sample box with its mass report, and a calcium test
/// object inside the box.
pub(super) fn build_box(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    let position = ctx.resolver.single_position("XRayBox")?.unwrap_or_else(|| {
        warn!("no position entry, collimator placed at the origin");
        Vector3::zeros()
    });

    let collimator = collimator()?;
    let collimator = ctx.volume(
        out,
        "CollimatorLogic",
        collimator,
        "G4_Pb",
        Appearance::solid(Color::GREY),
    )?;
    out.place(
        FinishedPlacement::new(
            collimator,
            "Collimator",
            Transform::from_translation(position),
        )
        .with_overlap_check(),
    )?;

    let (hx, hy, hz) = (15.0 * CM, 15.0 * CM, 25.0 * CM);
    let outer = MakeBox::new("XRayBox", hx, hy, hz).execute()?;
    let inner = MakeBox::new("XRayBox", hx - WALL, hy - WALL, hz - WALL).execute()?;
    let shell = Subtract::new("XRayBox", outer, inner).execute();

    let volume = Volume::new(&shell)
        .with_resolution(ctx.options.resolution)
        .execute();
    let lead = ctx.materials.resolve("G4_Pb")?;
    let mass_kg = ctx.materials.get(lead)?.mass(volume) / 1000.0;
    info!(volume_cm3 = volume / CM3, mass_kg, "XRayBox mass");
    out.report("XRayBox mass", mass_kg, "kg");

    let shell = ctx.volume(out, "XRayBoxLogic", shell, "G4_Pb", Appearance::default())?;
    out.place(
        FinishedPlacement::new(
            shell,
            "XRayBox",
            Transform::from_translation(Vector3::new(0.0, 0.0, 20.0 * CM)),
        )
        .with_overlap_check(),
    )?;

    let sample = MakeTube::new("testObj", 0.0, 2.0 * CM, 5.0 * CM)
        .with_angles(PI, TAU)
        .execute()?;
    let sample = ctx.volume(
        out,
        "testObjLogic",
        sample,
        "G4_Ca",
        Appearance::solid(Color::rgba(1.0, 0.5, 1.0, 1.0)),
    )?;
    out.place(
        FinishedPlacement::new(
            sample,
            "testObj",
            Transform::from_rotation(rotate_x(PI / 2.0)),
        )
        .inside(shell)
        .with_overlap_check(),
    )?;
    Ok(())
}

/// Lead block with a narrow axial bore.
fn collimator() -> Result<Solid> {
    let block = MakeTube::new("Collimator", 0.0, 50.0, 25.0).execute()?;
    let bore = MakeTube::new("CollimatorBore", 0.0, 1.0, 26.0).execute()?;
    Ok(Subtract::new("Collimator", block, bore).execute())
}

/// Walk-in lead cabinet, drawn as wireframe.
pub(super) fn build_cabinet(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    info!("building X-ray cabinet");

    let outer = MakeBox::new("OuterBox", 365.0, 365.0, 570.0).execute()?;
    let inner = MakeBox::new("InnerBox", 325.0, 325.0, 530.0).execute()?;
    let cabinet = Subtract::new("OuterBox-InnerBox", outer, inner).execute();

    let cabinet = ctx.volume(
        out,
        "box1_log",
        cabinet,
        "G4_Pb",
        Appearance::wireframe(Color::GREY.with_alpha(0.05)),
    )?;
    out.place(FinishedPlacement::new(
        cabinet,
        "cabinet_phys",
        Transform::identity(),
    ))?;
    Ok(())
}
