use tracing::{info, warn};

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::{Solid, Transform};
use crate::material::recipes::{BRASS, STAINLESS_STEEL};
use crate::math::Vector3;
use crate::operations::boolean::Subtract;
use crate::operations::creation::{MakeBox, MakeTube};
use crate::placement::{BuildOutput, FinishedPlacement};

use super::CalibrationSource;

const HOLDER_COLOR: Color = Color::rgba(0.5, 0.5, 0.5, 0.25);
const SHIELD_COLOR: Color = Color::rgba(0.5, 0.1, 0.3, 0.25);

/// Source holder above a lead shielding block.
///
/// Both parts sit at fixed world positions. Supplied structure entries are
/// not consulted, so a configured position has no effect on this fixture.
pub(super) fn build(
    source: CalibrationSource,
    ctx: &mut BuildContext<'_>,
    out: &mut BuildOutput,
) -> Result<()> {
    info!(?source, "building calibration source");
    if !ctx.resolver.parameters().is_empty() {
        warn!(?source, "calibration fixtures ignore structure entries");
    }

    let above = Vector3::new(0.0, 0.0, 31.0);
    let (holder, material, position) = match source {
        CalibrationSource::Am241Gamma => (drilled_holder(2.5, -13.0)?, BRASS, above),
        CalibrationSource::Fe55 => (drilled_holder(5.0, -10.0)?, "G4_PLEXIGLASS", above),
        CalibrationSource::Cd109 => (drilled_holder(2.5, -13.0)?, "G4_Al", above),
        CalibrationSource::Am241Alpha => (
            MakeTube::new("disk", 0.0, 9.0, 2.5).execute()?,
            STAINLESS_STEEL,
            Vector3::new(0.0, -22.25, 22.0),
        ),
    };

    let holder = ctx.volume(out, "box1_log", holder, material, Appearance::solid(HOLDER_COLOR))?;
    out.place(FinishedPlacement::new(
        holder,
        "box1_phys",
        Transform::from_translation(position),
    ))?;

    let shield = MakeBox::new("BoxTT1", 50.0, 100.0, 25.0).execute()?;
    let shield = ctx.volume(out, "box2_log", shield, "G4_Pb", Appearance::solid(SHIELD_COLOR))?;
    out.place(FinishedPlacement::new(
        shield,
        "box2_phys",
        Transform::from_translation(Vector3::new(0.0, 0.0, -30.0)),
    ))?;

    Ok(())
}

/// Cylindrical holder with an off-axis source pocket.
fn drilled_holder(hole_radius: f64, hole_z: f64) -> Result<Solid> {
    let body = MakeTube::new("supportTop", 0.0, 29.0, 13.5).execute()?;
    let hole = MakeTube::new("hole", 0.0, hole_radius, 5.0).execute()?;
    Ok(Subtract::new("HolderPrim-hole", body, hole)
        .at(Vector3::new(0.0, -22.5, hole_z))
        .execute())
}
