use tracing::info;

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::Transform;
use crate::material::recipes::BEAM_GAS;
use crate::operations::creation::MakeTube;
use crate::placement::{BuildOutput, FinishedPlacement};

/// Beryllium beam pipe with its rarefied gas core, both at the origin.
pub(super) fn build(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    info!("building beam pipe");

    let pipe = MakeTube::new("beampipe", 27.4, 28.0, 130.0).execute()?;
    let pipe = ctx.volume(
        out,
        "Berylium",
        pipe,
        "G4_Be",
        Appearance::solid(Color::MAGENTA),
    )?;
    out.place(FinishedPlacement::new(pipe, "beampipe", Transform::identity()))?;

    let core = MakeTube::new("innerbeampipe", 0.0, 27.4, 150.0).execute()?;
    let core = ctx.volume(out, "vacuum", core, BEAM_GAS, Appearance::invisible())?;
    out.place(FinishedPlacement::new(core, "vacuum", Transform::identity()))?;

    Ok(())
}
