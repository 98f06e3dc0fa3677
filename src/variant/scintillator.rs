use tracing::info;

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::Transform;
use crate::math::Vector3;
use crate::operations::creation::MakeBox;
use crate::placement::{BuildOutput, FinishedPlacement};

/// Places one polystyrene trigger scintillator per position, numbered from 1.
pub(crate) fn place_scintillators(
    ctx: &mut BuildContext<'_>,
    out: &mut BuildOutput,
    positions: &[Vector3],
) -> Result<()> {
    info!(count = positions.len(), "building scintillators");
    for (i, position) in positions.iter().enumerate() {
        let n = i + 1;
        let slab = MakeBox::new("scintb", 11.0, 5.4, 3.0).execute()?;
        let slab = ctx.volume(
            out,
            &format!("scint{n}_log"),
            slab,
            "G4_POLYSTYRENE",
            Appearance::solid(Color::MAGENTA),
        )?;
        out.place(
            FinishedPlacement::new(slab, format!("Scint{n}"), Transform::from_translation(*position))
                .with_overlap_check(),
        )?;
    }
    Ok(())
}
