use tracing::info;

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::Result;
use crate::geometry::Transform;
use crate::math::units::UM;
use crate::math::Vector3;
use crate::operations::creation::MakeBox;
use crate::placement::{BuildOutput, FinishedPlacement};

/// Axial offsets of the front and back foil from the structure entry.
const FRONT_OFFSET: f64 = -3.0125;
const BACK_OFFSET: f64 = 12.0125;

/// A pair of mylar foils around every structure entry.
pub(super) fn build(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    let look = Appearance::solid(Color::WHITE.with_alpha(0.5));
    let entries: Vec<_> = ctx.resolver.entries().collect();
    info!(windows = entries.len(), "building mylar windows");

    for entry in entries {
        let id = entry.id;
        for (side, offset) in [("fr", FRONT_OFFSET), ("bk", BACK_OFFSET)] {
            let foil = MakeBox::new(format!("{side}_box_{id}"), 22.5, 32.5, 25.0 * UM).execute()?;
            let foil = ctx.volume(out, &format!("{side}_log_{id}"), foil, "G4_MYLAR", look)?;
            let position = entry.position + Vector3::new(0.0, 0.0, offset);
            out.place(
                FinishedPlacement::new(
                    foil,
                    format!("test_{side}_phys_{id}"),
                    Transform::from_translation(position),
                )
                .with_overlap_check(),
            )?;
        }
    }
    Ok(())
}
