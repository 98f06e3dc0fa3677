//! Variants that embed authored assemblies.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::appearance::{Appearance, Color};
use crate::builder::BuildContext;
use crate::error::{PlacementError, Result};
use crate::geometry::{Solid, Transform};
use crate::import::{AssemblyHandle, AxisShift};
use crate::math::{Rotation3, Vector3};
use crate::operations::boolean::Subtract;
use crate::operations::creation::MakeBox;
use crate::placement::{BuildOutput, FinishedPlacement, VolumeId};

const PART_COLOR: Color = Color::rgba(0.5, 0.5, 0.5, 0.25);

/// Detector whose wrapper sets the axial position of the DUT box.
const DUT_DETECTOR: i32 = 504;

/// Child indices of the DUT box side plates that get aluminium foil.
const SIDE_PLATES: [usize; 2] = [5, 11];

/// Telescope-plane holder with a clearance cut for the linked detector, one
/// per structure entry.
///
/// Each entry gets its own logical volume carrying its own cut; entries never
/// share one volume whose solid is replaced by the last entry's cut.
pub(super) fn build_holder(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    let handle = ctx.import(&ctx.assets.eudet_holder)?;
    let appearance = Appearance::solid(Color::WHITE).with_visibility(false);

    let entries: Vec<_> = ctx.resolver.entries().collect();
    for entry in entries {
        let plane = handle.root.solid.clone();
        let solid = match clearance(ctx, entry.id) {
            Ok((offset, wrapper)) => Subtract::new("EUDETAlPlane", plane, wrapper)
                .with_transform(offset)
                .execute(),
            Err(err) => {
                warn!(structure = entry.id, %err, "holder placed without clearance cut");
                plane
            }
        };

        let volume = ctx.volume(
            out,
            &handle.root.name,
            solid,
            &handle.root.material,
            appearance,
        )?;
        let rotation = entry.rotation.unwrap_or_else(Rotation3::identity);
        out.place(
            FinishedPlacement::new(
                volume,
                format!("test_phys_{}", entry.id),
                Transform::new(rotation, entry.position),
            )
            .with_overlap_check(),
        )?;
    }
    Ok(())
}

/// Wrapper of the detector linked to `structure`, with its transform
/// relative to the structure entry.
fn clearance(
    ctx: &BuildContext<'_>,
    structure: i32,
) -> std::result::Result<(Transform, Solid), PlacementError> {
    let detector = ctx.resolver.linked_detector(structure)?;
    let offset = ctx.resolver.relative_offset(structure)?;
    let wrapper = ctx
        .resolver
        .detectors()
        .wrapper_solid(detector)
        .ok_or(PlacementError::MissingParameterEntry {
            map: "wrappers",
            id: detector,
        })?;
    Ok((offset, wrapper))
}

/// Two telescope arm boxes plus the DUT box aligned with detector 504.
pub(super) fn build_telescope_box(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    info!("building telescope box");

    let outer = MakeBox::new("BoxTT1", 75.0, 150.0, 216.0).execute()?;
    let inner = MakeBox::new("nBoxTT1", 71.0, 146.0, 212.0).execute()?;
    let window = MakeBox::new("window", 30.0, 100.0, 215.96).execute()?;
    let shell = Subtract::new("BoxTT1-nBoxTT1", outer, inner).execute();
    let arm = Subtract::new("BoxTT1tmp-window", shell, window).execute();

    let arm = ctx.volume(
        out,
        "box1_log",
        arm,
        "G4_Al",
        Appearance::solid(Color::GREY.with_alpha(0.05)),
    )?;
    out.place(FinishedPlacement::new(
        arm,
        "box1_phys",
        Transform::from_translation(Vector3::new(0.0, 50.0, 216.0)),
    ))?;
    out.place(
        FinishedPlacement::new(
            arm,
            "box2_phys",
            Transform::from_translation(Vector3::new(0.0, 50.0, 827.0)),
        )
        .replica(1),
    )?;

    let handle = ctx.import(&ctx.assets.dut_box)?;

    // Every entry contributes its y to the vertical alignment.
    let lift: f64 = ctx.resolver.entries().map(|e| e.position.y).sum();
    let depth = match ctx.resolver.detector_transform(DUT_DETECTOR) {
        Ok(t) => t.translation.z,
        Err(err) => {
            warn!(%err, "DUT box left at its authored depth");
            0.0
        }
    };
    let shift = AxisShift::none().with_y(lift).with_z(depth);

    let sheet = MakeBox::new("aluSheet", 99.5, 20.0, 0.01).execute()?;
    let sheet = ctx.volume(out, "aluSheet_log", sheet, "G4_Al", Appearance::solid(PART_COLOR))?;

    let volumes = place_children(ctx, out, &handle, shift)?;
    for index in SIDE_PLATES {
        let Some(child) = handle.children.get(index) else {
            warn!(index, "DUT box has no side plate at this index");
            continue;
        };
        let mut transform = child.reinsert(shift);
        transform.translation.y -= 65.0;
        transform.translation.z += if index == SIDE_PLATES[0] { -1.0 } else { 1.0 };
        out.place(
            FinishedPlacement::new(sheet, format!("aluSheet_phys_{index}"), transform)
                .replica(1)
                .with_overlap_check(),
        )?;
    }
    info!(parts = volumes, "placed DUT box");
    Ok(())
}

/// Every child of the reference DUT box at its authored transform.
pub(super) fn build_reference(ctx: &mut BuildContext<'_>, out: &mut BuildOutput) -> Result<()> {
    let handle = ctx.import(&ctx.assets.dut_box_reference)?;
    place_children(ctx, out, &handle, AxisShift::none())?;
    Ok(())
}

/// Places each child of `handle` in the world. Children that share an
/// imported volume share one logical volume. Returns the number of distinct
/// volumes.
fn place_children(
    ctx: &mut BuildContext<'_>,
    out: &mut BuildOutput,
    handle: &AssemblyHandle,
    shift: AxisShift,
) -> Result<usize> {
    let mut volumes: HashMap<&str, VolumeId> = HashMap::new();
    for child in &handle.children {
        let volume = match volumes.get(child.volume.name.as_str()) {
            Some(&id) => id,
            None => {
                let id = ctx.volume(
                    out,
                    &child.volume.name,
                    child.volume.solid.clone(),
                    &child.volume.material,
                    Appearance::solid(PART_COLOR),
                )?;
                volumes.insert(&child.volume.name, id);
                id
            }
        };
        out.place(
            FinishedPlacement::new(volume, child.name.clone(), child.reinsert(shift))
                .with_overlap_check(),
        )?;
    }
    Ok(volumes.len())
}
