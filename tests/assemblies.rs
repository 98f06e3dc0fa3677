#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use structura::error::{ImportError, StructureError};
use structura::geometry::Transform;
use structura::import::{AssemblyDocument, AssemblyLibrary, ChildRecord, VolumeRecord};
use structura::math::{rotate_x, rotation_from_degrees, Vector3};
use structura::operations::creation::MakeBox;
use structura::{AssetPaths, AssetRef, MaterialCatalog, PlacementParameters, Scene, StructureBuilder};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn plate(name: &str) -> VolumeRecord {
    VolumeRecord::new(MakeBox::new(name, 40.0, 2.0, 1.0).execute().unwrap(), "G4_Al")
}

/// A DUT box document with twelve plates under each of the two roots.
fn dut_library() -> AssemblyLibrary {
    let assets = AssetPaths::default();
    let mut main = VolumeRecord::new(MakeBox::cube("box", 100.0).execute().unwrap(), "G4_AIR");
    let mut reference = main.clone();
    for i in 0..12 {
        let y = 10.0 * f64::from(i);
        main = main.with_child(ChildRecord::new(format!("part{i}"), "Plate").at([0.0, y, 5.0]));
        reference = reference.with_child(
            ChildRecord::new(format!("ref{i}"), "Plate")
                .at([0.0, y, 5.0])
                .rotated([90.0, 0.0, 0.0]),
        );
    }
    let document = AssemblyDocument::new()
        .with_volume(&assets.dut_box.root, main)
        .with_volume(&assets.dut_box_reference.root, reference)
        .with_volume("Plate", plate("plate"));
    AssemblyLibrary::new().with_document(assets.dut_box.path, document)
}

#[test]
fn telescope_box_aligns_with_detector() {
    init_tracing();
    let params = PlacementParameters::new()
        .with_position(1, Vector3::new(0.0, 3.0, 0.0))
        .with_position(2, Vector3::new(0.0, 4.0, 0.0));
    let scene = Scene::new().with_detector(
        504,
        Transform::from_translation(Vector3::new(0.0, 0.0, 300.0)),
        None,
    );
    let library = dut_library();
    let mut catalog = MaterialCatalog::new();

    let out = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .build(2, &mut catalog)
        .unwrap();

    assert_eq!(out.len(), 2 + 12 + 2);
    assert_eq!(out.volumes().count(), 3);

    let far = out.placement("box2_phys").unwrap();
    assert_eq!(far.replica, 1);
    assert_relative_eq!(far.transform.translation, Vector3::new(0.0, 50.0, 827.0));

    assert_relative_eq!(
        out.placement("part0").unwrap().transform.translation,
        Vector3::new(0.0, 7.0, 305.0)
    );
    let front = out.placement("aluSheet_phys_5").unwrap();
    assert_relative_eq!(front.transform.translation, Vector3::new(0.0, -8.0, 304.0));
    let back = out.placement("aluSheet_phys_11").unwrap();
    assert_relative_eq!(back.transform.translation, Vector3::new(0.0, 52.0, 306.0));
    assert_eq!(back.replica, 1);
}

#[test]
fn telescope_box_without_detector_keeps_authored_depth() {
    let params = PlacementParameters::new();
    let scene = Scene::new();
    let library = dut_library();
    let mut catalog = MaterialCatalog::new();

    let out = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .build(2, &mut catalog)
        .unwrap();
    assert_relative_eq!(
        out.placement("part3").unwrap().transform.translation,
        Vector3::new(0.0, 30.0, 5.0)
    );
}

#[test]
fn reference_assembly_keeps_authored_transforms() {
    let params = PlacementParameters::new().with_position(1, Vector3::new(0.0, 99.0, 0.0));
    let scene = Scene::new();
    let library = dut_library();
    let mut catalog = MaterialCatalog::new();

    let out = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .build(7, &mut catalog)
        .unwrap();

    assert_eq!(out.len(), 12);
    assert_eq!(out.volumes().count(), 1);
    let child = out.placement("ref2").unwrap();
    assert_relative_eq!(child.transform.translation, Vector3::new(0.0, 20.0, 5.0));
    assert_relative_eq!(
        child.transform.rotation,
        rotate_x(std::f64::consts::FRAC_PI_2),
        epsilon = 1e-12
    );
    assert!(child.check_overlaps);
}

#[test]
fn holder_gets_clearance_for_linked_detector() {
    init_tracing();
    let assets = AssetPaths::default();
    let holder = VolumeRecord::new(
        MakeBox::new("EUDETAlPlane", 50.0, 50.0, 5.0).execute().unwrap(),
        "G4_Al",
    );
    let library = AssemblyLibrary::new().with_document(
        &assets.eudet_holder.path,
        AssemblyDocument::new().with_volume(&assets.eudet_holder.root, holder),
    );

    let tilt = rotation_from_degrees([0.0, 0.0, 30.0]);
    let scene = Scene::new().with_detector(
        300,
        Transform::new(tilt, Vector3::new(0.0, 0.0, 100.0)),
        Some(MakeBox::cube("wrapper", 10.0).execute().unwrap()),
    );
    let params = PlacementParameters::new()
        .with_position(1, Vector3::new(0.0, 0.0, 50.0))
        .with_detector_link(1, 300)
        .with_position(2, Vector3::new(0.0, 0.0, 80.0));
    let mut catalog = MaterialCatalog::new();

    let out = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .build(1, &mut catalog)
        .unwrap();

    assert_eq!(out.len(), 2);
    let cut = out.placed_volume("test_phys_1").unwrap();
    assert_eq!(cut.name, assets.eudet_holder.root);
    assert!(!cut.appearance.visible);
    let node = cut.solid.as_boolean().unwrap();
    assert_eq!(cut.solid.name(), "EUDETAlPlane");
    assert_relative_eq!(node.transform().translation, Vector3::new(0.0, 0.0, 50.0));
    assert_eq!(node.transform().rotation, tilt);

    // Unlinked entry keeps the uncut holder.
    let plain = out.placed_volume("test_phys_2").unwrap();
    assert!(plain.solid.as_primitive().is_some());
    assert_relative_eq!(
        out.placement("test_phys_2").unwrap().transform.translation,
        Vector3::new(0.0, 0.0, 80.0)
    );
}

#[test]
fn missing_assembly_file_fails_the_build() {
    let params = PlacementParameters::new();
    let scene = Scene::new();
    let mut catalog = MaterialCatalog::new();
    let assets = AssetPaths {
        dut_box_reference: AssetRef::new("no/such/assembly.json", "Root"),
        ..AssetPaths::default()
    };

    let err = StructureBuilder::new(&params, &scene)
        .with_assets(assets)
        .build(7, &mut catalog)
        .unwrap_err();
    assert!(matches!(
        err,
        StructureError::Import(ImportError::AssetNotFound(_))
    ));
}

#[test]
fn missing_root_volume_is_reported() {
    let params = PlacementParameters::new();
    let scene = Scene::new();
    let mut catalog = MaterialCatalog::new();
    let library = dut_library();
    let assets = AssetPaths {
        dut_box_reference: AssetRef::new(AssetPaths::default().dut_box.path, "Structure_0"),
        ..AssetPaths::default()
    };

    let err = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .with_assets(assets)
        .build(7, &mut catalog)
        .unwrap_err();
    assert!(matches!(
        err,
        StructureError::Import(ImportError::AssetVolumeNotFound { volume, .. }) if volume == "Structure_0"
    ));
}

#[test]
fn each_holder_keeps_its_own_cut() {
    let assets = AssetPaths::default();
    let holder = VolumeRecord::new(
        MakeBox::new("EUDETAlPlane", 50.0, 50.0, 5.0).execute().unwrap(),
        "G4_Al",
    );
    let library = AssemblyLibrary::new().with_document(
        &assets.eudet_holder.path,
        AssemblyDocument::new().with_volume(&assets.eudet_holder.root, holder),
    );
    let wrapper = || Some(MakeBox::cube("wrapper", 10.0).execute().unwrap());
    let scene = Scene::new()
        .with_detector(300, Transform::from_translation(Vector3::new(0.0, 0.0, 100.0)), wrapper())
        .with_detector(301, Transform::from_translation(Vector3::new(0.0, 0.0, 450.0)), wrapper());
    let params = PlacementParameters::new()
        .with_position(1, Vector3::new(0.0, 0.0, 50.0))
        .with_detector_link(1, 300)
        .with_position(2, Vector3::new(0.0, 0.0, 350.0))
        .with_detector_link(2, 301);
    let mut catalog = MaterialCatalog::new();

    let out = StructureBuilder::new(&params, &scene)
        .with_assemblies(&library)
        .build(1, &mut catalog)
        .unwrap();

    assert_eq!(out.volumes().count(), 2);
    let first = out.placement("test_phys_1").unwrap();
    let second = out.placement("test_phys_2").unwrap();
    assert_ne!(first.volume, second.volume);
    for (label, expected) in [("test_phys_1", 50.0), ("test_phys_2", 100.0)] {
        let cut = out.placed_volume(label).unwrap().solid.as_boolean().unwrap();
        assert_relative_eq!(cut.transform().translation, Vector3::new(0.0, 0.0, expected));
    }
}
