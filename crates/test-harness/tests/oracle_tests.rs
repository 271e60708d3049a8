//! Tests for verification oracles.

use meshing::Mesh;
use meshing_kernel::geometry::Point2d;
use meshing_kernel::shapes::Boundary;
use meshing_tessellation::Triangulation;
use test_harness::helpers::rect_hole;
use test_harness::oracle::*;
use test_harness::ModelBuilder;

/// A 10 x 10 x 10 box built with the fan engine.
fn build_mock_box() -> (ModelBuilder, String) {
    let mut m = ModelBuilder::mock();
    m.rect_profile("sk", 0.0, 0.0, 10.0, 10.0).unwrap();
    m.extrude("box", "sk", 10.0).unwrap();
    (m, "box".to_string())
}

fn ring(coords: &[(f64, f64)]) -> Vec<Point2d> {
    coords.iter().map(|&c| Point2d::from(c)).collect()
}

// ── Boundary Oracle Tests ───────────────────────────────────────────────

#[test]
fn closed_rings_passes_for_rectangle() {
    let (m, _) = build_mock_box();
    let result = check_closed_rings(m.boundary("sk").unwrap());
    assert!(result.passed, "Rectangle ring should be closed: {}", result.detail);
}

#[test]
fn closed_rings_fails_for_open_ring() {
    let boundary = Boundary::from_rings(ring(&[(0., 0.), (1., 0.), (1., 1.), (0., 1.)]), vec![]);
    let result = check_closed_rings(&boundary);
    assert!(!result.passed);
    assert!(result.detail.contains("open"), "{}", result.detail);
}

#[test]
fn consecutive_duplicates_detected() {
    let boundary = Boundary::from_rings(
        ring(&[(0., 0.), (1., 0.), (1., 0.), (1., 1.), (0., 0.)]),
        vec![],
    );
    let result = check_no_consecutive_duplicates(&boundary);
    assert!(!result.passed);
    assert!(result.detail.contains("index 1"), "{}", result.detail);
}

// ── Triangulation Oracle Tests ──────────────────────────────────────────

#[test]
fn area_preserved_with_hole() {
    let mut poly = test_harness::helpers::rect_profile(0.0, 0.0, 10.0, 10.0);
    poly.add_hole(rect_hole(2.0, 2.0, 2.0, 2.0)).unwrap();
    let mut m = ModelBuilder::new();
    m.profile("plate", poly).unwrap();

    let triangulation = m.triangulate("plate").unwrap();
    let result = check_area_preserved(m.boundary("plate").unwrap(), &triangulation, 1e-9);
    assert!(result.passed, "Area should be 96: {}", result.detail);
    assert!((result.value.unwrap() - 96.0).abs() < 1e-9);
}

#[test]
fn area_preserved_fails_for_missing_triangle() {
    let (m, _) = build_mock_box();
    let mut triangulation = m.triangulate("sk").unwrap();
    triangulation.faces.pop();
    let result = check_area_preserved(m.boundary("sk").unwrap(), &triangulation, 1e-9);
    assert!(!result.passed);
}

#[test]
fn ccw_triangles_flags_clockwise_face() {
    let triangulation = Triangulation::new(
        ring(&[(0., 0.), (1., 0.), (0., 1.)]),
        vec![[0, 2, 1]],
    );
    let result = check_ccw_triangles(&triangulation);
    assert!(!result.passed, "Clockwise face should be flagged");
}

// ── Mesh Oracle Tests ───────────────────────────────────────────────────

#[test]
fn watertight_passes_for_box() {
    let (m, name) = build_mock_box();
    let result = check_watertight_mesh(m.mesh(&name).unwrap());
    assert!(result.passed, "Box should be watertight: {}", result.detail);
    assert!(result.detail.contains("18 edges"), "{}", result.detail);
}

#[test]
fn watertight_fails_for_empty_mesh() {
    let result = check_watertight_mesh(&Mesh::new());
    assert!(!result.passed);
}

#[test]
fn winding_and_orientation_pass_for_box() {
    let (m, name) = build_mock_box();
    let mesh = m.mesh(&name).unwrap();
    let winding = check_consistent_winding(mesh);
    assert!(winding.passed, "{}", winding.detail);
    let outward = check_outward_orientation(mesh);
    assert!(outward.passed, "{}", outward.detail);
    assert!((outward.value.unwrap() - 1000.0).abs() < 1e-6);
}

#[test]
fn mirrored_box_winds_inward() {
    let (mut m, name) = build_mock_box();
    m.scale(&name, -1.0, 1.0, 1.0).unwrap();
    let mesh = m.mesh(&name).unwrap();

    assert!(check_consistent_winding(mesh).passed);
    let outward = check_outward_orientation(mesh);
    assert!(!outward.passed, "Mirror should flip orientation: {}", outward.detail);
    assert!(outward.value.unwrap() < 0.0);
}

#[test]
fn consistent_normals_requires_fresh_normals() {
    let (mut m, name) = build_mock_box();
    assert!(check_consistent_normals(m.mesh(&name).unwrap()).passed);

    m.rotate_y(&name, 30.0).unwrap();
    let stale = check_consistent_normals(m.mesh(&name).unwrap());
    assert!(!stale.passed);
    assert!(stale.detail.contains("stale"));

    m.update_normals(&name).unwrap();
    let fresh = check_consistent_normals(m.mesh(&name).unwrap());
    assert!(fresh.passed, "{}", fresh.detail);
}

#[test]
fn flattened_box_has_degenerate_faces() {
    let (mut m, name) = build_mock_box();
    m.scale(&name, 1.0, 1.0, 0.0).unwrap();
    let mesh = m.mesh(&name).unwrap();
    assert!(!check_no_degenerate_triangles(mesh).passed);
    assert!(!check_unit_normals(mesh).passed, "Degenerate faces get zero normals");
}

#[test]
fn homogeneous_rows_survive_transforms() {
    let (mut m, name) = build_mock_box();
    m.rotate_x(&name, 45.0).unwrap();
    m.translate(&name, 3.0, -2.0, 1.0).unwrap();
    m.scale(&name, 2.0, 0.5, 3.0).unwrap();
    let result = check_homogeneous_rows(m.mesh(&name).unwrap());
    assert!(result.passed, "{}", result.detail);
}

#[test]
fn valid_indices_pass_for_box() {
    let (m, name) = build_mock_box();
    let result = check_valid_indices(m.mesh(&name).unwrap());
    assert!(result.passed, "{}", result.detail);
}

#[test]
fn bounding_box_matches_and_mismatches() {
    let (m, name) = build_mock_box();
    let mesh = m.mesh(&name).unwrap();
    let ok = check_bounding_box(mesh, [0.0; 3], [10.0; 3], 1e-9);
    assert!(ok.passed, "{}", ok.detail);

    let bad = check_bounding_box(mesh, [0.0; 3], [10.0, 10.0, 5.0], 1e-3);
    assert!(!bad.passed);
    assert!(bad.detail.contains("max[2]"), "{}", bad.detail);
}

// ── Composite ───────────────────────────────────────────────────────────

#[test]
fn run_all_mesh_checks_passes_for_box() {
    let (m, name) = build_mock_box();
    let verdicts = run_all_mesh_checks(m.mesh(&name).unwrap());
    assert_eq!(verdicts.len(), 7);
    for v in &verdicts {
        assert!(v.passed, "{} failed: {}", v.oracle_name, v.detail);
    }
}

#[test]
fn run_boundary_checks_passes_for_rectangle() {
    let (m, _) = build_mock_box();
    for v in run_boundary_checks(m.boundary("sk").unwrap()) {
        assert!(v.passed, "{} failed: {}", v.oracle_name, v.detail);
    }
}
