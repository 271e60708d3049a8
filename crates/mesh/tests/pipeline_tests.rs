//! End-to-end tests: boundary -> extrusion -> vectors -> normals -> transforms.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use meshing::kernel::geometry::{Point3d, Transform, Vec3};
use meshing::kernel::shapes::{Arc, ArcOptions, Hole, Line, Polygon, Rectangle};
use meshing::tessellation::FanTriangulator;
use meshing::{ExportFormat, ExportMode, Mesh, MeshError, MeshingConfig, TransformStack};

fn unit_square_boundary(size: f64) -> Polygon {
    Polygon::from_flat_coords(&[0.0, 0.0, size, 0.0, size, size, 0.0, size]).unwrap()
}

fn solid_centroid(mesh: &Mesh) -> Point3d {
    let corners: Vec<Point3d> = mesh.vectors().iter_positions().flatten().collect();
    Point3d::centroid(&corners).unwrap()
}

fn assert_outward_unit_normals(mesh: &Mesh) {
    let centroid = solid_centroid(mesh);
    for (corners, n) in mesh.vectors().iter_positions().zip(mesh.normals()) {
        assert_relative_eq!(n.length(), 1.0, epsilon = 1e-6);
        let face_center = Point3d::centroid(&corners).unwrap();
        assert!(n.dot(&(face_center - centroid)) > 0.0, "inward normal {n:?}");
    }
}

// ---------------------------------------------------------------------------
// Extrusion scenario
// ---------------------------------------------------------------------------

#[test]
fn square_extruded_by_five() {
    let mut poly = unit_square_boundary(10.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 5.0).unwrap().update_normals();

    assert!(mesh.vertices().iter().all(|p| p.z == 0.0 || p.z == 5.0));
    assert!(mesh.vertices().iter().any(|p| p.z == 0.0));
    assert!(mesh.vertices().iter().any(|p| p.z == 5.0));
    assert_eq!(mesh.normals().len(), mesh.faces().len());
    assert!(mesh
        .vectors()
        .rows()
        .iter()
        .flatten()
        .all(|row| row[3] == 1.0));
    assert_outward_unit_normals(&mesh);
}

#[test]
fn negative_height_extrudes_downward() {
    let mut poly = unit_square_boundary(4.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), -3.0).unwrap().update_normals();

    let bb = mesh.bounding_box().unwrap();
    assert_abs_diff_eq!(bb.min.z, -3.0);
    assert_abs_diff_eq!(bb.max.z, 0.0);
    assert_outward_unit_normals(&mesh);
}

#[test]
fn polygon_with_hole() {
    let mut poly = Polygon::rectangle([0.0, 0.0], [10.0, 10.0]);
    poly.add_hole(Rectangle::new([4.0, 4.0], [6.0, 6.0]).to_hole()).unwrap();

    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 2.0).unwrap().update_normals();

    // Both caps: (100 - 4) each; outer walls 40 * 2; hole walls 8 * 2.
    let area: f64 = mesh
        .vectors()
        .iter_positions()
        .map(|[a, b, c]| 0.5 * (b - a).cross(&(c - a)).length())
        .sum();
    assert_relative_eq!(area, 2.0 * 96.0 + 80.0 + 16.0, epsilon = 1e-9);

    // Hole walls face the hole's center, away from the material.
    let hole_center = Point3d::new(5.0, 5.0, 1.0);
    let inner_walls = mesh
        .vectors()
        .iter_positions()
        .zip(mesh.normals())
        .filter(|(corners, n)| n.z == 0.0 && corners.iter().all(|p| (4.0..=6.0).contains(&p.x) && (4.0..=6.0).contains(&p.y)))
        .collect::<Vec<_>>();
    assert_eq!(inner_walls.len(), 8);
    for (corners, n) in inner_walls {
        let face_center = Point3d::centroid(&corners).unwrap();
        assert!(n.dot(&(hole_center - face_center)) > 0.0);
    }
}

#[test]
fn rounded_slot_from_lines_and_arcs() {
    let mut poly = Polygon::new();
    poly.append(Line::new([0.0, 0.0], [10.0, 0.0])).unwrap();
    poly.append(
        Arc::with_options([10.0, 0.0], [10.0, 4.0], [10.0, 2.0], ArcOptions::default().clockwise(false)).unwrap(),
    )
    .unwrap();
    poly.append(Line::new([10.0, 4.0], [0.0, 4.0])).unwrap();
    poly.append(
        Arc::with_options([0.0, 4.0], [0.0, 0.0], [0.0, 2.0], ArcOptions::default().clockwise(false)).unwrap(),
    )
    .unwrap();

    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap().update_normals();
    assert!(mesh.normals().iter().all(|n| (n.length() - 1.0).abs() < 1e-6));
    let bb = mesh.bounding_box().unwrap();
    assert_abs_diff_eq!(bb.min.x, -2.0, epsilon = 1e-9);
    assert_abs_diff_eq!(bb.max.x, 12.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Normals
// ---------------------------------------------------------------------------

#[test]
fn update_normals_is_idempotent() {
    let mut poly = unit_square_boundary(3.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 2.0).unwrap();
    mesh.rotate_y(33.0).unwrap();

    let first = mesh.update_normals().normals().to_vec();
    let second = mesh.update_normals().normals().to_vec();
    let bits = |ns: &[Vec3]| ns.iter().flat_map(|n| n.to_array().map(f64::to_bits)).collect::<Vec<_>>();
    assert_eq!(bits(&first), bits(&second));
}

#[test]
fn degenerate_face_normal_is_zero() {
    let mut poly = unit_square_boundary(1.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap();
    // Flatten everything onto the z axis: every face collapses.
    mesh.scale(0.0, 0.0, 1.0).unwrap().update_normals();
    assert_eq!(mesh.normals().len(), mesh.faces().len());
    assert!(mesh.normals().iter().all(|n| n.is_zero()));
}

#[test]
fn rotation_leaves_normals_stale_until_recomputed() {
    let mut poly = unit_square_boundary(1.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap().update_normals();
    let before = mesh.normals().to_vec();

    mesh.rotate_x(90.0).unwrap();
    assert_eq!(mesh.normals(), &before[..]);
    assert_ne!(mesh.face_normals().as_ref(), &before[..]);

    mesh.update_normals();
    assert_outward_unit_normals(&mesh);
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

#[test]
fn translations_compose_additively() {
    let mut poly = unit_square_boundary(2.0);
    let boundary = poly.finalize().unwrap().clone();

    let mut stepwise = Mesh::new();
    stepwise.extrude(&boundary, 1.0).unwrap();
    stepwise.translate(1.5, 0.0, 0.0).unwrap().translate(2.25, 0.0, 0.0).unwrap();

    let mut direct = Mesh::new();
    direct.extrude(&boundary, 1.0).unwrap();
    direct.translate(3.75, 0.0, 0.0).unwrap();

    for (a, b) in stepwise.vectors().rows().iter().flatten().zip(direct.vectors().rows().iter().flatten()) {
        for k in 0..4 {
            assert_abs_diff_eq!(a[k], b[k], epsilon = 1e-12);
        }
    }
}

#[test]
fn transforms_apply_in_call_order() {
    let mut poly = unit_square_boundary(1.0);
    let boundary = poly.finalize().unwrap().clone();

    let mut a = Mesh::new();
    a.extrude(&boundary, 1.0).unwrap().translate(5.0, 0.0, 0.0).unwrap().rotate_z(90.0).unwrap();
    let mut b = Mesh::new();
    b.extrude(&boundary, 1.0).unwrap().rotate_z(90.0).unwrap().translate(5.0, 0.0, 0.0).unwrap();

    // translate then rotate moves the solid onto the +y axis
    let ca = solid_centroid(&a);
    assert!(ca.y > 4.0 && ca.x.abs() < 1.0);
    let cb = solid_centroid(&b);
    assert!(cb.x > 4.0);
}

#[test]
fn stack_matches_mesh_calls() {
    let mut poly = unit_square_boundary(2.0);
    let boundary = poly.finalize().unwrap().clone();

    let mut direct = Mesh::new();
    direct
        .extrude(&boundary, 3.0)
        .unwrap()
        .scale(1.0, 2.0, 0.5)
        .unwrap()
        .rotate_x(45.0)
        .unwrap()
        .translate(0.0, 1.0, -1.0)
        .unwrap();

    let mut stack = TransformStack::new();
    stack.scale(1.0, 2.0, 0.5).unwrap().rotate_x(45.0).unwrap().translate(0.0, 1.0, -1.0).unwrap();
    let mut stacked = Mesh::new();
    stacked.extrude(&boundary, 3.0).unwrap().apply_stack(&stack);

    assert_eq!(direct.vectors(), stacked.vectors());

    let mut generic = Mesh::new();
    generic.extrude(&boundary, 3.0).unwrap().apply_transform(&stack.combined()).unwrap();
    for (a, b) in generic.vectors().rows().iter().flatten().zip(direct.vectors().rows().iter().flatten()) {
        assert_abs_diff_eq!((a - b).norm(), 0.0, epsilon = 1e-9);
    }
}

#[test]
fn non_finite_amounts_are_invalid_arguments() {
    let mut mesh = Mesh::new();
    let err = mesh.scale(f64::NAN, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, MeshError::InvalidArgument { parameter: "sx", .. }));
    let mut matrix = nalgebra::Matrix4::<f64>::identity();
    matrix[(0, 0)] = f64::NAN;
    let err = mesh.apply_transform(&Transform::from_matrix(matrix)).unwrap_err();
    assert!(matches!(err, MeshError::InvalidArgument { parameter: "transform", .. }));
}

// ---------------------------------------------------------------------------
// Engines, config, export
// ---------------------------------------------------------------------------

#[test]
fn fan_engine_drives_the_same_pipeline() {
    let mut poly = unit_square_boundary(10.0);
    let mut mesh = Mesh::with_engine(Box::new(FanTriangulator::new()));
    mesh.extrude(poly.finalize().unwrap(), 5.0).unwrap().update_normals();
    assert_eq!(mesh.faces().len(), 12);
    assert_outward_unit_normals(&mesh);
}

#[test]
fn hole_with_circle_extrudes_cleanly() {
    let mut poly = Polygon::rectangle([-5.0, -5.0], [5.0, 5.0]);
    let mut hole = Hole::new();
    hole.append(Arc::new([2.0, 0.0], [2.0, 0.0], [0.0, 0.0]).unwrap()).unwrap();
    poly.add_hole(hole).unwrap();

    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap().update_normals();
    assert!(mesh.normals().iter().all(|n| (n.length() - 1.0).abs() < 1e-6));
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meshing.json");
    std::fs::write(&path, r#"{"export": {"title": "bracket", "url": "https://example.org/bracket"}}"#).unwrap();
    let cfg = MeshingConfig::load(&path).unwrap();
    assert_eq!(cfg.export.title, "bracket");

    let mut poly = unit_square_boundary(1.0);
    let mut mesh = Mesh::with_config(cfg);
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap();
    let out = dir.path().join("bracket.obj");
    mesh.save(&out, ExportFormat::Obj, ExportMode::Ascii).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().starts_with("# bracket "));
    lines.next();
    assert_eq!(lines.next(), Some("# https://example.org/bracket"));
}

#[test]
fn stl_files_written_in_both_modes() {
    let dir = tempfile::tempdir().unwrap();
    let mut poly = unit_square_boundary(1.0);
    let mut mesh = Mesh::new();
    mesh.extrude(poly.finalize().unwrap(), 1.0).unwrap();

    let ascii = dir.path().join("cube.stl");
    mesh.save(&ascii, ExportFormat::Stl, ExportMode::Ascii).unwrap();
    assert!(std::fs::read_to_string(&ascii).unwrap().starts_with("solid cube"));

    let binary = dir.path().join("cube_bin.stl");
    mesh.save(&binary, ExportFormat::Stl, ExportMode::Binary).unwrap();
    assert_eq!(std::fs::metadata(&binary).unwrap().len(), 80 + 4 + 12 * 50);
}

#[test]
fn configured_arc_precision_reaches_mesh_polygons() {
    let config = MeshingConfig::from_json_str(r#"{"shape": {"arc_precision": 12}}"#).unwrap();
    let mesh = Mesh::with_config(config);

    let quarter = Arc::with_options([1.0, 0.0], [0.0, 1.0], [0.0, 0.0], mesh.arc_options()).unwrap();
    assert_eq!(quarter.points().len(), 13);
    assert_eq!(Arc::new([1.0, 0.0], [0.0, 1.0], [0.0, 0.0]).unwrap().points().len(), 7);

    let mut disc = mesh.polygon();
    let options = disc.arc_options();
    disc.append(Arc::with_options([2.0, 0.0], [2.0, 0.0], [0.0, 0.0], options).unwrap())
        .unwrap();
    assert_eq!(disc.finalize().unwrap().outer().len(), 25);
}
