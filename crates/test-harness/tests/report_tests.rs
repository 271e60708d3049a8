//! Tests for the report module.

use test_harness::ModelBuilder;

fn box_model() -> ModelBuilder {
    let mut m = ModelBuilder::mock();
    m.rect_profile("sk", 0.0, 0.0, 10.0, 10.0).unwrap();
    m.extrude("box", "sk", 10.0).unwrap();
    m
}

#[test]
fn empty_model_report() {
    let m = ModelBuilder::new();
    let text = m.report().unwrap().to_text();
    assert!(text.starts_with("=== Meshing Model Report ==="));
    assert!(text.contains("Engine: EarClip"));
    assert!(text.contains("Profiles (0):"));
    assert!(!text.contains("Mesh Summary"));
    assert!(text.contains("Errors: none"));
}

#[test]
fn report_lists_profiles() {
    let text = box_model().report().unwrap().to_text();
    assert!(text.contains("Engine: Fan"), "{}", text);
    assert!(text.contains("\"sk\": 5 outer points, 0 holes"), "{}", text);
}

#[test]
fn report_contains_mesh_summary() {
    let text = box_model().report().unwrap().to_text();
    assert!(text.contains("Mesh Summary:"), "{}", text);
    assert!(
        text.contains("\"box\": 12 triangles, 8 vertices, volume 1000.000, area 600.000"),
        "{}",
        text
    );
}

#[test]
fn report_contains_bounding_box() {
    let text = box_model().report().unwrap().to_text();
    assert!(
        text.contains("Bounding Box: (0.0, 0.0, 0.0) -> (10.0, 10.0, 10.0)"),
        "{}",
        text
    );
}

#[test]
fn report_merges_bounding_boxes() {
    let mut m = box_model();
    m.extrude("tower", "sk", 30.0).unwrap();
    m.translate("tower", 20.0, 0.0, 0.0).unwrap();
    let report = m.report().unwrap();
    let bb = report.bounding_box.unwrap();
    assert!((bb.max.x - 30.0).abs() < 1e-9);
    assert!((bb.max.z - 30.0).abs() < 1e-9);
    assert_eq!(report.mesh_summaries.len(), 2);
    assert_eq!(report.mesh_summaries[1].name, "tower");
}

#[test]
fn report_contains_oracle_results() {
    let report = box_model().report().unwrap();
    let text = report.to_text();
    assert!(text.contains("Oracle Results (7 checks):"), "{}", text);
    assert!(text.contains("[PASS] watertight_mesh"), "{}", text);
    assert_eq!(report.failed_checks().count(), 0);
}

#[test]
fn report_flags_stale_normals_and_failures() {
    let mut m = box_model();
    m.scale("box", -1.0, 1.0, 1.0).unwrap();
    let report = m.report().unwrap();
    let text = report.to_text();
    assert!(text.contains("[STALE NORMALS]"), "{}", text);
    assert!(text.contains("[FAIL] outward_orientation"), "{}", text);
    assert_eq!(report.failed_checks().count(), 1);
}

#[test]
fn report_lists_errors() {
    let mut m = box_model();
    assert!(m.extrude("flat", "sk", 0.0).is_err());
    let text = m.report().unwrap().to_text();
    assert!(text.contains("Errors (1):"), "{}", text);
    assert!(text.contains("flat:"), "{}", text);
}

#[test]
fn display_matches_to_text() {
    let report = box_model().report().unwrap();
    assert_eq!(format!("{report}"), report.to_text());
}
