use millkit::report::{build_toolpaths, load_paths, render_report};
use millkit::{MeasurementSystem, BUILD_DATE, VERSION};
use std::fs;
use tempfile::tempdir;

const JOB: &str = r#"
[tool]
name = "3mm flat"
shape = "cylindrical"
tool_radius = 1.5
torus_radius = 0.0
speed = 10000.0
feedrate = 100.0

[process]
name = "Roughing"
path_direction = "x"
safety_height = 5.0
step_down = 1.0
material_allowance = 0.2
overlap_percent = 40.0
milling_style = "conventional"

[bounds]
name = "Model"
bounds_type = 1
low = [1.0, 1.0, 0.0]
high = [1.0, 1.0, 2.0]
"#;

const PATHS: &str = "[[[0, 0, 0], [10, 0, 0]], [[10, 10, -1], [0, 10, -1]]]";

fn write_job() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let job = dir.path().join("job.toml");
    let paths = dir.path().join("paths.json");
    fs::write(&job, JOB).unwrap();
    fs::write(&paths, PATHS).unwrap();
    (dir, job, paths)
}

#[test]
fn test_version_info() {
    assert!(!VERSION.is_empty());
    assert!(!BUILD_DATE.is_empty());
}

#[test]
fn test_metric_report() {
    let (_dir, job, paths) = write_job();
    let list = build_toolpaths(&job, load_paths(&paths).unwrap()).unwrap();
    assert_eq!(list.len(), 1);

    let report = render_report(&list, MeasurementSystem::Metric).unwrap();
    assert!(report.contains("Toolpath: Roughing"));
    assert!(report.contains("Start position (mm): X:0.000 Y:0.000 Z:5.000"));
    assert!(report
        .contains("Bounding box (mm): X -1.000..11.000 Y -1.000..11.000 Z -1.000..2.000"));
    assert!(report.contains("Path length: 20.000 mm"));
    // 57 mm of travel at 100 mm/min
    assert!(report.contains("Machine time: 0:00:34"));
    assert!(report.contains("MILLKIT_TOOLPATH_SETTINGS: START"));
    assert!(report.contains("name = \"3mm flat\""));
    assert!(report.contains("MILLKIT_TOOLPATH_SETTINGS: END"));
    assert!(report.ends_with("Total machine time: 0:00:34\n"));
}

#[test]
fn test_imperial_report() {
    let (_dir, job, paths) = write_job();
    let list = build_toolpaths(&job, load_paths(&paths).unwrap()).unwrap();
    let report = render_report(&list, MeasurementSystem::Imperial).unwrap();
    assert!(report.contains("Path length: 0.787 in"));
    assert!(report.contains("Start position (in): X:0.000 Y:0.000 Z:0.197"));
}

#[test]
fn test_empty_geometry_uses_custom_bounds() {
    let (_dir, job, _paths) = write_job();
    let list = build_toolpaths(&job, Vec::new()).unwrap();
    // the margins are read as absolute limits
    assert_eq!(list[0].bounding_box(), (1.0, 1.0, 1.0, 1.0, 0.0, 2.0));
}

#[test]
fn test_missing_job_file() {
    let dir = tempdir().unwrap();
    let result = build_toolpaths(&dir.path().join("missing.toml"), Vec::new());
    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("Failed to load job"));
}
