use std::collections::BTreeMap;
use std::path::PathBuf;

use axial_app::{AppError, RecordSource, RunReport, run};
use axial_config::{CliArgs, Config, OutputFormat};
use axial_orientation::{ModernOrientationConfig, RotationSense, Vector3};

const BODIES: &str = r#"{
    "earth": (
        orientation: Some(Legacy((obliquity_degrees: 23.44))),
        orbital_elements: Some((inclination: 0.0, longitude_of_ascending_node: 0.0)),
    ),
    "venus": (
        orientation: Some(Legacy((obliquity_degrees: 177.36, rotation_sense: Some(retrograde)))),
        orbital_elements: Some((inclination: 0.059253, longitude_of_ascending_node: 1.338318)),
    ),
    "station": (
        orientation: Some(SpinAxis((spin_axis: (x: 0.0, y: 0.0, z: 1.0)))),
        orbital_elements: Some((inclination: 0.0, longitude_of_ascending_node: 0.0)),
    ),
}"#;

fn args_for(bodies: Option<PathBuf>, output: Option<PathBuf>, format: OutputFormat) -> CliArgs {
    CliArgs {
        bodies,
        output,
        format,
        ..Default::default()
    }
}

fn configured(args: &CliArgs) -> Config {
    let mut config = Config::default();
    config.apply_cli_overrides(args);
    config
}

#[test]
fn test_run_migrates_file_and_writes_modern_configs() {
    let dir = tempfile::tempdir().unwrap();
    let bodies = dir.path().join("bodies.ron");
    std::fs::write(&bodies, BODIES).unwrap();
    let output = dir.path().join("out/modern.ron");

    let args = args_for(Some(bodies), Some(output.clone()), OutputFormat::Json);
    let config = configured(&args);
    let mut stdout = Vec::new();
    let clean = run(&args, &config, &mut stdout).unwrap();
    assert!(clean);

    let report: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(report["evaluations"]["station"]["error"], serde_json::Value::Null);
    assert_eq!(
        report["migration"]["results"]["venus"]["metadata"]["rotation_sense_inferred"],
        false
    );

    let written = std::fs::read_to_string(&output).unwrap();
    let modern: BTreeMap<String, ModernOrientationConfig> = ron::from_str(&written).unwrap();
    assert_eq!(modern.len(), 2);
    assert_eq!(modern["venus"].rotation_sense, RotationSense::Retrograde);
    assert!((modern["earth"].spin_axis.magnitude() - 1.0).abs() < 1e-10);
    let tilt = modern["earth"].spin_axis.angle_between(Vector3::Z).to_degrees();
    assert!((tilt - 23.44).abs() < 0.1, "tilt {tilt}");
}

#[test]
fn test_run_builtin_text_report() {
    let args = CliArgs {
        builtin: true,
        ..Default::default()
    };
    let mut stdout = Vec::new();
    let clean = run(&args, &configured(&args), &mut stdout).unwrap();
    assert!(clean);

    let text = String::from_utf8(stdout).unwrap();
    assert!(text.contains("uranus"));
    assert!(text.contains("0 failed"));
}

#[test]
fn test_run_without_input_is_an_error() {
    let args = CliArgs::default();
    let result = run(&args, &configured(&args), &mut Vec::new());
    assert!(matches!(result, Err(AppError::NoInput)));
}

#[test]
fn test_run_reports_unreadable_bodies_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = args_for(Some(dir.path().join("missing.ron")), None, OutputFormat::Text);
    let result = run(&args, &configured(&args), &mut Vec::new());
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[test]
fn test_run_flags_invalid_records_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let bodies = dir.path().join("bodies.ron");
    std::fs::write(
        &bodies,
        r#"{
            "earth": (
                orientation: Some(Legacy((obliquity_degrees: 23.44))),
                orbital_elements: Some((inclination: 0.0, longitude_of_ascending_node: 0.0)),
            ),
            "lost": (orientation: Some(Legacy((obliquity_degrees: 5.0)))),
        }"#,
    )
    .unwrap();

    let args = args_for(Some(bodies), None, OutputFormat::Ron);
    let mut stdout = Vec::new();
    let clean = run(&args, &configured(&args), &mut stdout).unwrap();
    assert!(!clean);

    let report: RunReport = ron::from_str(std::str::from_utf8(&stdout).unwrap()).unwrap();
    assert!(report.migration.results["earth"].metadata.success);
    assert!(!report.migration.results["lost"].metadata.success);
}

#[test]
fn test_builtin_flag_wins_over_config_file() {
    let args = CliArgs {
        builtin: true,
        ..Default::default()
    };
    let mut config = Config::default();
    config.migration.bodies_file = Some(PathBuf::from("ignored.ron"));
    assert_eq!(
        RecordSource::resolve(&args, &config).unwrap(),
        RecordSource::Builtin
    );
}
