//! Command-level tests: run each command into a temporary file and read the
//! result back.

use std::fs;
use std::io::Write;

use adapter_loader::VariableSummary;
use service_cli::commands::{self, OutputArgs};
use service_cli::config::{Overrides, SimulationSettings, VarianceSpec};
use service_cli::output::Table;
use service_cli::CliError;
use ssm_models::FsvNoise;
use tempfile::TempDir;

fn small_settings() -> SimulationSettings {
    let mut settings = SimulationSettings::default();
    settings.n = 20;
    settings.seed = 7;
    settings.factor.p = 4;
    settings.factor.k = 2;
    settings
}

fn csv_output(dir: &TempDir, name: &str) -> OutputArgs {
    OutputArgs {
        output: Some(dir.path().join(name).to_string_lossy().into_owned()),
        format: "csv".to_string(),
    }
}

fn read_lines(out: &OutputArgs) -> Vec<String> {
    let path = out.output.as_deref().unwrap();
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn ar1_writes_time_and_value_columns() {
    let dir = TempDir::new().unwrap();
    let out = csv_output(&dir, "ar1.csv");

    let table = commands::ar1::run(&small_settings(), &out).unwrap();

    let lines = read_lines(&out);
    assert_eq!(lines[0], "time,x");
    assert_eq!(lines.len(), 21);
    assert!(lines[1].starts_with("1,"));
    assert_eq!(table.len(), 20);
}

#[test]
fn isv_writes_observation_and_log_volatility() {
    let dir = TempDir::new().unwrap();
    let out = csv_output(&dir, "isv.csv");

    commands::isv::run(&small_settings(), &out).unwrap();

    let lines = read_lines(&out);
    assert_eq!(lines[0], "time,y,alpha");
    assert_eq!(lines.len(), 21);
    assert!(lines[20].starts_with("20,"));
}

#[test]
fn factor_writes_series_then_factors() {
    let dir = TempDir::new().unwrap();
    let out = csv_output(&dir, "factor.csv");

    let table = commands::factor::run(&small_settings(), &out).unwrap();

    let lines = read_lines(&out);
    assert_eq!(lines[0], "time,y1,y2,y3,y4,f1,f2");
    assert_eq!(lines.len(), 21);
    assert_eq!(table.columns().len(), 6);
}

#[test]
fn fsv_writes_one_column_per_series() {
    let dir = TempDir::new().unwrap();
    let out = csv_output(&dir, "fsv.csv");
    let mut settings = small_settings();
    settings.fsv.noise = FsvNoise::Independent;

    commands::fsv::run(&settings, &out).unwrap();

    let lines = read_lines(&out);
    assert_eq!(lines[0], "time,y1,y2,y3,y4");
    assert_eq!(lines.len(), 21);
}

#[test]
fn json_output_is_array_of_rows() {
    let dir = TempDir::new().unwrap();
    let out = OutputArgs {
        output: Some(dir.path().join("ar1.json").to_string_lossy().into_owned()),
        format: "json".to_string(),
    };

    commands::ar1::run(&small_settings(), &out).unwrap();

    let text = fs::read_to_string(out.output.as_deref().unwrap()).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 20);
    assert_eq!(rows[0]["time"], 1);
}

#[test]
fn same_seed_same_table() {
    let dir = TempDir::new().unwrap();
    let settings = small_settings();

    let a: Table = commands::fsv::run(&settings, &csv_output(&dir, "a.csv")).unwrap();
    let b: Table = commands::fsv::run(&settings, &csv_output(&dir, "b.csv")).unwrap();
    assert_eq!(a, b);

    let mut reseeded = settings.clone();
    reseeded.seed = 8;
    let c = commands::fsv::run(&reseeded, &csv_output(&dir, "c.csv")).unwrap();
    assert_ne!(a, c);
}

#[test]
fn unknown_format_rejected() {
    let dir = TempDir::new().unwrap();
    let out = OutputArgs {
        output: Some(dir.path().join("x.xml").to_string_lossy().into_owned()),
        format: "xml".to_string(),
    };
    let err = commands::ar1::run(&small_settings(), &out).unwrap_err();
    assert!(matches!(err, CliError::InvalidArgument(_)));
}

#[test]
fn zero_length_rejected_before_writing() {
    let dir = TempDir::new().unwrap();
    let out = csv_output(&dir, "empty.csv");
    let mut settings = small_settings();
    settings.n = 0;

    assert!(commands::isv::run(&settings, &out).is_err());
    assert!(!dir.path().join("empty.csv").exists());
}

#[test]
fn check_renders_loadable_toml() {
    let settings = small_settings();
    let rendered = commands::check::run(&settings).unwrap();
    assert_eq!(SimulationSettings::from_toml(&rendered).unwrap(), settings);
}

#[test]
fn readings_summary_per_variable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("readings.csv");
    let mut file = fs::File::create(&path).unwrap();
    write!(
        file,
        "Timestamp,Variable,Units,Value\n\
         2024-06-01 00:00:00,Temperature,degC,10\n\
         2024-06-01 01:00:00,Temperature,degC,14\n\
         2024-06-01 00:00:00,Humidity,%,60\n"
    )
    .unwrap();
    drop(file);

    let summary: Vec<VariableSummary> =
        commands::readings::run(path.to_str().unwrap(), "json").unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[1].variable, "Temperature");
    assert_eq!(summary[1].count, 2);
    approx::assert_relative_eq!(summary[1].mean, 12.0);

    let mut buf = Vec::new();
    commands::readings::write_summary(&summary, "csv", &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("variable,units,count,mean,min,max,first,last\n"));
}

#[test]
fn readings_missing_file() {
    let err = commands::readings::run("/nonexistent/readings.csv", "table").unwrap_err();
    assert!(matches!(err, CliError::FileNotFound(_)));
}

#[test]
fn overrides_repair_invalid_file_values() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("ssm.toml");
    fs::write(&config, "n = 0\nseed = 3\n[ar1]\nsigma = -1.0\n").unwrap();

    let mut settings = SimulationSettings::load(&config).unwrap();
    let overrides = Overrides {
        n: Some(5),
        sigma: Some(0.5),
        ..Overrides::default()
    };
    settings.apply_overrides(&overrides).unwrap();

    let out = csv_output(&dir, "ar1.csv");
    let table = commands::ar1::run(&settings, &out).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(settings.seed, 3);
}

#[test]
fn seed_override_matches_file_seed() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("ssm.toml");
    fs::write(&config, "n = 10\nseed = 11\n").unwrap();
    let from_file = SimulationSettings::load(&config).unwrap();

    let mut overridden = SimulationSettings::load(dir.path().join("absent.toml")).unwrap();
    let overrides = Overrides {
        seed: Some(11),
        n: Some(10),
        ..Overrides::default()
    };
    overridden.apply_overrides(&overrides).unwrap();

    let a = commands::isv::run(&from_file, &csv_output(&dir, "a.csv")).unwrap();
    let b = commands::isv::run(&overridden, &csv_output(&dir, "b.csv")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fsv_overrides_shape_output() {
    let dir = TempDir::new().unwrap();
    let mut settings = small_settings();
    let overrides = Overrides {
        p: Some(3),
        k: Some(1),
        observation_variance: Some(0.0),
        noise: Some("independent".to_string()),
        ..Overrides::default()
    };
    settings.apply_overrides(&overrides).unwrap();

    let out = csv_output(&dir, "fsv.csv");
    commands::fsv::run(&settings, &out).unwrap();
    assert_eq!(read_lines(&out)[0], "time,y1,y2,y3");
}

#[test]
fn unknown_noise_override_rejected() {
    let mut settings = small_settings();
    let overrides = Overrides {
        noise: Some("diagonal".to_string()),
        ..Overrides::default()
    };
    let err = settings.apply_overrides(&overrides).unwrap_err();
    assert!(matches!(err, CliError::Simulation(_)));
}

#[test]
fn ar1_ignores_unused_factor_section() {
    let dir = TempDir::new().unwrap();
    let mut settings = small_settings();
    settings.factor.idiosyncratic_variance = VarianceSpec::PerSeries(vec![0.1, 0.2]);

    assert!(commands::ar1::run(&settings, &csv_output(&dir, "ar1.csv")).is_ok());
    assert!(matches!(
        commands::factor::run(&settings, &csv_output(&dir, "factor.csv")),
        Err(CliError::Config(_))
    ));
}
