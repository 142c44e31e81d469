use des_core::coefficients::{
    CoefficientEntry, CoefficientTable, DEFAULT_COEFFICIENT_COLUMN, DEFAULT_ENERGY_COLUMN,
};
use des_core::decay::{DecayTable, DecayTableFile};
use des_core::domain::{DesErrorCategory, Geometry};
use des_core::escape::build_escape_set;
use des_core::report::SpectrumReport;
use des_core::settings::SimulationSettings;
use des_core::{SimulationRequest, run_simulation};
use std::fs;
use tempfile::TempDir;

fn flat_table(coefficient: f64) -> CoefficientTable {
    CoefficientTable::from_entries(vec![
        CoefficientEntry {
            energy: 1.0,
            coefficient,
        },
        CoefficientEntry {
            energy: 10_000.0,
            coefficient,
        },
    ])
    .expect("flat table should be valid")
}

#[test]
fn single_line_escaping_only_through_thickness_is_reported_once() {
    // mu = 0.5: half-thickness 0.25 keeps exp(-2.41) ~ 9%, half-width/length 3 keep ~1e-13.
    let table = flat_table(0.5);
    let decay = DecayTable::new(2000.0, [(661.657, 0.5)]).expect("decay table");
    let geometry = Geometry::from_dimensions(6.0, 6.0, 0.5).expect("geometry");

    let escaped = build_escape_set(&decay, &geometry, 1000.0, &table).expect("escape set");
    assert_eq!(escaped.len(), 1);
    assert_eq!(escaped[0].energy, 661.657);
    assert_eq!(escaped[0].escape_energy, 2000.0 - 661.657);
}

#[test]
fn weak_lines_never_escape_whatever_the_absorber() {
    let decay = DecayTable::new(2000.0, [(100.0, 0.099), (200.0, 0.05), (300.0, 0.5)])
        .expect("decay table");
    let geometry = Geometry::from_dimensions(0.001, 0.001, 0.001).expect("geometry");

    for coefficient in [0.0, 0.01, 1.0] {
        let escaped =
            build_escape_set(&decay, &geometry, 1.0e6, &flat_table(coefficient)).expect("build");
        assert!(escaped.iter().all(|result| result.energy == 300.0));
    }
}

#[test]
fn fully_filtered_isotope_reports_only_the_full_energy_peak() {
    let request = SimulationRequest::new("H-3", 5.0e4, 1.0, 1.0, 1.0).expect("request");
    let decay = DecayTable::new(18.591, [(5.0, 0.01)]).expect("decay table");
    let gold = CoefficientTable::bundled_gold(DEFAULT_ENERGY_COLUMN, DEFAULT_COEFFICIENT_COLUMN)
        .expect("bundled table");

    let report = run_simulation(&request, &decay, &gold, &SimulationSettings::default())
        .expect("simulation should run");
    assert!(report.escape_peaks.is_empty());
    assert_eq!(report.full_energy_peak, 18.591);
    assert_eq!(
        report.render_text(),
        "H-3 will have escape peaks at: []\nH-3 has a full energy peak at: 18.591"
    );
}

#[test]
fn identical_energies_with_different_intensities_are_ambiguous() {
    let request = SimulationRequest::new("Eu-152", 1000.0, 1.0, 1.0, 1.0).expect("request");
    let decay = DecayTable::new(1874.3, [(121.7817, 0.2853), (121.7817, 0.1)]).expect("decay");

    let error = run_simulation(&request, &decay, &flat_table(0.0), &SimulationSettings::default())
        .expect_err("duplicate energy should be ambiguous");
    assert_eq!(error.category(), DesErrorCategory::AmbiguityError);
    assert_eq!(error.code(), "AMBIGUITY.DUPLICATE_ENERGY");
    assert!(error.message().contains("121.7817"));
}

#[test]
fn decay_file_and_custom_table_drive_a_full_run() {
    let temp = TempDir::new().expect("tempdir should be created");
    let decay_path = temp.path().join("co60.json");
    fs::write(
        &decay_path,
        r#"{
          "isotope": "Co-60",
          "qValue": 2822.81,
          "lines": [
            { "energy": 1173.228, "intensity": 0.9985 },
            { "energy": 1332.492, "intensity": 0.999826 },
            { "energy": 826.10, "intensity": 0.000076 }
          ]
        }"#,
    )
    .expect("write decay table");
    let table_path = temp.path().join("gold.csv");
    fs::write(
        &table_path,
        "Energy.1,mu/rho\n1000,0.07761\n1250,0.06438\n1500,0.05714\n",
    )
    .expect("write coefficient table");

    let request = SimulationRequest::new("Co-60", 3.7e4, 2.0, 2.0, 1.0).expect("request");
    let table = CoefficientTable::load(&table_path, "Energy.1", "mu/rho").expect("table");
    let report = run_simulation(
        &request,
        &DecayTableFile::new(&decay_path),
        &table,
        &SimulationSettings::default(),
    )
    .expect("simulation should run");

    assert_eq!(
        report,
        SpectrumReport {
            isotope: "Co-60".to_string(),
            escape_peaks: vec![2822.81 - 1173.228, 2822.81 - 1332.492],
            full_energy_peak: 2822.81,
        }
    );
}
