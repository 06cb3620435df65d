//! End-to-end analysis flows: raw text in, comparison table out.

use talus_core::{
    read_values_str, AdmissionPolicy, AnalysisSession, ComparisonTable, Density, Family,
    InputUnit, Sample, SummaryStats, DISPLAY_LADDER, EMPIRICAL_SOURCE, HEADLINE_LADDER,
};
use talus_fit::fit;
use talus_stats::percentile_of_sorted;

#[test]
fn cubic_volumes_yield_integer_sizes() {
    let parsed = read_values_str("1.0\n8.0\n27.0\n").unwrap();
    assert_eq!(parsed.skipped, 0);

    let prepared = Sample::from_volumes(&parsed.values, AdmissionPolicy::default());
    assert_eq!(prepared.report.admitted, 3);
    assert_eq!(prepared.sample.sizes(), &[1.0, 2.0, 3.0]);

    for (level, expected) in [(0.0, 1.0), (50.0, 2.0), (100.0, 3.0)] {
        let value = percentile_of_sorted(prepared.sample.sizes(), level).unwrap();
        assert!((value - expected).abs() < 1e-12);
    }
}

#[test]
fn mass_input_converts_through_density() {
    // 2.65 t at 2650 kg/m3 is exactly one cubic meter
    let mut session = AnalysisSession::new("Mass flow");
    session.density = Density::new(2650.0).unwrap();
    let report = session.ingest_masses(&[2.65]).unwrap();
    assert_eq!(report.admitted, 1);
    assert_eq!(session.input_unit, InputUnit::MassT);

    let sample = session.sample.as_ref().unwrap();
    assert!((sample.volumes()[0] - 1.0).abs() < 1e-12);
    assert!((sample.sizes()[0] - 1.0).abs() < 1e-12);
}

#[test]
fn interpolated_percentile_matches_linear_rule() {
    let sizes: Vec<f64> = (1..=10).map(f64::from).collect();
    let p95 = percentile_of_sorted(&sizes, 95.0).unwrap();
    assert!((p95 - 9.55).abs() < 1e-12);
}

#[test]
fn degenerate_sample_fails_fitting_without_poisoning_the_batch() {
    let sizes = [5.0, 5.0];
    let mut errors = Vec::new();
    for family in Family::ALL {
        match fit(family, &sizes) {
            Ok(model) => panic!("degenerate sample fitted {:?}", model.family()),
            Err(e) => errors.push(e),
        }
    }
    assert_eq!(errors.len(), Family::ALL.len());
}

#[test]
fn session_flow_builds_headline_marked_table() {
    let raw = "1\n8\n27\n64\n125\n216\n343\n512\n729\n1000\n";
    let parsed = read_values_str(raw).unwrap();

    let mut session = AnalysisSession::new("Quarry face 3");
    let report = session.ingest_volumes(&parsed.values);
    assert_eq!(report.admitted, 10);

    session.run_fit().unwrap();
    assert!(session
        .models
        .iter()
        .any(|m| m.family() == Family::Exponential));

    let table = session.build_table().unwrap();
    assert_eq!(table.levels, DISPLAY_LADDER.to_vec());

    let empirical = table.column(EMPIRICAL_SOURCE).unwrap();
    // Sizes are the cube roots of the raw volumes, so the maximum is 10 m
    assert!((empirical.sizes_m.last().unwrap() - 10.0).abs() < 1e-9);
    // Volumes in the table are the cubes of the tabulated sizes
    for (size, volume) in empirical.sizes_m.iter().zip(&empirical.volumes_m3) {
        assert!((size.powi(3) - volume).abs() < 1e-6 * volume.max(1.0));
    }

    let text = table.to_text();
    for level in HEADLINE_LADDER {
        assert!(ComparisonTable::is_headline(level));
        assert!(text.contains(&format!("{level:.0}")));
    }
}

#[test]
fn admission_policy_controls_zero_handling() {
    let volumes = [0.0, 1.0, 8.0, -3.0];

    let inclusive = Sample::from_volumes(&volumes, AdmissionPolicy::default());
    assert_eq!(inclusive.report.admitted, 3);
    assert_eq!(inclusive.report.rejected, 1);
    assert_eq!(inclusive.sample.sizes()[0], 0.0);

    let strict = Sample::from_volumes(&volumes, AdmissionPolicy { include_zero: false });
    assert_eq!(strict.report.admitted, 2);
    assert_eq!(strict.report.rejected, 2);
    assert!(strict.sample.sizes().iter().all(|&s| s > 0.0));
}

#[test]
fn summary_stats_cover_the_prepared_sample() {
    let prepared = Sample::from_volumes(&[1.0, 8.0, 27.0, 64.0], AdmissionPolicy::default());
    let stats = SummaryStats::from_sorted(prepared.sample.sizes());
    assert_eq!(stats.count, 4);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert!((stats.mean - 2.5).abs() < 1e-12);
    assert!((stats.median - 2.5).abs() < 1e-12);
}
