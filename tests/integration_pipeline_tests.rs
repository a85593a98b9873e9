use approx::assert_relative_eq;
use la_peers::prelude::*;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

fn three_unit_table() -> FeatureTable<f64> {
    let mut table = FeatureTable::new(["f1", "f2"]);
    table.push_row("A", "Alpha", &[-1.0, 100.0]).unwrap();
    table.push_row("B", "Beta", &[0.0, 5.0]).unwrap();
    table.push_row("C", "Gamma", &[1.0, 62.0]).unwrap();
    table
}

// ============================================================================
// Hand-Computed End-to-End Tests
// ============================================================================

#[test]
fn test_hand_computed_peer_groups() {
    // f2 has weight 0 and drops out entirely; f1 is symmetric and equally
    // spaced, so identity wins selection and standardization maps it to
    // [-1, 0, 1] (sample std 1). Distances: AB=1, AC=2, BC=1.
    let engine = PeerModel::new()
        .feature(Feature::new("f1", 1.0))
        .feature(Feature::new("f2", 0.0))
        .n_peers(2)
        .build()
        .unwrap();

    let output = engine.fit(&three_unit_table()).unwrap();

    assert_eq!(output.table.n_features(), 1);
    assert_eq!(output.table.feature_names(), &["f1"]);

    let a = &output.peers[0];
    assert_eq!(a.la_code, "A");
    assert_eq!(a.peers[0].0, "B");
    assert_relative_eq!(a.peers[0].1, 1.0);
    assert_eq!(a.peers[1].0, "C");
    assert_relative_eq!(a.peers[1].1, 2.0);

    // B is equidistant from A and C; the tie breaks by code.
    let b = &output.peers[1];
    assert_eq!(b.la_code, "B");
    assert_eq!(b.peers[0].0, "A");
    assert_relative_eq!(b.peers[0].1, 1.0);
    assert_eq!(b.peers[1].0, "C");
    assert_relative_eq!(b.peers[1].1, 1.0);

    let c = &output.peers[2];
    assert_eq!(c.la_code, "C");
    assert_eq!(c.peers[0].0, "B");
    assert_relative_eq!(c.peers[0].1, 1.0);
    assert_eq!(c.peers[1].0, "A");
    assert_relative_eq!(c.peers[1].1, 2.0);

    // The dropped feature never reaches the transform report.
    assert_eq!(output.transforms.entries.len(), 1);
    assert_eq!(output.transforms.entries[0].feature, "f1");
    assert_eq!(output.transforms.entries[0].chosen, TransformKind::Auto);
    assert!(!output.transforms.entries[0].overridden);
    assert!(output.degenerate_features.is_empty());
}

#[test]
fn test_zero_weight_equals_absent_feature() {
    let table = three_unit_table();

    let with_zero = PeerModel::new()
        .feature(Feature::new("f1", 1.0))
        .feature(Feature::new("f2", 0.0))
        .n_peers(2)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();

    let without = PeerModel::new()
        .feature(Feature::new("f1", 1.0))
        .n_peers(2)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();

    assert_eq!(with_zero.peers, without.peers);
    assert_eq!(with_zero.table, without.table);
}

// ============================================================================
// Pipeline Property Tests
// ============================================================================

fn wider_table() -> FeatureTable<f64> {
    let mut table = FeatureTable::new(["population", "density"]);
    table.push_row("E1", "One", &[92_300.0, 984.0]).unwrap();
    table.push_row("E2", "Two", &[143_900.0, 2_650.0]).unwrap();
    table.push_row("E3", "Three", &[137_200.0, 560.0]).unwrap();
    table.push_row("E4", "Four", &[262_600.0, 3_120.0]).unwrap();
    table.push_row("E5", "Five", &[110_500.0, 1_470.0]).unwrap();
    table
}

#[test]
fn test_fit_is_deterministic() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .feature(Feature::new("density", 0.5))
        .n_peers(3)
        .build()
        .unwrap();

    let table = wider_table();
    let first = engine.fit(&table).unwrap();
    let second = engine.fit(&table).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_distance_matrix_is_symmetric_with_zero_diagonal() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .feature(Feature::new("density", 0.5))
        .build()
        .unwrap();

    let output = engine.fit(&wider_table()).unwrap();
    let n = output.distances.len();
    assert_eq!(n, 5);

    for i in 0..n {
        assert_eq!(output.distances.get(i, i), 0.0);
        for j in 0..n {
            assert_eq!(output.distances.get(i, j), output.distances.get(j, i));
        }
    }
}

#[test]
fn test_full_weight_column_is_standardized() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .build()
        .unwrap();

    let output = engine.fit(&wider_table()).unwrap();
    let column = output.table.column("population").unwrap();
    assert_relative_eq!(mean(column), 0.0, epsilon = 1e-10);
    assert_relative_eq!(sample_std(column), 1.0, epsilon = 1e-10);
}

#[test]
fn test_n_peers_exceeding_population_returns_everyone_else() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(10)
        .build()
        .unwrap();

    let output = engine.fit(&wider_table()).unwrap();
    for record in &output.peers {
        assert_eq!(record.peers.len(), 4);
    }
}

#[test]
fn test_peer_count_boundaries_at_scale() {
    let mut table = FeatureTable::new(["population"]);
    for i in 0..150 {
        let code = format!("E{:03}", i);
        let name = format!("Unit {}", i);
        table.push_row(code, name, &[50_000.0 + 1_000.0 * i as f64]).unwrap();
    }

    let five = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(5)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();
    assert_eq!(five.peers.len(), 150);
    for record in &five.peers {
        assert_eq!(record.peers.len(), 5);
    }

    let all = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(1000)
        .build()
        .unwrap()
        .fit(&table)
        .unwrap();
    for record in &all.peers {
        assert_eq!(record.peers.len(), 149);
    }
}

// ============================================================================
// Removal Tests
// ============================================================================

#[test]
fn test_removed_las_never_appear_in_output() {
    let mut table = FeatureTable::new(["population"]);
    table.push_row("E1", "One", &[92_300.0]).unwrap();
    table.push_row("E2", "Two", &[143_900.0]).unwrap();
    table
        .push_row("E09000001", "City of London", &[8_600.0])
        .unwrap();
    table
        .push_row("E06000053", "Isles of Scilly", &[2_300.0])
        .unwrap();
    table.push_row("E3", "Three", &[137_200.0]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(4)
        .remove_las(["City of London", "Isles of Scilly"])
        .build()
        .unwrap();

    let output = engine.fit(&table).unwrap();

    assert_eq!(output.table.n_rows(), 3);
    assert!(!output.table.codes().contains(&"E09000001".to_string()));
    assert!(!output.table.codes().contains(&"E06000053".to_string()));
    assert!(output.distances.index_of("E09000001").is_none());

    for record in &output.peers {
        assert_eq!(record.peers.len(), 2);
        for (code, _) in &record.peers {
            assert_ne!(code, "E09000001");
            assert_ne!(code, "E06000053");
        }
    }
}

#[test]
fn test_removal_happens_before_statistics() {
    // Fitting with the exclusion configured must equal fitting a table the
    // excluded rows never entered; excluded units may not leak into
    // transform or standardization parameters.
    let mut full = FeatureTable::new(["population"]);
    full.push_row("E1", "One", &[92_300.0]).unwrap();
    full.push_row("E2", "Two", &[143_900.0]).unwrap();
    full.push_row("E09000001", "City of London", &[8_600.0])
        .unwrap();
    full.push_row("E3", "Three", &[137_200.0]).unwrap();

    let mut prefiltered = FeatureTable::new(["population"]);
    prefiltered.push_row("E1", "One", &[92_300.0]).unwrap();
    prefiltered.push_row("E2", "Two", &[143_900.0]).unwrap();
    prefiltered.push_row("E3", "Three", &[137_200.0]).unwrap();

    let with_removal = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(2)
        .remove_las(["City of London"])
        .build()
        .unwrap()
        .fit(&full)
        .unwrap();

    let without_row = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(2)
        .build()
        .unwrap()
        .fit(&prefiltered)
        .unwrap();

    assert_eq!(with_removal, without_row);
}

#[test]
fn test_removing_every_la_fails() {
    let mut table = FeatureTable::new(["population"]);
    table.push_row("E1", "One", &[92_300.0]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .remove_las(["One"])
        .build()
        .unwrap();

    assert_eq!(engine.fit(&table).unwrap_err(), PeerError::EmptyTable);
}

// ============================================================================
// Configuration Error Tests
// ============================================================================

#[test]
fn test_build_rejects_out_of_range_weights() {
    let err = PeerModel::new()
        .feature(Feature::new("population", 1.5))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        PeerError::InvalidWeight {
            feature: "population".to_string(),
            weight: 1.5,
        }
    );

    let err = PeerModel::new()
        .feature(Feature::new("population", -0.1))
        .build()
        .unwrap_err();
    assert!(matches!(err, PeerError::InvalidWeight { .. }));
}

#[test]
fn test_build_rejects_zero_n_peers() {
    let err = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(0)
        .build()
        .unwrap_err();
    assert_eq!(err, PeerError::InvalidPeerCount { got: 0 });
}

#[test]
fn test_build_rejects_duplicate_n_peers_parameter() {
    let err = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(10)
        .n_peers(20)
        .build()
        .unwrap_err();
    assert_eq!(err, PeerError::DuplicateParameter { parameter: "n_peers" });
}

#[test]
fn test_build_defaults_n_peers() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .build()
        .unwrap();
    assert_eq!(engine.n_peers(), DEFAULT_N_PEERS);
    assert_eq!(engine.n_peers(), 15);
}

#[test]
fn test_fit_rejects_missing_column() {
    let engine = PeerModel::new()
        .feature(Feature::new("median_age", 1.0))
        .build()
        .unwrap();

    let err = engine.fit(&wider_table()).unwrap_err();
    assert_eq!(
        err,
        PeerError::MissingFeature {
            feature: "median_age".to_string()
        }
    );
}

// ============================================================================
// Transform Behavior Tests
// ============================================================================

#[test]
fn test_override_domain_violation_names_the_feature() {
    let mut table = FeatureTable::new(["rate"]);
    table.push_row("E1", "One", &[0.0]).unwrap();
    table.push_row("E2", "Two", &[1.5]).unwrap();
    table.push_row("E3", "Three", &[2.5]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("rate", 1.0).transform(TransformKind::Log))
        .build()
        .unwrap();

    let err = engine.fit(&table).unwrap_err();
    assert_eq!(
        err,
        PeerError::InvalidTransform {
            feature: "rate".to_string(),
            transform: "log",
            reason: "requires strictly positive values".to_string(),
        }
    );
}

#[test]
fn test_override_is_reported_without_scores() {
    let mut table = FeatureTable::new(["rate"]);
    table.push_row("E1", "One", &[1.0]).unwrap();
    table.push_row("E2", "Two", &[10.0]).unwrap();
    table.push_row("E3", "Three", &[100.0]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("rate", 1.0).transform(TransformKind::Log))
        .build()
        .unwrap();

    let output = engine.fit(&table).unwrap();
    let choice = output.transforms.choice("rate").unwrap();
    assert_eq!(choice.chosen, TransformKind::Log);
    assert!(choice.overridden);
    assert!(choice.scores.is_empty());
}

#[test]
fn test_auto_selection_records_candidate_scores() {
    let mut table = FeatureTable::new(["rate"]);
    table.push_row("E1", "One", &[1.0]).unwrap();
    table.push_row("E2", "Two", &[10.0]).unwrap();
    table.push_row("E3", "Three", &[100.0]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("rate", 1.0))
        .build()
        .unwrap();

    let output = engine.fit(&table).unwrap();
    let choice = output.transforms.choice("rate").unwrap();
    assert_eq!(choice.chosen, TransformKind::Log);
    assert!(!choice.overridden);
    assert!(!choice.scores.is_empty());
}

#[test]
fn test_degenerate_feature_is_flagged_and_contributes_nothing() {
    let mut table = FeatureTable::new(["population", "flat"]);
    table.push_row("E1", "One", &[92_300.0, 7.0]).unwrap();
    table.push_row("E2", "Two", &[143_900.0, 7.0]).unwrap();
    table.push_row("E3", "Three", &[137_200.0, 7.0]).unwrap();

    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .feature(Feature::new("flat", 1.0))
        .build()
        .unwrap();

    let output = engine.fit(&table).unwrap();
    assert_eq!(output.degenerate_features, vec!["flat".to_string()]);
    assert!(output
        .table
        .column("flat")
        .unwrap()
        .iter()
        .all(|&x| x == 0.0));
}

// ============================================================================
// Output Formatting Tests
// ============================================================================

#[test]
fn test_output_display_sections() {
    let engine = PeerModel::new()
        .feature(Feature::new("population", 1.0))
        .n_peers(2)
        .build()
        .unwrap();

    let output = engine.fit(&wider_table()).unwrap();
    let rendered = format!("{}", output);
    assert!(rendered.contains("Summary:"));
    assert!(rendered.contains("Units: 5"));
    assert!(rendered.contains("Transforms:"));
    assert!(rendered.contains("Peer Groups:"));
}
