use super::*;
use crate::model::rows::{ConformationId, MetricValues};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn min_max_general_case_maps_missing_to_worst() {
    let values = [Some(-3.0), Some(0.0), Some(3.0), None];
    let out = normalize_column(&values, NormalizationMethod::MinMax);
    assert!(approx(out[0], 0.0));
    assert!(approx(out[1], 0.5));
    assert!(approx(out[2], 1.0));
    assert!(approx(out[3], 1.0));
}

#[test]
fn min_max_preserves_order_negative_zero_positive() {
    let values = [Some(2.5), Some(-8.0), Some(0.0), Some(-0.5), Some(11.0)];
    let out = normalize_column(&values, NormalizationMethod::MinMax);
    for (i, a) in values.iter().enumerate() {
        for (j, b) in values.iter().enumerate() {
            if a.expect("present") < b.expect("present") {
                assert!(out[i] <= out[j], "{i} vs {j}");
            }
        }
    }
}

#[test]
fn min_max_all_missing_is_neutral() {
    let values = [None, None, None];
    let out = normalize_column(&values, NormalizationMethod::MinMax);
    assert_eq!(out, vec![0.0, 0.0, 0.0]);
}

#[test]
fn min_max_constant_column_maps_present_to_one() {
    let values = [Some(4.0), Some(4.0), Some(4.0)];
    let out = normalize_column(&values, NormalizationMethod::MinMax);
    assert_eq!(out, vec![1.0, 1.0, 1.0]);
}

#[test]
fn min_max_constant_column_maps_missing_to_zero() {
    let values = [Some(4.0), None];
    let out = normalize_column(&values, NormalizationMethod::MinMax);
    assert_eq!(out, vec![1.0, 0.0]);
}

#[test]
fn z_score_missing_is_one_above_worst_present() {
    let values = [Some(1.0), Some(2.0), Some(3.0), None];
    let out = normalize_column(&values, NormalizationMethod::ZScore);
    // mean 2, sample std 1
    assert!(approx(out[0], -1.0));
    assert!(approx(out[1], 0.0));
    assert!(approx(out[2], 1.0));
    assert!(approx(out[3], 2.0));
}

#[test]
fn z_score_constant_column_is_degenerate() {
    let values = [Some(5.0), Some(5.0), None];
    let out = normalize_column(&values, NormalizationMethod::ZScore);
    assert_eq!(out, vec![0.0, 0.0, 1.0]);
    let single = normalize_column(&[Some(5.0)], NormalizationMethod::ZScore);
    assert_eq!(single, vec![0.0]);
}

#[test]
fn z_score_logistic_stays_in_unit_interval_and_ranks_missing_last() {
    let values = [Some(-10.0), Some(0.0), Some(10.0), None];
    let out = normalize_column(&values, NormalizationMethod::ZScoreLogistic);
    assert!(out.iter().all(|v| *v > 0.0 && *v < 1.0));
    assert!(out[0] < out[1] && out[1] < out[2] && out[2] < out[3]);
}

#[test]
fn dataset_normalization_is_global_across_proteins() {
    let row = |protein: &str, score: f64| RawRow {
        protein_name: protein.to_string(),
        conformation: ConformationId::new(1, 1),
        values: MetricValues::missing().with(MetricId::DockingScore, Some(score)),
    };
    let rows = vec![row("P1", -10.0), row("P2", 0.0), row("P2", -5.0)];
    let out = normalize_dataset(&rows, NormalizationMethod::MinMax);
    assert!(approx(out[0].get(MetricId::DockingScore), 0.0));
    assert!(approx(out[1].get(MetricId::DockingScore), 1.0));
    assert!(approx(out[2].get(MetricId::DockingScore), 0.5));
    // Entirely absent metric stays neutral.
    assert_eq!(out[0].get(MetricId::GlideHbond), 0.0);
}

#[test]
fn method_names_round_trip_through_serde() {
    #[derive(serde::Deserialize)]
    struct Wrapper {
        method: NormalizationMethod,
    }
    let parsed: Wrapper = toml::from_str("method = \"z-score-logistic\"").expect("parse");
    assert_eq!(parsed.method, NormalizationMethod::ZScoreLogistic);
    assert_eq!(NormalizationMethod::MinMax.to_string(), "min-max");
}
