use super::*;
use crate::config::RunConfig;
use crate::model::metrics::MetricId;
use crate::score::normalize::NormalizationMethod;
use std::fs;
use tempfile::tempdir;

const HEADER: &str =
    "title,i_i_glide_lignum,r_i_docking_score,r_i_glide_gscore,r_i_glide_emodel,r_i_glide_energy";

fn write_protein(dir: &Path, name: &str, rows: &[&str]) {
    let mut body = String::from(HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(dir.join(format!("{name}.csv")), body).expect("write csv");
}

fn resolved(config: RunConfig) -> ResolvedConfig {
    config.resolve(MetricCatalog::global()).expect("resolve")
}

fn load(dir: &Path) -> Dataset {
    run_stage1(dir, MetricCatalog::global()).expect("stage1")
}

fn sample_dir(dir: &Path) {
    write_protein(
        dir,
        "P1",
        &["1,1,-8.0,-7.5,-60,-40", "1,2,-6.0,-6.1,-55,-35", "2,1,-5.5,-5.0,-30,-20"],
    );
    write_protein(
        dir,
        "P2",
        &["1,1,-7.0,-7.0,-70,-45", "1,2,10000,10000,-10,-5", "2,1,-9.0,-8.5,-80,-50"],
    );
    write_protein(dir, "P3", &["1,1,-3.0,-3.0,-20,-10", "3,1,-4.0,-4.0,-25,-12"]);
}

#[test]
fn cancel_token_is_shared_between_clones() {
    let token = CancelToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());
    token.cancel();
    assert!(clone.is_cancelled());
}

#[test]
fn sentinel_protein_loses_under_z_score() {
    let dir = tempdir().expect("tempdir");
    write_protein(dir.path(), "P1", &["5,1,-3.0,-2.0,-100.0,-50.0"]);
    write_protein(dir.path(), "P2", &["5,1,10000,10000,10000,10000"]);
    let dataset = load(dir.path());
    let config = resolved(RunConfig {
        normalization: NormalizationMethod::ZScore,
        ..RunConfig::default()
    });
    let rankings = rank_dataset(&dataset, &config, &CancelToken::new()).expect("rank");

    assert_eq!(rankings.conformations.entries.len(), 1);
    let best = &rankings.conformations.entries[0];
    assert_eq!(best.best_protein, "P1");
    let p2_total = rankings
        .scores
        .rows
        .iter()
        .find(|r| r.protein_name == "P2")
        .map(|r| r.total_index)
        .expect("P2 row");
    assert!(best.total_index < p2_total);
}

#[test]
fn sentinel_scenario_without_spread_ties_under_min_max() {
    let dir = tempdir().expect("tempdir");
    write_protein(dir.path(), "P1", &["5,1,-3.0,-2.0,-100.0,-50.0"]);
    write_protein(dir.path(), "P2", &["5,1,10000,10000,10000,10000"]);
    let dataset = load(dir.path());
    let rankings =
        rank_dataset(&dataset, &resolved(RunConfig::default()), &CancelToken::new()).expect("rank");

    let row = |protein: &str| {
        rankings
            .scores
            .rows
            .iter()
            .find(|r| r.protein_name == protein)
            .expect("scored row")
    };
    // Single present docking value: min == max maps P1 to 1 and missing P2 to 0.
    assert_eq!((row("P1").docking_index, row("P1").energy_index), (1.0, 0.0));
    assert_eq!((row("P2").docking_index, row("P2").energy_index), (0.0, 1.0));
    assert_eq!(row("P1").total_index, 0.5);
    assert_eq!(row("P2").total_index, 0.5);
    assert_eq!(rankings.conformations.entries[0].best_protein, "P2");
}

#[test]
fn sentinel_protein_loses_under_min_max_with_spread() {
    let dir = tempdir().expect("tempdir");
    write_protein(dir.path(), "P1", &["5,1,-3.0,-2.0,-100.0,-50.0", "6,1,-1.0,-1.0,-10,-5"]);
    write_protein(dir.path(), "P2", &["5,1,10000,10000,10000,10000"]);
    let dataset = load(dir.path());
    let rankings =
        rank_dataset(&dataset, &resolved(RunConfig::default()), &CancelToken::new()).expect("rank");

    let entry = rankings
        .conformations
        .entries
        .iter()
        .find(|e| e.title == 5)
        .expect("conformation 5");
    assert_eq!(entry.best_protein, "P1");
    let p2 = rankings
        .scores
        .rows
        .iter()
        .find(|r| r.protein_name == "P2")
        .expect("P2 row");
    assert_eq!(p2.docking_index, 1.0);
    assert!(entry.total_index < p2.total_index);
}

#[test]
fn required_only_total_is_even_split() {
    let dir = tempdir().expect("tempdir");
    sample_dir(dir.path());
    let dataset = load(dir.path());
    for method in [
        NormalizationMethod::MinMax,
        NormalizationMethod::ZScore,
        NormalizationMethod::ZScoreLogistic,
    ] {
        let config = resolved(RunConfig {
            normalization: method,
            ..RunConfig::default()
        });
        let rankings = rank_dataset(&dataset, &config, &CancelToken::new()).expect("rank");
        for row in &rankings.scores.rows {
            assert_eq!(row.total_index, 0.5 * row.docking_index + 0.5 * row.energy_index);
            assert!(row.optional_index.is_none());
        }
    }
}

#[test]
fn rankings_conserve_conformations_and_wins() {
    let dir = tempdir().expect("tempdir");
    sample_dir(dir.path());
    let dataset = load(dir.path());
    let config = resolved(RunConfig {
        include_idle_proteins: true,
        ..RunConfig::default()
    });
    let rankings = rank_dataset(&dataset, &config, &CancelToken::new()).expect("rank");

    assert_eq!(rankings.conformations.entries.len(), dataset.distinct_conformations());
    assert_eq!(rankings.conformations.entries.len(), 4);
    assert_eq!(rankings.proteins.total_wins(), rankings.conformations.entries.len());
    let names: Vec<&str> = rankings
        .proteins
        .entries
        .iter()
        .map(|p| p.protein_name.as_str())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["P1", "P2", "P3"]);
    for pair in rankings.conformations.entries.windows(2) {
        assert!(pair[0].total_index <= pair[1].total_index);
    }
}

#[test]
fn ranking_is_independent_of_row_order() {
    let dir = tempdir().expect("tempdir");
    sample_dir(dir.path());
    let dataset = load(dir.path());
    let config = resolved(RunConfig::default());
    let forward = rank_dataset(&dataset, &config, &CancelToken::new()).expect("rank");

    let mut rows = dataset.rows.clone();
    rows.reverse();
    let reversed = Dataset::from_rows(rows);
    let backward = rank_dataset(&reversed, &config, &CancelToken::new()).expect("rank");

    assert_eq!(forward.conformations.entries, backward.conformations.entries);
    assert_eq!(forward.proteins.entries, backward.proteins.entries);
}

#[test]
fn optional_metrics_use_top_level_weights() {
    let dir = tempdir().expect("tempdir");
    let header = format!("{HEADER},r_i_glide_hbond");
    fs::write(
        dir.path().join("P1.csv"),
        format!("{header}\n1,1,-8,-7,-60,-40,-1.5\n2,1,-4,-3,-20,-10,-0.5\n"),
    )
    .expect("write csv");
    let dataset = load(dir.path());
    let config = resolved(RunConfig {
        optional_metrics: vec![MetricId::GlideHbond.as_str().to_string()],
        ..RunConfig::default()
    });
    let rankings = rank_dataset(&dataset, &config, &CancelToken::new()).expect("rank");
    for row in &rankings.scores.rows {
        let optional = row.optional_index.expect("optional index");
        let expected = 0.4 * row.docking_index + 0.4 * row.energy_index + 0.2 * optional;
        assert!((row.total_index - expected).abs() < 1e-12);
    }
    assert_eq!(rankings.conformations.entries[0].title, 1);
}

#[test]
fn repeated_runs_write_identical_files() {
    let input = tempdir().expect("tempdir");
    sample_dir(input.path());
    let out_a = tempdir().expect("tempdir");
    let out_b = tempdir().expect("tempdir");
    let config = resolved(RunConfig::default());

    run_pipeline(input.path(), out_a.path(), &config, &CancelToken::new()).expect("run a");
    run_pipeline(input.path(), out_b.path(), &config, &CancelToken::new()).expect("run b");

    for name in [
        "conformation_ranking.tsv",
        "protein_ranking.tsv",
        "scored_rows.tsv",
        "summary.json",
        "report.txt",
    ] {
        let a = fs::read(out_a.path().join(name)).expect("read a");
        let b = fs::read(out_b.path().join(name)).expect("read b");
        assert_eq!(a, b, "{name} differs");
    }
}

#[test]
fn cancelled_run_fails() {
    let dir = tempdir().expect("tempdir");
    sample_dir(dir.path());
    let dataset = load(dir.path());
    let cancel = CancelToken::new();
    cancel.cancel();
    match rank_dataset(&dataset, &resolved(RunConfig::default()), &cancel) {
        Err(PipelineError::Score(Stage3Error::Rank(RankError::Cancelled))) => {}
        other => panic!("unexpected: {other:?}"),
    }
}
