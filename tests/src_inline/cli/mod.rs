use super::*;
use crate::model::metrics::MetricCatalog;
use crate::score::normalize::NormalizationMethod;
use clap::Parser;

#[test]
fn run_defaults_resolve_to_required_only_min_max() {
    let cli = Cli::parse_from(["dock-rank", "run", "--input", "in", "--out", "out"]);
    match cli.command {
        Command::Run(args) => {
            assert!(args.normalization.is_none());
            let config = args.run_config().expect("config");
            assert_eq!(config.normalization, NormalizationMethod::MinMax);
            assert!(config.optional_metrics.is_empty());
            assert!(!config.include_idle_proteins);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn run_overrides_apply_to_config() {
    let cli = Cli::parse_from([
        "dock-rank",
        "run",
        "--input",
        "in",
        "--out",
        "out",
        "--normalization",
        "z-score-logistic",
        "--metrics",
        "r_i_glide_hbond",
        "r_i_glide_lipo",
        "--weights",
        "r_i_glide_hbond:2.5",
        "--include-idle-proteins",
    ]);
    match cli.command {
        Command::Run(args) => {
            assert_eq!(args.normalization, Some(run::NormalizationArg::ZScoreLogistic));
            let config = args.run_config().expect("config");
            assert_eq!(config.normalization, NormalizationMethod::ZScoreLogistic);
            assert_eq!(config.optional_metrics, vec!["r_i_glide_hbond", "r_i_glide_lipo"]);
            assert_eq!(config.weights.get("r_i_glide_hbond"), Some(&2.5));
            assert!(config.include_idle_proteins);
            let resolved = config.resolve(MetricCatalog::global()).expect("resolve");
            assert!(resolved.selection.has_optional());
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn malformed_weight_argument_is_an_error() {
    let cli = Cli::parse_from([
        "dock-rank",
        "run",
        "--input",
        "in",
        "--out",
        "out",
        "--weights",
        "r_i_glide_hbond=2",
    ]);
    match cli.command {
        Command::Run(args) => assert!(args.run_config().is_err()),
        _ => panic!("expected run command"),
    }
}

#[test]
fn metrics_subcommands_parse() {
    let cli = Cli::parse_from(["dock-rank", "metrics", "list"]);
    assert!(matches!(cli.command, Command::Metrics(_)));
    let cli = Cli::parse_from(["dock-rank", "metrics", "dump", "--out", "o"]);
    assert!(matches!(cli.command, Command::Metrics(_)));
}

#[test]
fn batch_requires_batch_file() {
    assert!(Cli::try_parse_from(["dock-rank", "batch", "--input", "in", "--out", "out"]).is_err());
    let cli = Cli::parse_from([
        "dock-rank", "batch", "--input", "in", "--out", "out", "--batch", "b.toml",
    ]);
    assert!(matches!(cli.command, Command::Batch(_)));
}
