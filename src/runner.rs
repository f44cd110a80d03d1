use anyhow::Result;

use crate::cli::Args;
use crate::data::model::{GridSpec, LevelSpec};
use crate::plot::contour::{ContourConfig, plot_ew_contours};
use crate::plot::spectrum::{SedKind, plot_sed};

// ---------------------------------------------------------------------------
// Contour stage plan
// ---------------------------------------------------------------------------

/// Whether the contour stage can run, and if not, why. Replaces a silent
/// skip so callers (and tests) can see the reason.
#[derive(Debug)]
pub enum ContourPlan {
    Ready(ContourConfig),
    /// No `--file-path` given; the stage is simply not requested.
    NoInputFile,
    /// `--file-path` given but some grid flags are absent.
    MissingParams(Vec<&'static str>),
}

impl ContourPlan {
    pub fn from_args(args: &Args) -> Self {
        let Some(file_path) = &args.file_path else {
            return ContourPlan::NoInputFile;
        };

        match (args.nx, args.ny, args.x_min, args.x_max, args.y_min, args.y_max) {
            (Some(nx), Some(ny), Some(x_min), Some(x_max), Some(y_min), Some(y_max)) => {
                ContourPlan::Ready(ContourConfig {
                    file_path: file_path.clone(),
                    grid: GridSpec { nx, ny, x_min, x_max, y_min, y_max },
                    ref_col: args.ref_col.clone(),
                    levels: LevelSpec {
                        log_min: args.log_min,
                        log_max: args.log_max,
                        n_levels: args.n_levels,
                    },
                })
            }
            _ => {
                let flags = [
                    ("--nx", args.nx.is_none()),
                    ("--ny", args.ny.is_none()),
                    ("--x-min", args.x_min.is_none()),
                    ("--x-max", args.x_max.is_none()),
                    ("--y-min", args.y_min.is_none()),
                    ("--y-max", args.y_max.is_none()),
                ];
                ContourPlan::MissingParams(
                    flags
                        .iter()
                        .filter(|(_, missing)| *missing)
                        .map(|(name, _)| *name)
                        .collect(),
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Stage outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Completed,
    Skipped(String),
    Failed(String),
}

/// Per-stage outcomes of one run. A failed stage never aborts the others,
/// but it does make the whole run count as failed.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub stages: Vec<(&'static str, StageOutcome)>,
}

impl RunSummary {
    fn record(&mut self, stage: &'static str, outcome: StageOutcome) {
        self.stages.push((stage, outcome));
    }

    pub fn any_failed(&self) -> bool {
        self.stages
            .iter()
            .any(|(_, o)| matches!(o, StageOutcome::Failed(_)))
    }

    pub fn report(&self) {
        for (stage, outcome) in &self.stages {
            match outcome {
                StageOutcome::Completed => log::info!("{stage}: completed"),
                StageOutcome::Skipped(reason) => log::info!("{stage}: skipped ({reason})"),
                StageOutcome::Failed(message) => log::error!("{stage}: failed: {message}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// The run itself
// ---------------------------------------------------------------------------

/// Run every requested stage. Each stage is guarded independently: an error
/// is reported and recorded, then the next stage still runs.
pub fn run(args: &Args) -> RunSummary {
    let mut summary = RunSummary::default();

    match ContourPlan::from_args(args) {
        ContourPlan::Ready(config) => {
            summary.record(
                "ew-contours",
                guard("ew-contours", || plot_ew_contours(&config).map(|_| ())),
            );
        }
        ContourPlan::NoInputFile => {
            log::info!("no --file-path given; skipping EW contour plots");
            summary.record("ew-contours", StageOutcome::Skipped("no input file".into()));
        }
        ContourPlan::MissingParams(missing) => {
            let list = missing.join(", ");
            log::error!(
                "--file-path given but grid parameters are incomplete; missing: {list}"
            );
            summary.record("ew-contours", StageOutcome::Skipped(format!("missing {list}")));
        }
    }

    if args.skip_inci {
        summary.record("incident-sed", StageOutcome::Skipped("--skip-inci".into()));
    } else {
        summary.record(
            "incident-sed",
            guard("incident-sed", || plot_sed(SedKind::Incident).map(|_| ())),
        );
    }

    if args.skip_trans {
        summary.record("transmitted-sed", StageOutcome::Skipped("--skip-trans".into()));
    } else {
        summary.record(
            "transmitted-sed",
            guard("transmitted-sed", || plot_sed(SedKind::Transmitted).map(|_| ())),
        );
    }

    summary
}

fn guard(stage: &str, f: impl FnOnce() -> Result<()>) -> StageOutcome {
    match f() {
        Ok(()) => StageOutcome::Completed,
        Err(e) => {
            log::error!("{stage} failed: {e:#}");
            StageOutcome::Failed(format!("{e:#}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("cloudy-plots").chain(argv.iter().copied()))
    }

    #[test]
    fn no_file_path_means_not_requested() {
        let plan = ContourPlan::from_args(&parse(&[]));
        assert!(matches!(plan, ContourPlan::NoInputFile));
    }

    #[test]
    fn missing_grid_flags_are_named() {
        let args = parse(&["--file-path", "lines.tsv", "--nx", "29", "--x-min", "7"]);
        match ContourPlan::from_args(&args) {
            ContourPlan::MissingParams(missing) => {
                assert_eq!(missing, vec!["--ny", "--x-max", "--y-min", "--y-max"]);
            }
            other => panic!("expected MissingParams, got {other:?}"),
        }
    }

    #[test]
    fn complete_args_build_a_ready_config() {
        let args = parse(&[
            "--file-path", "lines.tsv",
            "--nx", "29", "--ny", "29",
            "--x-min", "7", "--x-max", "14",
            "--y-min", "17", "--y-max", "24",
        ]);
        match ContourPlan::from_args(&args) {
            ContourPlan::Ready(config) => {
                assert_eq!(config.grid.nx, 29);
                assert_eq!(config.grid.expected_rows(), 841);
                // Defaults carried through.
                assert_eq!(config.ref_col, "Inci 1215.00A ");
                assert_eq!(config.levels.n_levels, 12);
            }
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn failed_stage_marks_the_run() {
        let mut summary = RunSummary::default();
        summary.record("a", StageOutcome::Completed);
        summary.record("b", StageOutcome::Skipped("flag".into()));
        assert!(!summary.any_failed());
        summary.record("c", StageOutcome::Failed("boom".into()));
        assert!(summary.any_failed());
    }

    #[test]
    fn guard_reports_errors_without_propagating() {
        let outcome = guard("x", || anyhow::bail!("nope"));
        assert!(matches!(outcome, StageOutcome::Failed(m) if m.contains("nope")));
        assert_eq!(guard("x", || Ok(())), StageOutcome::Completed);
    }
}
