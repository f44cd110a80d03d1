use std::path::PathBuf;

use clap::Parser;

/// Render diagnostic plots from a photoionization grid run: one EW contour
/// map per emission-line column, plus the incident and transmitted SEDs
/// from `continuum.cont`.
#[derive(Parser, Debug)]
#[command(name = "cloudy-plots", version, about)]
pub struct Args {
    /// Emission-line grid table (tab-separated, one column per line).
    /// If omitted, the EW contour stage is skipped.
    #[arg(long)]
    pub file_path: Option<PathBuf>,

    /// Number of grid points along x (log n_H).
    #[arg(long)]
    pub nx: Option<usize>,

    /// Number of grid points along y (log Φ_H).
    #[arg(long)]
    pub ny: Option<usize>,

    /// Minimum x value of the grid.
    #[arg(long)]
    pub x_min: Option<f64>,

    /// Maximum x value of the grid.
    #[arg(long)]
    pub x_max: Option<f64>,

    /// Minimum y value of the grid.
    #[arg(long)]
    pub y_min: Option<f64>,

    /// Maximum y value of the grid.
    #[arg(long)]
    pub y_max: Option<f64>,

    /// Reference column used for normalization (trailing space significant
    /// in the usual grid output headers).
    #[arg(long, default_value = "Inci 1215.00A ")]
    pub ref_col: String,

    /// Lowest contour level (log10 units).
    #[arg(long, default_value_t = 0.0)]
    pub log_min: f64,

    /// Highest contour level (log10 units).
    #[arg(long, default_value_t = 3.0)]
    pub log_max: f64,

    /// Number of evenly spaced contour levels.
    #[arg(long, default_value_t = 12)]
    pub n_levels: usize,

    /// Skip the incident SED plot.
    #[arg(long)]
    pub skip_inci: bool,

    /// Skip the transmitted SED plot.
    #[arg(long)]
    pub skip_trans: bool,
}
