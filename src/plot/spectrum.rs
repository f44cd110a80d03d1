use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{SPECTRUM_DIR, resolve_output_dir};
use crate::color;
use crate::data::loader::load_continuum;
use crate::data::model::Continuum;

/// The SED table written by the simulation, read from the working directory.
pub const CONTINUUM_FILE: &str = "continuum.cont";

/// 12 x 6 in at 300 dpi.
const PLOT_SIZE: (u32, u32) = (3600, 1800);

/// Plotted energy window in eV.
const X_RANGE: (f64, f64) = (0.9, 2e8);

// ---------------------------------------------------------------------------
// The two plot variants
// ---------------------------------------------------------------------------

/// Which continuum column to plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SedKind {
    Incident,
    Transmitted,
}

impl SedKind {
    pub fn series_label(self) -> &'static str {
        match self {
            SedKind::Incident => "Incident SED",
            SedKind::Transmitted => "Transmitted SED",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SedKind::Incident => "incident_continuum_spectrum.png",
            SedKind::Transmitted => "transmitted_continuum_spectrum.png",
        }
    }

    fn select(self, cont: &Continuum) -> &[f64] {
        match self {
            SedKind::Incident => &cont.incident,
            SedKind::Transmitted => &cont.transmitted,
        }
    }
}

// ---------------------------------------------------------------------------
// Wavelength-equivalent energy bands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Band {
    lo: f64,
    hi: f64,
    label: &'static str,
    color: RGBColor,
}

const BANDS: [Band; 4] = [
    Band { lo: 0.9, hi: 3.0, label: "Visible", color: color::BAND_GREEN },
    Band { lo: 3.0, hi: 100.0, label: "Ultraviolet", color: color::BAND_BLUE },
    Band { lo: 100.0, hi: 1e4, label: "X-rays", color: color::BAND_PURPLE },
    Band { lo: 1e4, hi: 2e8, label: "Gamma rays", color: color::BAND_VIOLET },
];

impl Band {
    /// Translucent fill for the shaded region itself.
    fn shade_style(&self) -> ShapeStyle {
        self.color.mix(0.3).filled()
    }

    /// Legend swatches stay full opacity.
    fn swatch_style(&self) -> ShapeStyle {
        self.color.filled()
    }
}

// ---------------------------------------------------------------------------
// Stage entry point
// ---------------------------------------------------------------------------

/// Load `continuum.cont`, keep only rows where both photon energy and the
/// selected νFν exceed 1, log the flux, and render a log-x scatter with the
/// band shading. An empty selection still produces a (pointless but valid)
/// plot.
pub fn plot_sed(kind: SedKind) -> Result<PathBuf> {
    let cont = load_continuum(Path::new(CONTINUUM_FILE))?;
    if cont.is_empty() {
        log::warn!("{CONTINUUM_FILE} has no data rows");
    }
    log::debug!("{}: {} continuum rows loaded", kind.series_label(), cont.len());

    let points = filter_points(&cont, kind);
    if points.is_empty() {
        log::warn!(
            "{}: no rows with energy > 1 and flux > 1; writing an empty plot",
            kind.series_label()
        );
    }

    let out_dir = resolve_output_dir(SPECTRUM_DIR)?;
    let out_path = out_dir.join(kind.file_name());
    render_sed(&points, kind, &out_path)?;
    log::info!("wrote {}", out_path.display());
    Ok(out_path)
}

/// Positive-log-domain filter plus the log transform:
/// `(energy, log10(flux))` for rows with `energy > 1` and `flux > 1`.
fn filter_points(cont: &Continuum, kind: SedKind) -> Vec<(f64, f64)> {
    cont.energy
        .iter()
        .zip(kind.select(cont).iter())
        .filter(|(&e, &f)| e > 1.0 && f > 1.0)
        .map(|(&e, &f)| (e, f.log10()))
        .collect()
}

/// Padded y-axis range around the data; a fixed default window when the
/// filter left nothing to plot.
fn y_range(points: &[(f64, f64)]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 1.0);
    }
    let min = points.iter().map(|&(_, y)| y).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|&(_, y)| y).fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).abs();
    let pad = if span < 1e-6 { 0.5 } else { span * 0.15 };
    (min - pad, max + pad)
}

fn render_sed(points: &[(f64, f64)], kind: SedKind, out_path: &Path) -> Result<()> {
    let (y_lo, y_hi) = y_range(points);

    let root = BitMapBackend::new(out_path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(40)
        .x_label_area_size(120)
        .y_label_area_size(150)
        .build_cartesian_2d((X_RANGE.0..X_RANGE.1).log_scale(), y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Photon energy [eV]")
        .y_desc("log (νFν)")
        .label_style(("sans-serif", 40))
        .axis_desc_style(("sans-serif", 48))
        .light_line_style(&BLACK.mix(0.1))
        .draw()?;

    // Band shading goes under the data points.
    for band in BANDS {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(band.lo, y_lo), (band.hi, y_hi)],
                band.shade_style(),
            )))?
            .label(band.label)
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 10), (x + 24, y + 10)], band.swatch_style())
            });
    }

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color::SED_SERIES.filled())),
        )?
        .label(kind.series_label())
        .legend(|(x, y)| Circle::new((x + 12, y), 5, color::SED_SERIES.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.9))
        .border_style(&BLACK)
        .label_font(("sans-serif", 42).into_font())
        .draw()?;

    root.present()
        .with_context(|| format!("writing {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_continuum() -> Continuum {
        Continuum {
            energy: vec![0.5, 2.0, 50.0, 1e5],
            incident: vec![100.0, 0.3, 1000.0, 10.0],
            transmitted: vec![90.0, 10.0, 0.9, 5.0],
        }
    }

    #[test]
    fn filter_requires_both_conditions() {
        let cont = sample_continuum();
        // energy 0.5 fails the energy cut; incident 0.3 fails the flux cut.
        let inci = filter_points(&cont, SedKind::Incident);
        assert_eq!(inci.len(), 2);
        assert_eq!(inci[0].0, 50.0);
        assert!((inci[0].1 - 3.0).abs() < 1e-12);

        let trans = filter_points(&cont, SedKind::Transmitted);
        assert_eq!(trans.len(), 2);
        assert_eq!(trans[0].0, 2.0);
    }

    #[test]
    fn empty_selection_is_not_an_error() {
        let cont = Continuum {
            energy: vec![0.1, 0.2],
            incident: vec![0.5, 0.6],
            transmitted: vec![0.5, 0.6],
        };
        assert!(filter_points(&cont, SedKind::Incident).is_empty());
        assert_eq!(y_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn y_range_pads_around_data() {
        let (lo, hi) = y_range(&[(10.0, 1.0), (20.0, 3.0)]);
        assert!(lo < 1.0 && hi > 3.0);
        // Flat data still gets a usable window.
        let (lo, hi) = y_range(&[(10.0, 2.0)]);
        assert!(hi - lo >= 1.0 - 1e-12);
    }

    #[test]
    fn band_shading_is_translucent_but_swatches_are_solid() {
        for band in BANDS {
            assert!((band.shade_style().color.3 - 0.3).abs() < 1e-12);
            assert_eq!(band.swatch_style().color.3, 1.0);
        }
    }

    #[test]
    fn variants_differ_only_in_column_and_naming() {
        assert_eq!(SedKind::Incident.file_name(), "incident_continuum_spectrum.png");
        assert_eq!(SedKind::Transmitted.file_name(), "transmitted_continuum_spectrum.png");
        assert_ne!(SedKind::Incident.series_label(), SedKind::Transmitted.series_label());
    }
}
