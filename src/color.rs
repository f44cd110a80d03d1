use palette::{LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Copper colormap for contour lines
// ---------------------------------------------------------------------------

/// Fraction of the ramp at which the red channel saturates.
const COPPER_KNEE: f32 = 0.8015;

/// Sample the copper ramp at `t` in `[0, 1]`: black through copper brown,
/// red channel saturating before green and blue finish climbing.
pub fn copper(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0) as f32;

    let dark: LinSrgb = Srgb::new(0.0, 0.0, 0.0).into_linear();
    let knee: LinSrgb =
        Srgb::new(1.0, 0.7812 * COPPER_KNEE, 0.4975 * COPPER_KNEE).into_linear();
    let tip: LinSrgb = Srgb::new(1.0, 0.7812, 0.4975).into_linear();

    let lin = if t < COPPER_KNEE {
        dark.mix(knee, t / COPPER_KNEE)
    } else {
        knee.mix(tip, (t - COPPER_KNEE) / (1.0 - COPPER_KNEE))
    };

    let srgb: Srgb = Srgb::from_linear(lin);
    RGBColor(
        (srgb.red * 255.0) as u8,
        (srgb.green * 255.0) as u8,
        (srgb.blue * 255.0) as u8,
    )
}

/// One copper sample per contour level, evenly spaced along the ramp.
pub fn level_colors(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![copper(0.0)];
    }
    (0..n)
        .map(|i| copper(i as f64 / (n - 1) as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// SED plot colors
// ---------------------------------------------------------------------------

/// Scatter series color for the SED points.
pub const SED_SERIES: RGBColor = RGBColor(0, 0, 255);

/// Wavelength-band shading colors (drawn at 0.3 alpha by the plot layer).
pub const BAND_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const BAND_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const BAND_PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const BAND_VIOLET: RGBColor = RGBColor(238, 130, 238);
