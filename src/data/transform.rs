use super::model::Field;

/// Multiplicative rescaling applied before the log: the Lyman-alpha rest
/// wavelength in Ångström. A convention of the source data, not a knob.
pub const LYA_RESCALE: f64 = 1215.0;

// ---------------------------------------------------------------------------
// Numeric coercion and flooring
// ---------------------------------------------------------------------------

/// Coerce string cells to `f64`. Unparsable cells become NaN rather than an
/// error; "no signal" entries in grid output are routinely non-numeric.
pub fn coerce_numeric(cells: &[String]) -> Vec<f64> {
    cells
        .iter()
        .map(|c| c.trim().parse::<f64>().unwrap_or(f64::NAN))
        .collect()
}

/// Clamp missing and sub-unity values to exactly 1. Keeps every later
/// division and `log10` in-domain, and pins "no signal" at a fixed minimum.
pub fn floor_at_unity(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .map(|&v| if v.is_nan() || v < 1.0 { 1.0 } else { v })
        .collect()
}

// ---------------------------------------------------------------------------
// The equivalent-width transform
// ---------------------------------------------------------------------------

/// Per-row EW proxy: floor both columns at 1, normalize the line flux by the
/// reference flux, rescale by Lyman-alpha and take `log10`.
///
/// Both inputs are raw coerced columns of equal length; the reference is
/// floored independently so its own missing values never divide by zero.
pub fn log_equivalent_width(flux: &[f64], reference: &[f64]) -> Vec<f64> {
    debug_assert_eq!(flux.len(), reference.len());
    let flux_safe = floor_at_unity(flux);
    let ref_safe = floor_at_unity(reference);
    flux_safe
        .iter()
        .zip(ref_safe.iter())
        .map(|(&f, &r)| (f / r * LYA_RESCALE).log10())
        .collect()
}

/// Fold a flat per-row column onto the `nx` x `ny` grid (x-major).
pub fn fold_onto_grid(values: Vec<f64>, nx: usize, ny: usize) -> Field {
    Field::from_flat(values, nx, ny)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_turns_garbage_into_nan() {
        let cells: Vec<String> = ["1.5", " 2e3 ", "n/a", ""]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let vals = coerce_numeric(&cells);
        assert_eq!(vals[0], 1.5);
        assert_eq!(vals[1], 2000.0);
        assert!(vals[2].is_nan());
        assert!(vals[3].is_nan());
    }

    #[test]
    fn floor_replaces_nan_and_subunity_with_one() {
        let out = floor_at_unity(&[f64::NAN, 0.5, -3.0, 1.0, 10.0]);
        assert_eq!(out, vec![1.0, 1.0, 1.0, 1.0, 10.0]);
    }

    #[test]
    fn log_input_is_never_out_of_domain() {
        let flux = vec![f64::NAN, -5.0, 0.0, 0.999, 1e6];
        let reference = vec![0.0, f64::NAN, 0.2, 2.0, 4.0];
        for v in log_equivalent_width(&flux, &reference) {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn worked_scenario_matches_hand_computation() {
        // Reference all 2, flux [1, 0.5, NaN, 10]:
        // floored [1,1,1,10] / 2 -> [0.5,0.5,0.5,5] * 1215 -> log10.
        let flux = vec![1.0, 0.5, f64::NAN, 10.0];
        let reference = vec![2.0; 4];
        let out = log_equivalent_width(&flux, &reference);
        let expect = [607.5_f64.log10(), 607.5_f64.log10(), 607.5_f64.log10(), 6075.0_f64.log10()];
        for (got, want) in out.iter().zip(expect.iter()) {
            assert!((got - want).abs() < 1e-12, "{got} != {want}");
        }
        assert!((out[0] - 2.7835).abs() < 1e-4);
        assert!((out[3] - 3.7835).abs() < 1e-4);
    }

    #[test]
    fn transform_is_deterministic() {
        let flux = vec![3.0, 0.2, f64::NAN, 42.0];
        let reference = vec![2.0, 5.0, 1.0, 0.0];
        let a = log_equivalent_width(&flux, &reference);
        let b = log_equivalent_width(&flux, &reference);
        assert_eq!(a, b);
    }

    #[test]
    fn folded_field_matches_flat_order() {
        let vals = log_equivalent_width(&[1.0, 2.0, 4.0, 8.0], &[1.0; 4]);
        let field = fold_onto_grid(vals.clone(), 2, 2);
        assert_eq!(field.value(0, 0), vals[0]);
        assert_eq!(field.value(0, 1), vals[1]);
        assert_eq!(field.value(1, 0), vals[2]);
        assert_eq!(field.value(1, 1), vals[3]);
    }
}
