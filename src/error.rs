use thiserror::Error;

// ---------------------------------------------------------------------------
// Data-layer errors
// ---------------------------------------------------------------------------

/// Validation failures in the grid-table pipeline.
///
/// These abort the whole contour call before anything is rendered; the
/// runner catches them at the stage boundary so the other stages still run.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The flattened table cannot be folded back onto the declared grid.
    #[error(
        "grid is {nx} x {ny} = {expected} points, but the table has {actual} rows; \
         they must match"
    )]
    GridShape {
        nx: usize,
        ny: usize,
        expected: usize,
        actual: usize,
    },

    /// The normalization reference column is absent from the header.
    #[error("reference column '{0}' not found in table")]
    MissingReference(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_names_the_column() {
        let err = PlotError::MissingReference("Inci 1215.00A ".into());
        assert!(err.to_string().contains("Inci 1215.00A "));
    }
}
