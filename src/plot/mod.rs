use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Rendering layer. Both plot families write into fixed-name
/// subdirectories resolved next to the running executable (falling back to
/// the working directory), created idempotently before the first write.
pub mod contour;
pub mod spectrum;

/// Output subdirectory for the EW contour maps.
pub const CONTOUR_DIR: &str = "EW_plots";

/// Output subdirectory for the incident/transmitted SED plots.
pub const SPECTRUM_DIR: &str = "Incident&Transmitted_spectrum";

/// Resolve (and create if absent) an output directory next to the
/// executable, or under the working directory when the executable path is
/// unavailable.
pub fn resolve_output_dir(name: &str) -> Result<PathBuf> {
    let base = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()));
    let base = match base {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolving working directory")?,
    };

    let dir = base.join(name);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;
    Ok(dir)
}

/// Map a column name onto a safe file stem: everything outside
/// letters/digits/`_-().` and whitespace becomes `_`, outer whitespace is
/// trimmed, and remaining spaces become `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '_' | '-' | '(' | ')' | '.')
            {
                c
            } else {
                '_'
            }
        })
        .collect();
    replaced.trim().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_disallowed_characters() {
        assert_eq!(sanitize_file_name("Line/Flux@1215"), "Line_Flux_1215");
        assert_eq!(sanitize_file_name("O  3 5007.07A"), "O__3_5007.07A");
    }

    #[test]
    fn sanitize_trims_then_joins_spaces() {
        assert_eq!(sanitize_file_name("Inci 1215.00A "), "Inci_1215.00A");
        assert_eq!(sanitize_file_name("  He 2 1640A  "), "He_2_1640A");
    }

    #[test]
    fn sanitize_keeps_parens_dots_hyphens() {
        assert_eq!(sanitize_file_name("Fe-2 (UV).x"), "Fe-2_(UV).x");
    }

    #[test]
    fn sanitize_is_deterministic() {
        let name = "TOTL  4363A";
        assert_eq!(sanitize_file_name(name), sanitize_file_name(name));
    }
}
