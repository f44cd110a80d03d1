use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Continuum, LineTable};

// ---------------------------------------------------------------------------
// Emission-line grid table (tab-separated, ISO-8859-1)
// ---------------------------------------------------------------------------

/// Load the emission-line grid table.
///
/// Layout: first row is a header naming every column; tab-separated cells;
/// legacy ISO-8859-1 encoding (line labels may carry 8-bit characters such
/// as `Å`). Cells are kept as strings, numeric coercion happens downstream.
pub fn load_line_table(path: &Path) -> Result<LineTable> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("reading line table {}", path.display()))?;
    let text = decode_latin1(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading line-table header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("line table has no columns");
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        // The csv reader already rejects rows whose cell count differs
        // from the header.
        let record = result.with_context(|| format!("line-table row {row_no}"))?;
        for (col, cell) in record.iter().enumerate() {
            columns[col].push(cell.to_string());
        }
    }

    Ok(LineTable { headers, columns })
}

/// ISO-8859-1 maps each byte directly onto the same Unicode code point.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// Continuum SED table (whitespace-delimited)
// ---------------------------------------------------------------------------

/// Load a `continuum.cont`-style SED table: whitespace-delimited numeric
/// rows, `#`-prefixed comment lines skipped, at least three columns per row
/// (photon energy, incident νFν, transmitted νFν).
pub fn load_continuum(path: &Path) -> Result<Continuum> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading continuum file {}", path.display()))?;

    let mut cont = Continuum::default();

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let mut next_num = |name: &str| -> Result<f64> {
            let tok = fields
                .next()
                .with_context(|| format!("continuum line {line_no}: missing {name} column"))?;
            tok.parse::<f64>()
                .with_context(|| format!("continuum line {line_no}: '{tok}' is not a number"))
        };

        cont.energy.push(next_num("energy")?);
        cont.incident.push(next_num("incident")?);
        cont.transmitted.push(next_num("transmitted")?);
        // Further columns (reflected, totals, ...) are ignored.
    }

    Ok(cont)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn line_table_roundtrips_latin1_headers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // 0xC5 is 'Å' in ISO-8859-1; invalid as UTF-8 on its own.
        file.write_all(b"#lineslist\tInci 1215.00\xC5 \tO  3 5007\xC5\n").unwrap();
        file.write_all(b"model_0\t2.0\t10.0\n").unwrap();
        file.write_all(b"model_1\t2.0\tn/a\n").unwrap();
        file.flush().unwrap();

        let table = load_line_table(file.path()).unwrap();
        assert_eq!(table.headers[0], "#lineslist");
        assert_eq!(table.headers[1], "Inci 1215.00Å ");
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("O  3 5007Å").unwrap()[1], "n/a");
    }

    #[test]
    fn line_table_rejects_ragged_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a\tb\n1\t2\n3\n").unwrap();
        file.flush().unwrap();
        assert!(load_line_table(file.path()).is_err());
    }

    #[test]
    fn continuum_skips_comments_and_reads_three_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"# energy\tincident\ttransmitted\n").unwrap();
        file.write_all(b"0.5 12.0 11.0 99.0\n").unwrap();
        file.write_all(b"\n2.0\t100.0\t80.0\n").unwrap();
        file.flush().unwrap();

        let cont = load_continuum(file.path()).unwrap();
        assert_eq!(cont.len(), 2);
        assert_eq!(cont.energy, vec![0.5, 2.0]);
        assert_eq!(cont.incident, vec![12.0, 100.0]);
        assert_eq!(cont.transmitted, vec![11.0, 80.0]);
    }

    #[test]
    fn continuum_fails_on_short_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"1.0 2.0\n").unwrap();
        file.flush().unwrap();
        let err = load_continuum(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("transmitted"));
    }
}
