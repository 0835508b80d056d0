//! CSV trace parsing
//!
//! Accepts the comma-separated dump produced by sigrok-style capture tools:
//! an optional block of `;`-prefixed comment lines, a header row of channel
//! names, then one row of numeric levels per sample.

use anyhow::{bail, Context, Result};
use pulse_core::SampleMatrix;
use tracing::debug;

/// Parse CSV text into a validated sample matrix.
///
/// Blank lines and `;` comment lines are skipped. Cells parse as numbers and
/// are reduced to logic levels by the matrix constructor; a ragged row fails
/// the whole parse.
pub fn parse_trace_csv(text: &str) -> Result<SampleMatrix> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'));

    let header = match lines.next() {
        Some(line) => line,
        None => return Ok(SampleMatrix::from_columns::<f64>(vec![])?),
    };
    let names: Vec<String> = header.split(',').map(|name| name.trim().to_string()).collect();

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line_idx, line) in lines.enumerate() {
        let row = line
            .split(',')
            .map(|cell| {
                cell.trim()
                    .parse::<f64>()
                    .with_context(|| format!("bad cell '{}' in data row {}", cell.trim(), line_idx))
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if names.iter().all(|n| n.is_empty()) {
        bail!("trace header has no channel names");
    }

    let matrix = SampleMatrix::from_rows(names, rows)?;
    debug!(
        channels = matrix.channel_count(),
        samples = matrix.sample_count(),
        "trace CSV parsed"
    );
    Ok(matrix)
}
