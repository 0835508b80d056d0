//! Console summary and pulse-width CSV report

use anyhow::{Context, Result};
use chrono::Local;
use pulse_engine::{PulseAnalyzer, WidthSelection};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// Date-stamped report path inside `output_dir`
pub fn pulse_width_csv_path(output_dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    output_dir.join(format!("{}-pulse-widths.csv", date))
}

/// Date-stamped JSON summary path inside `output_dir`
pub fn summary_json_path(output_dir: &Path) -> PathBuf {
    let date = Local::now().format("%Y-%m-%d");
    output_dir.join(format!("{}-summary.json", date))
}

/// Write the per-channel summaries, including failed channels, as JSON
pub fn write_summary_json(path: &Path, analyzer: &PulseAnalyzer) -> Result<()> {
    let json = serde_json::to_string_pretty(&analyzer.summaries())
        .context("serializing channel summaries")?;
    std::fs::write(path, json)
        .with_context(|| format!("writing summary {}", path.display()))
}

/// Render the per-channel console summary.
///
/// Width annotations follow the configured selection; failed channels are
/// reported with their error instead of a pulse line.
pub fn render_summary(analyzer: &PulseAnalyzer, selection: WidthSelection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "channel      pulses  polarity  widths");

    for summary in analyzer.summaries() {
        if let Some(error) = &summary.error {
            let _ = writeln!(out, "{:<12} error: {}", summary.name, error);
            continue;
        }
        let polarity = if summary.rising { "rising" } else { "falling" };
        let widths = if selection.selects(summary.rising) {
            format!("{:?}", summary.widths)
        } else {
            "-".to_string()
        };
        let _ = writeln!(
            out,
            "{:<12} {:>6}  {:<8}  {}",
            summary.name, summary.pulse_count, polarity, widths
        );
    }
    out
}

/// Write one `channel,pulse,width` row per pulse for the selected channels.
///
/// Channels excluded by the selection, failed channels, and channels without
/// pulses contribute no rows; the header is always present.
pub fn write_pulse_width_csv(
    path: &Path,
    analyzer: &PulseAnalyzer,
    selection: WidthSelection,
) -> Result<()> {
    let mut text = String::from("channel,pulse,width\n");

    for summary in analyzer.summaries() {
        if summary.error.is_some() || !selection.selects(summary.rising) {
            continue;
        }
        for (pulse_idx, width) in summary.widths.iter().enumerate() {
            let _ = writeln!(text, "{},{},{}", summary.name, pulse_idx, width);
        }
    }

    std::fs::write(path, text)
        .with_context(|| format!("writing pulse-width report {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::SampleMatrix;
    use pulse_engine::EngineConfig;

    fn two_channel_analyzer() -> PulseAnalyzer {
        // RISE carries high pulses, FALL carries low dips of the same shape
        let rise: Vec<u8> = wave(&[0; 6], 3, 10, 6);
        let fall: Vec<u8> = rise.iter().map(|&v| v ^ 1).collect();
        let matrix = SampleMatrix::from_columns(vec![
            ("RISE".to_string(), rise),
            ("FALL".to_string(), fall),
        ])
        .unwrap();
        let config = EngineConfig { filter_window: 3, ..Default::default() };
        PulseAnalyzer::analyze(&matrix, &config)
    }

    fn wave(lead: &[u8], periods: usize, high: usize, low: usize) -> Vec<u8> {
        let mut levels = lead.to_vec();
        for _ in 0..periods {
            levels.extend(std::iter::repeat(1u8).take(high));
            levels.extend(std::iter::repeat(0u8).take(low));
        }
        levels
    }

    #[test]
    fn test_summary_lists_all_channels() {
        let analyzer = two_channel_analyzer();
        let summary = render_summary(&analyzer, WidthSelection::All);
        assert!(summary.contains("RISE"));
        assert!(summary.contains("FALL"));
        assert!(summary.contains("rising"));
    }

    #[test]
    fn test_selection_suppresses_widths() {
        let analyzer = two_channel_analyzer();
        let summary = render_summary(&analyzer, WidthSelection::None);
        for line in summary.lines().skip(1) {
            assert!(line.trim_end().ends_with('-'));
        }
    }

    #[test]
    fn test_csv_rows_respect_selection() {
        let analyzer = two_channel_analyzer();
        let dir = std::env::temp_dir().join("pulse-cli-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("widths.csv");

        write_pulse_width_csv(&path, &analyzer, WidthSelection::Rising).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.starts_with("channel,pulse,width\n"));
        assert!(text.contains("RISE,0,"));
        assert!(!text.contains("FALL"));
    }

    #[test]
    fn test_csv_path_is_date_stamped() {
        let path = pulse_width_csv_path(Path::new("/tmp"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("-pulse-widths.csv"));
        assert_eq!(name.len(), "2026-08-27-pulse-widths.csv".len());
    }

    #[test]
    fn test_summary_json_round_trips() {
        let analyzer = two_channel_analyzer();
        let dir = std::env::temp_dir().join("pulse-cli-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("summary.json");

        write_summary_json(&path, &analyzer).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["name"], "RISE");
        assert_eq!(entries[0]["pulse_count"], 3);
        assert_eq!(entries[1]["rising"], false);
    }
}
