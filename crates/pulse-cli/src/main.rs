//! Pulse analyzer console front end
//!
//! Capture (or load) a logic trace, extract pulses per channel, print a
//! summary, and write the date-stamped pulse-width report.

mod report;

use anyhow::Result;
use pulse_capture::{AnalyzerController, CaptureConfig};
use pulse_engine::{EngineConfig, PulseAnalyzer};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("starting pulse analyzer");

    let config = EngineConfig::from_env()?;

    // First argument: a trace CSV to analyze instead of live capture
    let capture_config = CaptureConfig {
        sample_source: std::env::args().nth(1).map(PathBuf::from),
        ..Default::default()
    };

    let controller = AnalyzerController::new(capture_config);
    let matrix = controller.capture().await?;

    if matrix.is_empty() {
        info!("capture is empty, nothing to analyze");
        return Ok(());
    }

    let analyzer = PulseAnalyzer::analyze_parallel(&matrix, &config).await;

    print!("{}", report::render_summary(&analyzer, config.width_selection));

    let output_dir = PathBuf::from(
        std::env::var("PULSE_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
    );
    let csv_path = report::pulse_width_csv_path(&output_dir);
    report::write_pulse_width_csv(&csv_path, &analyzer, config.width_selection)?;
    info!(path = %csv_path.display(), "pulse-width report written");

    let json_path = report::summary_json_path(&output_dir);
    report::write_summary_json(&json_path, &analyzer)?;
    info!(path = %json_path.display(), "channel summary written");

    Ok(())
}
