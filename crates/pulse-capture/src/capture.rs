//! Capture control for an external logic-analyzer CLI
//!
//! Runs the capture command as a subprocess and parses its CSV output, with
//! bounded retries for flaky hardware. A file source can stand in for the
//! hardware when no analyzer is attached.

use crate::loader::parse_trace_csv;
use anyhow::{bail, Context, Result};
use pulse_core::SampleMatrix;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, error};

/// Acquisition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Capture command and its arguments, e.g. `sigrok-cli ... -O csv`
    pub command: Vec<String>,
    /// How many times to retry a failed capture
    pub max_attempts: u32,
    /// Pause between attempts
    pub retry_delay: Duration,
    /// When set, load this trace file instead of running the command
    pub sample_source: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            command: vec![
                "sigrok-cli".to_string(),
                "--driver".to_string(),
                "hantek-4032l".to_string(),
                "--samples".to_string(),
                "8192".to_string(),
                "-O".to_string(),
                "csv".to_string(),
            ],
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            sample_source: None,
        }
    }
}

/// Drives one capture per invocation, from hardware or from a trace file
pub struct AnalyzerController {
    config: CaptureConfig,
}

impl AnalyzerController {
    pub fn new(config: CaptureConfig) -> Self {
        debug!(?config.sample_source, attempts = config.max_attempts, "analyzer controller ready");
        AnalyzerController { config }
    }

    /// Acquire one sample matrix.
    ///
    /// With a file source configured, reads and parses that file. Otherwise
    /// runs the capture command, retrying up to the configured attempt count
    /// before surfacing the last failure.
    pub async fn capture(&self) -> Result<SampleMatrix> {
        if let Some(path) = &self.config.sample_source {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading trace file {}", path.display()))?;
            debug!(path = %path.display(), "trace loaded from file");
            return parse_trace_csv(&text);
        }

        let (program, args) = match self.config.command.split_first() {
            Some(split) => split,
            None => bail!("capture command is empty"),
        };

        let mut last_failure = None;
        for attempt in 1..=self.config.max_attempts.max(1) {
            match self.run_once(program, args).await {
                Ok(matrix) => {
                    debug!(
                        attempt,
                        channels = matrix.channel_count(),
                        samples = matrix.sample_count(),
                        "capture complete"
                    );
                    return Ok(matrix);
                }
                Err(e) => {
                    error!(attempt, max = self.config.max_attempts, "capture failed: {e:#}");
                    last_failure = Some(e);
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }

        Err(last_failure
            .unwrap_or_else(|| anyhow::anyhow!("capture produced no attempts"))
            .context(format!(
                "capture failed after {} attempts",
                self.config.max_attempts
            )))
    }

    async fn run_once(&self, program: &str, args: &[String]) -> Result<SampleMatrix> {
        let output = Command::new(program)
            .args(args)
            .output()
            .await
            .with_context(|| format!("spawning capture command '{}'", program))?;

        if !output.status.success() {
            bail!(
                "capture command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let text = String::from_utf8(output.stdout).context("capture output is not UTF-8")?;
        parse_trace_csv(&text)
    }
}
