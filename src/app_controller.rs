use anyhow::{anyhow, Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{SubtitleProcessor, SyncReport};

// @module: Application controller for subtitle re-timing

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The re-timed subtitle was written to `output`
    Written {
        output: PathBuf,
        report: SyncReport,
    },
    /// The output already existed and overwriting was not requested
    Skipped {
        output: PathBuf,
    },
}

impl FileOutcome {
    pub fn output(&self) -> &Path {
        match self {
            FileOutcome::Written { output, .. } | FileOutcome::Skipped { output } => output,
        }
    }
}

/// Main application controller for subtitle re-timing
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Replace existing output files
    force_overwrite: bool,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        Ok(Self {
            config,
            force_overwrite: false,
        })
    }

    pub fn with_force_overwrite(mut self, force_overwrite: bool) -> Self {
        self.force_overwrite = force_overwrite;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Re-time a single subtitle file.
    ///
    /// Without an explicit output the result is written next to the input,
    /// with the configured suffix inserted before the extension.
    pub async fn run_file(&self, input_file: PathBuf, output_file: Option<PathBuf>, shift_ms: i64) -> Result<FileOutcome> {
        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let output_file = output_file
            .unwrap_or_else(|| FileManager::generate_output_path(&input_file, &self.config.output_suffix));

        let outcome = self.sync_file(&input_file, &output_file, shift_ms).await?;
        Self::log_outcome(&outcome);

        Ok(outcome)
    }

    /// Re-time every file directly inside `input_dir`.
    ///
    /// Files are processed concurrently, at most `concurrent_files` at a time.
    /// The first failure aborts the batch.
    pub async fn run_folder(&self, input_dir: PathBuf, output_dir: Option<PathBuf>, shift_ms: i64) -> Result<Vec<FileOutcome>> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let output_dir = output_dir.unwrap_or_else(|| PathBuf::from(&self.config.output_directory));
        FileManager::ensure_dir(&output_dir)?;

        let files = FileManager::list_files(&input_dir)?;
        if files.is_empty() {
            warn!("No files found in directory: {:?}", input_dir);
            return Ok(Vec::new());
        }

        info!("Re-timing {} file(s) from {:?} into {:?}", files.len(), input_dir, output_dir);

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let jobs = files.into_iter().map(|input| {
            let output = output_dir.join(FileManager::output_file_name(&input, &self.config.output_suffix));
            let progress = progress.clone();
            async move {
                let outcome = self.sync_file(&input, &output, shift_ms).await?;
                progress.inc(1);
                Ok::<_, anyhow::Error>(outcome)
            }
        });

        let result = stream::iter(jobs)
            .buffered(self.config.concurrent_files)
            .try_collect::<Vec<_>>()
            .await;

        match result {
            Ok(outcomes) => {
                progress.finish_with_message("done");
                outcomes.iter().for_each(Self::log_outcome);
                Ok(outcomes)
            }
            Err(e) => {
                progress.abandon_with_message("failed");
                error!("Aborting directory processing: {:#}", e);
                Err(e)
            }
        }
    }

    async fn sync_file(&self, input_file: &Path, output_file: &Path, shift_ms: i64) -> Result<FileOutcome> {
        if input_file == output_file {
            return Err(anyhow!("Output path is the same as the input file: {:?}", input_file));
        }

        if output_file.exists() && !self.force_overwrite {
            return Ok(FileOutcome::Skipped {
                output: output_file.to_path_buf(),
            });
        }

        let content = FileManager::read_to_string(input_file)?;

        let format = FileManager::detect_format(input_file);
        debug!("Processing {:?} as {}", input_file, format);

        let processor = SubtitleProcessor::with_policy(format, shift_ms, self.config.negative_timestamp_policy);
        let report = processor
            .process(&content)
            .with_context(|| format!("Failed to re-time subtitle file: {:?}", input_file))?;

        FileManager::write_to_file(output_file, &report.content)?;

        Ok(FileOutcome::Written {
            output: output_file.to_path_buf(),
            report,
        })
    }

    fn log_outcome(outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Written { output, report } => {
                info!("done - {} ({} cues shifted)", output.display(), report.timing_lines);
            }
            FileOutcome::Skipped { output } => {
                warn!("Skipping {}, output already exists (use -f to force overwrite)", output.display());
            }
        }
    }
}

/// Convert a shift in fractional seconds to whole milliseconds, rounding to the nearest one.
///
/// A shift that rounds to zero would rewrite files unchanged and is rejected.
pub fn shift_from_seconds(seconds: f64) -> Result<i64, AppError> {
    if !seconds.is_finite() {
        return Err(AppError::Config(format!("Shift must be a finite number of seconds, got {}", seconds)));
    }

    let ms = (seconds * 1000.0).round();
    if ms < i64::MIN as f64 || ms >= i64::MAX as f64 {
        return Err(AppError::Config(format!("Shift of {} seconds is out of range", seconds)));
    }

    if ms == 0.0 {
        return Err(AppError::Config(format!(
            "provide shift value different from zero, {} seconds rounds to 0ms",
            seconds
        )));
    }

    Ok(ms as i64)
}
