// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use subresync::app_config::{self, Config};
use subresync::app_controller::{shift_from_seconds, Controller};
use subresync::NegativeTimestampPolicy;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for NegativeTimestampPolicy to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNegativePolicy {
    /// Fail when a timestamp would be shifted before zero
    Reject,
    /// Pin such timestamps to zero
    Clamp,
}

impl From<CliNegativePolicy> for NegativeTimestampPolicy {
    fn from(cli_policy: CliNegativePolicy) -> Self {
        match cli_policy {
            CliNegativePolicy::Reject => NegativeTimestampPolicy::Reject,
            CliNegativePolicy::Clamp => NegativeTimestampPolicy::Clamp,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for subresync
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subresync - shift every dialogue timestamp of SRT and ASS subtitles
#[derive(Parser, Debug)]
#[command(name = "subresync")]
#[command(version)]
#[command(about = "Re-time SRT and ASS subtitles by a constant offset")]
#[command(long_about = "subresync shifts every dialogue timestamp of a subtitle file by a constant offset.
Everything else in the file is left untouched. Files ending in .ass are treated as ASS,
every other file as SRT.

EXAMPLES:
    subresync -s 1.5 movie.srt                  # Writes movie_sync.srt
    subresync --shift=-0.25 movie.ass           # Negative shifts need the = form
    subresync -s 2 -o fixed.srt movie.srt       # Explicit output file
    subresync -s 2 subs/ -o retimed/            # Every file in subs/ into retimed/
    subresync completions bash > subresync.bash # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input subtitle file or directory containing them
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Shift in seconds, decimal, may be negative (e.g. 1.5, 5.0, -0.25)
    #[arg(short, long, allow_negative_numbers = true)]
    shift: Option<f64>,

    /// Output file, or output directory when INPUT_PATH is a directory
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// What to do with timestamps shifted before zero
    #[arg(long, value_enum)]
    negative_policy: Option<CliNegativePolicy>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The max level is narrowed once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subresync", &mut std::io::stdout());
        return Ok(());
    }

    run_sync(cli).await
}

async fn run_sync(options: CommandLineOptions) -> Result<()> {
    if let Some(level) = options.log_level {
        log::set_max_level(app_config::LogLevel::from(level).to_level_filter());
    }

    let input_path = options
        .input_path
        .ok_or_else(|| anyhow!("INPUT_PATH is required when no subcommand is specified"))?;

    let shift_seconds = options
        .shift
        .ok_or_else(|| anyhow!("provide a shift in seconds with --shift"))?;
    let shift_ms = shift_from_seconds(shift_seconds)?;

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(level) = options.log_level {
        config.log_level = level.into();
    }
    if let Some(policy) = options.negative_policy {
        config.negative_timestamp_policy = policy.into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?.with_force_overwrite(options.force_overwrite);

    if input_path.is_file() {
        controller
            .run_file(input_path.clone(), options.out, shift_ms)
            .await
            .with_context(|| format!("Failed to process {:?}", input_path))?;
    } else if input_path.is_dir() {
        let outcomes = controller.run_folder(input_path, options.out, shift_ms).await?;
        info!("Finished processing {} files", outcomes.len());
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}
