/*!
 * # subresync - Subtitle Re-Synchronizer
 *
 * A Rust library for shifting every dialogue timestamp of a subtitle file by
 * a constant offset while leaving the rest of the file untouched.
 *
 * ## Features
 *
 * - SRT (`HH:MM:SS,mmm`) and ASS (`H:MM:SS.cc`) timestamps
 * - Lossless reproduction of every line that carries no timing information
 * - Explicit policy for timestamps shifted before zero
 * - Single files or whole directories, processed concurrently
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timestamp`: Timestamp codec (string <-> milliseconds)
 * - `formats`: Line classification and format strategies:
 *   - `formats::srt`: SubRip cue-time lines
 *   - `formats::ass`: ASS `Dialogue:` records
 * - `subtitle_processor`: Whole-document re-timing
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod formats;
pub mod subtitle_processor;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{AppError, SubtitleError, TimestampError, TimestampField};
pub use subtitle_processor::{sync, sync_with_policy, SubtitleProcessor, SyncReport};
pub use timestamp::{format_timestamp, parse_timestamp, NegativeTimestampPolicy, SubtitleFormat};
