/*!
 * Integration tests for the file and directory re-timing workflow
 */

use std::fs;
use anyhow::Result;

use subresync::app_config::Config;
use subresync::app_controller::{Controller, FileOutcome};
use subresync::timestamp::NegativeTimestampPolicy;
use crate::common;

/// Test that a single SRT file is re-timed next to its input
#[tokio::test]
async fn test_run_file_withSrtFile_shouldWriteSuffixedOutput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(temp_dir.path(), "movie.srt")?;

    let controller = Controller::with_config(Config::default())?;
    let outcome = controller.run_file(input.clone(), None, 1_500).await?;

    let expected_output = temp_dir.path().join("movie_sync.srt");
    assert_eq!(outcome.output(), expected_output.as_path());
    match &outcome {
        FileOutcome::Written { report, .. } => assert_eq!(report.timing_lines, 3),
        other => panic!("expected a written file, got {:?}", other),
    }

    let content = fs::read_to_string(&expected_output)?;
    assert!(content.contains("00:00:02,500 --> 00:00:05,500"));
    assert!(content.contains("00:00:11,500 --> 00:00:15,500"));

    // The input is never modified
    assert_eq!(fs::read_to_string(&input)?, common::SAMPLE_SRT);
    Ok(())
}

/// Test that an ASS file is detected from its extension
#[tokio::test]
async fn test_run_file_withAssFileAndExplicitOutput_shouldWriteThere() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_ass(temp_dir.path(), "episode.ass")?;
    let output = temp_dir.path().join("fixed").join("episode.ass");

    let controller = Controller::with_config(Config::default())?;
    controller.run_file(input, Some(output.clone()), -1_000).await?;

    let content = fs::read_to_string(&output)?;
    assert!(content.contains("Dialogue: 0,0:00:00.00,0:00:02.50,Default,,0,0,0,,Hello"));
    assert!(content.contains("Comment: 0,0:00:00.00,0:00:00.50,Default,,0,0,0,,timing note"));
    Ok(())
}

/// Test that an existing output is only replaced with force overwrite
#[tokio::test]
async fn test_run_file_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(temp_dir.path(), "movie.srt")?;
    let existing = common::create_test_file(temp_dir.path(), "movie_sync.srt", "keep me")?;

    let controller = Controller::with_config(Config::default())?;
    let outcome = controller.run_file(input.clone(), None, 1_000).await?;
    assert!(matches!(outcome, FileOutcome::Skipped { .. }));
    assert_eq!(fs::read_to_string(&existing)?, "keep me");

    let controller = Controller::with_config(Config::default())?.with_force_overwrite(true);
    let outcome = controller.run_file(input, None, 1_000).await?;
    assert!(matches!(outcome, FileOutcome::Written { .. }));
    assert!(fs::read_to_string(&existing)?.contains("00:00:02,000 --> 00:00:05,000"));
    Ok(())
}

/// Test that a failing document produces no output file
#[tokio::test]
async fn test_run_file_withMalformedDocument_shouldFailWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(
        temp_dir.path(),
        "broken.ass",
        "[Events]\nDialogue: 0,0:00:01.00,0:00:02.00,Default,Hi\n",
    )?;

    let controller = Controller::with_config(Config::default())?;
    let err = controller.run_file(input, None, 1_000).await.unwrap_err();

    assert!(format!("{:#}", err).contains("malformed subtitle file at line 2"));
    assert!(!temp_dir.path().join("broken_sync.ass").exists());
    Ok(())
}

/// Test the configured negative timestamp policy end to end
#[tokio::test]
async fn test_run_file_withClampPolicy_shouldPinEarlyCuesToZero() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_srt(temp_dir.path(), "movie.srt")?;

    let rejecting = Controller::with_config(Config::default())?;
    assert!(rejecting.run_file(input.clone(), None, -2_000).await.is_err());

    let config = Config {
        negative_timestamp_policy: NegativeTimestampPolicy::Clamp,
        ..Config::default()
    };
    let clamping = Controller::with_config(config)?;
    let outcome = clamping.run_file(input, None, -2_000).await?;

    let content = fs::read_to_string(outcome.output())?;
    assert!(content.contains("00:00:00,000 --> 00:00:02,000"));
    Ok(())
}

/// Test that every file in a directory is re-timed into the output directory
#[tokio::test]
async fn test_run_folder_withMixedFormats_shouldProcessEveryFile() -> Result<()> {
    common::init_test_logging();
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    common::create_test_srt(input_dir.path(), "one.srt")?;
    common::create_test_srt(input_dir.path(), "two.srt")?;
    common::create_test_ass(input_dir.path(), "three.ass")?;

    let config = Config {
        concurrent_files: 2,
        ..Config::default()
    };
    let controller = Controller::with_config(config)?;
    let outcomes = controller
        .run_folder(input_dir.path().to_path_buf(), Some(output_dir.path().to_path_buf()), 500)
        .await?;

    assert_eq!(outcomes.len(), 3);
    for name in ["one_sync.srt", "two_sync.srt", "three_sync.ass"] {
        assert!(output_dir.path().join(name).exists(), "missing {}", name);
    }

    let ass = fs::read_to_string(output_dir.path().join("three_sync.ass"))?;
    assert!(ass.contains("Dialogue: 0,0:00:01.50,0:00:04.00,Default,,0,0,0,,Hello"));
    Ok(())
}

/// Test that one broken file aborts the directory run
#[tokio::test]
async fn test_run_folder_withBrokenFile_shouldFail() -> Result<()> {
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    common::create_test_srt(input_dir.path(), "good.srt")?;
    common::create_test_file(input_dir.path(), "bad.srt", "1\n00:00:xx,000 --> 00:00:02,000\nBad\n")?;

    let controller = Controller::with_config(Config::default())?;
    let result = controller
        .run_folder(input_dir.path().to_path_buf(), Some(output_dir.path().to_path_buf()), 500)
        .await;

    let err = result.unwrap_err();
    assert!(format!("{:#}", err).contains("seconds"));
    Ok(())
}

/// Test that missing inputs are reported
#[tokio::test]
async fn test_run_withMissingInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    assert!(controller.run_file(temp_dir.path().join("nope.srt"), None, 1_000).await.is_err());
    assert!(controller.run_folder(temp_dir.path().join("nope"), None, 1_000).await.is_err());
    Ok(())
}

/// Test that an empty directory is not an error
#[tokio::test]
async fn test_run_folder_withEmptyDirectory_shouldReturnNoOutcomes() -> Result<()> {
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;

    let controller = Controller::with_config(Config::default())?;
    let outcomes = controller
        .run_folder(input_dir.path().to_path_buf(), Some(output_dir.path().to_path_buf()), 1_000)
        .await?;

    assert!(outcomes.is_empty());
    Ok(())
}
