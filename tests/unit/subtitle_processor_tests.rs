/*!
 * Tests for whole-document subtitle re-timing
 */

use subresync::errors::{SubtitleError, TimestampError, TimestampField};
use subresync::subtitle_processor::{sync, sync_with_policy, SubtitleProcessor};
use subresync::timestamp::{NegativeTimestampPolicy, SubtitleFormat};
use crate::common;

/// Test the basic SRT cue shift
#[test]
fn test_sync_withSrtCueLine_shouldShiftBothTimestamps() {
    let output = sync("00:00:01,000 --> 00:00:03,500", 1_500, SubtitleFormat::Srt).unwrap();
    assert_eq!(output, "00:00:02,500 --> 00:00:05,000");
}

/// Test the basic ASS dialogue shift
#[test]
fn test_sync_withAssDialogue_shouldOnlyChangeTimestampFields() {
    let output = sync(
        "Dialogue: 0,0:00:01.00,0:00:03.50,Default,,0,0,0,,Hello",
        2_000,
        SubtitleFormat::Ass,
    )
    .unwrap();
    assert_eq!(output, "Dialogue: 0,0:00:03.00,0:00:05.50,Default,,0,0,0,,Hello");
}

/// Test that a short dialogue record fails the whole document
#[test]
fn test_sync_withFiveFieldDialogue_shouldReturnMalformedDocument() {
    let doc = format!("{}Dialogue: 0,0:00:07.00,0:00:08.00,Default,Bye\n", common::SAMPLE_ASS);
    let result = sync(&doc, 1_000, SubtitleFormat::Ass);
    assert!(matches!(
        result,
        Err(SubtitleError::MalformedDocument { expected: 10, found: 5, .. })
    ));
}

/// Test that a broken minutes field is reported as such
#[test]
fn test_sync_withBadMinutes_shouldReturnParseErrorForMinutes() {
    let result = sync("00:0X:01,000 --> 00:00:02,000", 1_000, SubtitleFormat::Srt);
    match result {
        Err(SubtitleError::InvalidTimestamp { line, source: TimestampError::Parse { field, value, .. } }) => {
            assert_eq!(line, 1);
            assert_eq!(field, TimestampField::Minutes);
            assert_eq!(value, "0X");
        }
        other => panic!("expected a minutes parse error, got {:?}", other),
    }
}

/// Test both negative timestamp policies
#[test]
fn test_sync_withShiftPastZero_shouldRejectByDefaultAndClampOnRequest() {
    let doc = "00:00:00,500 --> 00:00:01,500";

    let rejected = sync(doc, -1_000, SubtitleFormat::Srt);
    assert!(matches!(
        rejected,
        Err(SubtitleError::InvalidTimestamp { source: TimestampError::Negative { ms: -500 }, .. })
    ));

    let clamped = sync_with_policy(doc, -1_000, SubtitleFormat::Srt, NegativeTimestampPolicy::Clamp).unwrap();
    assert_eq!(clamped, "00:00:00,000 --> 00:00:00,500");
}

/// Test that a zero shift reproduces both sample documents exactly
#[test]
fn test_sync_withZeroShift_shouldBeIdentity() {
    assert_eq!(sync(common::SAMPLE_SRT, 0, SubtitleFormat::Srt).unwrap(), common::SAMPLE_SRT);
    assert_eq!(sync(common::SAMPLE_ASS, 0, SubtitleFormat::Ass).unwrap(), common::SAMPLE_ASS);
}

/// Test that non-timing lines are reproduced character for character
#[test]
fn test_sync_withAssHeaders_shouldPassThroughNonDialogueLines() {
    let output = sync(common::SAMPLE_ASS, 60_000, SubtitleFormat::Ass).unwrap();

    let input_lines: Vec<&str> = common::SAMPLE_ASS.split('\n').collect();
    let output_lines: Vec<&str> = output.split('\n').collect();
    assert_eq!(input_lines.len(), output_lines.len());

    for (before, after) in input_lines.iter().zip(&output_lines) {
        if before.starts_with("Dialogue:") {
            assert_ne!(before, after);
        } else {
            assert_eq!(before, after);
        }
    }

    assert!(output.contains("Dialogue: 0,0:01:04.25,0:01:06.00,Default,Bob,0,0,0,,Hi, how are you?"));
    assert!(output.contains("Comment: 0,0:00:00.00,0:00:00.50,Default,,0,0,0,,timing note"));
}

/// Test that index and text lines of an SRT file are untouched
#[test]
fn test_sync_withSrtDocument_shouldKeepIndexAndTextLines() {
    let output = sync(common::SAMPLE_SRT, -500, SubtitleFormat::Srt).unwrap();
    assert_eq!(
        output,
        "1
00:00:00,500 --> 00:00:03,500
This is a test subtitle.

2
00:00:04,500 --> 00:00:08,500
It contains multiple entries.

3
00:00:09,500 --> 00:00:13,500
For testing purposes.
"
    );
}

/// Test the report returned by the processor
#[test]
fn test_process_withAssDocument_shouldReportDialogueCount() {
    let processor = SubtitleProcessor::new(SubtitleFormat::Ass, 100);
    assert_eq!(processor.format(), SubtitleFormat::Ass);

    let report = processor.process(common::SAMPLE_ASS).unwrap();
    assert_eq!(report.timing_lines, 2);
    assert_eq!(report.total_lines, common::SAMPLE_ASS.split('\n').count());
}

/// Test that an empty document stays empty
#[test]
fn test_sync_withEmptyDocument_shouldReturnEmptyString() {
    assert_eq!(sync("", 1_000, SubtitleFormat::Srt).unwrap(), "");
    assert_eq!(sync("", 1_000, SubtitleFormat::Ass).unwrap(), "");
}
