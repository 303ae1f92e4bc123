use std::borrow::Cow;

use log::debug;

use crate::errors::SubtitleError;
use crate::formats::{strategy_for, FormatStrategy, LineKind, TimestampShifter};
use crate::timestamp::{NegativeTimestampPolicy, SubtitleFormat};

// @module: Whole-document subtitle re-timing

const LINE_SEPARATOR: char = '\n';

/// Result of re-timing one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Re-timed document
    pub content: String,

    /// Number of lines whose timestamps were rewritten
    pub timing_lines: usize,

    /// Number of physical lines in the document
    pub total_lines: usize,
}

/// Applies one constant shift to every timing line of a document
pub struct SubtitleProcessor {
    strategy: &'static dyn FormatStrategy,
    shifter: TimestampShifter,
}

impl SubtitleProcessor {
    /// Create a processor that rejects timestamps shifted below zero
    pub fn new(format: SubtitleFormat, shift_ms: i64) -> Self {
        Self::with_policy(format, shift_ms, NegativeTimestampPolicy::default())
    }

    pub fn with_policy(format: SubtitleFormat, shift_ms: i64, policy: NegativeTimestampPolicy) -> Self {
        Self {
            strategy: strategy_for(format),
            shifter: TimestampShifter::new(format, shift_ms, policy),
        }
    }

    pub fn format(&self) -> SubtitleFormat {
        self.strategy.format()
    }

    /// Re-time a whole document.
    ///
    /// Lines are split on `\n` and joined back with `\n`, so the output has
    /// exactly as many lines as the input. A trailing `\r` is kept on its line.
    /// The first failing line aborts the whole document and no partial output
    /// is returned.
    pub fn process(&self, content: &str) -> Result<SyncReport, SubtitleError> {
        let lines = content
            .split(LINE_SEPARATOR)
            .enumerate()
            .map(|(index, line)| self.process_line(line, index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let total_lines = lines.len();
        let timing_lines = lines
            .iter()
            .filter(|(_, kind)| *kind == LineKind::Timing)
            .count();

        let content = lines
            .into_iter()
            .map(|(line, _)| line)
            .collect::<Vec<_>>()
            .join("\n");

        debug!(
            "Shifted {} of {} {} lines by {}ms",
            timing_lines,
            total_lines,
            self.format(),
            self.shifter.shift_ms()
        );

        Ok(SyncReport {
            content,
            timing_lines,
            total_lines,
        })
    }

    fn process_line<'a>(&self, line: &'a str, line_number: usize) -> Result<(Cow<'a, str>, LineKind), SubtitleError> {
        let (body, line_ending) = match line.strip_suffix('\r') {
            Some(body) => (body, "\r"),
            None => (line, ""),
        };

        match self.strategy.classify(body) {
            LineKind::Passthrough => Ok((Cow::Borrowed(line), LineKind::Passthrough)),
            LineKind::Timing => {
                let mut rewritten = self.strategy.rewrite_timing_line(body, line_number, &self.shifter)?;
                rewritten.push_str(line_ending);
                Ok((Cow::Owned(rewritten), LineKind::Timing))
            }
        }
    }
}

/// Re-time `content` by `shift_ms`, rejecting timestamps shifted below zero
pub fn sync(content: &str, shift_ms: i64, format: SubtitleFormat) -> Result<String, SubtitleError> {
    sync_with_policy(content, shift_ms, format, NegativeTimestampPolicy::Reject)
}

/// Re-time `content` by `shift_ms` with an explicit negative timestamp policy
pub fn sync_with_policy(
    content: &str,
    shift_ms: i64,
    format: SubtitleFormat,
    policy: NegativeTimestampPolicy,
) -> Result<String, SubtitleError> {
    SubtitleProcessor::with_policy(format, shift_ms, policy)
        .process(content)
        .map(|report| report.content)
}
