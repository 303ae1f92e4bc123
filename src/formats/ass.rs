use super::{FormatStrategy, LineKind, TimestampShifter};
use crate::errors::SubtitleError;
use crate::timestamp::SubtitleFormat;

// @const: Prefix of an ASS dialogue event record
const DIALOGUE_PREFIX: &str = "Dialogue:";

const FIELD_SEPARATOR: char = ',';

/// Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
const DIALOGUE_FIELD_COUNT: usize = 10;
const START_FIELD: usize = 1;
const END_FIELD: usize = 2;

// @struct: Advanced SubStation Alpha strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct AssStrategy;

impl FormatStrategy for AssStrategy {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Ass
    }

    // Comment, Style and Format records also contain commas but are never parsed
    fn classify(&self, line: &str) -> LineKind {
        if line.starts_with(DIALOGUE_PREFIX) {
            LineKind::Timing
        } else {
            LineKind::Passthrough
        }
    }

    fn rewrite_timing_line(
        &self,
        line: &str,
        line_number: usize,
        shifter: &TimestampShifter,
    ) -> Result<String, SubtitleError> {
        // The text field is last and may itself contain commas
        let fields: Vec<&str> = line.splitn(DIALOGUE_FIELD_COUNT, FIELD_SEPARATOR).collect();

        if fields.len() < DIALOGUE_FIELD_COUNT {
            return Err(SubtitleError::MalformedDocument {
                line: line_number,
                expected: DIALOGUE_FIELD_COUNT,
                found: fields.len(),
            });
        }

        let start = shifter.shift(fields[START_FIELD], line_number)?;
        let end = shifter.shift(fields[END_FIELD], line_number)?;

        let mut rewritten = Vec::with_capacity(fields.len());
        rewritten.extend_from_slice(&fields[..START_FIELD]);
        rewritten.push(start.as_str());
        rewritten.push(end.as_str());
        rewritten.extend_from_slice(&fields[END_FIELD + 1..]);

        Ok(rewritten.join(","))
    }
}
