use super::{FormatStrategy, LineKind, TimestampShifter};
use crate::errors::SubtitleError;
use crate::timestamp::SubtitleFormat;

// @const: Marker identifying an SRT cue-time line
const ARROW: &str = "-->";

const FIELD_SEPARATOR: char = ' ';
const START_FIELD: usize = 0;
const END_FIELD: usize = 2;

// @struct: SubRip strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtStrategy;

impl FormatStrategy for SrtStrategy {
    fn format(&self) -> SubtitleFormat {
        SubtitleFormat::Srt
    }

    fn classify(&self, line: &str) -> LineKind {
        if line.contains(ARROW) {
            LineKind::Timing
        } else {
            LineKind::Passthrough
        }
    }

    // Tokens after the end timestamp (cue position settings) are kept as-is
    fn rewrite_timing_line(
        &self,
        line: &str,
        line_number: usize,
        shifter: &TimestampShifter,
    ) -> Result<String, SubtitleError> {
        let mut fields: Vec<String> = line.split(FIELD_SEPARATOR).map(str::to_string).collect();

        if fields.len() <= END_FIELD {
            return Err(SubtitleError::MalformedDocument {
                line: line_number,
                expected: END_FIELD + 1,
                found: fields.len(),
            });
        }

        fields[START_FIELD] = shifter.shift(&fields[START_FIELD], line_number)?;
        fields[END_FIELD] = shifter.shift(&fields[END_FIELD], line_number)?;

        Ok(fields.join(" "))
    }
}
