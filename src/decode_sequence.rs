//! Decoder for the per-animation step-list metadata ("cgs" files).
//!
//! One record per line: `frameIndex, xPos, yPos, delay, ...` with a trailing
//! comma terminating the record. Fields past the fourth are ignored.

use tracing::debug;

use crate::{
    decode_frames::record_fields,
    model::{AnimationStep, Offset},
};

/// Decode the full sequence text into one entry per input line.
///
/// Malformed lines decode to `None` holes so source rows stay addressable in
/// diagnostics; they never fail the run. Downstream filters the holes, so
/// the resulting step order is the same as if they were omitted.
pub fn decode_sequence(text: &str) -> Vec<Option<AnimationStep>> {
    text.lines()
        .enumerate()
        .map(|(row, line)| decode_step_line(row, line))
        .collect()
}

fn decode_step_line(row: usize, line: &str) -> Option<AnimationStep> {
    let fields = record_fields(line);
    if fields.len() < 4 {
        debug!(row, "skipping step record with too few fields");
        return None;
    }

    let frame_index = parse_field(fields[0], row)?;
    let x_pos = parse_field(fields[1], row)?;
    let y_pos = parse_field(fields[2], row)?;
    let delay = parse_field(fields[3], row)?;

    if frame_index < 0 {
        debug!(row, frame_index, "skipping step with negative frame index");
        return None;
    }

    Some(AnimationStep {
        frame_index: frame_index as usize,
        offset: Offset::new(x_pos, y_pos),
        delay,
    })
}

fn parse_field(field: &str, row: usize) -> Option<i32> {
    match field.trim().parse::<i32>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!(row, field, "skipping step record with non-integer field");
            None
        }
    }
}
