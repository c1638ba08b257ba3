//! Decoder for the per-frame part-list metadata ("cgg" files).
//!
//! One record per line: `anchor, partCount, <partCount x 11 part fields>,`
//! with a trailing comma terminating every record. Part fields per chunk, in
//! order: `xPos, yPos, orientationCode, blendModeCode, opacityPercent,
//! rotationDegrees, srcX, srcY, srcWidth, srcHeight, pageID`.

use tracing::debug;

use crate::{
    error::{SpriteError, SpriteResult},
    model::{BlendMode, Frame, Offset, Orientation, Part, Rect},
};

/// Fields per part chunk.
const PART_ARITY: usize = 11;

/// Decode the full frame-list text into one entry per input line.
///
/// Lines with too few fields decode to `None` so indices stay parallel to
/// the frame indices referenced by sequence files. An orientation code
/// outside 0-3 fails the whole decode.
pub fn decode_frames(text: &str) -> SpriteResult<Vec<Option<Frame>>> {
    text.lines()
        .enumerate()
        .map(|(row, line)| decode_frame_line(row, line))
        .collect()
}

fn decode_frame_line(row: usize, line: &str) -> SpriteResult<Option<Frame>> {
    let fields = record_fields(line);
    if fields.len() < 2 {
        debug!(row, "skipping frame record with too few fields");
        return Ok(None);
    }

    let anchor = parse_int(fields[0], row)?;
    let count = parse_int(fields[1], row)?;
    if count < 0 {
        return Err(SpriteError::decode(format!(
            "line {row}: negative part count {count}"
        )));
    }
    let count = count as usize;
    let rest = &fields[2..];

    let mut parts = Vec::with_capacity(count);
    for (index, chunk) in rest.chunks(PART_ARITY).take(count).enumerate() {
        parts.push(decode_part(row, index, chunk)?);
    }
    if parts.len() < count {
        return Err(SpriteError::decode(format!(
            "line {row}: expected {count} parts but only {} could be read",
            parts.len()
        )));
    }

    Ok(Some(Frame::from_listed_parts(anchor, parts)))
}

fn decode_part(row: usize, index: usize, chunk: &[&str]) -> SpriteResult<Part> {
    // The record's own trailing-comma artifact may eat the last part's
    // pageID, so only the first ten fields are mandatory.
    if chunk.len() < PART_ARITY - 1 {
        return Err(SpriteError::decode(format!(
            "line {row}: part {index} has {} fields, expected {}",
            chunk.len(),
            PART_ARITY
        )));
    }

    let x_pos = parse_int(chunk[0], row)?;
    let y_pos = parse_int(chunk[1], row)?;

    let code = parse_int(chunk[2], row)?;
    let orientation = Orientation::from_code(code).ok_or(SpriteError::InvalidOrientation {
        line: row,
        part: index,
        code,
    })?;

    let blend_mode = BlendMode::from_code(parse_int(chunk[3], row)?);
    let opacity_percent = parse_int(chunk[4], row)?;
    let rotation_degrees = parse_int(chunk[5], row)?;

    let src_x = parse_int(chunk[6], row)?;
    let src_y = parse_int(chunk[7], row)?;
    let src_width = parse_dim(chunk[8], row)?;
    let src_height = parse_dim(chunk[9], row)?;
    let page_id = match chunk.get(10) {
        Some(field) => parse_int(field, row)?,
        None => 0,
    };

    Ok(Part {
        source_rect: Rect::new(src_x, src_y, src_width, src_height),
        offset: Offset::new(x_pos, y_pos),
        orientation,
        blend_mode,
        opacity_percent,
        rotation_degrees,
        page_id,
        layer_order: 0,
    })
}

/// Split a record into fields, discarding the final field.
///
/// Every record is written with a terminating comma, so the last split
/// element is a line-terminator artifact and never carries data.
pub(crate) fn record_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    fields.pop();
    fields
}

pub(crate) fn parse_int(field: &str, row: usize) -> SpriteResult<i32> {
    field.trim().parse::<i32>().map_err(|_| {
        SpriteError::decode(format!("line {row}: invalid integer field '{field}'"))
    })
}

fn parse_dim(field: &str, row: usize) -> SpriteResult<u32> {
    let value = parse_int(field, row)?;
    if value < 0 {
        return Err(SpriteError::decode(format!(
            "line {row}: negative dimension {value}"
        )));
    }
    Ok(value as u32)
}
