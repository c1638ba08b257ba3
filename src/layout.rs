//! Sheet/strip layout over the composited steps.
//!
//! This is the reduction side of the pipeline: the shared crop rectangle
//! depends on every kept step's content bounds, so nothing here starts
//! until compositing has joined.

use image::{RgbaImage, imageops};
use tracing::debug;

use crate::{
    compose::CompositedStep,
    error::{SpriteError, SpriteResult},
    model::Rect,
};

/// Fixed margin added on every side of the union content bounds.
pub const CROP_MARGIN: i32 = 5;

/// Grid placement metadata for a laid-out sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetLayout {
    /// Shared crop rectangle in working-canvas coordinates.
    pub frame_rect: Rect,
    pub columns: u32,
    pub rows: u32,
    pub image_width: u32,
    pub image_height: u32,
}

/// Shared crop rectangle: the union of every step's content bounds expanded
/// by [`CROP_MARGIN`] on each side.
///
/// Zero-area rects (steps kept under the include-empty policy) contribute
/// nothing to the union. Fails with [`SpriteError::EmptyAnimation`] when no
/// step has any content to bound.
pub fn shared_frame_rect(steps: &[CompositedStep]) -> SpriteResult<Rect> {
    let mut bounds: Option<(i32, i32, i32, i32)> = None;
    for step in steps {
        if step.rect.is_empty() {
            continue;
        }
        let rect = step.rect;
        bounds = Some(match bounds {
            None => (rect.x, rect.y, rect.right(), rect.bottom()),
            Some((left, top, right, bottom)) => (
                left.min(rect.x),
                top.min(rect.y),
                right.max(rect.right()),
                bottom.max(rect.bottom()),
            ),
        });
    }

    let (left, top, right, bottom) = bounds.ok_or(SpriteError::EmptyAnimation)?;
    Ok(Rect::new(
        left - CROP_MARGIN,
        top - CROP_MARGIN,
        (right - left) as u32 + 2 * CROP_MARGIN as u32,
        (bottom - top) as u32 + 2 * CROP_MARGIN as u32,
    ))
}

/// Crop every step's canvas to the shared rectangle, preserving step order.
///
/// All outputs share identical dimensions, which is what makes a uniform
/// grid possible.
pub fn crop_frames(steps: &[CompositedStep], frame_rect: Rect) -> Vec<RgbaImage> {
    steps
        .iter()
        .map(|step| {
            imageops::crop_imm(
                &step.canvas,
                frame_rect.x.max(0) as u32,
                frame_rect.y.max(0) as u32,
                frame_rect.width,
                frame_rect.height,
            )
            .to_image()
        })
        .collect()
}

/// Arrange equally-sized cropped frames into a strip or a column grid.
///
/// `columns == 0`, or any value at least the frame count, selects a single
/// row ("strip" mode). Otherwise frames fill rows left to right and a short
/// final row leaves its remaining cells transparent.
pub fn layout_sheet(
    frames: &[RgbaImage],
    frame_rect: Rect,
    columns: u32,
) -> SpriteResult<(RgbaImage, SheetLayout)> {
    let count = frames.len() as u32;
    if count == 0 {
        return Err(SpriteError::EmptyAnimation);
    }

    let (columns, rows) = if columns == 0 || columns >= count {
        (count, 1)
    } else {
        (columns, count.div_ceil(columns))
    };

    let image_width = columns * frame_rect.width;
    let image_height = rows * frame_rect.height;
    debug!(columns, rows, image_width, image_height, "laying out sheet");

    let mut sheet = RgbaImage::new(image_width, image_height);
    for (index, frame) in frames.iter().enumerate() {
        let col = index as u32 % columns;
        let row = index as u32 / columns;
        imageops::overlay(
            &mut sheet,
            frame,
            i64::from(col * frame_rect.width),
            i64::from(row * frame_rect.height),
        );
    }

    Ok((
        sheet,
        SheetLayout {
            frame_rect,
            columns,
            rows,
            image_width,
            image_height,
        },
    ))
}
