//! Per-step frame compositing.
//!
//! Each animation step renders independently onto its own working canvas,
//! which makes the step set an embarrassingly parallel map; the union-bound
//! reduction in [`crate::layout`] is the join point.

use image::{RgbaImage, imageops};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{
    bounds::content_bounds,
    model::{AnimationStep, BlendMode, Frame, Rect},
    pixmap::{key_luminance_alpha, rotate_expand, scale_alpha},
};

/// Side length of the square working canvas each step renders onto.
///
/// Large enough that no part's extreme offset clips against an edge; the
/// excess is cropped away during layout and never observable in output.
pub const WORK_CANVAS_SIZE: u32 = 2000;

/// One rendered animation step: its full working canvas, the tight bounds of
/// what it drew, and its display delay.
#[derive(Clone, Debug)]
pub struct CompositedStep {
    pub canvas: RgbaImage,
    pub rect: Rect,
    pub delay: i32,
}

/// Render every step against the decoded frame list, in parallel.
///
/// Steps whose canvas stayed fully transparent are dropped unless
/// `include_empty` is set, in which case they are kept with a zero-area
/// rect. Steps referencing a missing or unparseable frame render empty.
pub fn compose_steps(
    atlas: &RgbaImage,
    frames: &[Option<Frame>],
    steps: &[AnimationStep],
    include_empty: bool,
) -> Vec<CompositedStep> {
    let composed: Vec<Option<CompositedStep>> = steps
        .par_iter()
        .enumerate()
        .map(|(index, step)| {
            let frame = frames.get(step.frame_index).and_then(Option::as_ref);
            if frame.is_none() {
                warn!(
                    index,
                    frame_index = step.frame_index,
                    "step references a frame that did not decode"
                );
            }

            let composited = compose_step(atlas, frame, step);
            if composited.rect.is_empty() && !include_empty {
                debug!(index, "dropping step with no visible content");
                return None;
            }
            Some(composited)
        })
        .collect();

    composed.into_iter().flatten().collect()
}

/// Render a single step onto a fresh working canvas and measure its bounds.
pub fn compose_step(
    atlas: &RgbaImage,
    frame: Option<&Frame>,
    step: &AnimationStep,
) -> CompositedStep {
    let mut canvas = RgbaImage::new(WORK_CANVAS_SIZE, WORK_CANVAS_SIZE);
    let center = i64::from(WORK_CANVAS_SIZE / 2);

    if let Some(frame) = frame {
        for part in &frame.parts {
            let src = part.source_rect;
            let mut region = imageops::crop_imm(
                atlas,
                src.x.max(0) as u32,
                src.y.max(0) as u32,
                src.width,
                src.height,
            )
            .to_image();

            if part.blend_mode == BlendMode::LuminanceAlpha {
                key_luminance_alpha(&mut region);
            }
            if part.orientation.flips_x() {
                region = imageops::flip_horizontal(&region);
            }
            if part.orientation.flips_y() {
                region = imageops::flip_vertical(&region);
            }
            if part.rotation_degrees != 0 {
                // Authored angles are counter-clockwise; the raster rotation
                // runs clockwise, so negate to preserve authored intent.
                region = rotate_expand(&region, -f64::from(part.rotation_degrees));
            }
            if part.opacity_percent < 100 {
                scale_alpha(&mut region, part.opacity_percent.max(0) as f32 / 100.0);
            }

            imageops::overlay(
                &mut canvas,
                &region,
                center + i64::from(step.offset.x) + i64::from(part.offset.x),
                center + i64::from(step.offset.y) + i64::from(part.offset.y),
            );
        }
    }

    let rect = content_bounds(&canvas);
    CompositedStep {
        canvas,
        rect,
        delay: step.delay,
    }
}
