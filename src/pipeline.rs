//! End-to-end orchestration: decode, parallel compose, reduce, lay out.

use image::RgbaImage;
use tracing::info;

use crate::{
    compose::compose_steps,
    decode_sequence::decode_sequence,
    error::SpriteResult,
    layout::{SheetLayout, crop_frames, layout_sheet, shared_frame_rect},
    model::{Frame, RenderOptions},
    sidecar::Sidecar,
};

/// Everything a rendered animation hands to the export boundary.
#[derive(Clone, Debug)]
pub struct RenderedAnimation {
    /// The final strip or sheet image.
    pub sheet: RgbaImage,
    /// Ordered cropped frames, all sharing the layout's frame rect size.
    pub frames: Vec<RgbaImage>,
    /// Per-frame display delays, verbatim from the sequence file.
    pub frame_delays: Vec<i32>,
    pub layout: SheetLayout,
}

impl RenderedAnimation {
    pub fn sidecar(&self) -> Sidecar {
        Sidecar::new(self.frame_delays.clone(), &self.layout)
    }
}

/// Render one animation sequence against an already-decoded frame list.
///
/// The step set is a parallel map (each step owns its working canvas and
/// only reads the shared atlas); the union bound and grid placement are the
/// sequential reduction that joins afterwards.
#[tracing::instrument(skip(atlas, frames, sequence_text, options))]
pub fn render_animation(
    atlas: &RgbaImage,
    frames: &[Option<Frame>],
    sequence_text: &str,
    options: &RenderOptions,
) -> SpriteResult<RenderedAnimation> {
    options.validate()?;

    let steps: Vec<_> = decode_sequence(sequence_text).into_iter().flatten().collect();
    info!(steps = steps.len(), "decoded animation sequence");

    let composed = compose_steps(atlas, frames, &steps, options.include_empty);
    info!(kept = composed.len(), "composited animation steps");

    let frame_rect = shared_frame_rect(&composed)?;
    let cropped = crop_frames(&composed, frame_rect);
    let frame_delays: Vec<i32> = composed.iter().map(|step| step.delay).collect();

    let (sheet, layout) = layout_sheet(&cropped, frame_rect, options.columns)?;
    Ok(RenderedAnimation {
        sheet,
        frames: cropped,
        frame_delays,
        layout,
    })
}
