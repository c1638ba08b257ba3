//! Reassembles mobile-game sprite animations from shipped raw assets.
//!
//! Input is a texture atlas plus two text-encoded metadata files: a frame
//! list describing which atlas regions stack into each logical pose, and a
//! per-animation sequence describing frame order, placement offsets, and
//! display delays. Output is a tightly cropped sprite strip or sheet, with
//! optional JSON layout metadata and an animated GIF.
//!
//! The pipeline: [`decode_frames`] and [`decode_sequence`] build the typed
//! model, [`compose::compose_steps`] renders every step in parallel onto its
//! own working canvas, and [`layout`] reduces the content bounds into one
//! shared crop rectangle before arranging the frames into a grid.
#![forbid(unsafe_code)]

pub mod bounds;
pub mod compose;
pub mod decode_frames;
pub mod decode_sequence;
pub mod encode_gif;
pub mod error;
pub mod layout;
pub mod model;
pub mod pipeline;
pub mod pixmap;
pub mod sidecar;

pub use bounds::{ALPHA_MASK, color_bounds_rect, content_bounds};
pub use compose::{CompositedStep, WORK_CANVAS_SIZE, compose_step, compose_steps};
pub use decode_frames::decode_frames;
pub use decode_sequence::decode_sequence;
pub use encode_gif::{encode_animated_gif, write_animated_gif};
pub use error::{SpriteError, SpriteResult};
pub use layout::{CROP_MARGIN, SheetLayout, crop_frames, layout_sheet, shared_frame_rect};
pub use model::{
    AnimationStep, BlendMode, Frame, Offset, Orientation, Part, Rect, RenderOptions,
};
pub use pipeline::{RenderedAnimation, render_animation};
pub use sidecar::Sidecar;
