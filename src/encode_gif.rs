//! Animated GIF export over the cropped frame sequence.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context as _;
use gif::{Encoder, Repeat};
use image::RgbaImage;

use crate::error::{SpriteError, SpriteResult};

/// Fallback when a frame has no decoded delay of its own.
const DEFAULT_DELAY_TICKS: i32 = 30;

/// Convert a decoded delay (1/60 s ticks) to GIF centiseconds.
pub fn delay_centiseconds(delay: i32) -> u16 {
    let ticks = delay.max(0) as u32;
    ((ticks * 100) / 60).min(u32::from(u16::MAX)) as u16
}

/// Encode the ordered frames as an infinitely looping animated GIF.
///
/// All frames must share the same dimensions (they do, by construction: the
/// layout stage crops them all to the shared frame rect). Fully transparent
/// pixels render as background-transparent.
pub fn encode_animated_gif<W: Write>(
    writer: W,
    frames: &[RgbaImage],
    delays: &[i32],
) -> SpriteResult<()> {
    let first = frames.first().ok_or(SpriteError::EmptyAnimation)?;
    let (width, height) = first.dimensions();
    if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(SpriteError::encode(format!(
            "frame size {width}x{height} exceeds the GIF limit"
        )));
    }

    let mut encoder = Encoder::new(writer, width as u16, height as u16, &[])
        .map_err(|e| SpriteError::encode(e.to_string()))?;
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| SpriteError::encode(e.to_string()))?;

    for (index, image) in frames.iter().enumerate() {
        if image.dimensions() != (width, height) {
            return Err(SpriteError::encode(format!(
                "frame {index} dimensions differ from the first frame"
            )));
        }

        let mut rgba = image.clone().into_raw();
        let mut frame = gif::Frame::from_rgba_speed(width as u16, height as u16, &mut rgba, 10);
        let ticks = delays.get(index).copied().unwrap_or(DEFAULT_DELAY_TICKS);
        frame.delay = delay_centiseconds(ticks);
        encoder
            .write_frame(&frame)
            .map_err(|e| SpriteError::encode(e.to_string()))?;
    }

    Ok(())
}

/// Encode straight to a file, creating parent directories as needed.
pub fn write_animated_gif(
    path: &Path,
    frames: &[RgbaImage],
    delays: &[i32],
) -> SpriteResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create gif '{}'", path.display()))?;
    encode_animated_gif(BufWriter::new(file), frames, delays)
}
