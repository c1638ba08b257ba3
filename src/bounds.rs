//! Tight content-bounds scanning over a rendered canvas.

use image::RgbaImage;

use crate::model::Rect;

/// Mask selecting the alpha channel of a packed ARGB pixel.
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// Pack a pixel as `0xAARRGGBB` so channel masks address whole channels.
fn packed_argb(px: image::Rgba<u8>) -> u32 {
    (u32::from(px[3]) << 24) | (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2])
}

/// Bounding rectangle of pixels classified by a masked color comparison.
///
/// Every pixel's packed ARGB value is masked and compared against `color`.
/// With `find_matching` the bounds cover pixels where `(value & mask) ==
/// color`; without it, pixels where the masked value differs. When no pixel
/// qualifies the result has zero width and height, with `x`/`y` left at the
/// canvas width/height (the never-shrunk initial bound).
///
/// This is a deliberate full O(width x height) scan: exact tight bounds
/// matter more than speed at the asset sizes involved.
pub fn color_bounds_rect(image: &RgbaImage, mask: u32, color: u32, find_matching: bool) -> Rect {
    let (width, height) = image.dimensions();

    let mut min_x = width;
    let mut max_x = 0u32;
    let mut min_y = height;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, px) in image.enumerate_pixels() {
        let value = packed_argb(*px);
        if ((value & mask) == color) == find_matching {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            any = true;
        }
    }

    let span = |min: u32, max: u32| if any { max - min + 1 } else { 0 };
    Rect::new(
        min_x as i32,
        min_y as i32,
        span(min_x, max_x),
        span(min_y, max_y),
    )
}

/// Bounds of every not-fully-transparent pixel.
pub fn content_bounds(image: &RgbaImage) -> Rect {
    color_bounds_rect(image, ALPHA_MASK, 0, false)
}
