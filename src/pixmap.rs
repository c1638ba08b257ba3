//! Pixel-buffer operations at the atlas-provider boundary.
//!
//! Crop, flip, and alpha-over compositing come straight from
//! `image::imageops`; this module adds the few transforms the source art
//! pipeline needs that the library does not provide directly.

use image::RgbaImage;

/// Convert a color cue into a transparency mask.
///
/// For every pixel with non-zero alpha: RGB is premultiplied by alpha in
/// normalized 0-1 space, and alpha is rewritten as the mean of the original
/// RGB channels, each rounded back to 0-255. Fully transparent pixels are
/// left untouched. The source art pipeline uses this as a keying trick.
pub fn key_luminance_alpha(image: &mut RgbaImage) {
    for px in image.pixels_mut() {
        let [r, g, b, a] = px.0;
        if a == 0 {
            continue;
        }

        let rf = f32::from(r) / 255.0;
        let gf = f32::from(g) / 255.0;
        let bf = f32::from(b) / 255.0;
        let af = f32::from(a) / 255.0;

        px.0 = [
            (rf * af * 255.0).round() as u8,
            (gf * af * 255.0).round() as u8,
            (bf * af * 255.0).round() as u8,
            ((rf + gf + bf) / 3.0 * 255.0).round() as u8,
        ];
    }
}

/// Scale every pixel's alpha by `factor` (clamped to 0-1).
pub fn scale_alpha(image: &mut RgbaImage, factor: f32) {
    let factor = factor.clamp(0.0, 1.0);
    for px in image.pixels_mut() {
        px.0[3] = (f32::from(px.0[3]) * factor).round() as u8;
    }
}

/// Rotate clockwise by `degrees`, expanding the output so nothing clips.
///
/// Pixels outside the source map to transparent fill. Right angles go
/// through the exact `imageops` rotations; other angles resample
/// nearest-neighbor through the inverse mapping.
pub fn rotate_expand(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let deg = degrees.rem_euclid(360.0);
    if deg == 0.0 {
        return image.clone();
    }
    if deg == 90.0 {
        return image::imageops::rotate90(image);
    }
    if deg == 180.0 {
        return image::imageops::rotate180(image);
    }
    if deg == 270.0 {
        return image::imageops::rotate270(image);
    }

    let theta = deg.to_radians();
    let (sin, cos) = theta.sin_cos();

    let w = f64::from(image.width());
    let h = f64::from(image.height());
    let out_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0) as u32;
    let out_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0) as u32;

    let (cx, cy) = (w / 2.0, h / 2.0);
    let (ocx, ocy) = (f64::from(out_w) / 2.0, f64::from(out_h) / 2.0);

    let mut out = RgbaImage::new(out_w, out_h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let dx = f64::from(x) + 0.5 - ocx;
        let dy = f64::from(y) + 0.5 - ocy;

        // Inverse of a clockwise screen-space rotation.
        let sx = cx + dx * cos + dy * sin;
        let sy = cy - dx * sin + dy * cos;

        let sx = sx.floor();
        let sy = sy.floor();
        if sx >= 0.0 && sx < w && sy >= 0.0 && sy < h {
            *px = *image.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn keying_opaque_pure_red_becomes_third_alpha() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]));
        key_luminance_alpha(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 85]);
    }

    #[test]
    fn keying_skips_fully_transparent_pixels() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([200, 100, 50, 0]));
        key_luminance_alpha(&mut img);
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50, 0]);
    }

    #[test]
    fn keying_premultiplies_rgb_by_original_alpha() {
        // Half-transparent white: RGB halves, alpha becomes the RGB mean.
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        key_luminance_alpha(&mut img);
        let [r, g, b, a] = img.get_pixel(0, 0).0;
        assert_eq!((r, g, b), (128, 128, 128));
        assert_eq!(a, 255);
    }

    #[test]
    fn scale_alpha_halves_alpha() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([10, 20, 30, 200]));
        scale_alpha(&mut img, 0.5);
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 100]);
    }

    #[test]
    fn rotate_right_angles_swap_dimensions_exactly() {
        let mut img = RgbaImage::new(4, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        let r90 = rotate_expand(&img, 90.0);
        assert_eq!((r90.width(), r90.height()), (2, 4));
        // rotate90 moves the top-left to the top-right.
        assert_eq!(r90.get_pixel(1, 0).0, [255, 0, 0, 255]);

        let r180 = rotate_expand(&img, 180.0);
        assert_eq!((r180.width(), r180.height()), (4, 2));
        assert_eq!(r180.get_pixel(3, 1).0, [255, 0, 0, 255]);

        let r270 = rotate_expand(&img, -90.0);
        assert_eq!((r270.width(), r270.height()), (2, 4));
        assert_eq!(r270.get_pixel(0, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn rotate_zero_is_identity() {
        let img = RgbaImage::from_pixel(3, 5, Rgba([1, 2, 3, 4]));
        let out = rotate_expand(&img, 0.0);
        assert_eq!(out, img);
        let out = rotate_expand(&img, 360.0);
        assert_eq!(out, img);
    }

    #[test]
    fn rotate_45_expands_and_keeps_all_content() {
        let img = RgbaImage::from_pixel(10, 10, Rgba([0, 255, 0, 255]));
        let out = rotate_expand(&img, 45.0);
        // 10x10 at 45 degrees needs ceil(10 * sqrt(2)) = 15 on each side.
        assert_eq!((out.width(), out.height()), (15, 15));
        // Center pixel is inside the rotated square.
        assert_eq!(out.get_pixel(7, 7).0, [0, 255, 0, 255]);
        // Corners fall outside it and stay transparent.
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
    }
}
