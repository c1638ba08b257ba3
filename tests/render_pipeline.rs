use image::{Rgba, RgbaImage};
use spriteweave::{
    RenderOptions, WORK_CANVAS_SIZE, content_bounds, crop_frames, decode_frames,
    render_animation,
};

/// 8x4 atlas: left 4x4 region solid red, right 4x4 region solid blue.
fn two_region_atlas() -> RgbaImage {
    let mut atlas = RgbaImage::new(8, 4);
    for y in 0..4 {
        for x in 0..4 {
            atlas.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            atlas.put_pixel(x + 4, y, Rgba([0, 0, 255, 255]));
        }
    }
    atlas
}

const RED_FRAME: &str = "0,1,0,0,0,0,100,0,0,0,4,4,0,";
const RED_OVER_BLUE_FRAME: &str = "0,2,0,0,0,0,100,0,0,0,4,4,0,0,0,0,0,100,0,4,0,4,4,0,";

#[test]
fn strip_mode_lays_five_frames_in_one_row() {
    let frames = decode_frames(RED_FRAME).unwrap();
    let sequence = "0,0,0,10,\n".repeat(5);
    let out = render_animation(
        &two_region_atlas(),
        &frames,
        &sequence,
        &RenderOptions::default(),
    )
    .unwrap();

    assert_eq!(out.layout.columns, 5);
    assert_eq!(out.layout.rows, 1);
    assert_eq!(out.sheet.width(), 5 * out.layout.frame_rect.width);
    assert_eq!(out.sheet.height(), out.layout.frame_rect.height);
}

#[test]
fn sheet_mode_with_two_columns_makes_three_rows() {
    let frames = decode_frames(RED_FRAME).unwrap();
    let sequence = "0,0,0,10,\n".repeat(5);
    let options = RenderOptions {
        columns: 2,
        include_empty: false,
    };
    let out = render_animation(&two_region_atlas(), &frames, &sequence, &options).unwrap();

    assert_eq!(out.layout.columns, 2);
    assert_eq!(out.layout.rows, 3);
    assert_eq!(out.sheet.width(), 2 * out.layout.frame_rect.width);
    assert_eq!(out.sheet.height(), 3 * out.layout.frame_rect.height);

    // The sixth grid cell was never drawn into.
    let fw = out.layout.frame_rect.width;
    let fh = out.layout.frame_rect.height;
    let probe = out.sheet.get_pixel(fw + fw / 2, 2 * fh + fh / 2);
    assert_eq!(probe.0[3], 0);
}

#[test]
fn first_listed_part_wins_overlapping_pixels() {
    // Both parts land at the same spot; the part listed first in the source
    // line (red) must be visually on top.
    let frames = decode_frames(RED_OVER_BLUE_FRAME).unwrap();
    let out = render_animation(
        &two_region_atlas(),
        &frames,
        "0,0,0,10,\n",
        &RenderOptions::default(),
    )
    .unwrap();

    let center = out.layout.frame_rect.width / 2;
    let middle = out.layout.frame_rect.height / 2;
    assert_eq!(out.frames[0].get_pixel(center, middle).0, [255, 0, 0, 255]);
}

#[test]
fn cropping_a_frame_to_its_own_bounds_is_stable() {
    let frames = decode_frames(RED_FRAME).unwrap();
    let atlas = two_region_atlas();
    let decoded: Vec<_> = spriteweave::decode_sequence("0,7,-3,10,\n")
        .into_iter()
        .flatten()
        .collect();
    let composed = spriteweave::compose_steps(&atlas, &frames, &decoded, false);
    assert_eq!(composed.len(), 1);

    let rect = composed[0].rect;
    assert_eq!(rect.width, 4);
    assert_eq!(rect.height, 4);
    let center = (WORK_CANVAS_SIZE / 2) as i32;
    assert_eq!(rect.x, center + 7);
    assert_eq!(rect.y, center - 3);

    // Re-measuring the zero-margin crop reproduces the same extent.
    let cropped = crop_frames(&composed, rect);
    let remeasured = content_bounds(&cropped[0]);
    assert_eq!(remeasured.x, 0);
    assert_eq!(remeasured.y, 0);
    assert_eq!(remeasured.width, rect.width);
    assert_eq!(remeasured.height, rect.height);
}

#[test]
fn include_empty_keeps_blank_steps_in_the_grid() {
    let frames = decode_frames(RED_FRAME).unwrap();
    // Second step points at a frame index that never decoded.
    let sequence = "0,0,0,10,\n9,0,0,20,\n0,0,0,30,\n";

    let without = render_animation(
        &two_region_atlas(),
        &frames,
        sequence,
        &RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(without.frames.len(), 2);
    assert_eq!(without.frame_delays, vec![10, 30]);

    let with = render_animation(
        &two_region_atlas(),
        &frames,
        sequence,
        &RenderOptions {
            columns: 0,
            include_empty: true,
        },
    )
    .unwrap();
    assert_eq!(with.frames.len(), 3);
    assert_eq!(with.frame_delays, vec![10, 20, 30]);
    // The blank step renders as a fully transparent cell.
    assert!(with.frames[1].pixels().all(|px| px.0[3] == 0));
    // The shared crop is identical either way: empty rects add nothing.
    assert_eq!(with.layout.frame_rect, without.layout.frame_rect);
}

#[test]
fn luminance_keyed_part_converts_color_to_alpha() {
    // Blend code 1 marks the part for luminance keying.
    let keyed_frame = "0,1,0,0,0,1,100,0,0,0,4,4,0,";
    let frames = decode_frames(keyed_frame).unwrap();
    let out = render_animation(
        &two_region_atlas(),
        &frames,
        "0,0,0,10,\n",
        &RenderOptions::default(),
    )
    .unwrap();

    // Opaque pure red keys to alpha 85 on the working canvas, then
    // composites over transparency.
    let center = out.layout.frame_rect.width / 2;
    let middle = out.layout.frame_rect.height / 2;
    let px = out.frames[0].get_pixel(center, middle);
    assert_eq!(px.0[3], 85);
    assert_eq!(px.0[0], 255);
}
