use crate::error::SpriteResult;

/// Integer pixel rectangle.
///
/// Used both for atlas source regions and for content bounds on a working
/// canvas. A `width == 0 && height == 0` rectangle means "no content".
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return `true` when the rectangle encloses no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i32 {
        self.y + self.height as i32
    }
}

/// Signed pixel offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Mirroring applied to a part's atlas region before placement.
///
/// Decoded from a raw code 0-3; anything else is a hard decode failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    None,
    FlipX,
    FlipY,
    FlipXy,
}

impl Orientation {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::FlipX),
            2 => Some(Self::FlipY),
            3 => Some(Self::FlipXy),
            _ => None,
        }
    }

    pub fn flips_x(self) -> bool {
        matches!(self, Self::FlipX | Self::FlipXy)
    }

    pub fn flips_y(self) -> bool {
        matches!(self, Self::FlipY | Self::FlipXy)
    }
}

/// Per-part blend behavior.
///
/// Only code 1 (luminance keying) is recognized; every other code draws the
/// part unchanged, matching the shipped assets' decoder. The asymmetry with
/// [`Orientation::from_code`] being strict is preserved as observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    LuminanceAlpha,
}

impl BlendMode {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::LuminanceAlpha,
            _ => Self::Normal,
        }
    }
}

/// One atlas-region reference forming a single layer of a frame.
#[derive(Clone, Debug)]
pub struct Part {
    /// Atlas region to sample, in atlas pixel coordinates.
    pub source_rect: Rect,
    /// Offset from the frame anchor where this part lands.
    pub offset: Offset,
    pub orientation: Orientation,
    pub blend_mode: BlendMode,
    /// 0-100; values at or above 100 draw fully opaque.
    pub opacity_percent: i32,
    /// Authored counter-clockwise degrees; 0 means no rotation.
    pub rotation_degrees: i32,
    /// Atlas page the region lives on. Shipped assets only ever use page 0.
    pub page_id: i32,
    /// Position in draw order after decode reversal; higher draws on top.
    pub layer_order: usize,
}

/// An ordered stack of parts rendering one static pose.
#[derive(Clone, Debug)]
pub struct Frame {
    pub anchor: i32,
    /// Parts in paint order: index 0 is the bottom layer.
    pub parts: Vec<Part>,
}

impl Frame {
    /// Build a frame from parts in source-line order.
    ///
    /// The metadata lists parts top-to-bottom, while compositing draws each
    /// successive part over the previous ones. The list is reversed exactly
    /// once, here, so the part listed last in the source ends up painted
    /// first (bottom) and the part listed first ends up visually on top.
    pub fn from_listed_parts(anchor: i32, mut parts: Vec<Part>) -> Self {
        parts.reverse();
        for (order, part) in parts.iter_mut().enumerate() {
            part.layer_order = order;
        }
        Self { anchor, parts }
    }
}

/// One playback entry: which frame to show, where, and for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationStep {
    /// Index into the decoded frame list.
    pub frame_index: usize,
    /// Placement offset applied on top of every part's own offset.
    pub offset: Offset,
    /// Display duration in the sequence file's own ticks (1/60 s), kept
    /// verbatim until export.
    pub delay: i32,
}

/// Explicit render configuration, passed by reference into each stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Columns in the output sheet; 0 lays all frames out as a single row.
    pub columns: u32,
    /// Keep steps whose canvas rendered fully transparent.
    pub include_empty: bool,
}

impl RenderOptions {
    pub fn validate(&self) -> SpriteResult<()> {
        // Every representable column count is meaningful (0 selects strip
        // mode); the hook exists so future options validate in one place.
        let _ = self;
        Ok(())
    }
}
