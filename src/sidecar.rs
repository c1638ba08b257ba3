//! JSON sidecar metadata for downstream tooling.

use crate::{
    error::{SpriteError, SpriteResult},
    layout::SheetLayout,
    model::Rect,
};

/// Structured record emitted next to the rendered sheet.
///
/// Field names are the stable contract consumed by downstream tools; do not
/// rename them.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidecar {
    pub frame_delays: Vec<i32>,
    pub frame_rect: Rect,
    pub image_width: u32,
    pub image_height: u32,
}

impl Sidecar {
    pub fn new(frame_delays: Vec<i32>, layout: &SheetLayout) -> Self {
        Self {
            frame_delays,
            frame_rect: layout.frame_rect,
            image_width: layout.image_width,
            image_height: layout.image_height,
        }
    }

    pub fn to_json(&self) -> SpriteResult<String> {
        serde_json::to_string(self).map_err(|e| SpriteError::encode(e.to_string()))
    }
}
