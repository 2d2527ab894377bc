use rand::Rng;

use crate::{
    error::{DecalError, DecalResult},
    ids,
};

pub const DEFAULT_X: f64 = 400.0;
pub const DEFAULT_Y: f64 = 300.0;
pub const DEFAULT_WIDTH: f64 = 130.0;
pub const DEFAULT_HEIGHT: f64 = 170.0;

/// Optional geometry overrides for a synthesized element. Each field falls
/// back to its documented default independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placement {
    /// Left edge in scene units (default 400).
    pub x: Option<f64>,
    /// Top edge in scene units (default 300).
    pub y: Option<f64>,
    /// Element width (default 130).
    pub width: Option<f64>,
    /// Element height (default 170).
    pub height: Option<f64>,
}

impl Placement {
    pub fn validate(&self) -> DecalResult<()> {
        for (name, v) in [("x", self.x), ("y", self.y)] {
            if v.is_some_and(|v| !v.is_finite()) {
                return Err(DecalError::validation(format!("{name} must be finite")));
            }
        }
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if v.is_some_and(|v| !v.is_finite() || v <= 0.0) {
                return Err(DecalError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// One image-bearing element of a scene document, in wire format.
///
/// Style fields are fixed to "no visible decoration beyond the image";
/// `seed` and `versionNonce` are cosmetic jitter hints for the consuming
/// renderer and unused here.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
    pub stroke_color: String,
    pub background_color: String,
    pub fill_style: String,
    pub stroke_width: u32,
    pub stroke_style: String,
    pub roughness: u32,
    pub opacity: u32,
    pub group_ids: Vec<String>,
    pub frame_id: Option<String>,
    pub index: String,
    pub roundness: Option<serde_json::Value>,
    pub seed: u32,
    pub version: u64,
    pub version_nonce: u32,
    pub is_deleted: bool,
    pub bound_elements: Option<serde_json::Value>,
    pub updated: u64,
    pub link: Option<String>,
    pub locked: bool,
    pub status: String,
    pub file_id: String,
    pub scale: [f64; 2],
    pub crop: Option<serde_json::Value>,
}

impl ImageElement {
    /// Synthesize a fresh element referencing `file_id`.
    ///
    /// Randomness comes from the caller-supplied `rng` so tests can pass a
    /// seeded generator.
    pub fn new(file_id: &str, placement: Placement, now_ms: u64, rng: &mut impl Rng) -> Self {
        Self {
            id: ids::element_id(rng),
            kind: "image".to_string(),
            x: placement.x.unwrap_or(DEFAULT_X),
            y: placement.y.unwrap_or(DEFAULT_Y),
            width: placement.width.unwrap_or(DEFAULT_WIDTH),
            height: placement.height.unwrap_or(DEFAULT_HEIGHT),
            angle: 0.0,
            stroke_color: "transparent".to_string(),
            background_color: "transparent".to_string(),
            fill_style: "solid".to_string(),
            stroke_width: 2,
            stroke_style: "solid".to_string(),
            roughness: 1,
            opacity: 100,
            group_ids: vec![],
            frame_id: None,
            index: ids::fractional_index(rng),
            roundness: None,
            seed: ids::render_seed(rng),
            version: 1,
            version_nonce: ids::render_seed(rng),
            is_deleted: false,
            bound_elements: None,
            updated: now_ms,
            link: None,
            locked: false,
            status: "saved".to_string(),
            file_id: file_id.to_string(),
            scale: [1.0, 1.0],
            crop: None,
        }
    }
}
