//! Render parameter model.
//!
//! [`RenderParameters`] is a value object updated by replacement: every
//! edit goes through [`RenderParameters::apply`] with a [`ParamUpdate`]
//! that swaps exactly one field (sub-objects like the control net or the
//! resolution are replaced atomically, never merged field-by-field).
//!
//! No range checking happens here. The documented domains below are the
//! render service's advertised contract; enforcing them is the job of
//! its validate operation, not of this model.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Advertised parameter domains
// ---------------------------------------------------------------------------

/// Focal length domain in millimetres.
pub const FOCAL_LENGTH_MM: RangeInclusive<f64> = 12.0..=200.0;
/// Camera yaw domain in degrees.
pub const YAW_DEGREES: RangeInclusive<f64> = -180.0..=180.0;
/// Camera pitch domain in degrees.
pub const PITCH_DEGREES: RangeInclusive<f64> = -90.0..=90.0;
/// Lighting domain in percent (0 = low key, 100 = high key).
pub const LIGHTING_PERCENT: RangeInclusive<f64> = 0.0..=100.0;
/// Control net conditioning strength domain.
pub const CONTROL_STRENGTH: RangeInclusive<f64> = 0.0..=1.0;

// ---------------------------------------------------------------------------
// Enumerated options
// ---------------------------------------------------------------------------

/// Colour palette preset applied by the render service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPalette {
    Warm,
    Cool,
    Neutral,
    Cinematic,
    Vibrant,
}

impl ColorPalette {
    /// Wire name used by the render service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorPalette::Warm => "warm",
            ColorPalette::Cool => "cool",
            ColorPalette::Neutral => "neutral",
            ColorPalette::Cinematic => "cinematic",
            ColorPalette::Vibrant => "vibrant",
        }
    }

    /// Parse a wire name back into a palette. `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "warm" => Some(ColorPalette::Warm),
            "cool" => Some(ColorPalette::Cool),
            "neutral" => Some(ColorPalette::Neutral),
            "cinematic" => Some(ColorPalette::Cinematic),
            "vibrant" => Some(ColorPalette::Vibrant),
            _ => None,
        }
    }
}

/// Kind of auxiliary conditioning image steering the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Sketch,
    Depth,
    Canny,
    /// No conditioning image; `ControlNet::image` is meaningless.
    None,
}

impl ControlKind {
    /// Wire name used by the render service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Sketch => "sketch",
            ControlKind::Depth => "depth",
            ControlKind::Canny => "canny",
            ControlKind::None => "none",
        }
    }

    /// Parse a wire name back into a kind. `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sketch" => Some(ControlKind::Sketch),
            "depth" => Some(ControlKind::Depth),
            "canny" => Some(ControlKind::Canny),
            "none" => Some(ControlKind::None),
            _ => None,
        }
    }
}

/// Output colour space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSpace {
    #[serde(rename = "sRGB")]
    Srgb,
    #[serde(rename = "Adobe RGB")]
    AdobeRgb,
    #[serde(rename = "Display P3")]
    DisplayP3,
}

impl ColorSpace {
    /// Wire name used by the render service.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Srgb => "sRGB",
            ColorSpace::AdobeRgb => "Adobe RGB",
            ColorSpace::DisplayP3 => "Display P3",
        }
    }

    /// Parse a wire name back into a colour space. `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sRGB" => Some(ColorSpace::Srgb),
            "Adobe RGB" => Some(ColorSpace::AdobeRgb),
            "Display P3" => Some(ColorSpace::DisplayP3),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-objects
// ---------------------------------------------------------------------------

/// Control net configuration: conditioning kind, strength, and the
/// uploaded reference image (an absolute URL once resolved).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlNet {
    #[serde(rename = "type")]
    pub kind: ControlKind,
    pub strength: f64,
    pub image: Option<String>,
}

impl Default for ControlNet {
    fn default() -> Self {
        Self {
            kind: ControlKind::None,
            strength: 0.75,
            image: None,
        }
    }
}

/// Output resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

// ---------------------------------------------------------------------------
// Parameter model
// ---------------------------------------------------------------------------

/// Prompt used when a session starts with no prior state.
pub const DEFAULT_PROMPT: &str = "A serene mountain landscape at golden hour \
     with dramatic cloud formations, cinematic lighting, 8K resolution, \
     photorealistic";

/// The full set of generation parameters for one render.
///
/// Serializes with the camelCase field names the render service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParameters {
    pub prompt: String,
    /// Millimetres, within [`FOCAL_LENGTH_MM`].
    pub focal_length: f64,
    /// Degrees, within [`YAW_DEGREES`].
    pub yaw: f64,
    /// Degrees, within [`PITCH_DEGREES`].
    pub pitch: f64,
    /// Percent, within [`LIGHTING_PERCENT`].
    pub lighting: f64,
    pub color_palette: ColorPalette,
    pub control_net: ControlNet,
    pub seed: i64,
    pub resolution: Resolution,
    pub color_space: ColorSpace,
}

impl Default for RenderParameters {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            focal_length: 35.0,
            yaw: 0.0,
            pitch: 0.0,
            lighting: 50.0,
            color_palette: ColorPalette::Warm,
            control_net: ControlNet::default(),
            seed: 42_857_391,
            resolution: Resolution::default(),
            color_space: ColorSpace::Srgb,
        }
    }
}

/// Replacement update for exactly one field of [`RenderParameters`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParamUpdate {
    Prompt(String),
    FocalLength(f64),
    Yaw(f64),
    Pitch(f64),
    Lighting(f64),
    ColorPalette(ColorPalette),
    /// Replace the whole control net sub-object atomically.
    ControlNet(ControlNet),
    /// Replace only the control net's image reference, keeping kind and
    /// strength. Used when an uploaded reference comes back from the
    /// render service.
    ControlImage(Option<String>),
    Seed(i64),
    Resolution(Resolution),
    ColorSpace(ColorSpace),
}

impl RenderParameters {
    /// Return a copy with one field replaced. All other fields are
    /// untouched; applying the current value of a field is a valid
    /// (and indistinguishable) update.
    pub fn apply(&self, update: ParamUpdate) -> Self {
        let mut next = self.clone();
        match update {
            ParamUpdate::Prompt(v) => next.prompt = v,
            ParamUpdate::FocalLength(v) => next.focal_length = v,
            ParamUpdate::Yaw(v) => next.yaw = v,
            ParamUpdate::Pitch(v) => next.pitch = v,
            ParamUpdate::Lighting(v) => next.lighting = v,
            ParamUpdate::ColorPalette(v) => next.color_palette = v,
            ParamUpdate::ControlNet(v) => next.control_net = v,
            ParamUpdate::ControlImage(v) => next.control_net.image = v,
            ParamUpdate::Seed(v) => next.seed = v,
            ParamUpdate::Resolution(v) => next.resolution = v,
            ParamUpdate::ColorSpace(v) => next.color_space = v,
        }
        next
    }
}
