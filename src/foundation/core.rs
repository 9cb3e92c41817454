use crate::foundation::error::{ScrollfxError, ScrollfxResult};

pub use kurbo::Vec2;

/// Opaque back-reference to a host node (a DOM element in a browser host).
///
/// The crate never owns the node; liveness is answered by the [`crate::Surface`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Document-space box of a node, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementBox {
    /// Distance from the top of the document to the top edge of the node.
    pub top: f64,
    /// Rendered height of the node.
    pub height: f64,
}

impl ElementBox {
    /// Create a box from its top edge and height.
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    /// Bottom edge in document space.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ScrollfxResult<Self> {
        if den == 0 {
            return Err(ScrollfxError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ScrollfxError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// The refresh rate most browsers schedule animation frames at.
    pub fn display() -> Self {
        Self { num: 60, den: 1 }
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert seconds to frame count using floor semantics.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::display()
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha replaced by `alpha` in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> ScrollfxResult<Self> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ScrollfxError::validation(format!("color '{s}' must start with '#'")))?;
        let digit = |c: u8| -> ScrollfxResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ScrollfxError::validation(format!("invalid hex digit in '{s}'")))
        };
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = digit(bytes[0])?;
                let g = digit(bytes[1])?;
                let b = digit(bytes[2])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let pair = |i: usize| -> ScrollfxResult<u8> {
                    Ok(digit(bytes[i])? * 16 + digit(bytes[i + 1])?)
                };
                let a = if bytes.len() == 8 { pair(6)? } else { 255 };
                Ok(Self {
                    r: pair(0)?,
                    g: pair(2)?,
                    b: pair(4)?,
                    a,
                })
            }
            _ => Err(ScrollfxError::validation(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }
}

/// A drop shadow, used for the glow effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shadow {
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Blur radius in pixels.
    pub blur: f64,
    /// Shadow color (alpha included).
    pub color: Rgba8,
}

/// Animatable visual properties of a node.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    /// Opacity in `[0, 1]`.
    Opacity,
    /// Horizontal translation in pixels.
    X,
    /// Vertical translation in pixels.
    Y,
    /// Vertical translation as a percentage of the node's height.
    YPercent,
    /// Uniform scale.
    Scale,
    /// Horizontal scale.
    ScaleX,
    /// Vertical scale.
    ScaleY,
    /// 2D rotation in degrees.
    Rotation,
    /// Rotation around the X axis in degrees.
    RotationX,
    /// Rotation around the Y axis in degrees.
    RotationY,
    /// Transform perspective in pixels.
    Perspective,
    /// Filter blur radius in pixels.
    Blur,
    /// Foreground color.
    Color,
    /// Background color.
    BackgroundColor,
    /// SVG stroke color.
    Stroke,
    /// SVG stroke dash offset.
    StrokeDashoffset,
    /// Box shadow.
    BoxShadow,
    /// Text content.
    Text,
}

impl Property {
    /// Value a node is assumed to have when the surface reports nothing.
    pub fn default_value(self) -> PropertyValue {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleX | Self::ScaleY => PropertyValue::Number(1.0),
            Self::Color | Self::BackgroundColor | Self::Stroke => {
                PropertyValue::Color(Rgba8::TRANSPARENT)
            }
            Self::BoxShadow => PropertyValue::Shadow(Shadow::default()),
            Self::Text => PropertyValue::Text(String::new()),
            _ => PropertyValue::Number(0.0),
        }
    }
}

/// A property value as written to the surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Scalar value (opacity, offsets, angles, blur radius).
    Number(f64),
    /// Color value.
    Color(Rgba8),
    /// Shadow value.
    Shadow(Shadow),
    /// Text content.
    Text(String),
}

impl PropertyValue {
    /// Scalar view of the value, if it is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Rgba8> for PropertyValue {
    fn from(v: Rgba8) -> Self {
        Self::Color(v)
    }
}

impl From<Shadow> for PropertyValue {
    fn from(v: Shadow) -> Self {
        Self::Shadow(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
