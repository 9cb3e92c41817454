use std::fmt;

use crate::foundation::core::{ElementBox, NodeId};
use crate::foundation::error::{ScrollfxError, ScrollfxResult};
use crate::render::surface::Surface;

/// A position along a box: keyword, percentage of its height, or pixels from its top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeOffset {
    /// Top edge.
    Top,
    /// Vertical center.
    Center,
    /// Bottom edge.
    Bottom,
    /// Percentage of the height, from the top.
    Percent(f64),
    /// Pixels from the top.
    Px(f64),
}

impl EdgeOffset {
    /// Pixels from the top of a box of `height`.
    pub fn resolve(self, height: f64) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => height / 2.0,
            Self::Bottom => height,
            Self::Percent(p) => height * p / 100.0,
            Self::Px(px) => px,
        }
    }

    fn parse(token: &str, whole: &str) -> ScrollfxResult<Self> {
        let bad = || ScrollfxError::trigger(format!("invalid edge '{token}' in '{whole}'"));
        match token {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => {
                let (num, pct) = if let Some(n) = token.strip_suffix('%') {
                    (n, true)
                } else if let Some(n) = token.strip_suffix("px") {
                    (n, false)
                } else {
                    (token, false)
                };
                let v: f64 = num.parse().map_err(|_| bad())?;
                if !v.is_finite() {
                    return Err(bad());
                }
                Ok(if pct { Self::Percent(v) } else { Self::Px(v) })
            }
        }
    }
}

impl fmt::Display for EdgeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Px(px) => write!(f, "{px}px"),
        }
    }
}

/// "When this point of the element meets that point of the viewport", e.g. `top 80%`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Edge {
    /// Point on the element.
    pub element: EdgeOffset,
    /// Point on the viewport.
    pub viewport: EdgeOffset,
}

impl Edge {
    /// Build an edge from its two parts.
    pub const fn new(element: EdgeOffset, viewport: EdgeOffset) -> Self {
        Self { element, viewport }
    }

    /// Parse `"<element> <viewport>"`; each part is `top`, `center`, `bottom`, `N%` or `Npx`.
    pub fn parse(s: &str) -> ScrollfxResult<Self> {
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ScrollfxError::trigger(format!(
                "edge '{s}' must have an element and a viewport part"
            )));
        };
        Ok(Self {
            element: EdgeOffset::parse(el, s)?,
            viewport: EdgeOffset::parse(vp, s)?,
        })
    }

    /// Scroll offset at which this edge is reached for `bounds` in a viewport of
    /// `viewport_height`.
    pub fn scroll_offset(self, bounds: ElementBox, viewport_height: f64) -> f64 {
        bounds.top + self.element.resolve(bounds.height) - self.viewport.resolve(viewport_height)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.element, self.viewport)
    }
}

impl TryFrom<String> for Edge {
    type Error = ScrollfxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Edge> for String {
    fn from(value: Edge) -> Self {
        value.to_string()
    }
}

/// Start and end edges of a trigger.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Edge at which the trigger becomes active.
    pub start: Edge,
    /// Edge at which the trigger stops being active.
    pub end: Edge,
}

impl Default for Region {
    /// `top bottom` to `bottom top`: active while any part of the element is visible.
    fn default() -> Self {
        Self {
            start: Edge::new(EdgeOffset::Top, EdgeOffset::Bottom),
            end: Edge::new(EdgeOffset::Bottom, EdgeOffset::Top),
        }
    }
}

impl Region {
    /// Parse both edges.
    pub fn parse(start: &str, end: &str) -> ScrollfxResult<Self> {
        Ok(Self {
            start: Edge::parse(start)?,
            end: Edge::parse(end)?,
        })
    }

    /// Scroll span for `bounds`; `end` is never before `start`.
    pub fn span(&self, bounds: ElementBox, viewport_height: f64) -> ScrollSpan {
        let start = self.start.scroll_offset(bounds, viewport_height);
        let end = self.end.scroll_offset(bounds, viewport_height).max(start);
        ScrollSpan { start, end }
    }
}

/// What a trigger measures against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// A node's box.
    Node(NodeId),
    /// The whole document.
    Page,
}

impl Anchor {
    /// Current box of the anchor, `None` when its node is detached.
    pub fn bounds(self, surface: &dyn Surface) -> Option<ElementBox> {
        match self {
            Self::Node(node) => surface.element_box(node),
            Self::Page => Some(ElementBox::new(0.0, surface.document_height())),
        }
    }

    /// Node of the anchor, if any.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(node) => Some(node),
            Self::Page => None,
        }
    }
}

/// Where the scroll offset sits relative to a span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Above the start.
    Before,
    /// In `[start, end)`.
    Inside,
    /// At or past the end.
    After,
}

/// Resolved scroll offsets of a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollSpan {
    /// Offset at which the region starts.
    pub start: f64,
    /// Offset at which the region ends.
    pub end: f64,
}

impl ScrollSpan {
    /// Phase of `offset`. A zero-length span is never [`Phase::Inside`].
    pub fn phase(self, offset: f64) -> Phase {
        if offset < self.start {
            Phase::Before
        } else if offset >= self.end {
            Phase::After
        } else {
            Phase::Inside
        }
    }

    /// Fraction of the span covered at `offset`, clamped to `[0, 1]`.
    pub fn progress(self, offset: f64) -> f64 {
        crate::foundation::math::inverse_lerp(self.start, self.end, offset)
    }

    /// Length in pixels.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Whether the span has zero length.
    pub fn is_empty(self) -> bool {
        self.len() <= 0.0
    }
}

/// Resolve `region` against `anchor` on `surface`.
pub fn resolve(anchor: Anchor, region: &Region, surface: &dyn Surface) -> Option<ScrollSpan> {
    anchor
        .bounds(surface)
        .map(|b| region.span(b, surface.viewport_height()))
}

#[cfg(test)]
#[path = "../../tests/unit/trigger/region.rs"]
mod tests;
