use std::collections::BTreeSet;
use std::fmt;

use crate::foundation::error::{TrailError, TrailResult};

pub use kurbo::{Point, Vec2};

/// Trim an identifier; empty results are rejected.
pub(crate) fn normalize_id(raw: &str) -> Option<&str> {
    let id = raw.trim();
    (!id.is_empty()).then_some(id)
}

/// Ordered `(src, dst)` pair naming an edge of the graph.
///
/// Serialized as a two-element array.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct EdgeKey {
    /// Source node id.
    pub src: String,
    /// Destination node id.
    pub dst: String,
}

impl EdgeKey {
    /// Build an edge key without normalization.
    pub fn new(src: impl Into<String>, dst: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Trim both endpoints; `None` when either is empty.
    pub fn normalized(src: &str, dst: &str) -> Option<Self> {
        Some(Self::new(normalize_id(src)?, normalize_id(dst)?))
    }

    /// Normalized copy of `self`.
    pub fn normalize(&self) -> Option<Self> {
        Self::normalized(&self.src, &self.dst)
    }

    /// Same endpoints, opposite orientation.
    pub fn reversed(&self) -> Self {
        Self::new(self.dst.clone(), self.src.clone())
    }

    /// Whether `node_id` is one of the endpoints.
    pub fn touches(&self, node_id: &str) -> bool {
        self.src == node_id || self.dst == node_id
    }

    /// Find the visible orientation of this edge: exact match first, then reversed.
    pub fn resolve_in<'a>(&self, visible: &'a BTreeSet<EdgeKey>) -> Option<&'a EdgeKey> {
        visible.get(self).or_else(|| visible.get(&self.reversed()))
    }
}

impl From<(String, String)> for EdgeKey {
    fn from((src, dst): (String, String)) -> Self {
        Self { src, dst }
    }
}

impl From<(&str, &str)> for EdgeKey {
    fn from((src, dst): (&str, &str)) -> Self {
        Self::new(src, dst)
    }
}

impl From<EdgeKey> for (String, String) {
    fn from(edge: EdgeKey) -> Self {
        (edge.src, edge.dst)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.src, self.dst)
    }
}

/// Straight (non-premultiplied) RGBA8 color handed to the canvas.
///
/// Serialized as a `#rrggbbaa` hex string; `#rgb`, `#rrggbb` are accepted on input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
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
    /// Default signal color (`#4c6ef5`).
    pub const SIGNAL: Self = Self::rgb(0x4c, 0x6e, 0xf5);

    /// Build a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn parse_hex(text: &str) -> TrailResult<Self> {
        let hex = text.trim().trim_start_matches('#');
        let bad = || TrailError::validation(format!("invalid hex color '{text}'"));
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| bad());

        match hex.len() {
            3 => {
                let nib = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Self::rgb(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
            )),
            8 => Ok(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => Err(bad()),
        }
    }

    /// `#rrggbbaa` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }

    /// Event color for a severity label; unknown labels get [`Rgba8::SIGNAL`].
    pub fn for_severity(severity: &str) -> Self {
        match severity.trim().to_ascii_lowercase().as_str() {
            "crash" => Self::rgb(0x11, 0x11, 0x11),
            "error" => Self::rgb(0xc0, 0x39, 0x2b),
            "failure" => Self::rgb(0x7b, 0x3f, 0xb3),
            "warn" => Self::rgb(0xd6, 0x89, 0x10),
            _ => Self::SIGNAL,
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::SIGNAL
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = TrailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(color: Rgba8) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
