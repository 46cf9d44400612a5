//! Small validated value types used by the graph state and the document.
//!
//! Anything that reaches the serialized document through a statement handler
//! is parsed here first, so a document can only hold well-formed colors,
//! viewports and option keywords.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Reasons a color literal is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color must start with `#`")]
    MissingHash,
    #[error("color must have exactly 6 hex digits")]
    WrongLength,
    #[error("color digits must be lowercase hex (0-9, a-f)")]
    InvalidDigit,
}

/// An RGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color([u8; 3]);

impl Color {
    pub const BLACK: Color = Color([0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Parse `#rrggbb`. Only lowercase hex digits are accepted.
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        let digits = text.strip_prefix('#').ok_or(ColorError::MissingHash)?;
        if digits.len() != 6 {
            return Err(ColorError::WrongLength);
        }
        if !digits.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ColorError::InvalidDigit);
        }
        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorError::InvalidDigit)?;
        }
        Ok(Color(rgb))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Color::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// One of the two plotting axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// The visible plotting window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl Viewport {
    /// Replace both bounds of one axis, leaving the other axis alone.
    pub fn set_axis(&mut self, axis: Axis, min: f64, max: f64) {
        match axis {
            Axis::X => {
                self.xmin = min;
                self.xmax = max;
            }
            Axis::Y => {
                self.ymin = min;
                self.ymax = max;
            }
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        crate::defaults::VIEWPORT
    }
}

/// Seed for the calculator's random functions.
///
/// Generated once per top-level compilation and handed unchanged to every
/// included script, so the whole graph shares one random sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RandomSeed(String);

impl RandomSeed {
    /// A fresh seed of 32 lowercase hex digits.
    pub fn generate() -> Self {
        RandomSeed(format!("{:032x}", rand::random::<u128>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RandomSeed {
    fn from(value: String) -> Self {
        RandomSeed(value)
    }
}

impl From<&str> for RandomSeed {
    fn from(value: &str) -> Self {
        RandomSeed(value.to_string())
    }
}

impl fmt::Display for RandomSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Drag modes a point expression accepts.
pub const DRAG_MODES: [&str; 4] = ["X", "Y", "XY", "NONE"];

/// How an animated slider loops.
///
/// Bouncing back and forth is the calculator's default and has no variant:
/// a slider without a loop mode bounces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoopMode {
    LoopForward,
    PlayOnce,
}

/// Result of reading a slider loop keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKeyword {
    /// `back_and_forth`: keep the default mode.
    Default,
    Mode(LoopMode),
}

impl LoopKeyword {
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "back_and_forth" => Some(LoopKeyword::Default),
            "fwd" => Some(LoopKeyword::Mode(LoopMode::LoopForward)),
            "once" => Some(LoopKeyword::Mode(LoopMode::PlayOnce)),
            _ => None,
        }
    }
}

/// Where a label sits relative to its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOrientation {
    Left,
    Right,
    Above,
    Below,
}

impl FromStr for LabelOrientation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(LabelOrientation::Left),
            "right" => Ok(LabelOrientation::Right),
            "above" => Ok(LabelOrientation::Above),
            "below" => Ok(LabelOrientation::Below),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_round_trips_through_display() {
        let color = Color::parse("#1a2b3c").unwrap();
        assert_eq!(color, Color::rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(color.to_string(), "#1a2b3c");
    }

    #[test]
    fn color_rejects_malformed_literals() {
        assert_eq!(Color::parse("ff0000"), Err(ColorError::MissingHash));
        assert_eq!(Color::parse("#ff00"), Err(ColorError::WrongLength));
        assert_eq!(Color::parse("#ff00000"), Err(ColorError::WrongLength));
        assert_eq!(Color::parse("#FF0000"), Err(ColorError::InvalidDigit));
        assert_eq!(Color::parse("#gg0000"), Err(ColorError::InvalidDigit));
    }

    #[test]
    fn color_serializes_as_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 128)).unwrap();
        assert_eq!(json, "\"#ff0080\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(255, 0, 128));
    }

    #[test]
    fn viewport_updates_one_axis() {
        let mut viewport = Viewport::default();
        viewport.set_axis(Axis::Y, -1.0, 3.5);
        assert_eq!(viewport.xmin, -10.0);
        assert_eq!(viewport.xmax, 10.0);
        assert_eq!(viewport.ymin, -1.0);
        assert_eq!(viewport.ymax, 3.5);
    }

    #[test]
    fn generated_seed_is_32_hex_digits() {
        let seed = RandomSeed::generate();
        assert_eq!(seed.as_str().len(), 32);
        assert!(seed.as_str().bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn loop_keywords() {
        assert_eq!(LoopKeyword::parse("back_and_forth"), Some(LoopKeyword::Default));
        assert_eq!(
            LoopKeyword::parse("fwd"),
            Some(LoopKeyword::Mode(LoopMode::LoopForward))
        );
        assert_eq!(
            LoopKeyword::parse("once"),
            Some(LoopKeyword::Mode(LoopMode::PlayOnce))
        );
        assert_eq!(LoopKeyword::parse("forever"), None);
    }
}
