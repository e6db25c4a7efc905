// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan geometry and extracted rooms

use crate::compliance::Verdict;
use crate::units::RealDimensions;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in drawing units (points, 1/72 inch)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BoundingBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    pub fn centroid(&self) -> Point2<f64> {
        Point2::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Rectangle outline as a closed polygon (counter-clockwise for y-up)
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            Point2::new(self.x0, self.y0),
            Point2::new(self.x1, self.y0),
            Point2::new(self.x1, self.y1),
            Point2::new(self.x0, self.y1),
        ]
    }

    /// Mirror the box vertically so the origin sits at the bottom-left of the page.
    ///
    /// Parser output has y growing downwards; after flipping, `y0` is the
    /// lower edge and `y1` the upper edge.
    pub fn flip_y(&self, page_height: f64) -> Self {
        Self {
            x0: self.x0,
            y0: page_height - self.y1,
            x1: self.x1,
            y1: page_height - self.y0,
        }
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            x0: round_to(self.x0, decimals),
            y0: round_to(self.y0, decimals),
            x1: round_to(self.x1, decimals),
            y1: round_to(self.y1, decimals),
        }
    }
}

/// Fill color with channels in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            r: round_to(self.r, decimals),
            g: round_to(self.g, decimals),
            b: round_to(self.b, decimals),
        }
    }

    /// 8-bit channels, truncating `c * 255` the way color-name tables expect
    pub fn to_bytes(&self) -> [u8; 3] {
        self.channels().map(|c| (c * 255.0).clamp(0.0, 255.0) as u8)
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb> for [f64; 3] {
    fn from(rgb: Rgb) -> Self {
        rgb.channels()
    }
}

/// Vector primitive produced by the document parser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    #[serde(alias = "bbox")]
    pub bounding_box: BoundingBox,
    /// Outline-only primitives carry no fill
    #[serde(default, alias = "fill")]
    pub fill_color: Option<Rgb>,
}

impl Shape {
    pub fn filled(bounding_box: BoundingBox, fill: Rgb) -> Self {
        Self {
            bounding_box,
            fill_color: Some(fill),
        }
    }

    pub fn outline(bounding_box: BoundingBox) -> Self {
        Self {
            bounding_box,
            fill_color: None,
        }
    }
}

/// Text run with its bounding box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLabel {
    pub text: String,
    #[serde(alias = "bbox")]
    pub bounding_box: BoundingBox,
}

impl TextLabel {
    pub fn new(text: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bounding_box,
        }
    }
}

/// Parser output for one page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    /// 1-based page number
    pub page: usize,
    /// Page height in drawing units, used for the Y-axis flip
    pub height: f64,
    #[serde(default)]
    pub shapes: Vec<Shape>,
    #[serde(default)]
    pub labels: Vec<TextLabel>,
}

/// Semantic category of a floor plan region
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Bedroom,
    #[serde(rename = "bathroom/toilet")]
    Bathroom,
    Hall,
    Kitchen,
    Dining,
    Balcony,
    Study,
    Other,
}

impl RoomType {
    pub const ALL: [RoomType; 8] = [
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Hall,
        RoomType::Kitchen,
        RoomType::Dining,
        RoomType::Balcony,
        RoomType::Study,
        RoomType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom/toilet",
            RoomType::Hall => "hall",
            RoomType::Kitchen => "kitchen",
            RoomType::Dining => "dining",
            RoomType::Balcony => "balcony",
            RoomType::Study => "study",
            RoomType::Other => "other",
        }
    }

    /// Recognize a room type from free text such as "BED ROOM 2" or "Open Kitchen"
    pub fn from_label(text: &str) -> Option<RoomType> {
        let text = text.to_lowercase();

        // Order matters: "bathroom" contains "room", "living hall" contains "hall"
        const KEYWORDS: &[(&str, RoomType)] = &[
            ("bedroom", RoomType::Bedroom),
            ("bed room", RoomType::Bedroom),
            ("bathroom", RoomType::Bathroom),
            ("toilet", RoomType::Bathroom),
            ("washroom", RoomType::Bathroom),
            ("kitchen", RoomType::Kitchen),
            ("dining", RoomType::Dining),
            ("balcony", RoomType::Balcony),
            ("study", RoomType::Study),
            ("hall", RoomType::Hall),
            ("living", RoomType::Hall),
        ];

        KEYWORDS
            .iter()
            .find(|(keyword, _)| text.contains(keyword))
            .map(|(_, room_type)| *room_type)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified region label: a known room type or a fallback color name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoomLabel {
    Known(RoomType),
    /// CSS color keyword or `RGB(r, g, b)` string
    Fallback(String),
}

impl RoomLabel {
    pub fn as_str(&self) -> &str {
        match self {
            RoomLabel::Known(room_type) => room_type.as_str(),
            RoomLabel::Fallback(name) => name,
        }
    }

    /// Bucket used for aggregate counts
    pub fn room_type(&self) -> RoomType {
        match self {
            RoomLabel::Known(room_type) => *room_type,
            RoomLabel::Fallback(_) => RoomType::Other,
        }
    }
}

impl fmt::Display for RoomLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawing-space width and height of a room
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DrawingDimensions {
    pub width: f64,
    pub height: f64,
}

/// One classified room, created once per extracted shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub page: usize,
    pub room_type: RoomType,
    /// Room tag or fallback color name
    pub color: RoomLabel,
    /// Fill color rounded to 3 decimals
    pub rgb: Rgb,
    /// Bottom-left origin, drawing units
    pub drawing_coordinates: BoundingBox,
    /// Same corners in real-world units
    pub real_coordinates: BoundingBox,
    pub dimensions: DrawingDimensions,
    pub real_dimensions: RealDimensions,
    pub compliance_status: bool,
    pub compliance_message: String,
    /// Why the dimensions stayed in drawing units, if they did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_note: Option<String>,
}

impl RoomRecord {
    pub fn verdict(&self) -> Verdict {
        Verdict {
            compliant: self.compliance_status,
            message: self.compliance_message.clone(),
        }
    }
}

/// Round to a number of decimal places from the exact binary value
///
/// Goes through the correctly rounded decimal formatter, so `0.305` (stored
/// as 0.30499999...) rounds to `0.3`. Scaling by `10^decimals` first would
/// turn it into an exact `30.5` and round up.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let precision = decimals.max(0) as usize;
    format!("{:.*}", precision, value)
        .parse()
        .unwrap_or(value)
}
