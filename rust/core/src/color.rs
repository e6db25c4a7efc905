// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fill color to room type classification
//!
//! Rooms are marked on the drawing with solid fills from a fixed palette.
//! A fill is rounded to two decimals per channel and looked up in an exact
//! table. The table lists a few neighbouring values for every marker color
//! so that anti-aliasing and color-space round trips in the producing tool
//! still land on the right room type. Anything else falls back to a CSS
//! color keyword or a literal `RGB(r, g, b)` string.

use crate::types::{round_to, Rgb, RoomLabel, RoomType};
use csscolorparser::Color;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Channels at or below this value on every channel mark walls and outlines
pub const STRUCTURAL_THRESHOLD: f64 = 0.1;

/// Rounded marker colors, in hundredths per channel
const ROOM_COLORS: &[([i32; 3], RoomType)] = &[
    // #4caf50
    ([30, 69, 31], RoomType::Bedroom),
    ([29, 68, 30], RoomType::Bedroom),
    ([30, 68, 31], RoomType::Bedroom),
    ([31, 70, 32], RoomType::Bedroom),
    // #ffed3b
    ([100, 93, 23], RoomType::Bathroom),
    ([100, 92, 23], RoomType::Bathroom),
    ([99, 93, 23], RoomType::Bathroom),
    // #ffe600, older annotation tools
    ([100, 90, 0], RoomType::Bathroom),
    // #f44336
    ([96, 26, 21], RoomType::Hall),
    ([95, 26, 21], RoomType::Hall),
    ([96, 27, 21], RoomType::Hall),
    // #9c27b0
    ([61, 16, 69], RoomType::Kitchen),
    ([60, 15, 68], RoomType::Kitchen),
    ([61, 15, 69], RoomType::Kitchen),
    // #ff9800
    ([100, 60, 0], RoomType::Dining),
    ([100, 59, 0], RoomType::Dining),
    ([99, 60, 0], RoomType::Dining),
    // #03a9f4
    ([1, 66, 96], RoomType::Balcony),
    ([1, 65, 95], RoomType::Balcony),
    ([2, 66, 96], RoomType::Balcony),
    // #795548
    ([47, 33, 28], RoomType::Study),
    ([47, 34, 28], RoomType::Study),
    ([48, 33, 28], RoomType::Study),
];

/// Canonical marker fill for each room type
const PALETTE: &[(RoomType, Rgb)] = &[
    (RoomType::Bedroom, Rgb::new(0.30, 0.69, 0.31)),
    (RoomType::Bathroom, Rgb::new(1.00, 0.93, 0.23)),
    (RoomType::Hall, Rgb::new(0.96, 0.26, 0.21)),
    (RoomType::Kitchen, Rgb::new(0.61, 0.16, 0.69)),
    (RoomType::Dining, Rgb::new(1.00, 0.60, 0.00)),
    (RoomType::Balcony, Rgb::new(0.01, 0.66, 0.96)),
    (RoomType::Study, Rgb::new(0.47, 0.33, 0.28)),
];

/// Outcome of classifying a fill color
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorClass {
    /// Wall or outline fill; not a room
    Structural,
    Room(RoomLabel),
}

impl ColorClass {
    pub fn label(&self) -> Option<&RoomLabel> {
        match self {
            ColorClass::Structural => None,
            ColorClass::Room(label) => Some(label),
        }
    }
}

fn room_table() -> &'static FxHashMap<[i32; 3], RoomType> {
    static TABLE: OnceLock<FxHashMap<[i32; 3], RoomType>> = OnceLock::new();
    TABLE.get_or_init(|| ROOM_COLORS.iter().copied().collect())
}

#[inline]
fn hundredths(rgb: &Rgb) -> [i32; 3] {
    rgb.channels().map(|c| (round_to(c, 2) * 100.0).round() as i32)
}

pub fn is_structural(rgb: &Rgb) -> bool {
    rgb.channels().iter().all(|&c| c <= STRUCTURAL_THRESHOLD)
}

/// Room type for an exact (after rounding) marker color
pub fn room_type_for(rgb: &Rgb) -> Option<RoomType> {
    room_table().get(&hundredths(rgb)).copied()
}

/// Exact CSS3 keyword for an 8-bit color
///
/// Where keywords share a value the older spelling wins (aqua, fuchsia,
/// gray). CSS4-only `rebeccapurple` is not a CSS3 keyword.
fn css_name(bytes: [u8; 3]) -> Option<&'static str> {
    let [r, g, b] = bytes;
    let name = match Color::from_rgba8(r, g, b, 255).name()? {
        "rebeccapurple" => return None,
        "transparent" => "black",
        "cyan" => "aqua",
        "magenta" => "fuchsia",
        "grey" => "gray",
        "darkgrey" => "darkgray",
        "darkslategrey" => "darkslategray",
        "dimgrey" => "dimgray",
        "lightgrey" => "lightgray",
        "lightslategrey" => "lightslategray",
        "slategrey" => "slategray",
        name => name,
    };
    Some(name)
}

/// Human-readable name for a fill that is not a marker color
pub fn color_name(rgb: &Rgb) -> String {
    match css_name(rgb.to_bytes()) {
        Some(name) => name.to_string(),
        None => format!("RGB({:.2}, {:.2}, {:.2})", rgb.r, rgb.g, rgb.b),
    }
}

/// Classify a fill color
pub fn classify(rgb: &Rgb) -> ColorClass {
    if is_structural(rgb) {
        return ColorClass::Structural;
    }

    let label = match room_type_for(rgb) {
        Some(room_type) => RoomLabel::Known(room_type),
        None => RoomLabel::Fallback(color_name(rgb)),
    };
    ColorClass::Room(label)
}

/// Marker colors clients should use when annotating plans
pub fn palette() -> &'static [(RoomType, Rgb)] {
    PALETTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_classifies() {
        for (key, room_type) in ROOM_COLORS {
            let rgb = Rgb::new(
                key[0] as f64 / 100.0,
                key[1] as f64 / 100.0,
                key[2] as f64 / 100.0,
            );
            assert_eq!(
                classify(&rgb),
                ColorClass::Room(RoomLabel::Known(*room_type)),
                "{:?}",
                key
            );
        }
    }

    #[test]
    fn test_near_duplicate_bedroom_entries() {
        assert_eq!(room_type_for(&Rgb::new(0.30, 0.69, 0.31)), Some(RoomType::Bedroom));
        assert_eq!(room_type_for(&Rgb::new(0.29, 0.68, 0.30)), Some(RoomType::Bedroom));
        // Raw fill from a renderer that slightly shifted the channels
        assert_eq!(room_type_for(&Rgb::new(0.298, 0.686, 0.314)), Some(RoomType::Bedroom));
    }

    #[test]
    fn test_half_hundredth_channels_round_from_exact_value() {
        // 0.305 is stored just below the tie and rounds to 0.30
        assert_eq!(
            classify(&Rgb::new(0.305, 0.69, 0.31)),
            ColorClass::Room(RoomLabel::Known(RoomType::Bedroom))
        );
        // 0.615 and 0.695 round down to the kitchen marker
        assert_eq!(room_type_for(&Rgb::new(0.615, 0.16, 0.695)), Some(RoomType::Kitchen));
    }

    #[test]
    fn test_no_nearest_neighbour_matching() {
        // One hundredth away on a channel that has no tolerance entry
        assert_eq!(room_type_for(&Rgb::new(0.30, 0.69, 0.35)), None);
    }

    #[test]
    fn test_structural_colors_are_skipped() {
        for rgb in [
            Rgb::new(0.0, 0.0, 0.0),
            Rgb::new(0.05, 0.02, 0.01),
            Rgb::new(0.1, 0.1, 0.1),
        ] {
            assert_eq!(classify(&rgb), ColorClass::Structural);
        }
        assert_ne!(classify(&Rgb::new(0.11, 0.0, 0.0)), ColorClass::Structural);
    }

    #[test]
    fn test_fallback_names() {
        assert_eq!(
            classify(&Rgb::new(1.0, 1.0, 1.0)),
            ColorClass::Room(RoomLabel::Fallback("white".into()))
        );
        assert_eq!(
            classify(&Rgb::new(0.2, 0.4, 0.6)),
            ColorClass::Room(RoomLabel::Fallback("RGB(0.20, 0.40, 0.60)".into()))
        );
    }

    #[test]
    fn test_css_keywords() {
        assert_eq!(css_name([255, 0, 0]), Some("red"));
        assert_eq!(css_name([0, 128, 128]), Some("teal"));
        assert_eq!(css_name([254, 0, 0]), None);
        assert_eq!(css_name([102, 51, 153]), None);
    }

    #[test]
    fn test_css_duplicates_prefer_older_spelling() {
        assert_eq!(css_name([0, 255, 255]), Some("aqua"));
        assert_eq!(css_name([255, 0, 255]), Some("fuchsia"));
        assert_eq!(css_name([128, 128, 128]), Some("gray"));
        assert_eq!(css_name([47, 79, 79]), Some("darkslategray"));
    }

    #[test]
    fn test_fallback_name_truncates_channels() {
        // 0.5 * 255 = 127.5 truncates to 127, not olive's 128
        assert_eq!(color_name(&Rgb::new(0.5, 0.5, 0.0)), "RGB(0.50, 0.50, 0.00)");
        assert_eq!(color_name(&Rgb::new(1.0, 0.0, 1.0)), "fuchsia");
    }

    #[test]
    fn test_bathroom_marker_hex_forms() {
        let (_, bathroom) = palette()[1];
        assert_eq!(bathroom.to_bytes(), [255, 237, 58]);
        // #ffed3b and #ffe600 both classify as bathroom
        for bytes in [[0xff, 0xed, 0x3b], [0xff, 0xe6, 0x00]] {
            let rgb = Rgb::new(
                bytes[0] as f64 / 255.0,
                bytes[1] as f64 / 255.0,
                bytes[2] as f64 / 255.0,
            );
            assert_eq!(room_type_for(&rgb), Some(RoomType::Bathroom));
        }
    }

    #[test]
    fn test_palette_colors_are_in_table() {
        for (room_type, rgb) in palette() {
            assert_eq!(room_type_for(rgb), Some(*room_type));
        }
    }
}
