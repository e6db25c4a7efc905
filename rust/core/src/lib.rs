// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # PlanCheck Core
//!
//! Room classification, scale conversion and building-rule compliance for
//! color-marked floor plans.
//!
//! The crate takes the vector geometry a document parser extracted from a
//! plan (filled rectangles and text runs, in points), a scale declaration
//! such as `1 inch = 8 feet`, and the building rules of a jurisdiction. It
//! produces one [`RoomRecord`] per room with real-world dimensions and a
//! compliance verdict.
//!
//! ## Pipeline
//!
//! 1. [`color::classify`] maps a fill to a room type (or a fallback name,
//!    or "structural" for walls)
//! 2. [`units`] converts drawing units to feet or meters
//! 3. [`compliance::evaluate`] checks the room against its rule
//! 4. [`extraction`] runs the above per shape and aggregates counts
//!
//! Plans annotated with room names instead of fills go through
//! [`associate::associate`], which matches a label to the outline containing it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plancheck_core::{extract_rooms, PageGeometry, RawScale, RuleSet};
//!
//! let pages: Vec<PageGeometry> = serde_json::from_str(&parser_output)?;
//! let scale = RawScale::new(1.0, "inch", 8.0, "feet");
//! let rules: RuleSet = serde_json::from_str(&rule_json)?;
//!
//! let report = extract_rooms(&pages, &scale, &rules);
//! for room in &report.rooms {
//!     println!("{} {:?}: {}", room.color, room.real_dimensions, room.compliance_message);
//! }
//! ```
//!
//! Nothing in the pipeline returns an error: a bad scale keeps dimensions in
//! points, a broken rule yields a failing verdict with the reason.

pub mod associate;
pub mod color;
pub mod compliance;
pub mod error;
pub mod extraction;
pub mod types;
pub mod units;

pub use associate::{associate, point_in_polygon};
pub use color::{classify, palette, ColorClass};
pub use compliance::{evaluate, BuildingRule, RuleDimensions, RuleSet, RuleStatus, Verdict};
pub use error::{Error, Result};
pub use extraction::{
    extract, extract_labeled_rooms, extract_rooms, ComplianceSummary, ExtractionMode,
    ExtractionReport,
};
pub use types::{
    BoundingBox, DrawingDimensions, PageGeometry, Rgb, RoomLabel, RoomRecord, RoomType, Shape,
    TextLabel,
};
pub use units::{
    convert_dimensions, to_real_dimensions, to_real_linear, Conversion, MeasureUnit, RawScale,
    RealDimensions, ScaleNumber, ScaleSpec, ScaleUnit,
};
