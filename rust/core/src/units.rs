// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scale declarations and drawing-to-real unit conversion
//!
//! Drawing geometry is in points (1/72 inch). A scale declares
//! "`value` `unit` on paper = `equals` `equals_unit` in reality", for example
//! `1 cm = 1 meters`. Conversion is a fixed pipeline:
//!
//! 1. points → inches
//! 2. inches → paper unit, only for `cm` and `mm`
//! 3. × `equals / value`
//! 4. feet/meters adjustment of the sides when the paper unit and the real
//!    unit come from different systems; area is recomputed from the adjusted
//!    sides rather than scaled by the squared factor
//!
//! Outputs are rounded to two decimals.

use crate::error::{Error, Result};
use crate::types::round_to;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub const POINTS_PER_INCH: f64 = 72.0;
pub const CM_PER_INCH: f64 = 2.54;
pub const MM_PER_INCH: f64 = 25.4;

/// Linear feet → meters
pub const METERS_PER_FOOT: f64 = 0.3048;
/// Linear meters → feet
pub const FEET_PER_METER: f64 = 3.28084;
/// Area sq feet → sq meters (fixed factor, not `METERS_PER_FOOT²`)
pub const SQ_METERS_PER_SQ_FOOT: f64 = 0.0929;
/// Area sq meters → sq feet (fixed factor, not `FEET_PER_METER²`)
pub const SQ_FEET_PER_SQ_METER: f64 = 10.7639;

/// Paper-side unit of a scale declaration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnit {
    Inch,
    Cm,
    Mm,
    Feet,
    Meters,
}

impl ScaleUnit {
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "inch" | "inches" | "in" | "\"" => Ok(ScaleUnit::Inch),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(ScaleUnit::Cm),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(ScaleUnit::Mm),
            "feet" | "foot" | "ft" | "'" => Ok(ScaleUnit::Feet),
            "meters" | "meter" | "metres" | "metre" | "m" => Ok(ScaleUnit::Meters),
            _ => Err(Error::UnknownUnit(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaleUnit::Inch => "inch",
            ScaleUnit::Cm => "cm",
            ScaleUnit::Mm => "mm",
            ScaleUnit::Feet => "feet",
            ScaleUnit::Meters => "meters",
        }
    }
}

/// Unit attached to measured dimensions and building rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    Feet,
    Meters,
    /// Unconverted drawing units
    Points,
}

impl MeasureUnit {
    /// Parse a unit name; area spellings such as "sq feet" or "sqm" map to
    /// their linear unit.
    pub fn parse(name: &str) -> Result<Self> {
        let lower = name.trim().to_lowercase();
        let base = lower
            .strip_prefix("square")
            .or_else(|| lower.strip_prefix("sq."))
            .or_else(|| lower.strip_prefix("sq"))
            .unwrap_or(&lower)
            .trim();

        match base {
            "feet" | "foot" | "ft" => Ok(MeasureUnit::Feet),
            "meters" | "meter" | "metres" | "metre" | "m" => Ok(MeasureUnit::Meters),
            "points" | "point" | "pt" | "pts" => Ok(MeasureUnit::Points),
            _ => Err(Error::UnknownUnit(name.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureUnit::Feet => "feet",
            MeasureUnit::Meters => "meters",
            MeasureUnit::Points => "points",
        }
    }
}

impl fmt::Display for MeasureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale number as received from a form or JSON body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ScaleNumber {
    Number(f64),
    Text(String),
}

impl ScaleNumber {
    fn parse(&self, field: &str) -> Result<f64> {
        let number = match self {
            ScaleNumber::Number(n) => *n,
            ScaleNumber::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::InvalidScale(format!("{} '{}' is not a number", field, s))
            })?,
        };

        if !number.is_finite() || number <= 0.0 {
            return Err(Error::InvalidScale(format!(
                "{} must be a positive number, got {}",
                field, number
            )));
        }
        Ok(number)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ScaleNumber::Text(s) if s.trim().is_empty())
    }
}

impl From<f64> for ScaleNumber {
    fn from(n: f64) -> Self {
        ScaleNumber::Number(n)
    }
}

impl From<&str> for ScaleNumber {
    fn from(s: &str) -> Self {
        ScaleNumber::Text(s.to_string())
    }
}

/// Unvalidated scale declaration
///
/// Every field may be absent or `null` so that callers can report which
/// ones are missing instead of failing to deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawScale {
    #[serde(default)]
    pub value: Option<ScaleNumber>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unit: String,
    #[serde(default)]
    pub equals: Option<ScaleNumber>,
    #[serde(default, alias = "equals_unit", deserialize_with = "null_as_empty")]
    pub equals_unit: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn scale_number(number: &Option<ScaleNumber>, field: &str) -> Result<f64> {
    match number {
        Some(number) => number.parse(field),
        None => Err(Error::InvalidScale(format!("{} is missing", field))),
    }
}

impl RawScale {
    pub fn new(
        value: impl Into<ScaleNumber>,
        unit: impl Into<String>,
        equals: impl Into<ScaleNumber>,
        equals_unit: impl Into<String>,
    ) -> Self {
        Self {
            value: Some(value.into()),
            unit: unit.into(),
            equals: Some(equals.into()),
            equals_unit: equals_unit.into(),
        }
    }

    /// True when any of the four fields is absent or empty
    pub fn has_missing_fields(&self) -> bool {
        let blank = |number: &Option<ScaleNumber>| number.as_ref().map_or(true, ScaleNumber::is_blank);

        blank(&self.value)
            || blank(&self.equals)
            || self.unit.trim().is_empty()
            || self.equals_unit.trim().is_empty()
    }
}

/// Validated scale: `value unit = equals equals_unit`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSpec {
    pub value: f64,
    pub unit: ScaleUnit,
    pub equals: f64,
    pub equals_unit: MeasureUnit,
}

impl ScaleSpec {
    pub fn new(value: f64, unit: ScaleUnit, equals: f64, equals_unit: MeasureUnit) -> Result<Self> {
        Self::parse(&RawScale::new(value, unit.as_str(), equals, equals_unit.as_str()))
    }

    pub fn parse(raw: &RawScale) -> Result<Self> {
        let value = scale_number(&raw.value, "value")?;
        let equals = scale_number(&raw.equals, "equals")?;
        let unit = ScaleUnit::parse(&raw.unit)?;
        let equals_unit = MeasureUnit::parse(&raw.equals_unit)?;

        if equals_unit == MeasureUnit::Points {
            return Err(Error::InvalidScale(
                "real-world unit must be feet or meters".to_string(),
            ));
        }

        Ok(Self {
            value,
            unit,
            equals,
            equals_unit,
        })
    }

    /// Dimensionless `equals / value`
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.equals / self.value
    }

    /// Side factor applied when paper and real units come from different systems
    #[inline]
    fn system_adjustment(&self) -> f64 {
        match (self.equals_unit, self.unit) {
            (MeasureUnit::Meters, ScaleUnit::Inch | ScaleUnit::Feet) => METERS_PER_FOOT,
            (MeasureUnit::Feet, ScaleUnit::Cm | ScaleUnit::Meters) => FEET_PER_METER,
            _ => 1.0,
        }
    }
}

impl fmt::Display for ScaleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} = {}{}",
            self.value,
            self.unit.as_str(),
            self.equals,
            self.equals_unit
        )
    }
}

/// Physical size of a room
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RealDimensions {
    pub width: f64,
    pub height: f64,
    pub area: f64,
    pub unit: MeasureUnit,
}

impl RealDimensions {
    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn longer_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Re-express in another unit using the fixed linear and area factors
    pub fn convert_to(&self, target: MeasureUnit) -> Result<RealDimensions> {
        let (linear, area) = match (self.unit, target) {
            (from, to) if from == to => return Ok(*self),
            (MeasureUnit::Feet, MeasureUnit::Meters) => (METERS_PER_FOOT, SQ_METERS_PER_SQ_FOOT),
            (MeasureUnit::Meters, MeasureUnit::Feet) => (FEET_PER_METER, SQ_FEET_PER_SQ_METER),
            (from, to) => {
                return Err(Error::UnsupportedConversion {
                    from: from.to_string(),
                    to: to.to_string(),
                })
            }
        };

        Ok(RealDimensions {
            width: self.width * linear,
            height: self.height * linear,
            area: self.area * area,
            unit: target,
        })
    }

    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            width: round_to(self.width, decimals),
            height: round_to(self.height, decimals),
            area: round_to(self.area, decimals),
            unit: self.unit,
        }
    }
}

/// Convert a drawing-space length to the scale's paper unit times the ratio.
///
/// No rounding and no cross-system adjustment; linear in `value`.
pub fn to_real_linear(value: f64, scale: &ScaleSpec) -> f64 {
    let inches = value / POINTS_PER_INCH;
    let paper = match scale.unit {
        ScaleUnit::Cm => inches * CM_PER_INCH,
        ScaleUnit::Mm => inches * MM_PER_INCH,
        ScaleUnit::Inch | ScaleUnit::Feet | ScaleUnit::Meters => inches,
    };
    paper * scale.ratio()
}

/// Drawing-space length in the scale's real unit, including the
/// feet/meters side adjustment
pub fn to_real_length(value: f64, scale: &ScaleSpec) -> f64 {
    to_real_linear(value, scale) * scale.system_adjustment()
}

/// Real width, height and area for a drawing-space rectangle
pub fn to_real_dimensions(width: f64, height: f64, scale: &ScaleSpec) -> RealDimensions {
    let real_width = to_real_length(width, scale);
    let real_height = to_real_length(height, scale);

    RealDimensions {
        width: real_width,
        height: real_height,
        area: real_width * real_height,
        unit: scale.equals_unit,
    }
    .rounded(2)
}

/// Drawing-space point in real units, rounded to two decimals
pub fn convert_point(x: f64, y: f64, scale: &ScaleSpec) -> (f64, f64) {
    (
        round_to(to_real_length(x, scale), 2),
        round_to(to_real_length(y, scale), 2),
    )
}

/// Result of converting one rectangle
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion {
    Converted(RealDimensions),
    /// Scale unusable; dimensions stay in points
    Degraded {
        dimensions: RealDimensions,
        reason: String,
    },
}

impl Conversion {
    pub fn degraded(width: f64, height: f64, err: &Error) -> Self {
        Conversion::Degraded {
            dimensions: RealDimensions {
                width,
                height,
                area: width * height,
                unit: MeasureUnit::Points,
            }
            .rounded(2),
            reason: err.to_string(),
        }
    }

    pub fn dimensions(&self) -> &RealDimensions {
        match self {
            Conversion::Converted(dimensions) => dimensions,
            Conversion::Degraded { dimensions, .. } => dimensions,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Conversion::Converted(_) => None,
            Conversion::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Convert a rectangle, falling back to drawing units when the scale is unusable
pub fn convert_dimensions(width: f64, height: f64, raw: &RawScale) -> Conversion {
    match ScaleSpec::parse(raw) {
        Ok(scale) => Conversion::Converted(to_real_dimensions(width, height, &scale)),
        Err(err) => {
            tracing::warn!(error = %err, "Scale conversion failed, keeping drawing units");
            Conversion::degraded(width, height, &err)
        }
    }
}
