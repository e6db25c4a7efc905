// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building rule evaluation
//!
//! A jurisdiction publishes one rule per room type with area and width
//! bounds in feet or meters. Evaluation never fails outwards: a missing rule
//! is a pass, a broken rule is a failing verdict carrying the error text.

use crate::error::{Error, Result};
use crate::units::{MeasureUnit, RealDimensions};
use serde::{Deserialize, Serialize};

pub const NO_RULE_MESSAGE: &str = "No specific rules found for this room type";
pub const COMPLIANT_MESSAGE: &str = "Compliant with building rules";

/// Publication state of a jurisdiction's rule set
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    #[default]
    Active,
    Inactive,
    Draft,
}

fn default_rule_unit() -> String {
    "meters".to_string()
}

fn default_true() -> bool {
    true
}

/// Dimensional bounds of a rule, all in `unit`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleDimensions {
    pub min_area: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_area: Option<f64>,
    pub min_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
    /// "feet", "sq feet", "meters", ... (parsed at evaluation time)
    #[serde(default = "default_rule_unit")]
    pub unit: String,
}

/// Constraint for one room type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildingRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    pub room_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dimensions: RuleDimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<String>,
    #[serde(default = "default_true")]
    pub is_required: bool,
}

impl BuildingRule {
    pub fn new(room_type: impl Into<String>, dimensions: RuleDimensions) -> Self {
        Self {
            sequence: None,
            room_type: room_type.into(),
            description: None,
            dimensions,
            additional_requirements: None,
            is_required: true,
        }
    }

    pub fn with_requirements(mut self, requirements: impl Into<String>) -> Self {
        self.additional_requirements = Some(requirements.into());
        self
    }

    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::MalformedRule {
            room_type: self.room_type.clone(),
            reason: reason.into(),
        }
    }

    /// Reject bounds that cannot be compared against
    pub fn validate(&self) -> Result<()> {
        let d = &self.dimensions;
        let bounds = [
            ("minArea", Some(d.min_area)),
            ("maxArea", d.max_area),
            ("minWidth", Some(d.min_width)),
            ("maxWidth", d.max_width),
        ];

        for (name, bound) in bounds {
            if let Some(value) = bound {
                if !value.is_finite() || value < 0.0 {
                    return Err(self.malformed(format!("{} must be a non-negative number", name)));
                }
            }
        }
        Ok(())
    }
}

/// Rules in force for one jurisdiction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSet {
    #[serde(default)]
    pub city_name: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub status: RuleStatus,
    #[serde(default)]
    pub rules: Vec<BuildingRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<BuildingRule>) -> Self {
        Self {
            rules,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RuleStatus::Active
    }

    /// First rule for a room type, compared case-insensitively
    pub fn find_rule(&self, room_type: &str) -> Option<&BuildingRule> {
        let wanted = room_type.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.room_type.to_lowercase() == wanted)
    }
}

/// Pass/fail outcome with a human-readable reason
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub compliant: bool,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            compliant: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            compliant: false,
            message: message.into(),
        }
    }
}

/// Evaluate a room against the rule set
pub fn evaluate(room_type: &str, dimensions: &RealDimensions, rules: &RuleSet) -> Verdict {
    let Some(rule) = rules.find_rule(room_type) else {
        return Verdict::pass(NO_RULE_MESSAGE);
    };

    match check_rule(rule, dimensions) {
        Ok(verdict) => verdict,
        Err(err) => {
            tracing::warn!(room_type, error = %err, "Rule evaluation failed");
            Verdict::fail(err.to_string())
        }
    }
}

/// Compare dimensions against a single rule
pub fn check_rule(rule: &BuildingRule, dimensions: &RealDimensions) -> Result<Verdict> {
    rule.validate()?;

    let limits = &rule.dimensions;
    let unit = MeasureUnit::parse(&limits.unit)?;
    let dims = dimensions.convert_to(unit)?;

    if dims.area < limits.min_area {
        return Ok(Verdict::fail(format!(
            "Area {:.2} sq {} is below the minimum required {} sq {}",
            dims.area, unit, limits.min_area, unit
        )));
    }

    if dims.shorter_side() < limits.min_width {
        return Ok(Verdict::fail(format!(
            "Width {:.2} {} is below the minimum required {} {}",
            dims.shorter_side(),
            unit,
            limits.min_width,
            unit
        )));
    }

    if let Some(max_area) = limits.max_area {
        if dims.area > max_area {
            return Ok(Verdict::fail(format!(
                "Area {:.2} sq {} exceeds the maximum allowed {} sq {}",
                dims.area, unit, max_area, unit
            )));
        }
    }

    if let Some(max_width) = limits.max_width {
        if dims.longer_side() > max_width {
            return Ok(Verdict::fail(format!(
                "Width {:.2} {} exceeds the maximum allowed {} {}",
                dims.longer_side(),
                unit,
                max_width,
                unit
            )));
        }
    }

    // Free-text requirements always fail the room, even after passing the bounds
    if let Some(requirements) = rule.additional_requirements.as_deref() {
        if !requirements.is_empty() {
            return Ok(Verdict::fail(requirements));
        }
    }

    Ok(Verdict::pass(COMPLIANT_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feet(width: f64, height: f64) -> RealDimensions {
        RealDimensions {
            width,
            height,
            area: width * height,
            unit: MeasureUnit::Feet,
        }
    }

    fn bounds(min_area: f64, min_width: f64, unit: &str) -> RuleDimensions {
        RuleDimensions {
            min_area,
            max_area: None,
            min_width,
            max_width: None,
            unit: unit.to_string(),
        }
    }

    #[test]
    fn test_missing_rule_passes() {
        let rules = RuleSet::new(vec![BuildingRule::new("kitchen", bounds(60.0, 8.0, "feet"))]);
        let verdict = evaluate("bedroom", &feet(2.0, 1.0), &rules);
        assert_eq!(verdict, Verdict::pass(NO_RULE_MESSAGE));
    }

    #[test]
    fn test_room_type_match_is_case_insensitive() {
        let rules = RuleSet::new(vec![BuildingRule::new("Bedroom", bounds(1.0, 0.5, "feet"))]);
        let verdict = evaluate("bedroom", &feet(2.0, 1.0), &rules);
        assert_eq!(verdict, Verdict::pass(COMPLIANT_MESSAGE));
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let rules = RuleSet::new(vec![
            BuildingRule::new("hall", bounds(1.0, 0.5, "feet")),
            BuildingRule::new("HALL", bounds(500.0, 0.5, "feet")),
        ]);
        assert!(evaluate("hall", &feet(2.0, 1.0), &rules).compliant);
    }

    #[test]
    fn test_min_area_failure_reports_minimum() {
        let rules = RuleSet::new(vec![BuildingRule::new("bedroom", bounds(120.0, 10.0, "sq feet"))]);
        let verdict = evaluate("bedroom", &feet(10.0, 10.0), &rules);
        assert!(!verdict.compliant);
        assert!(verdict.message.contains("120"));
        assert!(verdict.message.contains("feet"));
    }

    #[test]
    fn test_min_width_uses_shorter_side() {
        let rules = RuleSet::new(vec![BuildingRule::new("hall", bounds(100.0, 12.0, "feet"))]);
        let verdict = evaluate("hall", &feet(30.0, 10.0), &rules);
        assert!(!verdict.compliant);
        assert!(verdict.message.starts_with("Width 10.00"));
    }

    #[test]
    fn test_max_bounds() {
        let mut limits = bounds(10.0, 2.0, "feet");
        limits.max_area = Some(150.0);
        let rules = RuleSet::new(vec![BuildingRule::new("kitchen", limits.clone())]);
        let verdict = evaluate("kitchen", &feet(20.0, 10.0), &rules);
        assert!(verdict.message.contains("exceeds the maximum allowed 150"));

        limits.max_area = None;
        limits.max_width = Some(15.0);
        let rules = RuleSet::new(vec![BuildingRule::new("kitchen", limits)]);
        let verdict = evaluate("kitchen", &feet(20.0, 5.0), &rules);
        assert!(!verdict.compliant);
        assert!(verdict.message.starts_with("Width 20.00"));
    }

    #[test]
    fn test_additional_requirements_override_pass() {
        let rules = RuleSet::new(vec![BuildingRule::new("bedroom", bounds(1.0, 0.5, "feet"))
            .with_requirements("Must have natural ventilation")]);
        let verdict = evaluate("bedroom", &feet(2.0, 1.0), &rules);
        assert_eq!(verdict, Verdict::fail("Must have natural ventilation"));
    }

    #[test]
    fn test_empty_requirements_do_not_fail() {
        let rules = RuleSet::new(vec![
            BuildingRule::new("bedroom", bounds(1.0, 0.5, "feet")).with_requirements("")
        ]);
        assert!(evaluate("bedroom", &feet(2.0, 1.0), &rules).compliant);
    }

    #[test]
    fn test_rule_in_meters_converts_feet_dimensions() {
        // 10ft x 10ft = 3.048m x 3.048m, area 100 * 0.0929 = 9.29 sq m
        let rules = RuleSet::new(vec![BuildingRule::new("study", bounds(9.0, 3.0, "meters"))]);
        assert!(evaluate("study", &feet(10.0, 10.0), &rules).compliant);

        let rules = RuleSet::new(vec![BuildingRule::new("study", bounds(9.3, 3.0, "meters"))]);
        assert!(!evaluate("study", &feet(10.0, 10.0), &rules).compliant);
    }

    #[test]
    fn test_caller_dimensions_are_not_modified() {
        let rules = RuleSet::new(vec![BuildingRule::new("study", bounds(1.0, 1.0, "meters"))]);
        let dims = feet(10.0, 10.0);
        evaluate("study", &dims, &rules);
        assert_eq!(dims, feet(10.0, 10.0));
    }

    #[test]
    fn test_errors_become_failing_verdicts() {
        let rules = RuleSet::new(vec![BuildingRule::new("hall", bounds(1.0, 1.0, "acres"))]);
        let verdict = evaluate("hall", &feet(20.0, 20.0), &rules);
        assert_eq!(verdict, Verdict::fail("Unknown unit: acres"));

        let points = RealDimensions {
            width: 144.0,
            height: 72.0,
            area: 10368.0,
            unit: MeasureUnit::Points,
        };
        let rules = RuleSet::new(vec![BuildingRule::new("hall", bounds(1.0, 1.0, "feet"))]);
        let verdict = evaluate("hall", &points, &rules);
        assert!(!verdict.compliant);
        assert!(verdict.message.contains("points"));

        let rules = RuleSet::new(vec![BuildingRule::new("hall", bounds(f64::NAN, 1.0, "feet"))]);
        let verdict = evaluate("hall", &feet(20.0, 20.0), &rules);
        assert!(verdict.message.starts_with("Malformed rule for 'hall'"));
    }

    #[test]
    fn test_rule_set_deserializes_store_format() {
        let json = r#"{
            "cityName": "Bangalore",
            "pincode": "560004",
            "status": "active",
            "rules": [{
                "roomType": "bedroom",
                "description": "Minimum requirements for bedrooms",
                "dimensions": {"minArea": 120, "maxArea": 250, "minWidth": 10, "maxWidth": 20, "unit": "sq feet"},
                "additionalRequirements": "Must have natural ventilation"
            }]
        }"#;
        let set: RuleSet = serde_json::from_str(json).unwrap();
        assert!(set.is_active());
        let rule = set.find_rule("BEDROOM").unwrap();
        assert_eq!(rule.dimensions.max_width, Some(20.0));
        assert!(rule.is_required);
    }
}
