// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room extraction pipeline
//!
//! Runs classification, conversion and rule evaluation over every page of a
//! parsed plan and aggregates the results. Two modes are supported:
//!
//! - **Color**: every filled shape is a candidate; its fill decides the room type.
//! - **Label**: room-name text runs are matched to the outline that contains them.

use crate::associate::associate;
use crate::color::{classify, ColorClass};
use crate::compliance::{evaluate, RuleSet};
use crate::error::Result;
use crate::types::{
    round_to, BoundingBox, DrawingDimensions, PageGeometry, Rgb, RoomLabel, RoomRecord, RoomType,
};
use crate::units::{convert_point, to_real_dimensions, Conversion, RawScale, ScaleSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How rooms are identified on the plan
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    #[default]
    Color,
    Label,
}

/// Compliance totals over all extracted rooms
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
}

/// Rooms of one extraction call plus aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionReport {
    pub rooms: Vec<RoomRecord>,
    /// Every room type is present, fallback colors count as `other`
    pub room_counts: BTreeMap<RoomType, usize>,
    pub compliance_summary: ComplianceSummary,
}

impl ExtractionReport {
    pub fn from_rooms(rooms: Vec<RoomRecord>) -> Self {
        let mut room_counts: BTreeMap<RoomType, usize> =
            RoomType::ALL.iter().map(|room_type| (*room_type, 0)).collect();
        let mut summary = ComplianceSummary::default();

        for room in &rooms {
            *room_counts.entry(room.room_type).or_insert(0) += 1;
            summary.total += 1;
            if room.compliance_status {
                summary.compliant += 1;
            } else {
                summary.non_compliant += 1;
            }
        }

        Self {
            rooms,
            room_counts,
            compliance_summary: summary,
        }
    }

    pub fn count(&self, room_type: RoomType) -> usize {
        self.room_counts.get(&room_type).copied().unwrap_or(0)
    }
}

/// Extract rooms using the given mode
pub fn extract(
    mode: ExtractionMode,
    pages: &[PageGeometry],
    scale: &RawScale,
    rules: &RuleSet,
) -> ExtractionReport {
    match mode {
        ExtractionMode::Color => extract_rooms(pages, scale, rules),
        ExtractionMode::Label => extract_labeled_rooms(pages, scale, rules),
    }
}

/// Color mode: classify every filled shape by its fill
pub fn extract_rooms(pages: &[PageGeometry], scale: &RawScale, rules: &RuleSet) -> ExtractionReport {
    let scale = parse_scale(scale);
    let mut rooms = Vec::new();

    for page in pages {
        for shape in &page.shapes {
            let Some(fill) = shape.fill_color else {
                continue;
            };

            let label = match classify(&fill) {
                ColorClass::Structural => {
                    tracing::trace!(page = page.page, "Skipping structural fill");
                    continue;
                }
                ColorClass::Room(label) => label,
            };

            rooms.push(build_record(
                page,
                &shape.bounding_box,
                label,
                fill,
                &scale,
                rules,
            ));
        }
    }

    finish(rooms, pages.len(), ExtractionMode::Color)
}

/// Label mode: attach recognized room names to their enclosing outline
pub fn extract_labeled_rooms(
    pages: &[PageGeometry],
    scale: &RawScale,
    rules: &RuleSet,
) -> ExtractionReport {
    let scale = parse_scale(scale);
    let mut rooms = Vec::new();

    for page in pages {
        for label in &page.labels {
            let Some(room_type) = RoomType::from_label(&label.text) else {
                continue;
            };

            let Some(shape) = associate(label, &page.shapes) else {
                tracing::debug!(page = page.page, text = %label.text, "Label not inside any shape");
                continue;
            };

            rooms.push(build_record(
                page,
                &shape.bounding_box,
                RoomLabel::Known(room_type),
                shape.fill_color.unwrap_or(Rgb::BLACK),
                &scale,
                rules,
            ));
        }
    }

    finish(rooms, pages.len(), ExtractionMode::Label)
}

fn parse_scale(raw: &RawScale) -> Result<ScaleSpec> {
    let scale = ScaleSpec::parse(raw);
    if let Err(err) = &scale {
        tracing::warn!(error = %err, "Unusable scale, dimensions stay in points");
    }
    scale
}

fn finish(rooms: Vec<RoomRecord>, page_count: usize, mode: ExtractionMode) -> ExtractionReport {
    let report = ExtractionReport::from_rooms(rooms);
    tracing::debug!(
        ?mode,
        pages = page_count,
        rooms = report.compliance_summary.total,
        compliant = report.compliance_summary.compliant,
        "Extraction complete"
    );
    report
}

fn build_record(
    page: &PageGeometry,
    bbox: &BoundingBox,
    label: RoomLabel,
    fill: Rgb,
    scale: &Result<ScaleSpec>,
    rules: &RuleSet,
) -> RoomRecord {
    let drawing = bbox.flip_y(page.height);
    let width = drawing.width();
    let height = drawing.height();

    let (conversion, real_coordinates) = match scale {
        Ok(spec) => {
            let (x0, y0) = convert_point(drawing.x0, drawing.y0, spec);
            let (x1, y1) = convert_point(drawing.x1, drawing.y1, spec);
            (
                Conversion::Converted(to_real_dimensions(width, height, spec)),
                BoundingBox::new(x0, y0, x1, y1),
            )
        }
        Err(err) => (
            Conversion::degraded(width, height, err),
            drawing.rounded(2),
        ),
    };

    let verdict = evaluate(label.as_str(), conversion.dimensions(), rules);

    RoomRecord {
        page: page.page,
        room_type: label.room_type(),
        color: label,
        rgb: fill.rounded(3),
        drawing_coordinates: drawing.rounded(2),
        real_coordinates,
        dimensions: DrawingDimensions {
            width: round_to(width, 2),
            height: round_to(height, 2),
        },
        real_dimensions: *conversion.dimensions(),
        compliance_status: verdict.compliant,
        compliance_message: verdict.message,
        conversion_note: conversion.reason().map(str::to_string),
    }
}
