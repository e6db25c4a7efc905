// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label to shape association for plans annotated with room names

use crate::types::{Shape, TextLabel};
use nalgebra::Point2;

/// Ray-casting containment test for a simple polygon given as its vertices
/// in order (either winding).
///
/// Room outlines are passed as the four corners of their bounding box, but
/// any convex quadrilateral works. Fewer than three vertices contain nothing.
/// Points exactly on an edge may land on either side.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let n = polygon.len();

    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];

        if ((pi.y > point.y) != (pj.y > point.y))
            && (point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// First shape, in input order, whose outline contains the label's center
pub fn associate<'a>(label: &TextLabel, shapes: &'a [Shape]) -> Option<&'a Shape> {
    let center = label.bounding_box.centroid();
    shapes
        .iter()
        .find(|shape| point_in_polygon(&center, &shape.bounding_box.corners()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoundingBox;

    #[test]
    fn test_point_in_quadrilateral() {
        let diamond = [
            Point2::new(5.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(5.0, 10.0),
            Point2::new(0.0, 5.0),
        ];
        assert!(point_in_polygon(&Point2::new(5.0, 5.0), &diamond));
        assert!(!point_in_polygon(&Point2::new(1.0, 1.0), &diamond));
        assert!(!point_in_polygon(&Point2::new(1.0, 1.0), &diamond[..2]));
    }

    #[test]
    fn test_first_containing_shape_wins() {
        let shapes = vec![
            Shape::outline(BoundingBox::new(200.0, 200.0, 300.0, 300.0)),
            Shape::outline(BoundingBox::new(0.0, 0.0, 100.0, 100.0)),
            Shape::outline(BoundingBox::new(0.0, 0.0, 400.0, 400.0)),
        ];
        let label = TextLabel::new("KITCHEN", BoundingBox::new(40.0, 45.0, 60.0, 55.0));

        let matched = associate(&label, &shapes).unwrap();
        assert_eq!(matched.bounding_box, shapes[1].bounding_box);
    }

    #[test]
    fn test_label_outside_every_shape() {
        let shapes = vec![Shape::outline(BoundingBox::new(0.0, 0.0, 100.0, 100.0))];
        let label = TextLabel::new("HALL", BoundingBox::new(140.0, 45.0, 160.0, 55.0));
        assert!(associate(&label, &shapes).is_none());
    }

    #[test]
    fn test_inverted_box_corners_still_contain() {
        // Parsers sometimes emit x1 < x0
        let shapes = vec![Shape::outline(BoundingBox::new(100.0, 100.0, 0.0, 0.0))];
        let label = TextLabel::new("HALL", BoundingBox::new(40.0, 45.0, 60.0, 55.0));
        assert!(associate(&label, &shapes).is_some());
    }
}
