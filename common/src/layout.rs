//! Normalized spatial layout of the board's holes.

use crate::geometry::{self, Point};

/// Hole positions scaled into the unit disc, kept for display purposes.
///
/// Construction centers the minimal enclosing circle of the raw points
/// on the origin and divides by its radius, so a renderer can draw any
/// board without knowing its native coordinate scale.
#[derive(Clone, PartialEq, Debug)]
pub struct Layout {
    points: Vec<Point>,
}

impl Layout {
    pub fn from_points(points: Vec<Point>) -> Layout {
        if points.is_empty() {
            return Layout { points };
        }

        let circle = geometry::min_enclosing_circle(&points);
        let points = points
            .into_iter()
            .map(|p| {
                let centered = p - circle.center;
                if circle.radius > 0.0 {
                    centered / circle.radius
                } else {
                    centered
                }
            })
            .collect();

        Layout { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the normalized points.
    pub fn bounds(&self) -> (Point, Point) {
        geometry::bounds(&self.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    #[test]
    fn square_fits_in_the_unit_disc() {
        let layout = Layout::from_points(vec![
            pt(0.0, 0.0),
            pt(2.0, 0.0),
            pt(0.0, 2.0),
            pt(2.0, 2.0),
        ]);

        assert_eq!(layout.len(), 4);
        for &p in layout.points() {
            assert!(p.mag() <= 1.0 + 1e-9);
        }

        // the square's corners end up on the circle, symmetric about 0
        let (min, max) = layout.bounds();
        assert!((min.x + max.x).abs() < 1e-9);
        assert!((min.y + max.y).abs() < 1e-9);
    }

    #[test]
    fn single_point_moves_to_the_origin() {
        let layout = Layout::from_points(vec![pt(7.0, -3.0)]);
        assert_eq!(layout.points(), &[pt(0.0, 0.0)]);
    }

    #[test]
    fn empty_layout_is_allowed() {
        let layout = Layout::from_points(Vec::new());
        assert!(layout.is_empty());
    }
}
