//! Plane geometry for board layouts: vector arithmetic and Welzl's
//! minimal-enclosing-circle algorithm.

use std::ops::{Add, Div, Mul, Sub};

use rand::{SeedableRng, seq::SliceRandom};
use rand_pcg::Pcg64Mcg;

/// A point in the layout plane.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scale: f64) -> Point {
        Point {
            x: self.x * scale,
            y: self.y * scale,
        }
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, scale: f64) -> Point {
        Point {
            x: self.x / scale,
            y: self.y / scale,
        }
    }
}

impl Point {
    pub fn mag_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn mag(self) -> f64 {
        self.mag_squared().sqrt()
    }
}

pub fn dot(a: Point, b: Point) -> f64 {
    a.x * b.x + a.y * b.y
}

pub fn det(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

pub fn dist(a: Point, b: Point) -> f64 {
    (a - b).mag()
}

pub fn mid_point(a: Point, b: Point) -> Point {
    (a + b) / 2.0
}

/// A circle in the layout plane.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn contains(&self, p: Point) -> bool {
        (p - self.center).mag_squared() <= self.radius * self.radius
    }
}

fn circle_from_2_points(a: Point, b: Point) -> Circle {
    Circle {
        center: mid_point(a, b),
        radius: (a - b).mag() / 2.0,
    }
}

/// Center of the circle through the origin and two further points.
fn circle_center(b: Point, c: Point) -> Point {
    let bb = dot(b, b);
    let cc = dot(c, c);
    let d = det(b, c);
    Point {
        x: (c.y * bb - b.y * cc) / (2.0 * d),
        y: (b.x * cc - c.x * bb) / (2.0 * d),
    }
}

fn circle_from_3_points(a: Point, b: Point, c: Point) -> Circle {
    let center = circle_center(b - a, c - a) + a;
    Circle {
        center,
        radius: dist(center, a),
    }
}

fn encloses_all(circle: Circle, points: &[Point]) -> bool {
    points.iter().all(|&p| circle.contains(p))
}

/// Minimal enclosing circle of at most three points.
fn min_circle_trivial(points: &[Point]) -> Circle {
    match *points {
        [] => Circle {
            center: Point::default(),
            radius: 0.0,
        },
        [p] => Circle {
            center: p,
            radius: 0.0,
        },
        [a, b] => circle_from_2_points(a, b),
        [a, b, c] => {
            // a pair may already determine the circle
            for (p, q) in [(a, b), (a, c), (b, c)] {
                let circle = circle_from_2_points(p, q);
                if encloses_all(circle, points) {
                    return circle;
                }
            }
            circle_from_3_points(a, b, c)
        }
        _ => unreachable!("boundary never holds more than three points"),
    }
}

/// One step of Welzl's recursion: the first `remaining` points are still
/// unprocessed, `boundary` holds the points known to lie on the circle.
fn welzl_step(points: &[Point], boundary: &mut Vec<Point>, remaining: usize) -> Circle {
    if remaining == 0 || boundary.len() == 3 {
        return min_circle_trivial(boundary);
    }

    let p = points[remaining - 1];

    let circle = welzl_step(points, boundary, remaining - 1);
    if circle.contains(p) {
        return circle;
    }

    // p is outside, so it must lie on the boundary of the result
    boundary.push(p);
    let circle = welzl_step(points, boundary, remaining - 1);
    boundary.pop();
    circle
}

/// Smallest circle containing every given point.
///
/// Randomized (Welzl) with a fixed seed so repeated runs agree.
pub fn min_enclosing_circle(points: &[Point]) -> Circle {
    let mut shuffled = points.to_vec();
    let mut rng = Pcg64Mcg::seed_from_u64(0);
    shuffled.shuffle(&mut rng);

    welzl_step(&shuffled, &mut Vec::new(), points.len())
}

/// Axis-aligned bounding box of the points.
pub fn bounds(points: &[Point]) -> (Point, Point) {
    assert!(!points.is_empty(), "bounds of an empty point list");

    let mut min = points[0];
    let mut max = points[0];
    for &p in &points[1..] {
        min = Point {
            x: min.x.min(p.x),
            y: min.y.min(p.y),
        };
        max = Point {
            x: max.x.max(p.x),
            y: max.y.max(p.y),
        };
    }

    (min, max)
}
