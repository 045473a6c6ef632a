//! Plain geometry types shared across the crate.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point { Point { x, y } }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Size { Size { width, height } }

    pub fn area(&self) -> f64 { self.width * self.height }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: Point, size: Size) -> Rect { Rect { origin, size } }

    pub fn from_parts(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::new(Point::new(x, y), Size::new(width, height))
    }

    pub fn min(&self) -> Point { self.origin }

    pub fn max(&self) -> Point {
        Point::new(self.origin.x + self.size.width, self.origin.y + self.size.height)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width * 0.5,
            self.origin.y + self.size.height * 0.5,
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min().x..=self.max().x).contains(&point.x)
            && (self.min().y..=self.max().y).contains(&point.y)
    }

    pub fn contains_rect(&self, other: Rect) -> bool {
        self.min().x <= other.min().x
            && self.min().y <= other.min().y
            && self.max().x >= other.max().x
            && self.max().y >= other.max().y
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let min_x = f64::max(self.min().x, other.min().x);
        let max_x = f64::min(self.max().x, other.max().x);
        let min_y = f64::max(self.min().y, other.min().y);
        let max_y = f64::min(self.max().y, other.max().y);
        Rect {
            origin: Point::new(min_x, min_y),
            size: Size::new(f64::max(max_x - min_x, 0.), f64::max(max_y - min_y, 0.)),
        }
    }

    pub fn area(&self) -> f64 { self.size.area() }
}

pub trait Round {
    fn round(&self) -> Self;
}

impl Round for Rect {
    fn round(&self) -> Self {
        let min_rounded = self.min().round();
        let max_rounded = self.max().round();
        Rect {
            origin: min_rounded,
            size: Size {
                width: max_rounded.x - min_rounded.x,
                height: max_rounded.y - min_rounded.y,
            },
        }
    }
}

impl Round for Point {
    fn round(&self) -> Self {
        Point {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

impl Round for Size {
    fn round(&self) -> Self {
        Size {
            width: self.width.round(),
            height: self.height.round(),
        }
    }
}

pub trait IsWithin {
    fn is_within(&self, how_much: f64, other: Self) -> bool;
}

impl IsWithin for Rect {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.origin.is_within(how_much, other.origin) && self.size.is_within(how_much, other.size)
    }
}

impl IsWithin for Point {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.x.is_within(how_much, other.x) && self.y.is_within(how_much, other.y)
    }
}

impl IsWithin for Size {
    fn is_within(&self, how_much: f64, other: Self) -> bool {
        self.width.is_within(how_much, other.width) && self.height.is_within(how_much, other.height)
    }
}

impl IsWithin for f64 {
    fn is_within(&self, how_much: f64, other: Self) -> bool { (self - other).abs() < how_much }
}

pub trait SameAs: IsWithin + Sized {
    fn same_as(&self, other: Self) -> bool { self.is_within(0.1, other) }
}

impl SameAs for Rect {}
impl SameAs for Point {}
impl SameAs for Size {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_rect() {
        let rect = Rect::from_parts(10.4, 20.7, 100.0, 200.0);
        let rounded = rect.round();
        assert_eq!(rounded.origin.x, 10.0);
        assert_eq!(rounded.origin.y, 21.0);
        // size is computed as max - min, so 100.0 stays 100.0
        assert_eq!(rounded.size.width, 100.0);
        assert_eq!(rounded.size.height, 200.0);
    }

    #[test]
    fn round_point() {
        let point = Point::new(10.4, 20.7);
        let rounded = point.round();
        assert_eq!(rounded.x, 10.0);
        assert_eq!(rounded.y, 21.0);
    }

    #[test]
    fn is_within_f64() {
        let a = 10.0;
        let b = 10.05;
        assert!(a.is_within(0.1, b));
        assert!(!a.is_within(0.01, b));
    }

    #[test]
    fn is_within_rect() {
        let a = Rect::from_parts(10.0, 20.0, 100.0, 200.0);
        let b = Rect::from_parts(10.05, 20.08, 100.03, 200.02);
        assert!(a.is_within(0.1, b));
        assert!(!a.is_within(0.01, b));
    }

    #[test]
    fn same_as_rect() {
        let a = Rect::from_parts(10.0, 20.0, 100.0, 200.0);
        let b = Rect::from_parts(10.05, 20.05, 100.05, 200.05);
        assert!(a.same_as(b));
    }

    #[test]
    fn intersection() {
        let rect1 = Rect::from_parts(0.0, 0.0, 100.0, 100.0);
        let rect2 = Rect::from_parts(50.0, 50.0, 100.0, 100.0);
        let intersection = rect1.intersection(&rect2);

        assert_eq!(intersection.origin.x, 50.0);
        assert_eq!(intersection.origin.y, 50.0);
        assert_eq!(intersection.size.width, 50.0);
        assert_eq!(intersection.size.height, 50.0);
    }

    #[test]
    fn no_intersection() {
        let rect1 = Rect::from_parts(0.0, 0.0, 100.0, 100.0);
        let rect2 = Rect::from_parts(200.0, 200.0, 100.0, 100.0);
        let intersection = rect1.intersection(&rect2);

        assert_eq!(intersection.size.width, 0.0);
        assert_eq!(intersection.size.height, 0.0);
    }

    #[test]
    fn contains_point() {
        let rect = Rect::from_parts(0.0, 0.0, 100.0, 100.0);
        assert!(rect.contains(Point::new(50.0, 50.0)));
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(100.0, 100.0)));
        assert!(!rect.contains(Point::new(101.0, 50.0)));
        assert!(!rect.contains(Point::new(-1.0, 50.0)));
    }

    #[test]
    fn contains_rect() {
        let rect = Rect::from_parts(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::from_parts(10.0, 10.0, 80.0, 80.0);
        assert!(rect.contains_rect(inner));

        let outer = Rect::from_parts(-10.0, -10.0, 120.0, 120.0);
        assert!(!rect.contains_rect(outer));
    }

    #[test]
    fn center_and_area() {
        let rect = Rect::from_parts(0.0, 0.0, 100.0, 200.0);
        assert_eq!(rect.center(), Point::new(50.0, 100.0));
        assert_eq!(rect.area(), 20000.0);
    }
}
