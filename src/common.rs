use std::{fmt, num};
use std::str::FromStr;

#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ParsePointError {
    ComponentsCount(usize),
    Coord(num::ParseFloatError),
}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parses `"X,Y"`, whitespace around either coordinate is ignored.
    fn from_str(s: &str) -> Result<Point, ParsePointError> {
        let coords: Vec<_> = s.split(',').map(str::trim).collect();
        match &coords[..] {
            &[x, y] => Ok(Point {
                x: x.parse().map_err(ParsePointError::Coord)?,
                y: y.parse().map_err(ParsePointError::Coord)?,
            }),
            other =>
                Err(ParsePointError::ComponentsCount(other.len())),
        }
    }
}

/// Line segment between two endpoints held by value.
///
/// No invariant is enforced: `a` and `b` are exactly what was given, and they
/// may coincide.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Segment<P = Point> {
    pub a: P,
    pub b: P,
}

impl<P> Segment<P> {
    pub fn new(a: P, b: P) -> Segment<P> {
        Segment { a, b, }
    }

    pub fn endpoints(&self) -> (&P, &P) {
        (&self.a, &self.b)
    }
}

impl<P> Segment<P> where P: PartialEq {
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }
}

impl<P> From<(P, P)> for Segment<P> {
    fn from((a, b): (P, P)) -> Segment<P> {
        Segment::new(a, b)
    }
}

impl<P> fmt::Display for Segment<P> where P: fmt::Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::cell::Cell;
    use super::{Point, Segment, ParsePointError};

    #[test]
    fn new_stores_endpoints() {
        let p = Point { x: 1.5, y: -2.0, };
        let q = Point { x: 10.0, y: 0.25, };
        let segment = Segment::new(p, q);
        assert_eq!(segment.a, p);
        assert_eq!(segment.b, q);
        assert_eq!(segment.endpoints(), (&p, &q));
        assert!(!segment.is_degenerate());
    }

    #[test]
    fn default_endpoints() {
        let segment: Segment = Segment::default();
        assert_eq!(segment.a, Point::default());
        assert_eq!(segment.b, Point::default());
        assert_eq!(segment.a, Point { x: 0., y: 0., });
    }

    #[test]
    fn degenerate() {
        let p = Point { x: 3., y: 4., };
        let segment = Segment::new(p, p);
        assert_eq!(segment.a, p);
        assert_eq!(segment.b, p);
        assert!(segment.is_degenerate());
    }

    #[test]
    fn from_tuple() {
        let segment = Segment::from((1, 2));
        assert_eq!(segment, Segment { a: 1, b: 2, });
    }

    #[test]
    fn by_value_copies() {
        let mut p = Point { x: 1., y: 1., };
        let segment = Segment::new(p, p);
        p.x = 100.;
        assert_eq!(segment.a, Point { x: 1., y: 1., });
        assert_eq!(p.x, 100.);
    }

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drop_is_independent() {
        let dropped_first = Rc::new(Cell::new(0));
        let dropped_second = Rc::new(Cell::new(0));
        let first = Segment::new(Tracked(dropped_first.clone()), Tracked(dropped_first.clone()));
        let second = Segment::new(Tracked(dropped_second.clone()), Tracked(dropped_second.clone()));
        drop(first);
        assert_eq!(dropped_first.get(), 2);
        assert_eq!(dropped_second.get(), 0);
        assert_eq!(Rc::strong_count(&second.a.0), 3);
        drop(second);
        assert_eq!(dropped_second.get(), 2);
    }

    #[test]
    fn display() {
        let segment = Segment::new(Point { x: 0.5, y: 1., }, Point { x: -2., y: 3.25, });
        assert_eq!(segment.to_string(), "(0.5, 1) -> (-2, 3.25)");
    }

    #[test]
    fn parse_point() {
        assert_eq!(" 1.5, -2".parse(), Ok(Point { x: 1.5, y: -2., }));
        assert_eq!("1".parse::<Point>(), Err(ParsePointError::ComponentsCount(1)));
        assert_eq!("1,2,3".parse::<Point>(), Err(ParsePointError::ComponentsCount(3)));
        match "a,b".parse::<Point>() {
            Err(ParsePointError::Coord(..)) =>
                (),
            other =>
                panic!("unexpected parse result: {:?}", other),
        }
    }
}
