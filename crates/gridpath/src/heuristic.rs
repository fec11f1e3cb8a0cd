use gridpath_geom::Point;

/// Manhattan (L1) distance between two points.
///
/// Admissible for 4-way movement with unit cost. With diagonal moves enabled
/// it overestimates, so the search may return a longer path.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f32 {
    let (dx, dy) = a.abs_delta(b);
    (dx + dy) as f32
}

/// Euclidean (straight-line) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f32 {
    let (dx, dy) = a.abs_delta(b);
    ((dx as f32).powi(2) + (dy as f32).powi(2)).sqrt()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f32 {
    let (dx, dy) = a.abs_delta(b);
    dx.max(dy) as f32
}

/// Octile distance with the default step costs (1.0 straight, 1.5 diagonal).
///
/// Exact on an obstacle-free grid with diagonal moves.
#[inline]
pub fn octile(a: Point, b: Point) -> f32 {
    let (dx, dy) = a.abs_delta(b);
    let (lo, hi) = (dx.min(dy), dx.max(dy));
    (hi - lo) as f32 + 1.5 * lo as f32
}

/// Remaining-cost estimate used to rank the open set.
///
/// To keep the result optimal, `estimate(p, goal)` must never exceed the true
/// cost of reaching `goal` from `p` (admissibility). Nothing checks this.
///
/// Any `Fn(Point, Point) -> f32` is a heuristic:
///
/// ```
/// use gridpath::{Grid, Point, find_path_with};
///
/// let grid = Grid::new(4, 4);
/// let dijkstra = |_: Point, _: Point| 0.0_f32;
/// let path = find_path_with(&grid, Point::new(0, 0), Point::new(3, 0), &dijkstra).unwrap();
/// assert_eq!(path.cost(), 3.0);
/// ```
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f32;
}

impl<F> Heuristic for F
where
    F: Fn(Point, Point) -> f32,
{
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f32 {
        self(from, to)
    }
}

/// The built-in distance functions, selectable by name (and from config when
/// the `serde` feature is on).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    #[default]
    Manhattan,
    Euclidean,
    Chebyshev,
    Octile,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Manhattan,
        Metric::Euclidean,
        Metric::Chebyshev,
        Metric::Octile,
    ];

    /// Lower-case name, as accepted by [`Metric::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Metric::Manhattan => "manhattan",
            Metric::Euclidean => "euclidean",
            Metric::Chebyshev => "chebyshev",
            Metric::Octile => "octile",
        }
    }

    pub fn from_name(name: &str) -> Option<Metric> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(name))
    }
}

impl Heuristic for Metric {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f32 {
        match self {
            Metric::Manhattan => manhattan(from, to),
            Metric::Euclidean => euclidean(from, to),
            Metric::Chebyshev => chebyshev(from, to),
            Metric::Octile => octile(from, to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Point = Point::new(1, 1);
    const B: Point = Point::new(4, 5);

    #[test]
    fn distances() {
        assert_eq!(manhattan(A, B), 7.0);
        assert_eq!(euclidean(A, B), 5.0);
        assert_eq!(chebyshev(A, B), 4.0);
        assert_eq!(octile(A, B), 1.0 + 4.5);
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        for m in Metric::ALL {
            assert_eq!(m.estimate(A, B), m.estimate(B, A), "{}", m.name());
            assert_eq!(m.estimate(B, B), 0.0, "{}", m.name());
        }
    }

    #[test]
    fn default_is_manhattan() {
        assert_eq!(Metric::default(), Metric::Manhattan);
    }

    #[test]
    fn names_round_trip() {
        for m in Metric::ALL {
            assert_eq!(Metric::from_name(m.name()), Some(m));
        }
        assert_eq!(Metric::from_name("Euclidean"), Some(Metric::Euclidean));
        assert_eq!(Metric::from_name("taxicab"), None);
    }

    #[test]
    fn closures_are_heuristics() {
        let scaled = |a: Point, b: Point| 2.0 * chebyshev(a, b);
        assert_eq!(scaled.estimate(A, B), 8.0);
    }
}
