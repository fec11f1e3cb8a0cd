//! **gridpath-geom** — integer geometry for grid searches.
//!
//! Provides [`Point`] and [`Range`], the coordinate types shared by the
//! `gridpath` crates. Coordinates use screen orientation: X grows right,
//! Y grows down, so "north" is `y - 1`.

mod point;
mod range;

pub use point::{COMPASS, Point};
pub use range::{Range, RangeIter};
