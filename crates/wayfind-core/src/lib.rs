//! **wayfind-core**: geometry primitives shared by the wayfind crates.
//!
//! Cells of a maze are addressed by [`Point`]; the extent of a maze is a
//! [`Range`]. Both iterate and order row-major, which is also the order the
//! shortest-path engine uses to break ties between equally distant cells.

pub mod geom;

pub use geom::{Point, Range, RangeIter};
