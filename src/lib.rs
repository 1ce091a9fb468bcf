//! Polygon fixture generation and build-flag maintenance.
//!
//! [`make_points`] and the [`fixture`] module write test fixtures for a convex polygon
//! tool: regular polygons approximating circles, plus derived-geometry and drawing
//! requests. The [`flags`] module patches generated `flags.make` files which carry
//! redundant compiler defines.
use rustc_hash::FxHashSet as HashSet;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod circle;
mod color;
mod error;
pub mod fixture;
pub mod flags;
#[cfg(feature = "io")]
pub mod io;
pub mod plan;
mod point;
mod polygon;

pub use circle::*;
pub use color::*;
pub use error::*;
pub use fixture::{write_header, write_polygon, Command, Fixture, FixtureWriter, Header};
pub use point::*;
pub use polygon::PolygonRecord;

/// Area can be calculated from an object.
///
/// For a [`PolygonRecord`] this is the _plan_ area enclosed by the boundary.
pub trait Area {
    /// Calculate the area of an object.
    fn area(&self) -> f64;
}
