//! Low-polygon triangulation core: quad-edge mesh + Delaunay divide-and-conquer.
//!
//! This crate holds only the algorithmic core of a low-poly image stylizer:
//! the planar-subdivision mesh and the Guibas–Stolfi triangulator over it.
//! Image decode, gradient extraction, and rasterization live in the
//! `lowpoly-cli` crate that consumes this one.
//!
//! The crate never logs or writes to stdio; all failures are returned as
//! [`LowpolyError`].

pub mod delaunay;
mod error;
pub mod mesh;
mod point;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{LowpolyError, Result};
pub use point::Point;

/// Common imports for callers driving a full triangulate → extract → free cycle.
pub mod prelude {
    pub use crate::delaunay::{extract_triangles, in_circle, triangulate};
    pub use crate::mesh::{HalfEdgeId, Mesh};
    pub use crate::{LowpolyError, Point, Result};
}
