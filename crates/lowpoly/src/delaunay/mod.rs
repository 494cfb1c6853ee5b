//! Delaunay triangulation over the quad-edge [`crate::mesh::Mesh`]: exact
//! integer predicates, the Guibas–Stolfi divide-and-conquer builder, and
//! triangle extraction.

mod extract;
mod predicates;
mod triangulate;

pub use extract::extract_triangles;
pub use predicates::{ccw, in_circle};
pub use triangulate::triangulate;
