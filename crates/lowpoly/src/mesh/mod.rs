//! The quad-edge mesh: a topological data structure representing a planar
//! subdivision through a closed family of directed half-edges.
//!
//! `arena` owns the representation and the O(1) navigators; `primitives` and
//! `polygon` build local mutators and composite constructors on top of it.
//! Every public operation here preserves the twelve-way invariant described
//! in the crate's design notes: rotation cycles close after four steps, sym
//! is an involution, origin coordinates are consistent around each `onext`
//! ring, and so on.

mod arena;
mod polygon;
mod primitives;

pub use arena::{HalfEdgeId, Mesh, QuadEdgeId};
