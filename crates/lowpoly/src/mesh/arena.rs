//! The quad-edge arena: a `slotmap`-keyed store of quad-edge quartets, plus
//! the O(1) navigators (`rot`, `sym`, `onext`, `oprev`, `lnext`, `rprev`,
//! `origin`, `dest`) derived from them.
//!
//! Each undirected edge of the subdivision is one [`QuadEdgeRecord`]: four
//! half-edges related by rotation, stored contiguously so `rot` is index
//! arithmetic rather than a pointer chase (design notes §9, "quartet form").

use slotmap::SlotMap;

use crate::error::{LowpolyError, Result};
use crate::Point;

slotmap::new_key_type! {
    /// Key for one quad-edge quartet (one undirected edge of the subdivision).
    pub struct QuadEdgeId;
}

/// A handle to one of the four directed half-edges of a quad-edge quartet.
///
/// `rot` is always in `0..4`. `rot == 0`/`rot == 2` are the primal half-edges
/// (origin/dest on real vertices); `rot == 1`/`rot == 3` are the dual
/// half-edges (no origin coordinate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HalfEdgeId {
    pub(crate) quad: QuadEdgeId,
    pub(crate) rot: u8,
}

impl HalfEdgeId {
    #[inline]
    fn new(quad: QuadEdgeId, rot: u8) -> Self {
        debug_assert!(rot < 4);
        Self { quad, rot }
    }

    /// Next half-edge in the rotation cycle `e[0] -> e[1] -> e[2] -> e[3] -> e[0]`.
    #[inline]
    pub fn rot(self) -> HalfEdgeId {
        HalfEdgeId::new(self.quad, (self.rot + 1) % 4)
    }

    /// Reverse-direction half-edge (`rot` applied twice).
    #[inline]
    pub fn sym(self) -> HalfEdgeId {
        HalfEdgeId::new(self.quad, (self.rot + 2) % 4)
    }

    /// True for the two half-edges with a real vertex origin (`rot` even).
    #[inline]
    pub fn is_primal(self) -> bool {
        self.rot % 2 == 0
    }
}

#[derive(Clone, Debug)]
pub(crate) struct QuadEdgeRecord {
    onext: [HalfEdgeId; 4],
    origin: [Option<Point>; 4],
}

/// The owning arena of quad-edge records backing a planar subdivision.
///
/// A `Mesh` is a single logical owner (enforced by Rust's borrow checker: all
/// mutators take `&mut Mesh`). Dropping a `Mesh` releases every record it
/// still holds; `free_graph` releases a connected subset early.
#[derive(Default)]
pub struct Mesh {
    pub(crate) edges: SlotMap<QuadEdgeId, QuadEdgeRecord>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            edges: SlotMap::with_key(),
        }
    }

    /// Number of live undirected edges (quad-edge quartets) in the arena.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn record(&self, id: QuadEdgeId) -> Result<&QuadEdgeRecord> {
        self.edges
            .get(id)
            .ok_or_else(|| LowpolyError::invariant("stale or freed quad-edge handle"))
    }

    fn record_mut(&mut self, id: QuadEdgeId) -> Result<&mut QuadEdgeRecord> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| LowpolyError::invariant("stale or freed quad-edge handle"))
    }

    /// Allocates a record of four half-edges wired into a single rotation
    /// cycle, with `tail`/`head` as the two primal origins and both
    /// endpoints initially isolated (their own `onext`).
    pub fn make_edge(&mut self, tail: Point, head: Point) -> HalfEdgeId {
        let quad = self.edges.insert(QuadEdgeRecord {
            // placeholder onext, patched below once we know our own id
            onext: [HalfEdgeId::new(QuadEdgeId::default(), 0); 4],
            origin: [Some(tail), None, Some(head), None],
        });
        let e0 = HalfEdgeId::new(quad, 0);
        let e1 = HalfEdgeId::new(quad, 1);
        let e2 = HalfEdgeId::new(quad, 2);
        let e3 = HalfEdgeId::new(quad, 3);
        let record = self
            .edges
            .get_mut(quad)
            .expect("just inserted this key");
        // Primal edges are isolated vertices: each is its own onext ring.
        record.onext[0] = e0;
        record.onext[2] = e2;
        // The dual pair forms the single enclosing face's ring.
        record.onext[1] = e3;
        record.onext[3] = e1;
        e0
    }

    /// Next half-edge CCW about `e`'s origin.
    #[inline]
    pub fn onext(&self, e: HalfEdgeId) -> Result<HalfEdgeId> {
        Ok(self.record(e.quad)?.onext[e.rot as usize])
    }

    fn set_onext(&mut self, e: HalfEdgeId, value: HalfEdgeId) -> Result<()> {
        self.record_mut(e.quad)?.onext[e.rot as usize] = value;
        Ok(())
    }

    /// Previous half-edge CW about `e`'s origin: `rot(onext(rot(e)))`.
    #[inline]
    pub fn oprev(&self, e: HalfEdgeId) -> Result<HalfEdgeId> {
        Ok(self.onext(e.rot())?.rot())
    }

    /// Next half-edge CCW about `e`'s left face: `rot(onext(sym(rot(e))))`.
    #[inline]
    pub fn lnext(&self, e: HalfEdgeId) -> Result<HalfEdgeId> {
        Ok(self.onext(e.rot().sym())?.rot())
    }

    /// Previous half-edge CW about `e`'s right face: `onext(sym(e))`.
    #[inline]
    pub fn rprev(&self, e: HalfEdgeId) -> Result<HalfEdgeId> {
        self.onext(e.sym())
    }

    /// Origin coordinate, `Some` only for primal half-edges.
    #[inline]
    pub fn origin(&self, e: HalfEdgeId) -> Result<Option<Point>> {
        Ok(self.record(e.quad)?.origin[e.rot as usize])
    }

    /// Destination coordinate: `origin(sym(e))`.
    #[inline]
    pub fn dest(&self, e: HalfEdgeId) -> Result<Option<Point>> {
        self.origin(e.sym())
    }

    /// Origin coordinate of a primal half-edge, or `InvariantViolated` if `e`
    /// is dual or its origin was never set.
    pub(crate) fn require_origin(&self, e: HalfEdgeId) -> Result<Point> {
        self.origin(e)?
            .ok_or_else(|| LowpolyError::invariant("half-edge has no origin coordinate"))
    }

    /// Destination coordinate of a primal half-edge, or `InvariantViolated`.
    pub(crate) fn require_dest(&self, e: HalfEdgeId) -> Result<Point> {
        self.require_origin(e.sym())
    }

    pub(crate) fn set_origin(&mut self, e: HalfEdgeId, value: Option<Point>) -> Result<()> {
        self.record_mut(e.quad)?.origin[e.rot as usize] = value;
        Ok(())
    }

    /// The fundamental topological operator: exchanges the `onext` rings of
    /// `a` and `b` (and of their duals), merging two rings or splitting one
    /// in two, always its own inverse.
    ///
    /// `a` and `b` must both be primal or both be dual; otherwise this is an
    /// `InvariantViolated` (a caller tried to splice incompatible edge kinds).
    pub fn splice(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<()> {
        if a.is_primal() != b.is_primal() {
            return Err(LowpolyError::invariant(
                "splice requires both half-edges to be primal or both dual",
            ));
        }
        let a_rot_onext = self.onext(a)?.rot();
        let b_rot_onext = self.onext(b)?.rot();
        self.swap_onext(a_rot_onext, b_rot_onext)?;
        self.swap_onext(a, b)?;
        Ok(())
    }

    fn swap_onext(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<()> {
        let a_next = self.onext(a)?;
        let b_next = self.onext(b)?;
        self.set_onext(a, b_next)?;
        self.set_onext(b, a_next)?;
        Ok(())
    }

    /// Releases every quad-edge record reachable from `seed` by following
    /// `onext` (dual rotation never leaves a quartet, so `onext`-reachability
    /// from any half-edge of a quad-edge covers every quad-edge connected to
    /// it). Safe to call with a handle into an already-partially-freed mesh.
    pub fn free_graph(&mut self, seed: HalfEdgeId) {
        let mut stack = vec![seed.quad];
        let mut seen = std::collections::HashSet::new();
        while let Some(quad) = stack.pop() {
            if !seen.insert(quad) {
                continue;
            }
            let Some(record) = self.edges.get(quad) else {
                continue;
            };
            for rot in 0..4u8 {
                let onext = record.onext[rot as usize];
                if !seen.contains(&onext.quad) {
                    stack.push(onext.quad);
                }
            }
        }
        for quad in seen {
            self.edges.remove(quad);
        }
    }

    /// Removes one quad-edge's record from the arena. Called by
    /// [`crate::mesh::sever`] after re-splicing around both endpoints.
    pub(crate) fn deallocate(&mut self, quad: QuadEdgeId) {
        self.edges.remove(quad);
    }
}
