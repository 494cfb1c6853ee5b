//! Local topological mutators: `connect`, `sever`, `flip`, `insert_point`.
//!
//! `make_edge`, `splice`, and `free_graph` live on [`Mesh`] directly
//! (`arena.rs`) since they only touch the raw record layout; these four are
//! expressed in terms of that primitive layer, mirroring
//! `quad_edge_ref.cpp`'s `connect`/`sever`/`flip`/`insertPoint`.

use super::arena::{HalfEdgeId, Mesh};
use crate::error::{LowpolyError, Result};
use crate::Point;

/// Upper bound on a single face's boundary length before `insert_point`
/// gives up and reports a broken mesh, rather than looping forever on a
/// malformed `onext` ring.
const MAX_FACE_DEGREE: usize = 1 << 16;

impl Mesh {
    /// Creates a new primal edge from `dest(a)` to `origin(b)` lying in the
    /// face to the left of both `a` and `b`.
    pub fn connect(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<HalfEdgeId> {
        if !a.is_primal() || !b.is_primal() {
            return Err(LowpolyError::invariant("connect requires primal half-edges"));
        }
        let tail = self.require_dest(a)?;
        let head = self.require_origin(b)?;
        let e = self.make_edge(tail, head);
        let a_lnext = self.lnext(a)?;
        self.splice(e, a_lnext)?;
        self.splice(e.sym(), b)?;
        Ok(e)
    }

    /// Removes `e` from the subdivision, merging its two adjacent faces, and
    /// releases its record.
    pub fn sever(&mut self, e: HalfEdgeId) -> Result<()> {
        let e_oprev = self.oprev(e)?;
        self.splice(e, e_oprev)?;
        let sym_oprev = self.oprev(e.sym())?;
        self.splice(e.sym(), sym_oprev)?;
        self.deallocate(e.quad);
        Ok(())
    }

    /// True if `e`'s left face is bounded by exactly three edges.
    fn left_face_is_triangle(&self, e: HalfEdgeId) -> Result<bool> {
        let l1 = self.lnext(e)?;
        let l2 = self.lnext(l1)?;
        let l3 = self.lnext(l2)?;
        Ok(l3 == e)
    }

    /// Replaces `e` with the other diagonal of the quadrilateral formed by
    /// its two adjacent triangles. Requires both of `e`'s faces to already
    /// be triangles.
    pub fn flip(&mut self, e: HalfEdgeId) -> Result<()> {
        if !self.left_face_is_triangle(e)? || !self.left_face_is_triangle(e.sym())? {
            return Err(LowpolyError::invariant(
                "flip requires e to be bounded by exactly two triangles",
            ));
        }
        let prev = self.oprev(e)?;
        let sym_prev = self.oprev(e.sym())?;
        self.splice(e, prev)?;
        self.splice(e.sym(), sym_prev)?;
        let prev_lnext = self.lnext(prev)?;
        self.splice(e, prev_lnext)?;
        let sym_prev_lnext = self.lnext(sym_prev)?;
        self.splice(e.sym(), sym_prev_lnext)?;
        let new_origin = self.require_dest(prev)?;
        let new_dest = self.require_dest(sym_prev)?;
        self.set_origin(e, Some(new_origin))?;
        self.set_origin(e.sym(), Some(new_dest))?;
        Ok(())
    }

    /// Inserts `p` into the face whose boundary contains `face_edge`,
    /// fanning out a new spoke from `p` to each boundary vertex. Returns the
    /// first spoke, from `face_edge`'s origin to `p`.
    pub fn insert_point(&mut self, face_edge: HalfEdgeId, p: Point) -> Result<HalfEdgeId> {
        let origin = self
            .origin(face_edge)?
            .ok_or_else(|| LowpolyError::invalid("insert_point requires an edge with a known origin"))?;
        let first_spoke = self.make_edge(origin, p);
        self.splice(first_spoke, face_edge)?;

        let mut boundary_edge = face_edge;
        let mut spoke = first_spoke;
        for _ in 0..MAX_FACE_DEGREE {
            spoke = self.connect(boundary_edge, spoke.sym())?;
            self.set_origin(spoke.rot(), None)?;
            self.set_origin(spoke.rot().sym(), None)?;
            boundary_edge = self.oprev(spoke)?;
            if self.onext(boundary_edge)? == first_spoke {
                return Ok(first_spoke);
            }
        }
        Err(LowpolyError::invariant(
            "insert_point did not close after MAX_FACE_DEGREE spokes; face boundary is malformed",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(mesh: &mut Mesh) -> HalfEdgeId {
        mesh.make_polygon(vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ])
        .unwrap()
    }

    #[test]
    fn connect_closes_a_triangle() {
        let mut mesh = Mesh::new();
        let a = Point::new(0, 0);
        let b = Point::new(4, 0);
        let c = Point::new(0, 4);
        let ab = mesh.make_edge(a, b);
        let bc = mesh.make_edge(b, c);
        mesh.splice(ab.sym(), bc).unwrap();
        let ca = mesh.connect(bc, ab).unwrap();
        assert_eq!(mesh.origin(ca).unwrap(), Some(c));
        assert_eq!(mesh.dest(ca).unwrap(), Some(a));
        assert_eq!(mesh.lnext(mesh.lnext(mesh.lnext(ab).unwrap()).unwrap()).unwrap(), ab);
    }

    #[test]
    fn sever_then_reconnect_restores_topology() {
        let mut mesh = Mesh::new();
        let a = Point::new(0, 0);
        let b = Point::new(4, 0);
        let c = Point::new(0, 4);
        let ab = mesh.make_edge(a, b);
        let bc = mesh.make_edge(b, c);
        mesh.splice(ab.sym(), bc).unwrap();
        let ca = mesh.connect(bc, ab).unwrap();

        let before = mesh.edge_count();
        mesh.sever(ca).unwrap();
        assert_eq!(mesh.edge_count(), before - 1);
        let ca2 = mesh.connect(bc, ab).unwrap();
        assert_eq!(mesh.origin(ca2).unwrap(), Some(c));
        assert_eq!(mesh.dest(ca2).unwrap(), Some(a));
        assert_eq!(mesh.edge_count(), before);
    }

    #[test]
    fn flip_requires_two_triangles() {
        let mut mesh = Mesh::new();
        let e = square(&mut mesh);
        assert!(mesh.flip(e).is_err());
    }

    #[test]
    fn insert_point_fans_out_spokes() {
        let mut mesh = Mesh::new();
        let e = square(&mut mesh);
        let center = Point::new(2, 2);
        let spoke = mesh.insert_point(e, center).unwrap();
        assert_eq!(mesh.origin(spoke).unwrap(), Some(Point::new(0, 0)));
        assert_eq!(mesh.dest(spoke).unwrap(), Some(center));
        // Four boundary vertices means four spokes, hence 4 + 4 = 8 edges total.
        assert_eq!(mesh.edge_count(), 8);
    }
}
