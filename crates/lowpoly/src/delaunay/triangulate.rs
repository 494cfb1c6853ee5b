//! Guibas–Stolfi divide-and-conquer Delaunay triangulation.

use crate::error::{LowpolyError, Result};
use crate::mesh::{HalfEdgeId, Mesh};
use crate::Point;

use super::predicates::{above, ccw, in_circle, left_of, right_of};

/// Triangulates `points` in place on `mesh`, returning the leftmost
/// counter-clockwise-most edge of the resulting subdivision's convex hull
/// (its origin is the leftmost, lowest point).
///
/// Requires at least three points, no two of them coincident. Points need
/// not be pre-sorted; this sorts a local copy lexicographically by `(x, y)`
/// as the divide-and-conquer recursion requires.
pub fn triangulate(mesh: &mut Mesh, points: &[Point]) -> Result<HalfEdgeId> {
    if points.len() < 3 {
        return Err(LowpolyError::invalid(
            "triangulate requires at least three points",
        ));
    }
    let mut sorted = points.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    if sorted.len() != points.len() {
        return Err(LowpolyError::invalid(
            "triangulate requires distinct points; found a duplicate",
        ));
    }
    let (ldo, _rdo) = build(mesh, &sorted)?;
    Ok(ldo)
}

/// Recursive divide step. Returns `(ldo, rdo)`: the leftmost edge of the
/// convex hull of `pts` seen counter-clockwise from outside, and the
/// rightmost such edge.
fn build(mesh: &mut Mesh, pts: &[Point]) -> Result<(HalfEdgeId, HalfEdgeId)> {
    match pts.len() {
        0 | 1 => Err(LowpolyError::invariant(
            "triangulation subproblem needs at least two points",
        )),
        2 => {
            let e = mesh.make_edge(pts[0], pts[1]);
            Ok((e, e.sym()))
        }
        3 => {
            let ab = mesh.make_edge(pts[0], pts[1]);
            let bc = mesh.make_edge(pts[1], pts[2]);
            mesh.splice(ab.sym(), bc)?;
            if ccw(pts[0], pts[1], pts[2]) {
                mesh.connect(bc, ab)?;
                Ok((ab, bc.sym()))
            } else if ccw(pts[0], pts[2], pts[1]) {
                let ca = mesh.connect(bc, ab)?;
                Ok((ca.sym(), ca))
            } else {
                // Colinear: no triangle to close, just the open path a-b-c.
                Ok((ab, bc.sym()))
            }
        }
        n => {
            let mid = n / 2;
            let (ldo, ldi) = build(mesh, &pts[..mid])?;
            let (rdi, rdo) = build(mesh, &pts[mid..])?;
            merge(mesh, ldo, ldi, rdi, rdo)
        }
    }
}

/// Merges two adjacent Delaunay triangulations along their common tangents,
/// zippering the seam upward and flipping edges that violate the
/// empty-circumcircle property as it goes.
fn merge(
    mesh: &mut Mesh,
    mut ldo: HalfEdgeId,
    mut ldi: HalfEdgeId,
    mut rdi: HalfEdgeId,
    mut rdo: HalfEdgeId,
) -> Result<(HalfEdgeId, HalfEdgeId)> {
    // Compute the lower common tangent of the two hulls.
    loop {
        let rdi_origin = mesh.require_origin(rdi)?;
        if left_of(mesh, rdi_origin, ldi)? {
            ldi = mesh.lnext(ldi)?;
            continue;
        }
        let ldi_origin = mesh.require_origin(ldi)?;
        if right_of(mesh, ldi_origin, rdi)? {
            rdi = mesh.rprev(rdi)?;
            continue;
        }
        break;
    }

    let mut base = mesh.connect(rdi.sym(), ldi)?;
    if mesh.require_origin(ldi)? == mesh.require_origin(ldo)? {
        ldo = base.sym();
    }
    if mesh.require_origin(rdi)? == mesh.require_origin(rdo)? {
        rdo = base;
    }

    // Zipper the seam from the base edge up to the upper common tangent.
    loop {
        let mut lcand = mesh.onext(base.sym())?;
        if above(mesh, lcand, base)? {
            loop {
                let next = mesh.onext(lcand)?;
                let keep_going = in_circle(
                    mesh.require_dest(base)?,
                    mesh.require_origin(base)?,
                    mesh.require_dest(lcand)?,
                    mesh.require_dest(next)?,
                );
                if !keep_going {
                    break;
                }
                mesh.sever(lcand)?;
                lcand = next;
            }
        }

        let mut rcand = mesh.oprev(base)?;
        if above(mesh, rcand, base)? {
            loop {
                let next = mesh.oprev(rcand)?;
                let keep_going = in_circle(
                    mesh.require_dest(base)?,
                    mesh.require_origin(base)?,
                    mesh.require_dest(rcand)?,
                    mesh.require_dest(next)?,
                );
                if !keep_going {
                    break;
                }
                mesh.sever(rcand)?;
                rcand = next;
            }
        }

        let lvalid = above(mesh, lcand, base)?;
        let rvalid = above(mesh, rcand, base)?;
        if !lvalid && !rvalid {
            break;
        }

        let take_right = !lvalid
            || (rvalid
                && in_circle(
                    mesh.require_dest(lcand)?,
                    mesh.require_origin(lcand)?,
                    mesh.require_origin(rcand)?,
                    mesh.require_dest(rcand)?,
                ));
        if take_right {
            base = mesh.connect(rcand, base.sym())?;
        } else {
            base = mesh.connect(base.sym(), lcand.sym())?;
        }
    }

    Ok((ldo, rdo))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_fewer_than_three_points() {
        let mut mesh = Mesh::new();
        let err = triangulate(&mut mesh, &[Point::new(0, 0), Point::new(1, 1)]).unwrap_err();
        assert!(matches!(err, LowpolyError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_duplicate_points() {
        let mut mesh = Mesh::new();
        let pts = [Point::new(0, 0), Point::new(1, 1), Point::new(0, 0)];
        let err = triangulate(&mut mesh, &pts).unwrap_err();
        assert!(matches!(err, LowpolyError::InvalidInput { .. }));
    }

    #[test]
    fn triangulates_a_single_triangle() {
        let mut mesh = Mesh::new();
        let pts = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        let ldo = triangulate(&mut mesh, &pts).unwrap();
        assert_eq!(mesh.edge_count(), 3);
        assert!(mesh.origin(ldo).unwrap().is_some());
    }

    #[test]
    fn triangulates_a_square_into_two_triangles() {
        let mut mesh = Mesh::new();
        let pts = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        triangulate(&mut mesh, &pts).unwrap();
        // 4 hull edges + 1 diagonal.
        assert_eq!(mesh.edge_count(), 5);
    }
}
