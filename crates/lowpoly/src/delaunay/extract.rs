//! Triangle extraction: walks the finished subdivision and lists its
//! triangular faces as point triples.

use std::collections::HashSet;

use crate::mesh::{HalfEdgeId, Mesh};
use crate::{Point, Result};

use super::predicates::ccw;

/// Lists every triangular face reachable from `start`, each as `[a, b, c]`
/// in counter-clockwise order.
///
/// Traverses the whole connected mesh with an explicit work stack (following
/// `rot` and `onext`, which together reach every half-edge in the
/// component), and for each primal half-edge not yet claimed by a face,
/// checks whether its left face closes after exactly three `lnext` steps.
/// The one face that's the complement of the convex hull — the unbounded
/// outer face — also closes in three steps whenever the hull itself is a
/// triangle or a triangle's worth of colinear points, but it traces
/// clockwise rather than counter-clockwise; the `ccw` check excludes it.
///
/// A `(origin, dest)` set records which directed edges already belong to an
/// emitted or rejected face, so each face is considered exactly once no
/// matter which of its three edges the stack visits first.
pub fn extract_triangles(mesh: &Mesh, start: HalfEdgeId) -> Result<Vec<[Point; 3]>> {
    let mut onext_seen = HashSet::new();
    let mut claimed = HashSet::new();
    let mut triangles = Vec::new();
    let mut stack = vec![start];

    while let Some(e) = stack.pop() {
        if !onext_seen.insert(e) {
            continue;
        }
        stack.push(e.rot());
        stack.push(mesh.onext(e)?);

        if !e.is_primal() {
            continue;
        }
        let key = (mesh.require_origin(e)?, mesh.require_dest(e)?);
        if claimed.contains(&key) {
            continue;
        }

        let e1 = mesh.lnext(e)?;
        let e2 = mesh.lnext(e1)?;
        let e3 = mesh.lnext(e2)?;
        claimed.insert(key);
        if e3 != e {
            continue;
        }

        let a = mesh.require_origin(e)?;
        let b = mesh.require_origin(e1)?;
        let c = mesh.require_origin(e2)?;
        claimed.insert((b, c));
        claimed.insert((c, a));

        if ccw(a, b, c) {
            triangles.push([a, b, c]);
        }
    }

    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delaunay::triangulate;

    #[test]
    fn single_triangle_yields_one_face() {
        let mut mesh = Mesh::new();
        let pts = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        let start = triangulate(&mut mesh, &pts).unwrap();
        let triangles = extract_triangles(&mesh, start).unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn square_yields_two_faces_covering_its_area() {
        let mut mesh = Mesh::new();
        let pts = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        let start = triangulate(&mut mesh, &pts).unwrap();
        let triangles = extract_triangles(&mesh, start).unwrap();
        assert_eq!(triangles.len(), 2);

        let shoelace = |[a, b, c]: [Point; 3]| -> i64 {
            ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() / 2
        };
        let total_area: i64 = triangles.iter().map(|t| shoelace(*t)).sum();
        assert_eq!(total_area, 16);
    }

    #[test]
    fn every_face_is_counter_clockwise() {
        let mut mesh = Mesh::new();
        let pts = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
            Point::new(5, 3),
            Point::new(3, 7),
        ];
        let start = triangulate(&mut mesh, &pts).unwrap();
        let triangles = extract_triangles(&mesh, start).unwrap();
        for [a, b, c] in triangles {
            assert!(ccw(a, b, c));
        }
    }
}
