//! Composite constructors built from `make_edge` + `splice`.

use super::arena::{HalfEdgeId, Mesh};
use crate::error::{LowpolyError, Result};
use crate::Point;

impl Mesh {
    /// Three `make_edge` calls plus three `splice` calls pairing consecutive
    /// sym/next pairs. Returns the edge from `a` to `b`.
    pub fn make_triangle(&mut self, a: Point, b: Point, c: Point) -> HalfEdgeId {
        let ab = self.make_edge(a, b);
        let bc = self.make_edge(b, c);
        let ca = self.make_edge(c, a);
        self.splice(ab.sym(), bc)
            .expect("freshly made edges are always primal");
        self.splice(bc.sym(), ca)
            .expect("freshly made edges are always primal");
        self.splice(ca.sym(), ab)
            .expect("freshly made edges are always primal");
        ab
    }

    /// Builds the closed polygon boundary `points[0] -> points[1] -> ... ->
    /// points[n-1] -> points[0]`. Requires at least three points.
    pub fn make_polygon(&mut self, points: Vec<Point>) -> Result<HalfEdgeId> {
        if points.len() < 3 {
            return Err(LowpolyError::invalid(
                "make_polygon requires at least three vertices",
            ));
        }
        let n = points.len();
        let first_edge = self.make_edge(points[0], points[1]);
        let mut edge = first_edge;
        for i in 2..n {
            let next_edge = self.make_edge(points[i - 1], points[i]);
            self.splice(edge.sym(), next_edge)?;
            edge = next_edge;
        }
        let closing_edge = self.make_edge(points[n - 1], points[0]);
        self.splice(edge.sym(), closing_edge)?;
        self.splice(closing_edge.sym(), first_edge)?;
        Ok(first_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_triangle_left_face_cycles_in_three_lnext() {
        let mut mesh = Mesh::new();
        let a = Point::new(0, 0);
        let b = Point::new(4, 0);
        let c = Point::new(0, 4);
        let ab = mesh.make_triangle(a, b, c);
        for e in [ab, mesh.lnext(ab).unwrap(), mesh.lnext(mesh.lnext(ab).unwrap()).unwrap()] {
            let l1 = mesh.lnext(e).unwrap();
            let l2 = mesh.lnext(l1).unwrap();
            let l3 = mesh.lnext(l2).unwrap();
            assert_eq!(l3, e);
        }
        // The three left-face duals form a 3-cycle under onext.
        let d0 = ab.rot();
        let d1 = mesh.onext(d0).unwrap();
        let d2 = mesh.onext(d1).unwrap();
        assert_eq!(mesh.onext(d2).unwrap(), d0);
        assert_ne!(d1, d0);
        assert_ne!(d2, d0);
    }

    #[test]
    fn make_polygon_rejects_too_few_points() {
        let mut mesh = Mesh::new();
        let err = mesh
            .make_polygon(vec![Point::new(0, 0), Point::new(1, 0)])
            .unwrap_err();
        assert!(matches!(err, LowpolyError::InvalidInput { .. }));
    }

    #[test]
    fn make_polygon_closes_after_n_lnext() {
        let mut mesh = Mesh::new();
        let points = vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
            Point::new(-2, 2),
        ];
        let n = points.len();
        let start = mesh.make_polygon(points).unwrap();
        let mut e = start;
        for _ in 0..n {
            e = mesh.lnext(e).unwrap();
        }
        assert_eq!(e, start);
    }
}
