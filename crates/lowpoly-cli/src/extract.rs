//! Salient-point extraction: grayscale, Sobel gradient magnitude, adaptive
//! non-maximum suppression, plus salt noise and mandatory corners.

use std::collections::HashSet;

use image::RgbImage;
use lowpoly::Point;
use rand::Rng;

/// Picks up to `target` gradient-salient points from `img`, adds `salt`
/// uniformly random interior points and the four image corners, and
/// deduplicates the result.
///
/// `target` and `salt` are both best-effort upper bounds: gradient NMS may
/// surface fewer candidates than `target` on a very flat image, and
/// deduplication may merge a few salt points into existing candidates.
pub fn extract_points<R: Rng>(img: &RgbImage, target: usize, salt: usize, rng: &mut R) -> Vec<Point> {
    let (width, height) = img.dimensions();
    let gray = to_grayscale(img);
    let magnitude = sobel_magnitude(&gray, width as usize, height as usize);

    let mut points: HashSet<Point> = HashSet::new();
    for p in non_max_suppress(&magnitude, width as usize, height as usize, target) {
        points.insert(p);
    }
    for _ in 0..salt {
        let x = rng.gen_range(0..width as i64);
        let y = rng.gen_range(0..height as i64);
        points.insert(Point::new(x, y));
    }

    // Mandatory corners: guarantees the hull matches the image bounds.
    points.insert(Point::new(0, 0));
    points.insert(Point::new(width as i64 - 1, 0));
    points.insert(Point::new(width as i64 - 1, height as i64 - 1));
    points.insert(Point::new(0, height as i64 - 1));

    points.into_iter().collect()
}

/// Row-major luma matrix using the standard Rec. 601 weights.
fn to_grayscale(img: &RgbImage) -> Vec<f32> {
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
        })
        .collect()
}

const SOBEL_X: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_Y: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Sobel gradient magnitude at every interior pixel; border pixels (where
/// the 3x3 kernel would run off the image) are zero.
fn sobel_magnitude(gray: &[f32], width: usize, height: usize) -> Vec<f32> {
    let at = |x: usize, y: usize| gray[y * width + x];
    let mut out = vec![0.0f32; width * height];
    if width < 3 || height < 3 {
        return out;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            for (ky, row) in SOBEL_X.iter().enumerate() {
                for (kx, &weight) in row.iter().enumerate() {
                    let sample = at(x + kx - 1, y + ky - 1);
                    gx += weight as f32 * sample;
                    gy += SOBEL_Y[ky][kx] as f32 * sample;
                }
            }
            out[y * width + x] = (gx * gx + gy * gy).sqrt();
        }
    }
    out
}

/// Keeps pixels that are a strict local maximum in their 3x3 neighborhood
/// and above an adaptive threshold, then takes the `target` strongest.
/// The threshold is set so roughly the top quarter of the magnitude range
/// is eligible, cheaply approximating a percentile without a full sort of
/// every pixel.
fn non_max_suppress(magnitude: &[f32], width: usize, height: usize, target: usize) -> Vec<Point> {
    let max_magnitude = magnitude.iter().cloned().fold(0.0f32, f32::max);
    if max_magnitude <= 0.0 {
        return Vec::new();
    }
    let threshold = max_magnitude * 0.25;

    let at = |x: usize, y: usize| magnitude[y * width + x];
    let mut candidates = Vec::new();
    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let center = at(x, y);
            if center < threshold {
                continue;
            }
            let is_local_max = (-1..=1).all(|dy| {
                (-1..=1).all(|dx| {
                    if dx == 0 && dy == 0 {
                        true
                    } else {
                        center >= at((x as i32 + dx) as usize, (y as i32 + dy) as usize)
                    }
                })
            });
            if is_local_max {
                candidates.push((center, Point::new(x as i64, y as i64)));
            }
        }
    }

    candidates.sort_unstable_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
    candidates.truncate(target);
    candidates.into_iter().map(|(_, p)| p).collect()
}
