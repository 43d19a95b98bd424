use super::{LineRasterizer, Pixel};
use crate::math::Vec2;

/// Xiaolin Wu's anti-aliased line.
///
/// Each column along the major axis gets two pixels straddling the ideal
/// line, weighted by [`rfpart`] and [`fpart`] of the line's minor coordinate
/// so their intensities always sum to 1. Pixels that would receive zero
/// coverage are not emitted.
#[derive(Clone, Copy, Debug, Default)]
pub struct WuRasterizer;

impl WuRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl LineRasterizer for WuRasterizer {
    fn rasterize(&self, from: Vec2, to: Vec2, out: &mut Vec<Pixel>) {
        let mut p0 = from;
        let mut p1 = to;

        if p0 == p1 {
            out.push(Pixel::solid(p0.x.round() as i32, p0.y.round() as i32));
            return;
        }

        // Walk shallow lines along x and steep lines along y by transposing.
        let steep = (p1.y - p0.y).abs() > (p1.x - p0.x).abs();
        if steep {
            p0 = p0.transposed();
            p1 = p1.transposed();
        }
        if p0.x > p1.x {
            std::mem::swap(&mut p0, &mut p1);
        }

        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

        let mut emit = |column: i32, y: f32| {
            let row = y.floor() as i32;
            for (row, intensity) in [(row, rfpart(y)), (row + 1, fpart(y))] {
                if intensity <= 0.0 {
                    continue;
                }
                let pixel = if steep {
                    Pixel::new(row, column, intensity)
                } else {
                    Pixel::new(column, row, intensity)
                };
                out.push(pixel);
            }
        };

        let x_start = p0.x.round();
        let y_start = p0.y + gradient * (x_start - p0.x);
        let x_end = p1.x.round();
        let y_end = p1.y + gradient * (x_end - p1.x);

        let first = x_start as i32;
        let last = x_end as i32;

        emit(first, y_start);
        if last == first {
            // Sub-pixel segment: both endpoints round to the same column.
            return;
        }

        for column in first + 1..last {
            let y = y_start + gradient * (column - first) as f32;
            emit(column, y);
        }

        emit(last, y_end);
    }
}

/// Rasterize a single anti-aliased segment into a new vector.
pub fn wu_line(from: Vec2, to: Vec2) -> Vec<Pixel> {
    let mut pixels = Vec::new();
    WuRasterizer.rasterize(from, to, &mut pixels);
    pixels
}

/// Fractional part of `x`.
#[inline]
pub fn fpart(x: f32) -> f32 {
    x - x.floor()
}

/// One minus the fractional part of `x`.
#[inline]
pub fn rfpart(x: f32) -> f32 {
    1.0 - fpart(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::BTreeMap;

    fn column_sums(pixels: &[Pixel], by_x: bool) -> BTreeMap<i32, f32> {
        let mut sums = BTreeMap::new();
        for p in pixels {
            let key = if by_x { p.x } else { p.y };
            *sums.entry(key).or_insert(0.0) += p.intensity;
        }
        sums
    }

    #[test]
    fn test_horizontal_line_has_no_fringe() {
        let pixels = wu_line(Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0));
        assert_eq!(pixels.len(), 6);
        for (x, p) in pixels.iter().enumerate() {
            assert_eq!((p.x, p.y), (x as i32, 0));
            assert_relative_eq!(p.intensity, 1.0);
        }
    }

    #[test]
    fn test_vertical_line_is_transposed_back() {
        let pixels = wu_line(Vec2::new(2.0, 0.0), Vec2::new(2.0, 4.0));
        let coords: Vec<_> = pixels.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(2, 0), (2, 1), (2, 2), (2, 3), (2, 4)]);
    }

    #[test]
    fn test_reversed_endpoints_give_same_pixels() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(7.0, 4.0);
        assert_eq!(wu_line(a, b), wu_line(b, a));
    }

    #[test]
    fn test_shallow_line_coverage_sums_to_one() {
        let pixels = wu_line(Vec2::new(0.0, 0.0), Vec2::new(4.0, 2.0));
        let sums = column_sums(&pixels, true);
        assert_eq!(sums.len(), 5);
        for sum in sums.values() {
            assert_relative_eq!(*sum, 1.0, epsilon = 1e-5);
        }
        // Half-way columns split evenly between two rows.
        let at_one: Vec<_> = pixels.iter().filter(|p| p.x == 1).collect();
        assert_eq!(at_one.len(), 2);
        assert_relative_eq!(at_one[0].intensity, 0.5);
        assert_relative_eq!(at_one[1].intensity, 0.5);
    }

    #[test]
    fn test_steep_line_coverage_sums_to_one_per_row() {
        let pixels = wu_line(Vec2::new(3.0, 10.0), Vec2::new(0.5, 1.0));
        let sums = column_sums(&pixels, false);
        assert_eq!(*sums.keys().next().unwrap(), 1);
        assert_eq!(*sums.keys().last().unwrap(), 10);
        for sum in sums.values() {
            assert_relative_eq!(*sum, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_intensities_in_unit_range() {
        let pixels = wu_line(Vec2::new(0.3, 0.7), Vec2::new(20.9, 13.2));
        assert!(!pixels.is_empty());
        for p in &pixels {
            assert!(p.intensity > 0.0 && p.intensity <= 1.0, "{p:?}");
        }
    }

    #[test]
    fn test_zero_length_segment_is_single_pixel() {
        let p = Vec2::new(2.4, 3.6);
        assert_eq!(wu_line(p, p), vec![Pixel::solid(2, 4)]);
    }

    #[test]
    fn test_sub_pixel_segment_emits_one_column() {
        let pixels = wu_line(Vec2::new(1.2, 1.0), Vec2::new(1.4, 1.0));
        assert_eq!(pixels, vec![Pixel::solid(1, 1)]);
    }

    #[test]
    fn test_fpart_rfpart() {
        assert_relative_eq!(fpart(2.25), 0.25);
        assert_relative_eq!(rfpart(2.25), 0.75);
        assert_relative_eq!(fpart(-0.25), 0.75);
        assert_relative_eq!(fpart(3.0), 0.0);
    }
}
