use super::{LineRasterizer, Pixel};
use crate::math::Vec2;

/// Integer Bresenham walk between rounded endpoints. Every pixel is solid.
#[derive(Clone, Copy, Debug, Default)]
pub struct BresenhamRasterizer;

impl BresenhamRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl LineRasterizer for BresenhamRasterizer {
    fn rasterize(&self, from: Vec2, to: Vec2, out: &mut Vec<Pixel>) {
        walk(
            [from.x.round() as i32, from.y.round() as i32],
            [to.x.round() as i32, to.y.round() as i32],
            out,
        );
    }
}

/// Grid steps from `from` to `to`, both included.
pub fn bresenham_line(from: [i32; 2], to: [i32; 2]) -> Vec<Pixel> {
    let mut pixels = Vec::new();
    walk(from, to, &mut pixels);
    pixels
}

fn walk([mut x, mut y]: [i32; 2], [x1, y1]: [i32; 2], out: &mut Vec<Pixel>) {
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };

    // Positive error favours stepping in x, negative in y.
    let mut err = dx - dy;

    out.reserve(dx.max(dy) as usize + 1);
    loop {
        out.push(Pixel::solid(x, y));
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        // Both branches may fire: a diagonal step.
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
