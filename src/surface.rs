//! Pixel targets the rasterizer writes into.

use crate::color::Color;

/// A 2D color surface addressed by `(x, y)` with the origin at the top-left.
///
/// Writes outside the surface are ignored.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
    fn clear(&mut self, color: Color);
    /// Reallocates to the new size. Previous contents are discarded.
    fn resize(&mut self, width: usize, height: usize);

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        for py in y..y.saturating_add(h) {
            for px in x..x.saturating_add(w) {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        for px in x..x + w {
            self.set_pixel(px, y, color);
            self.set_pixel(px, y + h - 1, color);
        }
        for py in y..y + h {
            self.set_pixel(x, py, color);
            self.set_pixel(x + w - 1, py, color);
        }
    }
}

/// In-memory surface of packed `0xAARRGGBB` words, row-major.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK.to_u32(); width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_u32(self.pixels[y * self.width + x]))
    }

    /// Raw words, ready for `minifb::Window::update_with_buffer`.
    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }
}

impl Surface for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.pixels[y as usize * self.width + x as usize] = color.to_u32();
    }

    fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_u32());
    }

    fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels = vec![Color::BLACK.to_u32(); width * height];
    }
}
