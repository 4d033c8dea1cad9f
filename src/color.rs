/// 8-bit RGBA color as written to a [`crate::Surface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const WIREFRAME: Self = Self::rgb(0, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Packs as `0xAARRGGBB`; the low 24 bits are the `0RGB` layout minifb presents.
    pub const fn to_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    pub const fn from_u32(value: u32) -> Self {
        Self {
            a: ((value >> 24) & 0xFF) as u8,
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    /// Multiplies the RGB channels by `brightness` (clamped to [0, 1]),
    /// truncating toward zero. Alpha is kept.
    pub fn scaled(self, brightness: f32) -> Self {
        let k = brightness.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * k) as u8,
            g: (self.g as f32 * k) as u8,
            b: (self.b as f32 * k) as u8,
            a: self.a,
        }
    }
}
