//! RGBA render target and color palette
//!
//! The canvas is an owned pixel buffer that any front-end can blit into a
//! real surface (`ImageData`, a framebuffer, a terminal preview). All
//! drawing stays in safe Rust; out-of-range pixels are silently dropped,
//! matching the forgiving fill semantics of an HTML canvas.

use crate::core::{Result, SvmToyError};
use serde::{Deserialize, Serialize};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Fixed session palette: marker and region colors per class, plus the
/// regression curve and tube colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Marker colors for placed points, indexed by class
    pub point_colors: [Rgb; 3],
    /// Surface colors for predicted regions, indexed by class
    pub region_colors: [Rgb; 3],
    /// Regression curve color
    pub curve_color: Rgb,
    /// Epsilon-tube color
    pub tube_color: Rgb,
}

impl Palette {
    /// Number of classes the palette covers
    pub fn classes(&self) -> usize {
        self.point_colors.len()
    }

    /// Marker color for a class, if the palette covers it
    pub fn point_color(&self, class: usize) -> Option<Rgb> {
        self.point_colors.get(class).copied()
    }

    /// Region color for a class, if the palette covers it
    pub fn region_color(&self, class: usize) -> Option<Rgb> {
        self.region_colors.get(class).copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            point_colors: [
                Rgb::new(0xAA, 0x00, 0x66),
                Rgb::new(0xFF, 0xFF, 0x00),
                Rgb::new(0x66, 0x66, 0xFF),
            ],
            region_colors: [
                Rgb::new(127, 0, 60),
                Rgb::new(127, 127, 0),
                Rgb::new(0, 0, 127),
            ],
            curve_color: Rgb::new(255, 255, 255),
            tube_color: Rgb::new(0, 0, 255),
        }
    }
}

/// RGBA pixel surface mutated in place by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a transparent canvas. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SvmToyError::InvalidCanvasSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA buffer, row-major
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent black
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Write one fully opaque pixel; coordinates outside the surface are
    /// ignored
    pub fn put_pixel(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels[offset] = color.r;
        self.pixels[offset + 1] = color.g;
        self.pixels[offset + 2] = color.b;
        self.pixels[offset + 3] = 255;
    }

    /// Fill a `w x h` rectangle anchored at `(x, y)`, clipped to the
    /// surface
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb) {
        for dy in 0..i64::from(h) {
            for dx in 0..i64::from(w) {
                self.put_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Replace the whole surface with a prepared full-size RGBA buffer
    pub fn blit(&mut self, rgba: &[u8]) -> Result<()> {
        if rgba.len() != self.pixels.len() {
            return Err(SvmToyError::DimensionMismatch {
                expected: self.pixels.len(),
                actual: rgba.len(),
            });
        }
        self.pixels.copy_from_slice(rgba);
        Ok(())
    }

    /// Read back one pixel as `[r, g, b, a]`
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ])
    }
}
