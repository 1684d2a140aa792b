//! Plain RGB raster shared by exemplars and generated output
//!
//! Codec conversion happens in [`crate::io::image`]; the algorithm only ever
//! sees this width × height grid of RGB triples.

use ndarray::Array2;

/// An opaque RGB color
pub type Rgb = [u8; 3];

/// Black, used for pixels with no determined color
pub const BLACK: Rgb = [0, 0, 0];

/// Width × height grid of RGB pixels stored row-major (`[y, x]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Array2<Rgb>,
}

impl Bitmap {
    /// Create a black bitmap
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), BLACK),
        }
    }

    /// Create a bitmap by evaluating `f(x, y)` at every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Self {
        Self {
            pixels: Array2::from_shape_fn((height, width), |(y, x)| f(x, y)),
        }
    }

    /// Create a bitmap from row-major pixels
    ///
    /// Returns `None` when `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Option<Self> {
        Array2::from_shape_vec((height, width), pixels)
            .ok()
            .map(|pixels| Self { pixels })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// True when the bitmap has no pixels
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color at `(x, y)`, if inside the bitmap
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels.get([y, x]).copied()
    }

    /// Overwrite the color at `(x, y)`; out-of-range writes are ignored
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut([y, x]) {
            *pixel = color;
        }
    }

    /// Underlying pixel array indexed `[y, x]`
    pub const fn pixels(&self) -> &Array2<Rgb> {
        &self.pixels
    }
}
