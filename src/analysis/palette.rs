//! Color palette extraction and exemplar quantization

use crate::spatial::bitmap::{Bitmap, Rgb};
use ndarray::Array2;
use std::collections::HashMap;

/// Distinct exemplar colors in first-seen order
///
/// A color's position in the palette is the integer label used for it in
/// every pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Build a palette from an explicit color list
    pub const fn from_colors(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// Label every exemplar pixel with its palette index
    ///
    /// Pixels are scanned row by row, so the top-left pixel always gets
    /// index 0. The returned sample has shape `(height, width)`.
    pub fn quantize(bitmap: &Bitmap) -> (Self, Array2<usize>) {
        let mut colors = Vec::new();
        let mut lookup: HashMap<Rgb, usize> = HashMap::new();
        let mut sample = Array2::zeros((bitmap.height(), bitmap.width()));

        for ((y, x), label) in sample.indexed_iter_mut() {
            let Some(color) = bitmap.get(x, y) else {
                continue;
            };
            *label = *lookup.entry(color).or_insert_with(|| {
                colors.push(color);
                colors.len() - 1
            });
        }

        (Self { colors }, sample)
    }

    /// Number of distinct colors
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// True when no colors were seen
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for a palette index
    pub fn color(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// All colors in index order
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
