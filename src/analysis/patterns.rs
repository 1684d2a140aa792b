//! Pattern vocabulary extraction from exemplar bitmaps

use crate::analysis::palette::Palette;
use crate::io::error::{Result, WfcError, invalid_configuration};
use crate::spatial::bitmap::{Bitmap, Rgb};
use crate::spatial::tiles::Pattern;
use ndarray::Array2;
use std::collections::HashMap;

/// Palette plus the weighted set of distinct N×N patterns of an exemplar
///
/// Pattern IDs are indices into [`Self::patterns`] and follow first-seen
/// order while scanning sampling origins row by row, variants in canonical
/// order. Weights count every (origin, variant) pair that produced the
/// pattern's content.
#[derive(Debug, Clone)]
pub struct PatternVocabulary {
    palette: Palette,
    patterns: Vec<Pattern>,
    weights: Vec<usize>,
    pattern_size: usize,
}

impl PatternVocabulary {
    /// Quantize an exemplar and extract its patterns
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The exemplar has no pixels
    /// - `pattern_size` is zero or `symmetry` is outside `1..=8`
    /// - `pattern_size` exceeds an exemplar dimension without periodic input
    pub fn extract(
        exemplar: &Bitmap,
        pattern_size: usize,
        symmetry: usize,
        periodic_input: bool,
    ) -> Result<Self> {
        if exemplar.is_empty() {
            return Err(WfcError::InvalidExemplar {
                reason: "exemplar has no pixels".to_string(),
            });
        }

        let (palette, sample) = Palette::quantize(exemplar);
        Self::from_sample(palette, &sample, pattern_size, symmetry, periodic_input)
    }

    /// Extract patterns from an already quantized sample of shape `(height, width)`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `pattern_size` is zero or `symmetry` is outside `1..=8`
    /// - `pattern_size` exceeds a sample dimension without periodic input
    /// - No sampling origin exists
    pub fn from_sample(
        palette: Palette,
        sample: &Array2<usize>,
        pattern_size: usize,
        symmetry: usize,
        periodic_input: bool,
    ) -> Result<Self> {
        if pattern_size == 0 {
            return Err(invalid_configuration(
                "pattern_size",
                &pattern_size,
                &"must be positive",
            ));
        }

        if !(1..=crate::io::configuration::MAX_SYMMETRY).contains(&symmetry) {
            return Err(invalid_configuration(
                "symmetry",
                &symmetry,
                &"must be between 1 and 8",
            ));
        }

        let (rows, cols) = sample.dim();
        let (origin_rows, origin_cols) = if periodic_input {
            (rows, cols)
        } else {
            (
                (rows + 1).saturating_sub(pattern_size),
                (cols + 1).saturating_sub(pattern_size),
            )
        };

        let mut ids: HashMap<Pattern, usize> = HashMap::new();
        let mut patterns = Vec::new();
        let mut weights: Vec<usize> = Vec::new();

        for y in 0..origin_rows {
            for x in 0..origin_cols {
                let base = Pattern::from_sample(sample, x, y, pattern_size);
                for variant in base.symmetry_variants(symmetry) {
                    if let Some(&id) = ids.get(&variant) {
                        if let Some(weight) = weights.get_mut(id) {
                            *weight += 1;
                        }
                    } else {
                        ids.insert(variant.clone(), patterns.len());
                        patterns.push(variant);
                        weights.push(1);
                    }
                }
            }
        }

        if patterns.is_empty() {
            return Err(invalid_configuration(
                "pattern_size",
                &pattern_size,
                &format!("no {pattern_size}x{pattern_size} window fits the {cols}x{rows} exemplar"),
            ));
        }

        Ok(Self {
            palette,
            patterns,
            weights,
            pattern_size,
        })
    }

    /// Number of distinct patterns (T)
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// True when no pattern was extracted
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Side length N of every pattern
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }

    /// Exemplar palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// All patterns in ID order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Pattern with the given ID
    pub fn pattern(&self, id: usize) -> Option<&Pattern> {
        self.patterns.get(id)
    }

    /// Occurrence counts in ID order
    pub fn weights(&self) -> &[usize] {
        &self.weights
    }

    /// Sum of all occurrence counts
    pub fn total_weight(&self) -> usize {
        self.weights.iter().sum()
    }

    /// Color of pattern `id` at offset `(x, y)`
    pub fn color_at(&self, id: usize, x: usize, y: usize) -> Option<Rgb> {
        self.pattern(id)
            .and_then(|pattern| pattern.get(x, y))
            .and_then(|label| self.palette.color(label))
    }
}
