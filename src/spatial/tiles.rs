//! N×N pattern representation and symmetry transforms
//!
//! Patterns are windows of palette labels cut from the quantized exemplar.
//! Reflections and rotations multiply the variety available from a small
//! exemplar; overlap agreement between two patterns drives the adjacency
//! table.

use crate::io::configuration::MAX_SYMMETRY;
use ndarray::Array2;

/// A square window of palette indices stored row-major (`x + y * size`)
///
/// Two patterns with identical content are equal regardless of where or how
/// they were sampled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    size: usize,
    cells: Vec<usize>,
}

impl Pattern {
    /// Build a pattern by evaluating `f(x, y)` for every cell
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> usize) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(f(x, y));
            }
        }
        Self { size, cells }
    }

    /// Cut the window whose top-left corner is `(x, y)` out of a sample
    ///
    /// Coordinates wrap around the sample edges, which is what periodic
    /// sampling needs; non-periodic callers only pass origins that fit.
    pub fn from_sample(sample: &Array2<usize>, x: usize, y: usize, size: usize) -> Self {
        let (rows, cols) = sample.dim();
        Self::from_fn(size, |dx, dy| {
            sample
                .get([(y + dy) % rows.max(1), (x + dx) % cols.max(1)])
                .copied()
                .unwrap_or(0)
        })
    }

    /// Side length
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Palette index at `(x, y)`
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.size && y < self.size {
            self.cells.get(x + y * self.size).copied()
        } else {
            None
        }
    }

    /// Row-major palette indices
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    /// Quarter turn: the result at `(x, y)` reads `(size - 1 - y, x)`
    #[must_use]
    pub fn rotate(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| self.get(n - 1 - y, x).unwrap_or(0))
    }

    /// Mirror across the vertical axis
    #[must_use]
    pub fn reflect(&self) -> Self {
        let n = self.size;
        Self::from_fn(n, |x, y| self.get(n - 1 - x, y).unwrap_or(0))
    }

    /// The first `count` symmetry variants in canonical order
    ///
    /// Order: identity, its reflection, quarter turn, its reflection, half
    /// turn, its reflection, three-quarter turn, its reflection. `count` is
    /// clamped to `1..=8`.
    pub fn symmetry_variants(&self, count: usize) -> Vec<Self> {
        let count = count.clamp(1, MAX_SYMMETRY);
        let mut variants = Vec::with_capacity(MAX_SYMMETRY);
        let mut rotated = self.clone();

        while variants.len() < count {
            let next = rotated.rotate();
            let reflected = rotated.reflect();
            variants.push(rotated);
            variants.push(reflected);
            rotated = next;
        }

        variants.truncate(count);
        variants
    }

    /// Whether `other`, shifted by `(dx, dy)` relative to `self`, matches on
    /// every overlapping cell
    ///
    /// Patterns of different sizes never agree.
    pub fn agrees(&self, other: &Self, dx: isize, dy: isize) -> bool {
        if self.size != other.size {
            return false;
        }

        let n = self.size as isize;
        let (xmin, xmax) = if dx < 0 { (0, dx + n) } else { (dx, n) };
        let (ymin, ymax) = if dy < 0 { (0, dy + n) } else { (dy, n) };

        for y in ymin..ymax {
            for x in xmin..xmax {
                let own = self.get(x as usize, y as usize);
                let shifted = other.get((x - dx) as usize, (y - dy) as usize);
                if own != shifted {
                    return false;
                }
            }
        }

        true
    }
}
