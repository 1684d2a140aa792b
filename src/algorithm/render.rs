//! Conversion of a wave into an output bitmap
//!
//! A converged wave is stitched exactly: every pixel reads one cell's
//! observed pattern. An undecided wave is blended: every pixel averages the
//! colors predicted for it by all live patterns of all cells whose window
//! covers it.

use crate::algorithm::wave::WaveState;
use crate::analysis::patterns::PatternVocabulary;
use crate::spatial::bitmap::{BLACK, Bitmap};
use crate::spatial::grid::OutputGrid;

/// Rendered output and whether every pixel was determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    /// Output pixels, sized like the grid
    pub bitmap: Bitmap,
    /// False when some pixel had no contributing pattern
    pub success: bool,
}

/// Render the wave, exactly if it converged and blended otherwise
pub fn render(wave: &WaveState, vocabulary: &PatternVocabulary, grid: &OutputGrid) -> Rendering {
    wave.observed().map_or_else(
        || render_blended(wave, vocabulary, grid),
        |observed| render_observed(observed, vocabulary, grid),
    )
}

/// Stitch a fully observed wave
///
/// Pixels in the last N-1 rows or columns have no cell of their own in a
/// non-periodic grid, so they read the bottom-right cell of the pattern N-1
/// cells up or left.
pub fn render_observed(
    observed: &[usize],
    vocabulary: &PatternVocabulary,
    grid: &OutputGrid,
) -> Rendering {
    let n = grid.pattern_size();
    let (width, height) = (grid.width(), grid.height());
    let mut success = true;

    let bitmap = Bitmap::from_fn(width, height, |x, y| {
        let dx = if x + n <= width { 0 } else { n - 1 };
        let dy = if y + n <= height { 0 } else { n - 1 };
        let (cx, cy) = grid.wrap(x as isize - dx as isize, y as isize - dy as isize);

        let color = observed
            .get(grid.index(cx, cy))
            .and_then(|&pattern| vocabulary.color_at(pattern, dx, dy));
        color.unwrap_or_else(|| {
            success = false;
            BLACK
        })
    });

    Rendering { bitmap, success }
}

/// Average the colors predicted by every live pattern covering each pixel
///
/// Pixels without any contributor stay black and mark the render failed.
pub fn render_blended(
    wave: &WaveState,
    vocabulary: &PatternVocabulary,
    grid: &OutputGrid,
) -> Rendering {
    let n = grid.pattern_size();
    let mut success = true;

    let bitmap = Bitmap::from_fn(grid.width(), grid.height(), |x, y| {
        let mut contributors = 0_u64;
        let mut totals = [0_u64; 3];

        for dy in 0..n {
            for dx in 0..n {
                let (sx, sy) = grid.wrap(x as isize - dx as isize, y as isize - dy as isize);
                if grid.on_boundary(sx as isize, sy as isize) {
                    continue;
                }

                let Some(bits) = wave.possibilities(grid.index(sx, sy)) else {
                    continue;
                };
                for pattern in bits.iter() {
                    if let Some(color) = vocabulary.color_at(pattern, dx, dy) {
                        contributors += 1;
                        for (total, channel) in totals.iter_mut().zip(color) {
                            *total += u64::from(channel);
                        }
                    }
                }
            }
        }

        if contributors == 0 {
            success = false;
            return BLACK;
        }

        totals.map(|total| (total / contributors) as u8)
    });

    Rendering { bitmap, success }
}
