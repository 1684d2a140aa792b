//! Tests for exact and blended rendering

#[cfg(test)]
mod tests {
    use overtile::algorithm::render::{render, render_blended, render_observed};
    use overtile::algorithm::wave::WaveState;
    use overtile::analysis::patterns::PatternVocabulary;
    use overtile::spatial::bitmap::{BLACK, Bitmap};
    use overtile::spatial::grid::OutputGrid;

    const WHITE: [u8; 3] = [255, 255, 255];

    fn checker_color(x: usize, y: usize) -> [u8; 3] {
        if (x + y) % 2 == 0 { WHITE } else { BLACK }
    }

    fn checkerboard() -> PatternVocabulary {
        PatternVocabulary::extract(&Bitmap::from_fn(2, 2, checker_color), 2, 1, true).unwrap()
    }

    // Tests stitching a periodic observed wave
    // Verified by reading every pixel from offset (0, 0) of the wrong cell
    #[test]
    fn test_render_observed_periodic() {
        let grid = OutputGrid::new(4, 2, 2, true);
        let observed: Vec<usize> = (0..grid.len())
            .map(|cell| {
                let (x, y) = grid.coordinates(cell);
                (x + y) % 2
            })
            .collect();

        let rendering = render_observed(&observed, &checkerboard(), &grid);
        assert!(rendering.success);
        assert_eq!(rendering.bitmap, Bitmap::from_fn(4, 2, checker_color));
    }

    // Tests the last N-1 columns and rows read from the bottom-right of earlier cells
    // Verified by always using dx = dy = 0
    #[test]
    fn test_render_observed_boundary() {
        let grid = OutputGrid::new(3, 3, 2, false);
        // Boundary cells hold a wrong pattern and must not be read
        let observed: Vec<usize> = (0..grid.len())
            .map(|cell| {
                let (x, y) = grid.coordinates(cell);
                if grid.is_boundary_cell(cell) { 1 - (x + y) % 2 } else { (x + y) % 2 }
            })
            .collect();

        let rendering = render_observed(&observed, &checkerboard(), &grid);
        assert!(rendering.success);
        assert_eq!(rendering.bitmap, Bitmap::from_fn(3, 3, checker_color));
    }

    // Tests blending averages every covering live pattern
    // Verified by averaging only the (0, 0) offset of each cell
    #[test]
    fn test_render_blended_average() {
        let vocabulary = checkerboard();
        let grid = OutputGrid::new(2, 2, 2, true);
        let wave = WaveState::new(grid.len(), vocabulary.weights());

        let rendering = render_blended(&wave, &vocabulary, &grid);
        assert!(rendering.success);
        assert_eq!(rendering.bitmap.get(0, 0), Some([127, 127, 127]));
        assert_eq!(rendering.bitmap.get(1, 1), Some([127, 127, 127]));
    }

    // Tests a pixel without contributors is black and fails the render
    // Verified by skipping the zero-contributor check
    #[test]
    fn test_render_blended_zero_contributors() {
        let exemplar = Bitmap::from_pixels(2, 1, vec![[10, 20, 30], [50, 60, 70]]).unwrap();
        let vocabulary = PatternVocabulary::extract(&exemplar, 1, 1, true).unwrap();
        let grid = OutputGrid::new(2, 1, 1, true);
        let mut wave = WaveState::new(grid.len(), vocabulary.weights());
        wave.ban(0, 0);
        wave.ban(0, 1);
        wave.ban(1, 0);

        let rendering = render_blended(&wave, &vocabulary, &grid);
        assert!(!rendering.success);
        assert_eq!(rendering.bitmap.get(0, 0), Some(BLACK));
        assert_eq!(rendering.bitmap.get(1, 0), Some([50, 60, 70]));
    }

    // Tests render picks the exact path once the wave converged
    // Verified by always blending
    #[test]
    fn test_render_dispatch() {
        let exemplar = Bitmap::from_pixels(2, 1, vec![[10, 20, 30], [50, 60, 70]]).unwrap();
        let vocabulary = PatternVocabulary::extract(&exemplar, 1, 1, true).unwrap();
        let grid = OutputGrid::new(2, 1, 1, true);
        let mut wave = WaveState::new(grid.len(), vocabulary.weights());

        let blended = render(&wave, &vocabulary, &grid);
        assert_eq!(blended.bitmap.get(0, 0), Some([30, 40, 50]));

        wave.ban(0, 1);
        wave.ban(1, 0);
        wave.record_observation();
        let exact = render(&wave, &vocabulary, &grid);
        assert!(exact.success);
        assert_eq!(exact.bitmap.get(0, 0), Some([10, 20, 30]));
        assert_eq!(exact.bitmap.get(1, 0), Some([50, 60, 70]));
    }
}
