//! Tests for palette extraction and quantization

#[cfg(test)]
mod tests {
    use overtile::analysis::palette::Palette;
    use overtile::spatial::bitmap::Bitmap;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];

    // Tests colors are indexed in row-major first-seen order
    // Verified by scanning columns before rows
    #[test]
    fn test_first_seen_order() {
        let bitmap =
            Bitmap::from_pixels(2, 2, vec![GREEN, RED, BLUE, GREEN]).unwrap();
        let (palette, sample) = Palette::quantize(&bitmap);

        assert_eq!(palette.colors(), &[GREEN, RED, BLUE]);
        assert_eq!(sample[[0, 0]], 0);
        assert_eq!(sample[[0, 1]], 1);
        assert_eq!(sample[[1, 0]], 2);
        assert_eq!(sample[[1, 1]], 0);
    }

    // Tests sample shape is (height, width)
    // Verified by allocating the sample as (width, height)
    #[test]
    fn test_sample_shape() {
        let bitmap = Bitmap::from_fn(3, 1, |x, _| [x as u8, 0, 0]);
        let (palette, sample) = Palette::quantize(&bitmap);
        assert_eq!(sample.dim(), (1, 3));
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.color(2), Some([2, 0, 0]));
        assert_eq!(palette.color(3), None);
    }

    // Tests empty bitmaps give empty palettes
    // Verified by seeding the palette with black
    #[test]
    fn test_empty_bitmap() {
        let (palette, sample) = Palette::quantize(&Bitmap::new(0, 0));
        assert!(palette.is_empty());
        assert_eq!(palette, Palette::default());
        assert_eq!(sample.len(), 0);
    }

    // Tests explicit palettes keep their order
    // Verified by sorting colors in from_colors
    #[test]
    fn test_from_colors() {
        let palette = Palette::from_colors(vec![BLUE, RED]);
        assert_eq!(palette.color(0), Some(BLUE));
        assert_eq!(palette.color(1), Some(RED));
    }
}
