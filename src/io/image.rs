//! PNG loading, saving and scaling at the edge of the algorithm

use crate::io::error::{Result, WfcError};
use crate::spatial::bitmap::Bitmap;
use image::{ImageBuffer, Rgb, RgbImage, imageops::FilterType};
use std::path::Path;

/// Load an exemplar image, dropping any alpha channel
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has no pixels
pub fn load_exemplar(path: &Path) -> Result<Bitmap> {
    let img = image::open(path)
        .map_err(|e| WfcError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?
        .to_rgb8();

    if img.width() == 0 || img.height() == 0 {
        return Err(WfcError::InvalidExemplar {
            reason: format!("'{}' has no pixels", path.display()),
        });
    }

    Ok(image_to_bitmap(&img))
}

/// Copy an RGB image into a bitmap
pub fn image_to_bitmap(img: &RgbImage) -> Bitmap {
    Bitmap::from_fn(img.width() as usize, img.height() as usize, |x, y| {
        img.get_pixel(x as u32, y as u32).0
    })
}

/// Copy a bitmap into an RGB image
pub fn bitmap_to_image(bitmap: &Bitmap) -> RgbImage {
    ImageBuffer::from_fn(bitmap.width() as u32, bitmap.height() as u32, |x, y| {
        Rgb(bitmap.get(x as usize, y as usize).unwrap_or_default())
    })
}

/// Resize a bitmap with nearest-neighbour sampling
///
/// Zero target dimensions keep the bitmap's own size on that axis.
pub fn scale_bitmap(bitmap: &Bitmap, width: usize, height: usize) -> Bitmap {
    let width = if width == 0 { bitmap.width() } else { width };
    let height = if height == 0 { bitmap.height() } else { height };
    if width == bitmap.width() && height == bitmap.height() {
        return bitmap.clone();
    }

    let scaled = image::imageops::resize(
        &bitmap_to_image(bitmap),
        width as u32,
        height as u32,
        FilterType::Nearest,
    );
    image_to_bitmap(&scaled)
}

/// Save a bitmap as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The bitmap is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn save_bitmap(bitmap: &Bitmap, output_path: &Path) -> Result<()> {
    if bitmap.is_empty() {
        return Err(WfcError::InvalidExemplar {
            reason: "cannot save an empty bitmap".to_string(),
        });
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| WfcError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    bitmap_to_image(bitmap)
        .save(output_path)
        .map_err(|e| WfcError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
