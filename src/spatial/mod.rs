//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - RGB bitmaps
//! - Output grid topology
//! - Patterns and their directional compatibility

/// Directions and the pattern compatibility table
pub mod adjacency;
/// Plain RGB raster
pub mod bitmap;
/// Output grid topology and boundary handling
pub mod grid;
/// N×N patterns with rotation, reflection and overlap checks
pub mod tiles;

pub use bitmap::{Bitmap, Rgb};
