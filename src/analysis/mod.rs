//! Exemplar analysis: color quantization and pattern extraction

/// Exemplar color palette and index quantization
pub mod palette;
/// Pattern vocabulary extraction with symmetry variants and weights
pub mod patterns;
