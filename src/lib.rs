//! Overlapping-model wave function collapse for procedural image generation
//!
//! The system samples every N×N window of an exemplar image, derives which
//! windows may overlap in each direction, and fills a new output by
//! repeatedly collapsing the lowest-entropy cell and propagating the
//! consequences until every cell holds one pattern.

#![forbid(unsafe_code)]

/// Constraint solver: wave state, propagation, observation and rendering
pub mod algorithm;
/// Exemplar analysis and pattern extraction
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Entropy and sampling helpers
pub mod math;
/// Bitmaps, grids, patterns and adjacency
pub mod spatial;

pub use algorithm::executor::{GenerationReport, OverlappingModel, RunOutcome};
pub use io::configuration::{ModelConfig, RunConfig};
pub use io::error::{Result, WfcError};
