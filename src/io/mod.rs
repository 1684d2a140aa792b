//! Input/output: configuration, errors, image files and the command line

/// Command-line parsing and batch file processing
pub mod cli;
/// Constants and model/run configuration
pub mod configuration;
/// Error types
pub mod error;
/// PNG loading, saving and scaling
pub mod image;
/// Terminal progress display
pub mod progress;
