/// Fixed-capacity bitsets of live patterns
pub mod bitset;
/// Overlapping model and the observe/propagate run loop
pub mod executor;
/// Ban propagation keeping the wave arc consistent
pub mod propagation;
/// Exact and blended conversion of a wave into a bitmap
pub mod render;
/// Minimum-entropy cell selection and weighted pattern draws
pub mod selection;
/// Per-cell possibilities, entropy caches and support counters
pub mod wave;
