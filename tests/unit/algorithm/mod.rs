pub mod executor;
pub mod render;
